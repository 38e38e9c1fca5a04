pub mod request_types;
pub mod response_types;

pub use request_types::*;
pub use response_types::*;

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::{
    client::StripeClient,
    endpoints::{
        ApiRequest, Dispatch, execute,
        list::{ListParams, expand_query},
        resource_path,
    },
    error::StripeError,
};

const PRICES: &str = "/prices";

impl StripeClient {
    /// Route façade for `/v1/prices`.
    pub fn prices(&self) -> PriceRoutes {
        PriceRoutes::new(self.dispatcher())
    }
}

/// Operations on the Price resource.
#[derive(Clone)]
pub struct PriceRoutes {
    /// Sent with every request made through this façade.
    pub headers: HeaderMap,
    dispatcher: Arc<dyn Dispatch>,
}

impl PriceRoutes {
    pub fn new(dispatcher: Arc<dyn Dispatch>) -> Self {
        Self {
            headers: HeaderMap::new(),
            dispatcher,
        }
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// `POST /v1/prices`
    pub async fn create(&self, params: CreatePriceParams) -> Result<Price, StripeError> {
        let request = ApiRequest::post(PRICES)
            .body(params.into_form()?)
            .headers(self.headers.clone());
        execute(self.dispatcher.as_ref(), request).await
    }

    /// `GET /v1/prices/{id}`
    pub async fn retrieve(&self, id: &str, expand: &[&str]) -> Result<Price, StripeError> {
        let request = ApiRequest::get(resource_path(PRICES, id)?)
            .query(expand_query(expand.iter().copied())?)
            .headers(self.headers.clone());
        execute(self.dispatcher.as_ref(), request).await
    }

    /// `GET /v1/prices`. Filters such as `active`, `currency`, `product` or `type`
    /// go through [`ListParams::extra`].
    pub async fn list_all(&self, filter: Option<ListParams>) -> Result<PriceList, StripeError> {
        let query = match filter {
            Some(filter) => filter.into_query()?,
            None => Vec::new(),
        };
        let request = ApiRequest::get(PRICES)
            .query(query)
            .headers(self.headers.clone());
        execute(self.dispatcher.as_ref(), request).await
    }
}
