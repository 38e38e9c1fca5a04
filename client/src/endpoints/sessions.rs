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

const SESSIONS: &str = "/checkout/sessions";

impl StripeClient {
    /// Route façade for `/v1/checkout/sessions`.
    pub fn sessions(&self) -> SessionRoutes {
        SessionRoutes::new(self.dispatcher())
    }
}

/// Operations on Checkout Sessions and their line items.
///
/// Holds the default headers and a shared dispatcher. Cloning is cheap and every
/// call is independent, so one instance can serve many tasks.
#[derive(Clone)]
pub struct SessionRoutes {
    /// Sent with every request made through this façade, e.g. `Idempotency-Key`.
    pub headers: HeaderMap,
    dispatcher: Arc<dyn Dispatch>,
}

impl SessionRoutes {
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

    /// `POST /v1/checkout/sessions`
    ///
    /// # Errors
    /// `Encoding` if a parameter cannot be form encoded (checked before any I/O),
    /// otherwise the request and decoding errors of [`ApiResponse::decode`](crate::endpoints::ApiResponse::decode).
    pub async fn create(&self, params: CreateSessionParams) -> Result<Session, StripeError> {
        let request = ApiRequest::post(SESSIONS)
            .body(params.into_form()?)
            .headers(self.headers.clone());
        execute(self.dispatcher.as_ref(), request).await
    }

    /// `GET /v1/checkout/sessions/{id}`, optionally expanding nested objects such
    /// as `line_items`.
    pub async fn retrieve(&self, id: &str, expand: &[&str]) -> Result<Session, StripeError> {
        let request = ApiRequest::get(resource_path(SESSIONS, id)?)
            .query(expand_query(expand.iter().copied())?)
            .headers(self.headers.clone());
        execute(self.dispatcher.as_ref(), request).await
    }

    /// `GET /v1/checkout/sessions`. Resource filters (`payment_intent`,
    /// `subscription`) go through [`ListParams::extra`].
    pub async fn list_all(&self, filter: Option<ListParams>) -> Result<SessionList, StripeError> {
        let query = match filter {
            Some(filter) => filter.into_query()?,
            None => Vec::new(),
        };
        let request = ApiRequest::get(SESSIONS)
            .query(query)
            .headers(self.headers.clone());
        execute(self.dispatcher.as_ref(), request).await
    }

    /// `GET /v1/checkout/sessions/{session}/line_items`
    pub async fn retrieve_line_items(
        &self,
        session: &str,
        filter: Option<ListParams>,
    ) -> Result<LineItemList, StripeError> {
        let query = match filter {
            Some(filter) => filter.into_query()?,
            None => Vec::new(),
        };
        let path = format!("{}/line_items", resource_path(SESSIONS, session)?);
        let request = ApiRequest::get(path)
            .query(query)
            .headers(self.headers.clone());
        execute(self.dispatcher.as_ref(), request).await
    }
}
