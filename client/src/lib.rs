#[macro_use]
mod macros;

pub mod client;
pub mod endpoints;
pub mod error;
pub mod form;

// Re-export commonly used types
pub use client::{ClientConfig, HttpDispatcher, StripeClient};
pub use endpoints::{
    ApiRequest, ApiResponse, Dispatch, List, ListParams,
    prices::{CreatePriceParams, Price, PriceList, PriceRoutes},
    sessions::{
        CreateSessionParams, LineItem, LineItemList, Session, SessionLineItem, SessionList,
        SessionRoutes,
    },
};
pub use error::{ApiError, StripeError};
pub use form::{FormParams, FormValue};
