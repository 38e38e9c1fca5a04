use futures::future::BoxFuture;
use reqwest::{Method, header::HeaderMap};
use serde::de::DeserializeOwned;

use crate::error::StripeError;

/// A fully assembled call against the API, before it hits the network.
///
/// `path` is relative to the versioned base (`/checkout/sessions/cs_123`); `query`
/// and `body` are already flattened into bracket-notation pairs.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Vec<(String, String)>,
    pub headers: HeaderMap,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: Vec::new(),
            headers: HeaderMap::new(),
        }
    }

    pub fn query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn body(mut self, body: Vec<(String, String)>) -> Self {
        self.body = body;
        self
    }

    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }
}

/// Raw status and body returned by a dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decodes a success body into `T`, or turns a failure status into the matching error.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, StripeError> {
        if !self.is_success() {
            log::warn!("API responded with status {}", self.status);
            return Err(StripeError::from_status(self.status, &self.body));
        }
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// The seam between the route façades and the network.
///
/// Implementations perform exactly one round trip per call and must not retry.
/// The returned future carries the raw response; status handling and decoding
/// happen in [`ApiResponse::decode`].
pub trait Dispatch: Send + Sync {
    fn send(&self, request: ApiRequest) -> BoxFuture<'_, Result<ApiResponse, StripeError>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Thing {
        id: String,
    }

    #[test]
    fn test_decode_success_body() {
        let thing: Thing = ApiResponse::new(200, r#"{"id":"x","extra":1}"#)
            .decode()
            .unwrap();
        assert_eq!(thing.id, "x");
    }

    #[test]
    fn test_decode_failure_status_skips_body_decoding() {
        let result = ApiResponse::new(401, r#"{"error":{"type":"invalid_request_error"}}"#)
            .decode::<Thing>();
        assert!(matches!(
            result,
            Err(StripeError::Api { status: 401, error: Some(_) })
        ));
    }

    #[test]
    fn test_decode_mismatched_body() {
        let result = ApiResponse::new(200, r#"{"object":"checkout.session"}"#).decode::<Thing>();
        assert!(matches!(result, Err(StripeError::Decoding(_))));
    }
}
