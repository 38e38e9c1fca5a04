use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A custom error type for the Stripe API client.
#[derive(Error, Debug)]
pub enum StripeError {
    /// A parameter could not be represented in the form encoding.
    #[error("encoding error: {0}")]
    Encoding(String),
    /// The transport failed before a response status was available.
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
    /// The API answered with a non-success status.
    #[error("api error ({status}): {}", describe(.error))]
    Api {
        status: u16,
        error: Option<ApiError>,
    },
    /// The requested object does not exist.
    #[error("not found: {}", describe(.0))]
    NotFound(Option<ApiError>),
    /// A success body did not match the expected model.
    #[error("decoding error: {0}")]
    Decoding(#[from] serde_json::Error),
    /// Client configuration is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),
}

impl StripeError {
    /// Builds the error for a non-success response, decoding the error body when possible.
    pub fn from_status(status: u16, body: &str) -> Self {
        let error = serde_json::from_str::<ApiErrorResponse>(body)
            .ok()
            .map(|response| response.error);
        if status == 404 {
            StripeError::NotFound(error)
        } else {
            StripeError::Api { status, error }
        }
    }

    /// HTTP status carried by the error, if the remote service answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            StripeError::Api { status, .. } => Some(*status),
            StripeError::NotFound(_) => Some(404),
            StripeError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True when the failure came from the network or the remote service.
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            StripeError::Request(_) | StripeError::Api { .. } | StripeError::NotFound(_)
        )
    }
}

fn describe(error: &Option<ApiError>) -> String {
    match error {
        Some(ApiError {
            message: Some(message),
            ..
        }) => message.clone(),
        Some(ApiError { error_type, .. }) => error_type.clone(),
        None => "no error body".to_string(),
    }
}

/// Envelope the API wraps error objects in.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ApiErrorResponse {
    pub error: ApiError,
}

/// The error object returned alongside a non-success status.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ApiError {
    /// `api_error`, `card_error`, `idempotency_error` or `invalid_request_error`.
    #[serde(rename = "type")]
    pub error_type: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub decline_code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    /// Parameter the error relates to, in flattened form (`line_items[0][price]`).
    #[serde(default)]
    pub param: Option<String>,
    #[serde(default)]
    pub doc_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_decodes_error_body() {
        let body = r#"{"error":{"type":"invalid_request_error","code":"parameter_missing","message":"Missing required param: success_url.","param":"success_url"}}"#;
        let error = StripeError::from_status(400, body);
        match &error {
            StripeError::Api { status, error } => {
                assert_eq!(*status, 400);
                let error = error.as_ref().unwrap();
                assert_eq!(error.error_type, "invalid_request_error");
                assert_eq!(error.param.as_deref(), Some("success_url"));
            }
            other => panic!("Expected Api variant, got {other:?}"),
        }
        assert_eq!(error.status(), Some(400));
        assert!(error.is_request_error());
        assert_eq!(
            error.to_string(),
            "api error (400): Missing required param: success_url."
        );
    }

    #[test]
    fn test_from_status_maps_404_to_not_found() {
        let body = r#"{"error":{"type":"invalid_request_error","code":"resource_missing","message":"No such checkout.session: 'cs_missing'"}}"#;
        let error = StripeError::from_status(404, body);
        assert!(matches!(error, StripeError::NotFound(Some(_))));
        assert_eq!(error.status(), Some(404));
    }

    #[test]
    fn test_from_status_tolerates_unparseable_body() {
        let error = StripeError::from_status(502, "<html>Bad Gateway</html>");
        match error {
            StripeError::Api { status, error } => {
                assert_eq!(status, 502);
                assert!(error.is_none());
            }
            other => panic!("Expected Api variant, got {other:?}"),
        }
    }

    #[test]
    fn test_encoding_and_config_are_not_request_errors() {
        assert!(!StripeError::Encoding("bad".into()).is_request_error());
        assert!(!StripeError::Config("missing".into()).is_request_error());
        assert_eq!(StripeError::Encoding("bad".into()).status(), None);
    }
}
