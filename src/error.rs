use stripe_checkout::StripeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("API key not set, pass --api-key or set STRIPE_API_KEY")]
    MissingApiKey,
    #[error("Failed to serialize output")]
    SerdeJson(#[from] serde_json::Error),
    #[error("Stripe request failed: {0}")]
    Stripe(#[from] StripeError),
}

impl CliError {
    /// Process exit code for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::MissingApiKey => 2,
            CliError::SerdeJson(_) => 1,
            CliError::Stripe(StripeError::NotFound(_)) => 4,
            CliError::Stripe(e) if e.is_request_error() => 3,
            CliError::Stripe(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::MissingApiKey.exit_code(), 2);
        assert_eq!(CliError::from(StripeError::NotFound(None)).exit_code(), 4);
        assert_eq!(
            CliError::from(StripeError::Api {
                status: 500,
                error: None
            })
            .exit_code(),
            3
        );
        assert_eq!(
            CliError::from(StripeError::Encoding("x".into())).exit_code(),
            1
        );
    }
}
