pub mod endpoint;
pub mod list;
pub mod prices;
pub mod sessions;

pub use endpoint::{ApiRequest, ApiResponse, Dispatch};
pub use list::{List, ListParams};

use serde::de::DeserializeOwned;

use crate::error::StripeError;

/// Sends one request and decodes the response into the declared model.
pub(crate) async fn execute<T: DeserializeOwned>(
    dispatcher: &dyn Dispatch,
    request: ApiRequest,
) -> Result<T, StripeError> {
    log::debug!(
        "{} {} ({} query, {} body params)",
        request.method,
        request.path,
        request.query.len(),
        request.body.len()
    );
    dispatcher.send(request).await?.decode()
}

/// `{collection}/{id}`, refusing ids that would address a different resource.
///
/// Dot segments are normalised away by URL parsing and `%` would smuggle in an
/// encoded separator, so both are rejected along with `/`, `?` and `#`.
pub(crate) fn resource_path(collection: &str, id: &str) -> Result<String, StripeError> {
    if id.is_empty() || id == "." || id == ".." || id.contains(['/', '?', '#', '%']) {
        return Err(StripeError::Encoding(format!(
            "`{id}` is not a valid object id"
        )));
    }
    Ok(format!("{collection}/{id}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_path() {
        assert_eq!(
            resource_path("/checkout/sessions", "cs_123").unwrap(),
            "/checkout/sessions/cs_123"
        );
        assert!(matches!(
            resource_path("/prices", ""),
            Err(StripeError::Encoding(_))
        ));
        assert!(matches!(
            resource_path("/prices", "price_1/../x"),
            Err(StripeError::Encoding(_))
        ));
        for id in [".", "..", "cs_1%2Fline_items", "%2E%2E"] {
            assert!(
                matches!(resource_path("/checkout/sessions", id), Err(StripeError::Encoding(_))),
                "{id} should be rejected"
            );
        }
        assert_eq!(
            resource_path("/prices", "price_1.v2").unwrap(),
            "/prices/price_1.v2"
        );
    }
}
