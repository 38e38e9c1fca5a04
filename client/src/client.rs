use std::{fmt, sync::Arc, time::Duration};

use futures::{FutureExt, TryFutureExt, future::BoxFuture};
use reqwest::{
    Client, Method,
    header::{HeaderMap, HeaderValue},
};

use crate::{
    endpoints::{ApiRequest, ApiResponse, Dispatch},
    error::StripeError,
};

pub const DEFAULT_BASE_URL: &str = "https://api.stripe.com";
pub const DEFAULT_API_VERSION: &str = "v1";

/// Connection settings for [`HttpDispatcher`].
///
/// Nothing here is global: the base URL and API version travel with the client,
/// so tests and proxies can point it anywhere.
#[derive(Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub base_url: String,
    /// Path segment prepended to every route, `v1`.
    pub api_version: String,
    /// Pins the API release through the `Stripe-Version` header.
    pub stripe_version: Option<String>,
    /// Whole-request timeout handed to the HTTP client.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new<K: Into<String>>(api_key: K) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            stripe_version: None,
            timeout: None,
        }
    }

    /// Reads `STRIPE_API_KEY`, and optionally `STRIPE_API_BASE` and `STRIPE_VERSION`.
    pub fn from_env() -> Result<Self, StripeError> {
        let api_key = std::env::var("STRIPE_API_KEY")
            .map_err(|_| StripeError::Config("STRIPE_API_KEY not set".into()))?;
        let mut config = Self::new(api_key);
        if let Ok(base_url) = std::env::var("STRIPE_API_BASE") {
            config.base_url = base_url;
        }
        config.stripe_version = std::env::var("STRIPE_VERSION").ok();
        Ok(config)
    }

    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_stripe_version<S: Into<String>>(mut self, version: S) -> Self {
        self.stripe_version = Some(version.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Full URL for a route path such as `/checkout/sessions`.
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.api_version.trim_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("stripe_version", &self.stripe_version)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// [`Dispatch`] over HTTPS with reqwest.
///
/// Authenticates with the secret key as a bearer token, sends GET parameters as a
/// query string and POST parameters as an `application/x-www-form-urlencoded` body.
#[derive(Clone)]
pub struct HttpDispatcher {
    client: Client,
    config: ClientConfig,
}

impl HttpDispatcher {
    /// Builds a reqwest client for the given settings
    ///
    /// # Arguments
    ///
    /// * `config` - Key, base URL and optional timeout. The timeout is applied to the whole request.
    ///
    /// # Returns
    ///
    /// The dispatcher, or [`StripeError::Request`] if the TLS backend cannot be initialised
    pub fn new(config: ClientConfig) -> Result<Self, StripeError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    /// Wraps an existing reqwest client, e.g. one with a proxy configured.
    pub fn with_client(client: Client, config: ClientConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn default_headers(&self) -> Result<HeaderMap, StripeError> {
        let mut headers = HeaderMap::new();
        if let Some(version) = &self.config.stripe_version {
            let value = HeaderValue::from_str(version)
                .map_err(|e| StripeError::Config(format!("invalid Stripe-Version: {e}")))?;
            headers.insert("stripe-version", value);
        }
        Ok(headers)
    }
}

impl Dispatch for HttpDispatcher {
    fn send(&self, request: ApiRequest) -> BoxFuture<'_, Result<ApiResponse, StripeError>> {
        let mut headers = match self.default_headers() {
            Ok(headers) => headers,
            Err(e) => return futures::future::ready(Err(e)).boxed(),
        };
        headers.extend(request.headers);

        let url = self.config.url_for(&request.path);
        let mut builder = self
            .client
            .request(request.method.clone(), &url)
            .bearer_auth(&self.config.api_key)
            .headers(headers);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if request.method != Method::GET {
            builder = builder.form(&request.body);
        }

        builder
            .send()
            .and_then(|response| {
                let status = response.status().as_u16();
                response
                    .text()
                    .map_ok(move |body| ApiResponse::new(status, body))
            })
            .map_err(StripeError::from)
            .boxed()
    }
}

/// Entry point handing out the route façades.
///
/// Wraps any [`Dispatch`]; [`StripeClient::new`] wires up the reqwest one.
#[derive(Clone)]
pub struct StripeClient {
    dispatcher: Arc<dyn Dispatch>,
}

impl StripeClient {
    /// Creates a client that talks to the API over HTTPS
    ///
    /// # Arguments
    ///
    /// * `config` - Connection settings handed to [`HttpDispatcher::new`]
    ///
    /// # Returns
    ///
    /// A client whose route façades share one connection pool
    pub fn new(config: ClientConfig) -> Result<Self, StripeError> {
        Ok(Self::with_dispatcher(Arc::new(HttpDispatcher::new(config)?)))
    }

    /// Convenience for `ClientConfig::from_env` + [`StripeClient::new`].
    pub fn from_env() -> Result<Self, StripeError> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Creates a client over any transport
    ///
    /// # Arguments
    ///
    /// * `dispatcher` - Sends each [`ApiRequest`] and returns the raw status and body.
    ///   Tests pass a recording mock here.
    ///
    /// # Returns
    ///
    /// A client whose façades all share `dispatcher`
    pub fn with_dispatcher(dispatcher: Arc<dyn Dispatch>) -> Self {
        Self { dispatcher }
    }

    pub(crate) fn dispatcher(&self) -> Arc<dyn Dispatch> {
        Arc::clone(&self.dispatcher)
    }
}

impl From<HttpDispatcher> for StripeClient {
    fn from(value: HttpDispatcher) -> Self {
        Self::with_dispatcher(Arc::new(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for_joins_base_version_and_path() {
        let config = ClientConfig::new("sk_test");
        assert_eq!(
            config.url_for("/checkout/sessions/cs_1"),
            "https://api.stripe.com/v1/checkout/sessions/cs_1"
        );

        let config = ClientConfig::new("sk_test").with_base_url("http://localhost:12111/");
        assert_eq!(config.url_for("/prices"), "http://localhost:12111/v1/prices");
    }

    #[test]
    fn test_config_defaults() {
        let config = ClientConfig::new("sk_test")
            .with_timeout(Duration::from_secs(30))
            .with_stripe_version("2020-08-27");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api_version, "v1");
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.stripe_version.as_deref(), Some("2020-08-27"));
    }

    #[test]
    fn test_invalid_stripe_version_header_is_a_config_error() {
        let dispatcher = HttpDispatcher::with_client(
            Client::new(),
            ClientConfig::new("sk_test").with_stripe_version("bad\nvalue"),
        );
        assert!(matches!(
            dispatcher.default_headers(),
            Err(StripeError::Config(_))
        ));
    }

    #[test]
    fn test_dispatcher_builds_with_timeout() {
        let dispatcher =
            HttpDispatcher::new(ClientConfig::new("sk_test").with_timeout(Duration::from_secs(5)))
                .unwrap();
        assert_eq!(dispatcher.config().timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = ClientConfig::new("sk_live_secret").with_stripe_version("2020-08-27");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("sk_live_secret"));
        assert!(rendered.contains("<redacted>"));
        assert!(rendered.contains("2020-08-27"));
    }

    #[test]
    fn test_client_from_custom_reqwest_client() {
        let dispatcher = HttpDispatcher::with_client(
            Client::new(),
            ClientConfig::new("sk_test").with_base_url("http://localhost:12111"),
        );
        let client = StripeClient::from(dispatcher);
        assert_eq!(
            Arc::strong_count(&client.dispatcher()),
            2,
            "façade handles share the client's dispatcher"
        );
    }
}
