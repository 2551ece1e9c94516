//! HTTP transport abstraction
//!
//! The resolver and clients talk to the network only through [`Transport`],
//! so tests can inject fakes that count requests.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::error::TransportError;

/// Header carrying the per-request correlation id
pub const X_REQUEST_ID: &str = "x-request-id";

/// HTTP method of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpMethod {
    /// GET
    #[default]
    Get,
    /// POST with an empty body
    Post,
}

/// Per-request options applied to every candidate
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// HTTP method
    pub method: HttpMethod,
    /// Query parameters, appended in order
    pub query: Vec<(String, String)>,
}

impl RequestOptions {
    /// A plain GET without query parameters
    #[must_use]
    pub fn get() -> Self {
        Self::default()
    }

    /// Append a query parameter
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Append several query parameters
    #[must_use]
    pub fn with_query_pairs(mut self, pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    /// Use a different method
    #[must_use]
    pub const fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }
}

/// Fetches a URL and returns its body as JSON
///
/// Implementations must return `Ok` only for a success status whose body
/// parsed as JSON.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform one request
    async fn fetch_json(&self, url: &str, options: &RequestOptions)
    -> Result<Value, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn fetch_json(
        &self,
        url: &str,
        options: &RequestOptions,
    ) -> Result<Value, TransportError> {
        (**self).fetch_json(url, options).await
    }
}

/// Transport settings
#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    /// Whole-request timeout
    pub timeout: Duration,
    /// Connect timeout
    pub connect_timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(5),
            user_agent: format!("SeaSpot/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpTransportConfig {
    /// Override the request timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// `reqwest`-backed transport
///
/// Every request carries a fresh `X-Request-Id` so upstream logs can be
/// matched with ours.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build a transport with default settings
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new() -> Result<Self, TransportError> {
        Self::with_config(&HttpTransportConfig::default())
    }

    /// Build a transport with custom settings
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_config(config: &HttpTransportConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| TransportError::ConnectionFailed(e.to_string()))?;
        Ok(Self { client })
    }

    /// Classify a send failure
    ///
    /// The reqwest error is stripped of its URL: the query string may carry
    /// credentials, and `url` (without query) is already in the message.
    fn map_send_error(url: &str, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            return TransportError::Timeout(url.to_string());
        }
        let err = err.without_url();
        if err.is_builder() {
            TransportError::InvalidUrl(format!("{url}: {err}"))
        } else {
            TransportError::ConnectionFailed(format!("{url}: {err}"))
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, options), fields(method = ?options.method))]
    async fn fetch_json(
        &self,
        url: &str,
        options: &RequestOptions,
    ) -> Result<Value, TransportError> {
        let request_id = Uuid::new_v4();
        let builder = match options.method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
        };

        debug!(request_id = %request_id, "Sending request");

        let response = builder
            .query(&options.query)
            .header(X_REQUEST_ID, request_id.to_string())
            .send()
            .await
            .map_err(|e| Self::map_send_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| TransportError::InvalidBody(format!("{url}: {}", e.without_url())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_builder() {
        let opts = RequestOptions::get()
            .with_query("location_id", 2535)
            .with_query_pairs(vec![("start_date".to_string(), "2024-01-01".to_string())]);
        assert_eq!(opts.method, HttpMethod::Get);
        assert_eq!(
            opts.query,
            vec![
                ("location_id".to_string(), "2535".to_string()),
                ("start_date".to_string(), "2024-01-01".to_string()),
            ]
        );
        assert_eq!(
            opts.with_method(HttpMethod::Post).method,
            HttpMethod::Post
        );
    }

    #[test]
    fn default_config() {
        let config = HttpTransportConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.user_agent.starts_with("SeaSpot/"));
    }

    #[test]
    fn transport_creation() {
        assert!(HttpTransport::new().is_ok());
    }

    #[test]
    fn arc_transport_is_transport() {
        fn assert_transport<T: Transport>() {}
        assert_transport::<Arc<HttpTransport>>();
        assert_transport::<Arc<dyn Transport>>();
    }
}
