//! HTTP transport for the vendor health API.
//!
//! Every metric is requested with a `POST` to `{base_url}/v1/health/{metric}`,
//! authenticated with a bearer token and carrying a JSON
//! [`MetricRequest`] body.
//!
//! ## Example
//!
//! ```rust,no_run
//! use pulsewatch_adapters::{HttpTransport, MetricFetcher};
//! use std::time::Duration;
//!
//! # fn main() -> Result<(), pulsewatch_adapters::FetchError> {
//! let transport = HttpTransport::builder()
//!     .base_url("https://health-api.cloud.honor.com")
//!     .access_token("token")
//!     .timeout(Duration::from_secs(15))
//!     .build()?;
//!
//! let fetcher = MetricFetcher::new(transport);
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use pulsewatch_types::Metric;

use crate::fetcher::Transport;
use crate::{FetchError, MetricRequest};

/// Default vendor API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://health-api.cloud.honor.com";

/// Transport that sends metric requests to the vendor over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
    access_token: String,
}

impl HttpTransport {
    /// Create a new builder for configuring the transport.
    pub fn builder() -> HttpTransportBuilder {
        HttpTransportBuilder::default()
    }

    /// Returns the API base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of a metric's endpoint.
    pub fn endpoint(&self, metric: Metric) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), metric.path())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, metric: Metric, request: &MetricRequest) -> Result<String, FetchError> {
        let response = self
            .client
            .post(self.endpoint(metric))
            .bearer_auth(&self.access_token)
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        Ok(response.text().await?)
    }
}

/// Builder for HttpTransport.
#[derive(Debug, Default)]
pub struct HttpTransportBuilder {
    base_url: Option<String>,
    access_token: Option<String>,
    timeout: Option<Duration>,
}

impl HttpTransportBuilder {
    /// Set the API base URL (default: the vendor's public endpoint).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the bearer token sent with every request.
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Set a request timeout. Without one, a hung request stalls its metric
    /// until the connection is closed.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the transport.
    pub fn build(self) -> Result<HttpTransport, FetchError> {
        let mut client = Client::builder();
        if let Some(timeout) = self.timeout {
            client = client.timeout(timeout);
        }
        let client = client.build()?;

        Ok(HttpTransport {
            client,
            base_url: self
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            access_token: self.access_token.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let transport = HttpTransport::builder().build().unwrap();
        assert_eq!(transport.base_url(), DEFAULT_BASE_URL);
        assert_eq!(transport.access_token, "");
    }

    #[test]
    fn test_builder_custom() {
        let transport = HttpTransport::builder()
            .base_url("http://localhost:8080")
            .access_token("secret")
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        assert_eq!(transport.base_url(), "http://localhost:8080");
        assert_eq!(transport.access_token, "secret");
    }

    #[test]
    fn test_endpoint() {
        let transport = HttpTransport::builder()
            .base_url("http://localhost:8080/")
            .build()
            .unwrap();

        assert_eq!(
            transport.endpoint(Metric::HeartRate),
            "http://localhost:8080/v1/health/heartrate"
        );
        assert_eq!(
            transport.endpoint(Metric::Steps),
            "http://localhost:8080/v1/health/steps"
        );
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_an_error() {
        let transport = HttpTransport::builder()
            .base_url("http://127.0.0.1:1")
            .timeout(Duration::from_secs(2))
            .build()
            .unwrap();
        let window = pulsewatch_types::TimeWindow::new(0, 1).unwrap();

        let result = transport
            .post(Metric::Sleep, &MetricRequest::new(Metric::Sleep, &window))
            .await;
        assert!(result.is_err());
    }
}
