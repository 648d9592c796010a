//! # pulsewatch-adapters
//!
//! Metric fetchers for fitness vendor REST APIs.
//!
//! A refresh cycle needs three independent metrics (heart rate, sleep and
//! steps) for the same time window. [`MetricFetcher`] requests them
//! concurrently and isolates failures: a metric that cannot be fetched or
//! parsed comes back as [`Fetched::NoData`] instead of failing the cycle.
//!
//! The network is hidden behind the [`Transport`] trait. The `http` feature
//! (enabled by default) provides [`HttpTransport`], which talks to the vendor
//! with `POST` requests carrying a bearer token.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pulsewatch_adapters::{HttpTransport, MetricFetcher};
//! use pulsewatch_types::TimeWindow;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let transport = HttpTransport::builder()
//!         .base_url("https://health-api.cloud.honor.com")
//!         .access_token("token")
//!         .build()?;
//!     let fetcher = MetricFetcher::new(transport);
//!
//!     let window = TimeWindow::new(1_718_000_000_000, 1_718_040_000_000).unwrap();
//!     let bundle = fetcher.fetch_all(&window).await;
//!
//!     println!("steps: {:?}", bundle.steps.into_option());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod fetcher;
mod wire;

#[cfg(feature = "http")]
pub mod http;

pub use error::FetchError;
pub use fetcher::{Fetched, MetricBundle, MetricFetcher, RawMetric, Transport};
pub use wire::MetricRequest;

#[cfg(feature = "http")]
pub use http::{HttpTransport, HttpTransportBuilder};

// Re-export types for convenience
pub use pulsewatch_types::{HeartRateSample, Metric, SleepInterval, TimeWindow};
