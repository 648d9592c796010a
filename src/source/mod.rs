//! Data sources producing health snapshots.
//!
//! A [`DataSource`] turns one refresh request into one complete
//! [`HealthSnapshot`]. Which implementation is used is decided purely by
//! configuration, see [`source_from_settings`]:
//!
//! - [`MockSource`]: synthetic values, no network
//! - [`LiveSource`]: the vendor API, fetched with [`pulsewatch_adapters::MetricFetcher`]

mod live;
mod mock;

pub use live::LiveSource;
pub use mock::MockSource;

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use pulsewatch_adapters::FetchError;
use pulsewatch_types::HealthSnapshot;

use crate::settings::Settings;

/// Trait for producing health snapshots.
///
/// `produce` never fails: metrics that cannot be obtained are represented by
/// their "no data" sentinel inside the snapshot, so the caller always gets a
/// complete, renderable value.
///
/// # Example
///
/// ```
/// use pulsewatch::{DataSource, MockSource};
///
/// # tokio_test::block_on(async {
/// let source = MockSource::new();
/// let snapshot = source.produce().await;
/// assert!(!snapshot.heartrate_history().is_empty());
/// # });
/// ```
#[async_trait]
pub trait DataSource: Send + Sync + Debug {
    /// Produce a fresh snapshot.
    async fn produce(&self) -> HealthSnapshot;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI status bar.
    fn description(&self) -> &str;
}

/// Build the data source selected by `settings`.
///
/// Fails only if the HTTP client for live mode cannot be constructed.
pub fn source_from_settings(settings: &Settings) -> Result<Arc<dyn DataSource>, FetchError> {
    if settings.use_mock {
        Ok(Arc::new(MockSource::new()))
    } else {
        Ok(Arc::new(LiveSource::from_settings(settings)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_selected_by_settings() {
        let settings = Settings::default();
        let source = source_from_settings(&settings).unwrap();
        assert_eq!(source.description(), "mock data");
    }

    #[test]
    fn test_live_selected_by_settings() {
        let settings = Settings {
            use_mock: false,
            base_url: "http://localhost:8080".to_string(),
            ..Settings::default()
        };
        let source = source_from_settings(&settings).unwrap();
        assert_eq!(source.description(), "live: http://localhost:8080");
    }
}
