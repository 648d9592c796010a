//! Live data source backed by the vendor API.

use async_trait::async_trait;
use chrono::{Local, TimeZone};
use tracing::debug;

use pulsewatch_adapters::{
    FetchError, Fetched, HttpTransport, MetricBundle, MetricFetcher, Transport,
};
use pulsewatch_types::{DataOrigin, HealthSnapshot};

use super::DataSource;
use crate::data::aggregate::aggregate_hourly_in;
use crate::data::clock::today_window;
use crate::settings::Settings;

/// A data source that fetches today's metrics from the vendor API.
///
/// Each call to [`produce`](DataSource::produce) computes the window
/// `[local midnight, now]` once, fetches all three metrics concurrently for
/// that window and folds the results into a snapshot.
#[derive(Debug)]
pub struct LiveSource<T = HttpTransport> {
    fetcher: MetricFetcher<T>,
    description: String,
}

impl LiveSource<HttpTransport> {
    /// Build a live source talking HTTP to the configured endpoint.
    pub fn from_settings(settings: &Settings) -> Result<Self, FetchError> {
        let mut builder = HttpTransport::builder()
            .base_url(settings.base_url.clone())
            .access_token(settings.access_token.clone());
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let description = format!("live: {}", settings.base_url);
        Ok(Self::new(MetricFetcher::new(builder.build()?), description))
    }
}

impl<T: Transport> LiveSource<T> {
    /// Create a live source on top of an existing fetcher.
    pub fn new(fetcher: MetricFetcher<T>, description: impl Into<String>) -> Self {
        Self {
            fetcher,
            description: description.into(),
        }
    }
}

/// Fold the fetched metrics into a snapshot, bucketing heart rate by hour in `tz`.
///
/// The current heart rate is the last raw sample, not the last hourly average.
pub fn assemble<Tz: TimeZone>(bundle: MetricBundle, tz: &Tz, captured_at_ms: i64) -> HealthSnapshot {
    let mut builder = HealthSnapshot::builder(DataOrigin::Live).captured_at_ms(captured_at_ms);

    if let Fetched::Data(samples) = bundle.heartrate {
        if let Some(last) = samples.last() {
            builder = builder.heartrate_current(last.value);
        }
        builder = builder.heartrate_history(aggregate_hourly_in(&samples, tz));
    }
    if let Fetched::Data(sleep) = bundle.sleep {
        builder = builder.sleep(sleep);
    }
    if let Fetched::Data(steps) = bundle.steps {
        builder = builder.steps(steps);
    }

    builder.build()
}

#[async_trait]
impl<T: Transport + 'static> DataSource for LiveSource<T> {
    async fn produce(&self) -> HealthSnapshot {
        let window = today_window(&Local::now());
        debug!(start = window.start_ms(), end = window.end_ms(), "fetching live metrics");

        let bundle = self.fetcher.fetch_all(&window).await;
        assemble(bundle, &Local, Local::now().timestamp_millis())
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use pulsewatch_adapters::MetricRequest;
    use pulsewatch_types::{HourlyPoint, Metric, SleepInterval};

    use crate::data::DisplayFields;

    /// Serves canned bodies; metrics without one fail to connect.
    #[derive(Debug, Default)]
    struct CannedTransport {
        bodies: HashMap<Metric, String>,
    }

    #[async_trait]
    impl Transport for CannedTransport {
        async fn post(
            &self,
            metric: Metric,
            _request: &MetricRequest,
        ) -> Result<String, FetchError> {
            self.bodies
                .get(&metric)
                .cloned()
                .ok_or_else(|| FetchError::Connection("refused".to_string()))
        }
    }

    fn source(bodies: &[(Metric, String)]) -> LiveSource<CannedTransport> {
        let transport = CannedTransport {
            bodies: bodies.iter().cloned().collect(),
        };
        LiveSource::new(MetricFetcher::new(transport), "test")
    }

    /// Today at 14:05 local time.
    fn afternoon_ms() -> i64 {
        let today = Local::now().date_naive();
        crate::data::clock::local_millis(&Local, today, 14, 5).unwrap()
    }

    #[tokio::test]
    async fn test_heartrate_within_one_hour() {
        let t = afternoon_ms();
        let body = format!(
            r#"{{"data":[{{"timestamp":{},"heartRate":72}},{{"timestamp":{},"heartRate":74}}]}}"#,
            t,
            t + 60_000
        );
        let source = source(&[
            (Metric::HeartRate, body),
            (Metric::Steps, r#"{"data":[{"steps":500}]}"#.to_string()),
        ]);

        let snapshot = source.produce().await;

        assert_eq!(snapshot.heartrate_history(), &[HourlyPoint::new(14, 73)]);
        assert_eq!(snapshot.heartrate_current(), Some(74));
        assert_eq!(snapshot.steps(), Some(500));
        assert_eq!(snapshot.origin(), DataOrigin::Live);
    }

    #[tokio::test]
    async fn test_empty_sleep_renders_placeholders() {
        let source = source(&[(Metric::Sleep, r#"{"data":[]}"#.to_string())]);

        let snapshot = source.produce().await;
        let fields = DisplayFields::from_snapshot(&snapshot);

        assert_eq!(*snapshot.sleep(), SleepInterval::default());
        assert_eq!(fields.sleep_start, "--:--");
        assert_eq!(fields.sleep_end, "--:--");
        assert!(fields.is_awake);
    }

    #[tokio::test]
    async fn test_all_metrics_failing_still_produces_snapshot() {
        let before = Local::now().timestamp_millis();
        let snapshot = source(&[]).produce().await;

        assert!(snapshot.is_empty());
        assert!(snapshot.captured_at_ms() >= before);
    }

    #[test]
    fn test_assemble_keeps_sentinels() {
        let bundle = MetricBundle {
            heartrate: Fetched::NoData,
            sleep: Fetched::Data(SleepInterval::new(1, 2, false)),
            steps: Fetched::NoData,
        };

        let snapshot = assemble(bundle, &chrono::Utc, 42);

        assert_eq!(snapshot.heartrate_current(), None);
        assert!(snapshot.heartrate_history().is_empty());
        assert!(!snapshot.sleep().is_awake);
        assert_eq!(snapshot.steps(), None);
        assert_eq!(snapshot.captured_at_ms(), 42);
    }

    #[test]
    fn test_from_settings_description() {
        let settings = Settings {
            use_mock: false,
            base_url: "http://example.test".to_string(),
            ..Settings::default()
        };
        let source = LiveSource::from_settings(&settings).unwrap();
        assert_eq!(source.description(), "live: http://example.test");
    }
}
