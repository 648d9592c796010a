//! Per-metric fetching with failure isolation.
//!
//! ## Failure handling
//!
//! Every metric is fetched on its own. Transport errors, bad statuses,
//! unparseable bodies and empty `data` arrays all collapse into
//! [`Fetched::NoData`] for that metric only; the other metrics of the same
//! cycle are unaffected. Failures are logged and otherwise ignored.

use std::fmt::Debug;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use pulsewatch_types::{HeartRateSample, Metric, SleepInterval, TimeWindow};

use crate::wire::{Envelope, HeartRateRecord, MetricRequest, SleepRecord, StepsRecord};
use crate::FetchError;

/// Sends one metric request and returns the raw response body.
///
/// Implemented by [`HttpTransport`](crate::HttpTransport) for the real API;
/// tests substitute an in-memory transport.
#[async_trait]
pub trait Transport: Send + Sync + Debug {
    /// Send `request` to the endpoint of `metric`.
    async fn post(&self, metric: Metric, request: &MetricRequest) -> Result<String, FetchError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Box<T> {
    async fn post(&self, metric: Metric, request: &MetricRequest) -> Result<String, FetchError> {
        (**self).post(metric, request).await
    }
}

/// Result of fetching one metric: either data or the "no data" sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched<T> {
    Data(T),
    NoData,
}

impl<T> Fetched<T> {
    /// Returns true if this holds data.
    pub fn is_data(&self) -> bool {
        matches!(self, Fetched::Data(_))
    }

    /// Convert into an `Option`, mapping `NoData` to `None`.
    pub fn into_option(self) -> Option<T> {
        match self {
            Fetched::Data(value) => Some(value),
            Fetched::NoData => None,
        }
    }

    /// Map the contained data.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Fetched<U> {
        match self {
            Fetched::Data(value) => Fetched::Data(f(value)),
            Fetched::NoData => Fetched::NoData,
        }
    }
}

impl<T> From<Option<T>> for Fetched<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Fetched::NoData, Fetched::Data)
    }
}

/// Decoded data of a single metric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawMetric {
    /// Heart-rate samples in response order.
    HeartRate(Vec<HeartRateSample>),
    /// The latest sleep session in the window.
    Sleep(SleepInterval),
    /// Sum of all step samples in the window.
    Steps(u64),
}

/// The three metrics of one refresh cycle, all queried with the same window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricBundle {
    pub heartrate: Fetched<Vec<HeartRateSample>>,
    pub sleep: Fetched<SleepInterval>,
    pub steps: Fetched<u64>,
}

/// Fetches metrics from a vendor API through a [`Transport`].
#[derive(Debug, Clone)]
pub struct MetricFetcher<T> {
    transport: T,
}

impl<T: Transport> MetricFetcher<T> {
    /// Create a fetcher on top of a transport.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Returns the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch all three metrics concurrently for the same window.
    pub async fn fetch_all(&self, window: &TimeWindow) -> MetricBundle {
        let (heartrate, sleep, steps) = tokio::join!(
            self.fetch_heartrate(window),
            self.fetch_sleep(window),
            self.fetch_steps(window),
        );
        MetricBundle {
            heartrate,
            sleep,
            steps,
        }
    }

    /// Fetch a single metric.
    pub async fn fetch(&self, metric: Metric, window: &TimeWindow) -> Fetched<RawMetric> {
        match metric {
            Metric::HeartRate => self.fetch_heartrate(window).await.map(RawMetric::HeartRate),
            Metric::Sleep => self.fetch_sleep(window).await.map(RawMetric::Sleep),
            Metric::Steps => self.fetch_steps(window).await.map(RawMetric::Steps),
        }
    }

    /// Fetch raw heart-rate samples, in response order.
    pub async fn fetch_heartrate(&self, window: &TimeWindow) -> Fetched<Vec<HeartRateSample>> {
        self.fetch_records::<HeartRateRecord>(Metric::HeartRate, window)
            .await
            .map(|records| records.into_iter().map(HeartRateSample::from).collect())
    }

    /// Fetch the latest sleep session.
    pub async fn fetch_sleep(&self, window: &TimeWindow) -> Fetched<SleepInterval> {
        match self.fetch_records::<SleepRecord>(Metric::Sleep, window).await {
            Fetched::Data(records) => records.into_iter().last().map(SleepInterval::from).into(),
            Fetched::NoData => Fetched::NoData,
        }
    }

    /// Fetch the total step count, saturating at `u64::MAX`.
    pub async fn fetch_steps(&self, window: &TimeWindow) -> Fetched<u64> {
        self.fetch_records::<StepsRecord>(Metric::Steps, window)
            .await
            .map(|records| records.iter().map(|r| r.steps).fold(0, u64::saturating_add))
    }

    /// Fetch and decode the records of a metric; never empty when `Data`.
    async fn fetch_records<R: DeserializeOwned>(
        &self,
        metric: Metric,
        window: &TimeWindow,
    ) -> Fetched<Vec<R>> {
        match self.request_records(metric, window).await {
            Ok(records) if !records.is_empty() => {
                debug!(%metric, count = records.len(), "fetched metric records");
                Fetched::Data(records)
            }
            Ok(_) => {
                debug!(%metric, "no records in window");
                Fetched::NoData
            }
            Err(e) => {
                warn!(%metric, error = %e, "failed to fetch metric");
                Fetched::NoData
            }
        }
    }

    async fn request_records<R: DeserializeOwned>(
        &self,
        metric: Metric,
        window: &TimeWindow,
    ) -> Result<Vec<R>, FetchError> {
        let request = MetricRequest::new(metric, window);
        let body = self.transport.post(metric, &request).await?;
        let envelope: Envelope<R> = serde_json::from_str(&body)?;
        Ok(envelope.data.unwrap_or_default())
    }
}
