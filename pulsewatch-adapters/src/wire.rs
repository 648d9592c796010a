//! Request and response bodies of the vendor API.

use serde::{Deserialize, Serialize};

use pulsewatch_types::{HeartRateSample, Metric, SleepInterval, TimeWindow};

/// `sleepStatus` value reported for an awake person.
const SLEEP_STATUS_AWAKE: i64 = 1;

/// JSON body sent with every metric request.
///
/// Serializes as `{"startTime": ms, "endTime": ms, "dataType": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricRequest {
    pub start_time: i64,
    pub end_time: i64,
    pub data_type: &'static str,
}

impl MetricRequest {
    /// Build the request body for a metric over a window.
    pub fn new(metric: Metric, window: &TimeWindow) -> Self {
        Self {
            start_time: window.start_ms(),
            end_time: window.end_ms(),
            data_type: metric.data_type(),
        }
    }
}

/// Response envelope: `{"data": [...]}`. A missing or null array means no data.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "R: Deserialize<'de>"))]
pub(crate) struct Envelope<R> {
    #[serde(default)]
    pub data: Option<Vec<R>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct HeartRateRecord {
    pub timestamp: i64,
    pub heart_rate: u32,
}

impl From<HeartRateRecord> for HeartRateSample {
    fn from(record: HeartRateRecord) -> Self {
        HeartRateSample::new(record.timestamp, record.heart_rate)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SleepRecord {
    #[serde(default)]
    pub sleep_start_time: Option<i64>,
    #[serde(default)]
    pub sleep_end_time: Option<i64>,
    #[serde(default)]
    pub sleep_status: Option<i64>,
}

impl From<SleepRecord> for SleepInterval {
    fn from(record: SleepRecord) -> Self {
        SleepInterval {
            start_ms: record.sleep_start_time,
            end_ms: record.sleep_end_time,
            is_awake: record
                .sleep_status
                .map_or(true, |status| status == SLEEP_STATUS_AWAKE),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct StepsRecord {
    pub steps: u64,
}
