//! HealthSnapshot - the result of one refresh cycle.

use alloc::vec::Vec;

use crate::{HourlyPoint, SleepInterval};

/// Where a snapshot's values came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DataOrigin {
    /// Synthetic values from the built-in generator.
    Mock,
    /// Values fetched from the vendor API.
    Live,
}

impl DataOrigin {
    /// Short label for display.
    pub fn label(&self) -> &'static str {
        match self {
            DataOrigin::Mock => "mock",
            DataOrigin::Live => "live",
        }
    }
}

/// One complete, immutable set of metric values.
///
/// A snapshot is built once per refresh cycle through [`HealthSnapshot::builder`]
/// and is only read afterwards. Every field that can be missing uses `None` as
/// its "no data" sentinel.
///
/// # Example
///
/// ```rust
/// use pulsewatch_types::{DataOrigin, HealthSnapshot};
///
/// let snapshot = HealthSnapshot::builder(DataOrigin::Mock)
///     .captured_at_ms(0)
///     .build();
///
/// assert_eq!(snapshot.heartrate_current(), None);
/// assert_eq!(snapshot.steps(), None);
/// assert!(snapshot.heartrate_history().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealthSnapshot {
    heartrate_current: Option<u32>,
    heartrate_history: Vec<HourlyPoint>,
    sleep: SleepInterval,
    steps: Option<u64>,
    captured_at_ms: i64,
    origin: DataOrigin,
}

impl HealthSnapshot {
    /// Create a builder for a snapshot from the given origin.
    pub fn builder(origin: DataOrigin) -> HealthSnapshotBuilder {
        HealthSnapshotBuilder::new(origin)
    }

    /// Most recent heart rate, in beats per minute.
    pub fn heartrate_current(&self) -> Option<u32> {
        self.heartrate_current
    }

    /// Today's heart rate averaged per hour, ascending by hour.
    pub fn heartrate_history(&self) -> &[HourlyPoint] {
        &self.heartrate_history
    }

    /// The most recent sleep session.
    pub fn sleep(&self) -> &SleepInterval {
        &self.sleep
    }

    /// Total steps today.
    pub fn steps(&self) -> Option<u64> {
        self.steps
    }

    /// When the snapshot was finalized (milliseconds since the Unix epoch).
    pub fn captured_at_ms(&self) -> i64 {
        self.captured_at_ms
    }

    /// Where the values came from.
    pub fn origin(&self) -> DataOrigin {
        self.origin
    }

    /// Check if no metric carries data.
    pub fn is_empty(&self) -> bool {
        self.heartrate_current.is_none()
            && self.heartrate_history.is_empty()
            && self.sleep.is_unknown()
            && self.steps.is_none()
    }
}

/// Builder for constructing `HealthSnapshot` instances.
#[derive(Debug)]
pub struct HealthSnapshotBuilder {
    heartrate_current: Option<u32>,
    heartrate_history: Vec<HourlyPoint>,
    sleep: SleepInterval,
    steps: Option<u64>,
    captured_at_ms: Option<i64>,
    origin: DataOrigin,
}

impl HealthSnapshotBuilder {
    /// Create a new builder with every metric set to its sentinel.
    pub fn new(origin: DataOrigin) -> Self {
        Self {
            heartrate_current: None,
            heartrate_history: Vec::new(),
            sleep: SleepInterval::default(),
            steps: None,
            captured_at_ms: None,
            origin,
        }
    }

    /// Set the current heart rate.
    pub fn heartrate_current(mut self, bpm: u32) -> Self {
        self.heartrate_current = Some(bpm);
        self
    }

    /// Set the hourly heart rate series.
    pub fn heartrate_history(mut self, history: Vec<HourlyPoint>) -> Self {
        self.heartrate_history = history;
        self
    }

    /// Set the sleep session.
    pub fn sleep(mut self, sleep: SleepInterval) -> Self {
        self.sleep = sleep;
        self
    }

    /// Set today's step count.
    pub fn steps(mut self, steps: u64) -> Self {
        self.steps = Some(steps);
        self
    }

    /// Set a specific capture time (milliseconds since Unix epoch).
    pub fn captured_at_ms(mut self, ts: i64) -> Self {
        self.captured_at_ms = Some(ts);
        self
    }

    /// Build the snapshot, stamping it with the current time if no capture
    /// time was set.
    #[cfg(feature = "std")]
    pub fn build(self) -> HealthSnapshot {
        let captured_at_ms = self.captured_at_ms.unwrap_or_else(current_timestamp_ms);
        self.finish(captured_at_ms)
    }

    /// Build the snapshot with a specific timestamp (for no_std).
    #[cfg(not(feature = "std"))]
    pub fn build(self) -> HealthSnapshot {
        let captured_at_ms = self.captured_at_ms.unwrap_or(0);
        self.finish(captured_at_ms)
    }

    fn finish(self, captured_at_ms: i64) -> HealthSnapshot {
        HealthSnapshot {
            heartrate_current: self.heartrate_current,
            heartrate_history: self.heartrate_history,
            sleep: self.sleep,
            steps: self.steps,
            captured_at_ms,
            origin: self.origin,
        }
    }
}

/// Get current timestamp in milliseconds since Unix epoch.
#[cfg(feature = "std")]
fn current_timestamp_ms() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_builder() {
        let snapshot = HealthSnapshot::builder(DataOrigin::Live)
            .heartrate_current(74)
            .heartrate_history(vec![HourlyPoint::new(13, 70), HourlyPoint::new(14, 73)])
            .sleep(SleepInterval::new(1_000, 2_000, false))
            .steps(8421)
            .captured_at_ms(1_718_000_000_000)
            .build();

        assert_eq!(snapshot.heartrate_current(), Some(74));
        assert_eq!(snapshot.heartrate_history().len(), 2);
        assert!(!snapshot.sleep().is_awake);
        assert_eq!(snapshot.steps(), Some(8421));
        assert_eq!(snapshot.captured_at_ms(), 1_718_000_000_000);
        assert_eq!(snapshot.origin(), DataOrigin::Live);
        assert!(!snapshot.is_empty());
    }

    #[test]
    fn test_builder_defaults_to_sentinels() {
        let snapshot = HealthSnapshot::builder(DataOrigin::Live).build();
        assert!(snapshot.is_empty());
        assert!(snapshot.sleep().is_awake);
        assert!(snapshot.captured_at_ms() > 0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serialized_shape() {
        let snapshot = HealthSnapshot::builder(DataOrigin::Mock)
            .heartrate_current(61)
            .captured_at_ms(5)
            .build();

        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["heartrate_current"], 61);
        assert_eq!(value["steps"], serde_json::Value::Null);
        assert_eq!(value["origin"], "mock");
        assert_eq!(value["sleep"]["is_awake"], true);
    }
}
