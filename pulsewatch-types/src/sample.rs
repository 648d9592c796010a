//! Measurement types: raw samples and derived series points.

/// A single raw heart-rate reading as returned by the vendor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeartRateSample {
    /// When the reading was taken (milliseconds since the Unix epoch).
    pub timestamp_ms: i64,
    /// Beats per minute.
    pub value: u32,
}

impl HeartRateSample {
    /// Create a new sample.
    pub fn new(timestamp_ms: i64, value: u32) -> Self {
        Self {
            timestamp_ms,
            value,
        }
    }
}

/// Average heart rate for one hour of the day.
///
/// Series of hourly points are ordered by `hour` and contain only hours
/// that had at least one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HourlyPoint {
    /// Hour of day, 0-23.
    pub hour: u8,
    /// Beats per minute.
    pub value: u32,
}

impl HourlyPoint {
    /// Create a new point.
    pub fn new(hour: u8, value: u32) -> Self {
        debug_assert!(hour < 24, "hour out of range: {}", hour);
        Self { hour, value }
    }
}

/// The most recent sleep session.
///
/// Either end of the interval may be unknown. When nothing is known the
/// person is assumed to be awake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SleepInterval {
    /// When the session started (milliseconds since the Unix epoch).
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub start_ms: Option<i64>,
    /// When the session ended (milliseconds since the Unix epoch).
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub end_ms: Option<i64>,
    /// Whether the person is currently awake.
    pub is_awake: bool,
}

impl SleepInterval {
    /// Create a sleep interval with both ends known.
    pub fn new(start_ms: i64, end_ms: i64, is_awake: bool) -> Self {
        Self {
            start_ms: Some(start_ms),
            end_ms: Some(end_ms),
            is_awake,
        }
    }

    /// Check if neither end of the interval is known.
    pub fn is_unknown(&self) -> bool {
        self.start_ms.is_none() && self.end_ms.is_none()
    }
}

impl Default for SleepInterval {
    fn default() -> Self {
        Self {
            start_ms: None,
            end_ms: None,
            is_awake: true,
        }
    }
}
