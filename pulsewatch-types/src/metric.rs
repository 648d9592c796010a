//! The metrics a vendor exposes.

use core::fmt;

/// A metric that can be requested from the vendor API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Metric {
    HeartRate,
    Sleep,
    Steps,
}

impl Metric {
    /// All metrics, in the order a refresh cycle requests them.
    pub const ALL: [Metric; 3] = [Metric::HeartRate, Metric::Sleep, Metric::Steps];

    /// Value of the `dataType` field in the request body.
    pub fn data_type(&self) -> &'static str {
        match self {
            Metric::HeartRate => "heartrate",
            Metric::Sleep => "sleep",
            Metric::Steps => "steps",
        }
    }

    /// Endpoint path relative to the API base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Metric::HeartRate => "/v1/health/heartrate",
            Metric::Sleep => "/v1/health/sleep",
            Metric::Steps => "/v1/health/steps",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Metric::HeartRate => "Heart rate",
            Metric::Sleep => "Sleep",
            Metric::Steps => "Steps",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.data_type())
    }
}
