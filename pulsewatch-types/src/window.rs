//! Query windows for metric requests.

/// A closed time range, in milliseconds since the Unix epoch.
///
/// The window used by a refresh cycle runs from local midnight to "now", and
/// every metric in that cycle is queried with the same window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeWindow {
    start_ms: i64,
    end_ms: i64,
}

impl TimeWindow {
    /// Create a window, returning `None` if `start_ms > end_ms`.
    pub fn new(start_ms: i64, end_ms: i64) -> Option<Self> {
        (start_ms <= end_ms).then_some(Self { start_ms, end_ms })
    }

    /// A zero-length window at a single instant.
    pub fn point(timestamp_ms: i64) -> Self {
        Self {
            start_ms: timestamp_ms,
            end_ms: timestamp_ms,
        }
    }

    /// Start of the window (inclusive).
    pub fn start_ms(&self) -> i64 {
        self.start_ms
    }

    /// End of the window (inclusive).
    pub fn end_ms(&self) -> i64 {
        self.end_ms
    }

    /// Length of the window in milliseconds.
    pub fn duration_ms(&self) -> i64 {
        self.end_ms - self.start_ms
    }

    /// Check whether a timestamp falls inside the window.
    pub fn contains(&self, timestamp_ms: i64) -> bool {
        (self.start_ms..=self.end_ms).contains(&timestamp_ms)
    }
}
