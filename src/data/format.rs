//! Display strings derived from a snapshot.

use serde::Serialize;

use pulsewatch_types::HealthSnapshot;

use super::clock::format_clock;

/// Placeholder shown when a number is unknown.
pub const NO_VALUE: &str = "--";

/// Every text value the dashboard shows for a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayFields {
    pub heartrate: String,
    pub sleep_start: String,
    pub sleep_end: String,
    pub is_awake: bool,
    pub steps: String,
    pub updated: String,
}

impl DisplayFields {
    /// Format a snapshot for display in the local time zone.
    pub fn from_snapshot(snapshot: &HealthSnapshot) -> Self {
        let sleep = snapshot.sleep();
        Self {
            heartrate: snapshot
                .heartrate_current()
                .map(|bpm| bpm.to_string())
                .unwrap_or_else(|| NO_VALUE.to_string()),
            sleep_start: format_clock(sleep.start_ms),
            sleep_end: format_clock(sleep.end_ms),
            is_awake: sleep.is_awake,
            steps: snapshot
                .steps()
                .map(format_grouped)
                .unwrap_or_else(|| NO_VALUE.to_string()),
            updated: format_clock(Some(snapshot.captured_at_ms())),
        }
    }

    /// Label for the sleep status.
    pub fn sleep_label(&self) -> &'static str {
        if self.is_awake {
            "Awake"
        } else {
            "Asleep"
        }
    }
}

/// Format a count with thousands separators (e.g., 8421 -> "8,421").
pub fn format_grouped(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulsewatch_types::{DataOrigin, SleepInterval};

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(0), "0");
        assert_eq!(format_grouped(999), "999");
        assert_eq!(format_grouped(8421), "8,421");
        assert_eq!(format_grouped(10_000), "10,000");
        assert_eq!(format_grouped(1_234_567), "1,234,567");
    }

    #[test]
    fn test_sentinels_render_as_placeholders() {
        let snapshot = HealthSnapshot::builder(DataOrigin::Live)
            .captured_at_ms(1_718_000_000_000)
            .build();
        let fields = DisplayFields::from_snapshot(&snapshot);

        assert_eq!(fields.heartrate, "--");
        assert_eq!(fields.steps, "--");
        assert_eq!(fields.sleep_start, "--:--");
        assert_eq!(fields.sleep_end, "--:--");
        assert!(fields.is_awake);
        assert_eq!(fields.sleep_label(), "Awake");
        assert_ne!(fields.updated, "--:--");
    }

    #[test]
    fn test_values_render() {
        let snapshot = HealthSnapshot::builder(DataOrigin::Mock)
            .heartrate_current(68)
            .steps(12_345)
            .sleep(SleepInterval::new(0, 1, false))
            .captured_at_ms(0)
            .build();
        let fields = DisplayFields::from_snapshot(&snapshot);

        assert_eq!(fields.heartrate, "68");
        assert_eq!(fields.steps, "12,345");
        assert_eq!(fields.sleep_label(), "Asleep");
        assert_eq!(fields.sleep_start.len(), 5);
    }
}
