//! Wall-clock helpers: the "today" query window and `HH:MM` formatting.

use chrono::{DateTime, Local, NaiveDate, TimeZone};

use pulsewatch_types::TimeWindow;

/// Placeholder shown when a clock time is unknown.
pub const NO_TIME: &str = "--:--";

/// How far into a day to look for its first existing wall-clock time.
const DAY_START_SEARCH_MINUTES: u32 = 3 * 60;

/// The window from the start of `now`'s local day up to `now`.
pub fn today_window<Tz: TimeZone>(now: &DateTime<Tz>) -> TimeWindow {
    let end = now.timestamp_millis();
    let start = start_of_day(&now.timezone(), now.date_naive()).unwrap_or(end);
    TimeWindow::new(start, end).unwrap_or_else(|| TimeWindow::point(end))
}

/// The window for today in the local time zone.
pub fn today_window_local() -> TimeWindow {
    today_window(&Local::now())
}

/// Milliseconds since the epoch of the first existing wall-clock time of `date` in `tz`.
///
/// This is midnight except on days whose DST gap starts at 00:00; those days
/// begin at the end of the gap.
pub fn start_of_day<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> Option<i64> {
    (0..DAY_START_SEARCH_MINUTES)
        .step_by(15)
        .find_map(|minutes| local_millis(tz, date, minutes / 60, minutes % 60))
}

/// Milliseconds since the epoch of `date` at `hour:minute` wall-clock time in `tz`.
///
/// Returns the earlier instant for ambiguous times and `None` for times
/// skipped by a DST transition.
pub fn local_millis<Tz: TimeZone>(tz: &Tz, date: NaiveDate, hour: u32, minute: u32) -> Option<i64> {
    let naive = date.and_hms_opt(hour, minute, 0)?;
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.timestamp_millis())
}

/// Format an instant as local `HH:MM`, or `--:--` when absent.
pub fn format_clock(timestamp_ms: Option<i64>) -> String {
    format_clock_in(timestamp_ms, &Local)
}

/// Format an instant as `HH:MM` in `tz`, or `--:--` when absent.
pub fn format_clock_in<Tz: TimeZone>(timestamp_ms: Option<i64>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    timestamp_ms
        .and_then(|ms| tz.timestamp_millis_opt(ms).single())
        .map(|dt| dt.format("%H:%M").to_string())
        .unwrap_or_else(|| NO_TIME.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, LocalResult, NaiveDateTime, TimeDelta, Utc};

    #[test]
    fn test_today_window_starts_at_midnight() {
        let now = Utc.with_ymd_and_hms(2024, 6, 12, 14, 30, 0).unwrap();
        let window = today_window(&now);

        assert_eq!(window.end_ms(), now.timestamp_millis());
        assert_eq!(
            window.start_ms(),
            Utc.with_ymd_and_hms(2024, 6, 12, 0, 0, 0).unwrap().timestamp_millis()
        );
    }

    #[test]
    fn test_today_window_uses_local_midnight() {
        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        let now = tz.with_ymd_and_hms(2024, 6, 12, 1, 0, 0).unwrap();
        let window = today_window(&now);

        assert_eq!(window.duration_ms(), 3_600_000);
    }

    /// UTC-4 until 2024-09-08 00:00 local, then UTC-3: that day has no 00:xx.
    #[derive(Debug, Clone, Copy)]
    struct MidnightGapTz;

    impl MidnightGapTz {
        fn switch_utc() -> NaiveDateTime {
            NaiveDate::from_ymd_opt(2024, 9, 8)
                .unwrap()
                .and_hms_opt(4, 0, 0)
                .unwrap()
        }

        fn winter() -> FixedOffset {
            FixedOffset::west_opt(4 * 3600).unwrap()
        }

        fn summer() -> FixedOffset {
            FixedOffset::west_opt(3 * 3600).unwrap()
        }
    }

    impl TimeZone for MidnightGapTz {
        type Offset = FixedOffset;

        fn from_offset(_offset: &FixedOffset) -> Self {
            MidnightGapTz
        }

        fn offset_from_local_date(&self, local: &NaiveDate) -> LocalResult<FixedOffset> {
            self.offset_from_local_datetime(&local.and_hms_opt(12, 0, 0).unwrap())
        }

        fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
            let gap_start = Self::switch_utc() - TimeDelta::hours(4);
            let gap_end = gap_start + TimeDelta::hours(1);
            if *local < gap_start {
                LocalResult::Single(Self::winter())
            } else if *local < gap_end {
                LocalResult::None
            } else {
                LocalResult::Single(Self::summer())
            }
        }

        fn offset_from_utc_date(&self, utc: &NaiveDate) -> FixedOffset {
            self.offset_from_utc_datetime(&utc.and_hms_opt(0, 0, 0).unwrap())
        }

        fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
            if *utc < Self::switch_utc() {
                Self::winter()
            } else {
                Self::summer()
            }
        }
    }

    #[test]
    fn test_today_window_when_midnight_is_skipped() {
        let now = MidnightGapTz.with_ymd_and_hms(2024, 9, 8, 15, 0, 0).unwrap();
        let window = today_window(&now);

        // The day starts at 01:00 local, the end of the gap.
        let first = Utc.with_ymd_and_hms(2024, 9, 8, 4, 0, 0).unwrap();
        assert_eq!(window.start_ms(), first.timestamp_millis());
        assert_eq!(window.duration_ms(), 14 * 3_600_000);
    }

    #[test]
    fn test_start_of_day_is_midnight_on_ordinary_days() {
        let date = NaiveDate::from_ymd_opt(2024, 9, 7).unwrap();
        let midnight = MidnightGapTz.with_ymd_and_hms(2024, 9, 7, 0, 0, 0).unwrap();
        assert_eq!(
            start_of_day(&MidnightGapTz, date),
            Some(midnight.timestamp_millis())
        );
    }

    #[test]
    fn test_today_window_at_midnight_is_empty() {
        let now = Utc.with_ymd_and_hms(2024, 6, 12, 0, 0, 0).unwrap();
        assert_eq!(today_window(&now).duration_ms(), 0);
    }

    #[test]
    fn test_format_clock_is_deterministic() {
        let ts = Utc.with_ymd_and_hms(2024, 6, 12, 7, 5, 59).unwrap().timestamp_millis();
        assert_eq!(format_clock_in(Some(ts), &Utc), "07:05");
        assert_eq!(format_clock_in(Some(ts), &Utc), "07:05");

        let tz = FixedOffset::east_opt(8 * 3600).unwrap();
        assert_eq!(format_clock_in(Some(ts), &tz), "15:05");
    }

    #[test]
    fn test_format_clock_absent() {
        assert_eq!(format_clock_in(None, &Utc), "--:--");
        assert_eq!(format_clock(None), NO_TIME);
    }
}
