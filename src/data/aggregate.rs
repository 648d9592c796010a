//! Hourly aggregation of raw heart-rate samples.

use std::collections::BTreeMap;

use chrono::{Local, TimeZone, Timelike};

use pulsewatch_types::{HeartRateSample, HourlyPoint};

/// Average heart-rate samples per hour of day in the local time zone.
///
/// See [`aggregate_hourly_in`].
pub fn aggregate_hourly(samples: &[HeartRateSample]) -> Vec<HourlyPoint> {
    aggregate_hourly_in(samples, &Local)
}

/// Average heart-rate samples per hour of day in `tz`.
///
/// Each hour that has at least one sample yields one point whose value is
/// the mean of that hour's samples, rounded to the nearest integer (halves
/// round up). Hours without samples are omitted. Points are ascending by hour.
pub fn aggregate_hourly_in<Tz: TimeZone>(samples: &[HeartRateSample], tz: &Tz) -> Vec<HourlyPoint> {
    // hour -> (sum, count)
    let mut buckets: BTreeMap<u8, (u64, u64)> = BTreeMap::new();

    for sample in samples {
        let Some(at) = tz.timestamp_millis_opt(sample.timestamp_ms).single() else {
            continue;
        };
        let bucket = buckets.entry(at.hour() as u8).or_default();
        bucket.0 += u64::from(sample.value);
        bucket.1 += 1;
    }

    buckets
        .into_iter()
        .map(|(hour, (sum, count))| HourlyPoint::new(hour, rounded_mean(sum, count)))
        .collect()
}

/// Integer mean rounded half up; `count` must be non-zero.
fn rounded_mean(sum: u64, count: u64) -> u32 {
    ((sum * 2 + count) / (count * 2)) as u32
}
