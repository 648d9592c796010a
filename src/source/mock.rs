//! Synthetic data source.
//!
//! Generates a plausible day: an hourly heart-rate curve from midnight up to
//! the current hour, a fixed overnight sleep session and a random step count.

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone, Timelike};
use rand::Rng;

use pulsewatch_types::{DataOrigin, HealthSnapshot, HourlyPoint, SleepInterval};

use super::DataSource;
use crate::data::clock::local_millis;

/// Heart rate reported if the generated series were empty.
const FALLBACK_HEARTRATE: u32 = 72;

/// Hours (inclusive start, exclusive end) during which the person is awake.
const AWAKE_FROM: u32 = 7;
const AWAKE_UNTIL: u32 = 23;

/// Canonical sleep session: 23:30 the previous evening to 07:15 today.
const SLEEP_START: (u32, u32) = (23, 30);
const SLEEP_END: (u32, u32) = (7, 15);

/// A data source that generates synthetic snapshots.
#[derive(Debug, Default)]
pub struct MockSource {
    _private: (),
}

impl MockSource {
    /// Create a new mock source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a snapshot for the instant `now`, drawing randomness from `rng`.
    pub fn generate_at<Tz, R>(now: &DateTime<Tz>, rng: &mut R) -> HealthSnapshot
    where
        Tz: TimeZone,
        R: Rng + ?Sized,
    {
        let current_hour = now.hour();

        let history: Vec<HourlyPoint> = (0..=current_hour)
            .map(|hour| {
                let jitter: i32 = rng.gen_range(-5..=4);
                let value = (base_bpm(hour) as i32 + jitter) as u32;
                HourlyPoint::new(hour as u8, value)
            })
            .collect();

        let current = history.last().map_or(FALLBACK_HEARTRATE, |p| p.value);

        let tz = now.timezone();
        let today = now.date_naive();
        let sleep = SleepInterval {
            start_ms: today
                .pred_opt()
                .and_then(|yesterday| local_millis(&tz, yesterday, SLEEP_START.0, SLEEP_START.1)),
            end_ms: local_millis(&tz, today, SLEEP_END.0, SLEEP_END.1),
            is_awake: (AWAKE_FROM..AWAKE_UNTIL).contains(&current_hour),
        };

        HealthSnapshot::builder(DataOrigin::Mock)
            .heartrate_current(current)
            .heartrate_history(history)
            .sleep(sleep)
            .steps(rng.gen_range(2000..10000))
            .captured_at_ms(now.timestamp_millis())
            .build()
    }

    fn generate(&self) -> HealthSnapshot {
        Self::generate_at(&Local::now(), &mut rand::thread_rng())
    }
}

#[async_trait]
impl DataSource for MockSource {
    async fn produce(&self) -> HealthSnapshot {
        self.generate()
    }

    fn description(&self) -> &str {
        "mock data"
    }
}

/// Typical resting heart rate for an hour of the day.
fn base_bpm(hour: u32) -> u32 {
    match hour {
        0..=5 => 58,   // deep night
        6..=7 => 65,   // waking up
        8..=11 => 75,  // morning
        12..=13 => 80, // after lunch
        14..=17 => 72, // afternoon
        18..=20 => 78, // evening
        _ => 65,       // night
    }
}
