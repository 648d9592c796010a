//! # pulsewatch-types
//!
//! Core types for the pulsewatch health dashboard. This crate defines the data
//! model shared by the metric fetchers and the dashboard: raw samples returned
//! by a fitness vendor, the hourly heart-rate series derived from them, and the
//! [`HealthSnapshot`] that a single refresh cycle produces.
//!
//! ## Design Goals
//!
//! - **Zero required dependencies**: Core types work without any serialization framework
//! - **Optional serialization**: Enable the `serde` feature for JSON export
//! - **Explicit sentinels**: Missing measurements are `None`, never a magic number
//! - **Immutable snapshots**: Snapshots are assembled with a builder and only read afterwards
//!
//! ## Features
//!
//! - `std` (default): Standard library support (wall-clock timestamps)
//! - `serde`: Serialization via serde
//!
//! ## Example
//!
//! ```rust
//! use pulsewatch_types::{DataOrigin, HealthSnapshot, HourlyPoint, SleepInterval};
//!
//! let snapshot = HealthSnapshot::builder(DataOrigin::Live)
//!     .heartrate_current(74)
//!     .heartrate_history(vec![HourlyPoint::new(14, 73)])
//!     .sleep(SleepInterval::default())
//!     .steps(8421)
//!     .captured_at_ms(1_718_000_000_000)
//!     .build();
//!
//! assert_eq!(snapshot.heartrate_current(), Some(74));
//! assert!(snapshot.sleep().is_awake);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod metric;
mod sample;
mod snapshot;
mod window;

pub use metric::*;
pub use sample::*;
pub use snapshot::*;
pub use window::*;

/// Milliseconds in one hour.
pub const MS_PER_HOUR: i64 = 3_600_000;
