//! Data processing between the fetchers and the dashboard.
//!
//! ## Submodules
//!
//! - [`aggregate`]: Hourly averaging of raw heart-rate samples
//! - [`clock`]: The "today" query window and `HH:MM` formatting
//! - [`duration`]: Parsing and formatting of duration strings (e.g., "5m", "500ms")
//! - [`export`]: JSON export of a snapshot
//! - [`format`]: Display strings for a snapshot ([`DisplayFields`])
//!
//! ## Data Flow
//!
//! ```text
//! Vec<HeartRateSample> (raw, from the vendor)
//!        │
//!        ▼
//! aggregate_hourly()
//!        │
//!        ▼
//! HealthSnapshot ──▶ DisplayFields::from_snapshot() ──▶ ui
//!        │
//!        └──▶ export::write_export()
//! ```

pub mod aggregate;
pub mod clock;
pub mod duration;
pub mod export;
pub mod format;

pub use aggregate::{aggregate_hourly, aggregate_hourly_in};
pub use clock::{format_clock, today_window, today_window_local};
pub use format::{format_grouped, DisplayFields};
