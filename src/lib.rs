//! # pulsewatch
//!
//! A terminal dashboard for today's heart rate, sleep and step count.
//!
//! Values come either from a fitness vendor's REST API or from a built-in
//! generator of plausible synthetic data. The dashboard refreshes on a timer
//! and on demand, and every refresh produces one complete, immutable
//! [`HealthSnapshot`] that replaces the previous one.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         Application                          │
//! │  ┌─────────┐    ┌───────────┐    ┌─────────┐    ┌──────────┐ │
//! │  │  app    │───▶│   data    │───▶│   ui    │───▶│ Terminal │ │
//! │  │ (state) │    │ (format)  │    │(render) │    │          │ │
//! │  └────┬────┘    └───────────┘    └─────────┘    └──────────┘ │
//! │       │                                                      │
//! │       ▼                                                      │
//! │  ┌───────────┐    ┌──────────┐                               │
//! │  │ scheduler │───▶│  source  │◀── MockSource | LiveSource    │
//! │  └───────────┘    └──────────┘                               │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state and user actions
//! - **[`scheduler`]**: When to refresh ([`RefreshScheduler`])
//! - **[`source`]**: Where snapshots come from ([`DataSource`] trait)
//! - **[`data`]**: Hourly aggregation, display formatting and export
//! - **[`settings`]**: Layered configuration ([`Settings`])
//! - **[`ui`]**: Terminal rendering using ratatui
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Synthetic data
//! pulsewatch --mock
//!
//! # Live data
//! PULSEWATCH_ACCESS_TOKEN=... pulsewatch --live
//!
//! # One-shot export
//! pulsewatch --live --export today.json
//! ```
//!
//! ### As a library
//!
//! ```
//! use pulsewatch::{DataSource, MockSource};
//!
//! # tokio_test::block_on(async {
//! let snapshot = MockSource::new().produce().await;
//! let fields = pulsewatch::data::DisplayFields::from_snapshot(&snapshot);
//! assert!(fields.steps.contains(','));
//! # });
//! ```

pub mod app;
pub mod data;
pub mod events;
pub mod scheduler;
pub mod settings;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use pulsewatch_types::{DataOrigin, HealthSnapshot, HourlyPoint, SleepInterval};
pub use scheduler::{RefreshOutcome, RefreshScheduler, RefreshState, Trigger};
pub use settings::{Overrides, Settings, SettingsError};
pub use source::{source_from_settings, DataSource, LiveSource, MockSource};
