//! Application state.

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use tokio::runtime::Handle;
use tracing::{error, info};

use pulsewatch_types::HealthSnapshot;

use crate::data::export::write_export;
use crate::data::DisplayFields;
use crate::scheduler::{RefreshOutcome, RefreshScheduler};
use crate::settings::Settings;
use crate::source::DataSource;
use crate::ui::Theme;

/// How long a temporary status message stays visible.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// Main application state.
///
/// The presenter only ever sees the latest complete snapshot. A failed
/// refresh leaves the previous snapshot in place and records the failure so
/// the status bar can report it.
#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub show_help: bool,

    scheduler: RefreshScheduler,
    pub snapshot: Option<HealthSnapshot>,
    pub fields: Option<DisplayFields>,
    pub last_failure: Option<String>,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App refreshing `source` on `runtime`, themed for the terminal.
    pub fn new(source: Arc<dyn DataSource>, runtime: Handle, settings: &Settings) -> Self {
        Self::with_theme(source, runtime, settings, Theme::auto_detect())
    }

    /// Create a new App with an explicit theme.
    pub fn with_theme(
        source: Arc<dyn DataSource>,
        runtime: Handle,
        settings: &Settings,
        theme: Theme,
    ) -> Self {
        let scheduler = RefreshScheduler::new(
            source,
            runtime,
            settings.refresh_interval,
            settings.loading_floor,
        );
        Self {
            running: true,
            show_help: false,
            scheduler,
            snapshot: None,
            fields: None,
            last_failure: None,
            theme,
            status_message: None,
        }
    }

    /// Kick off the startup refresh and arm the timer.
    pub fn start(&mut self) {
        info!(source = self.source_description(), "starting refresh loop");
        self.scheduler.start(Instant::now());
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.scheduler.source().description()
    }

    /// Advance the refresh timer and pick up a finished refresh.
    ///
    /// Returns `true` if the displayed data changed.
    pub fn update(&mut self) -> bool {
        self.update_at(Instant::now())
    }

    fn update_at(&mut self, now: Instant) -> bool {
        // Collect first so a timer firing in the same pass sees the scheduler idle
        let changed = match self.scheduler.poll(now) {
            Some(outcome) => {
                self.apply(outcome);
                true
            }
            None => false,
        };
        self.scheduler.tick(now);
        changed
    }

    /// Apply the result of a refresh cycle.
    pub fn apply(&mut self, outcome: RefreshOutcome) {
        match outcome {
            RefreshOutcome::Snapshot(snapshot) => {
                self.fields = Some(DisplayFields::from_snapshot(&snapshot));
                self.snapshot = Some(snapshot);
                self.last_failure = None;
            }
            RefreshOutcome::Failed(reason) => {
                error!(%reason, "refresh failed, keeping previous snapshot");
                self.last_failure = Some(reason);
            }
        }
    }

    /// Request a manual refresh.
    pub fn refresh(&mut self) {
        if !self.scheduler.request_manual(Instant::now()) {
            self.set_status_message("Refresh already in progress".to_string());
        }
    }

    /// Whether the loading indicator is on.
    pub fn is_loading(&self) -> bool {
        self.scheduler.is_loading(Instant::now())
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired.
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < STATUS_MESSAGE_TTL {
                return Some(msg);
            }
        }
        None
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export the current snapshot to a file.
    pub fn export_state(&self, path: &Path) -> Result<()> {
        let Some(ref snapshot) = self.snapshot else {
            anyhow::bail!("No data to export");
        };
        write_export(snapshot, path)?;
        info!(path = %path.display(), "exported snapshot");
        Ok(())
    }
}
