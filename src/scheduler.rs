//! Refresh scheduling.
//!
//! [`RefreshScheduler`] is a two-state machine (`Idle`/`Refreshing`) that
//! decides when a [`DataSource`] is asked for a new snapshot. Three triggers
//! exist: the initial refresh at startup, a periodic timer and a manual
//! request from the user. All of them share the same rule: while a refresh is
//! in flight every trigger is a no-op.
//!
//! The scheduler is driven by the UI loop. It never blocks: refreshes run on a
//! tokio runtime and their results are picked up with [`RefreshScheduler::poll`].
//! Time is passed in explicitly so the state machine can be tested without
//! sleeping.

use std::sync::Arc;
use std::time::{Duration, Instant};

use pulsewatch_types::HealthSnapshot;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error};

use crate::source::DataSource;

/// Whether a refresh is currently in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshState {
    Idle,
    Refreshing,
}

/// What caused a refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Startup,
    Timer,
    Manual,
}

/// Result of one refresh cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The source produced a snapshot.
    Snapshot(HealthSnapshot),
    /// The refresh task died before producing anything.
    Failed(String),
}

/// Drives refreshes of a [`DataSource`].
#[derive(Debug)]
pub struct RefreshScheduler {
    source: Arc<dyn DataSource>,
    runtime: Handle,
    interval: Duration,
    loading_floor: Duration,
    state: RefreshState,
    next_timer: Option<Instant>,
    /// The in-flight refresh was requested by the user.
    manual_in_flight: bool,
    loading_until: Option<Instant>,
    tx: UnboundedSender<RefreshOutcome>,
    rx: UnboundedReceiver<RefreshOutcome>,
}

impl RefreshScheduler {
    /// Create an idle scheduler. Nothing runs until [`start`](Self::start).
    pub fn new(
        source: Arc<dyn DataSource>,
        runtime: Handle,
        interval: Duration,
        loading_floor: Duration,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            source,
            runtime,
            interval,
            loading_floor,
            state: RefreshState::Idle,
            next_timer: None,
            manual_in_flight: false,
            loading_until: None,
            tx,
            rx,
        }
    }

    /// The source being refreshed.
    pub fn source(&self) -> &dyn DataSource {
        self.source.as_ref()
    }

    pub fn state(&self) -> RefreshState {
        self.state
    }

    /// Arm the timer and run the startup refresh.
    pub fn start(&mut self, now: Instant) -> bool {
        self.next_timer = Some(now + self.interval);
        self.trigger(Trigger::Startup, now)
    }

    /// Start a refresh unless one is already in flight.
    ///
    /// Returns `true` if a refresh was started.
    pub fn trigger(&mut self, trigger: Trigger, now: Instant) -> bool {
        if self.state == RefreshState::Refreshing {
            debug!(?trigger, "refresh already in flight, ignoring trigger");
            return false;
        }

        debug!(?trigger, "starting refresh");
        self.state = RefreshState::Refreshing;
        self.manual_in_flight = trigger == Trigger::Manual;
        if self.manual_in_flight || self.loading_until.is_some_and(|until| now >= until) {
            self.loading_until = None;
        }
        self.spawn_refresh();
        true
    }

    /// User-requested refresh.
    pub fn request_manual(&mut self, now: Instant) -> bool {
        self.trigger(Trigger::Manual, now)
    }

    /// Fire the timer if it is due.
    ///
    /// The timer keeps its own cadence: a due tick is consumed even when the
    /// refresh it would start is skipped because another one is in flight.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(due) = self.next_timer else {
            return false;
        };
        if now < due {
            return false;
        }

        let mut next = due + self.interval;
        if next <= now {
            // Fell more than one period behind (e.g. the machine slept).
            next = now + self.interval;
        }
        self.next_timer = Some(next);
        self.trigger(Trigger::Timer, now)
    }

    /// Collect the result of the in-flight refresh, if it has finished.
    pub fn poll(&mut self, now: Instant) -> Option<RefreshOutcome> {
        let outcome = self.rx.try_recv().ok()?;
        self.state = RefreshState::Idle;
        if self.manual_in_flight {
            self.manual_in_flight = false;
            self.loading_until = Some(now + self.loading_floor);
        }
        Some(outcome)
    }

    /// Whether the loading indicator should be shown.
    ///
    /// Only manual refreshes show it. It stays on for `loading_floor` after
    /// the refresh completes so that fast refreshes do not flicker.
    pub fn is_loading(&self, now: Instant) -> bool {
        self.manual_in_flight || self.loading_until.is_some_and(|until| now < until)
    }

    fn spawn_refresh(&self) {
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();

        let task = self.runtime.spawn(async move { source.produce().await });
        self.runtime.spawn(async move {
            let outcome = match task.await {
                Ok(snapshot) => RefreshOutcome::Snapshot(snapshot),
                Err(e) => {
                    error!(error = %e, "refresh task failed");
                    let reason = if e.is_panic() {
                        "refresh task panicked".to_string()
                    } else {
                        e.to_string()
                    };
                    RefreshOutcome::Failed(reason)
                }
            };
            // The receiver lives as long as the scheduler; a send error means
            // the UI has already shut down.
            let _ = tx.send(outcome);
        });
    }
}
