/// Hydration reminder policy
///
/// `ReminderPolicy` decides whether reminders run and at what cadence, and
/// persists that choice through the repository. It never keeps time itself:
/// a [`ReminderScheduler`] owns the recurring trigger and calls back into the
/// policy on each firing, which the policy hands to a [`Notifier`].

pub mod scheduler;

pub use scheduler::*;

use std::sync::Arc;

use chrono::{Local, TimeZone};
use parking_lot::Mutex;
use thiserror::Error;

use crate::domain::{DomainError, ReminderInterval, ReminderSettings};
use crate::repository::{RepositoryError, WellnessRepository};
use crate::storage::PreferenceStore;

/// Errors raised while scheduling or delivering reminders
#[derive(Error, Debug)]
pub enum ReminderError {
    #[error("Scheduling failed: {0}")]
    Schedule(String),

    #[error("Notification failed: {0}")]
    Notify(String),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Invalid reminder setting: {0}")]
    Invalid(#[from] DomainError),
}

/// Invoked by the scheduler at every firing
///
/// An `Err` asks the scheduler to retry that firing under its own policy.
pub type ReminderCallback = Arc<dyn Fn() -> Result<(), ReminderError> + Send + Sync>;

/// Owner of the recurring trigger
///
/// `schedule` replaces any trigger already running; `cancel` is a no-op when
/// nothing is scheduled.
pub trait ReminderScheduler: Send + Sync {
    fn schedule(&self, interval: ReminderInterval, callback: ReminderCallback) -> Result<(), ReminderError>;

    fn cancel(&self) -> Result<(), ReminderError>;
}

/// Delivers a notification to the user
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification) -> Result<(), ReminderError>;
}

/// Where tapping a notification takes the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapAction {
    /// The mood journal screen, which hosts the water counter
    OpenMoodTracker,
}

impl TapAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            TapAction::OpenMoodTracker => "open_mood_tracker",
        }
    }
}

pub const HYDRATION_TITLE: &str = "💧 Time to Hydrate!";
pub const HYDRATION_BODY: &str = "Your body needs water! Tap to log a glass of water.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub tap_action: TapAction,
}

impl Notification {
    /// The periodic drink-water reminder
    pub fn hydration() -> Self {
        Self {
            title: HYDRATION_TITLE.to_string(),
            body: HYDRATION_BODY.to_string(),
            tap_action: TapAction::OpenMoodTracker,
        }
    }
}

/// Notifier that writes reminders to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: &Notification) -> Result<(), ReminderError> {
        tracing::info!(
            tap_action = notification.tap_action.as_str(),
            "{}: {}",
            notification.title,
            notification.body
        );
        Ok(())
    }
}

/// Whether a reminder stream is live, and at what cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderState {
    Disabled,
    Enabled { interval: ReminderInterval },
}

impl ReminderState {
    pub fn is_enabled(&self) -> bool {
        matches!(self, ReminderState::Enabled { .. })
    }
}

/// Enable/disable state machine for the hydration reminder
pub struct ReminderPolicy<S, Tz: TimeZone = Local> {
    repository: Arc<WellnessRepository<S, Tz>>,
    scheduler: Arc<dyn ReminderScheduler>,
    notifier: Arc<dyn Notifier>,
    state: Mutex<ReminderState>,
}

impl<S: PreferenceStore, Tz: TimeZone> ReminderPolicy<S, Tz> {
    /// Create a policy in the `Disabled` state
    ///
    /// Nothing is scheduled until [`restore`](Self::restore) or
    /// [`enable`](Self::enable) is called.
    pub fn new(
        repository: Arc<WellnessRepository<S, Tz>>,
        scheduler: Arc<dyn ReminderScheduler>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            repository,
            scheduler,
            notifier,
            state: Mutex::new(ReminderState::Disabled),
        }
    }

    pub fn repository(&self) -> &WellnessRepository<S, Tz> {
        &self.repository
    }

    pub fn state(&self) -> ReminderState {
        *self.state.lock()
    }

    /// Start reminders at `interval`, replacing any running schedule
    pub fn enable(&self, interval: ReminderInterval) -> Result<ReminderState, ReminderError> {
        let mut state = self.state.lock();

        self.on_cancel_requested()?;
        *state = ReminderState::Disabled;
        self.on_schedule_requested(interval)?;

        let settings = ReminderSettings { enabled: true, interval };
        if let Err(e) = self.repository.set_reminder_settings(settings) {
            // Keep the schedule and the stored flag in agreement.
            self.on_cancel_requested()?;
            *state = ReminderState::Disabled;
            return Err(e.into());
        }

        *state = ReminderState::Enabled { interval };
        tracing::info!("Hydration reminders enabled every {} minutes", interval.minutes());
        Ok(*state)
    }

    /// Stop reminders; calling this when already disabled is harmless
    ///
    /// The in-memory state tracks the scheduler, so it reads `Disabled` as
    /// soon as the trigger is cancelled even if storing the flag then fails.
    pub fn disable(&self) -> Result<ReminderState, ReminderError> {
        let mut state = self.state.lock();

        self.on_cancel_requested()?;
        *state = ReminderState::Disabled;
        self.repository.set_reminder_enabled(false)?;

        tracing::info!("Hydration reminders disabled");
        Ok(*state)
    }

    /// Toggle reminders, enabling at the stored interval
    pub fn set_enabled(&self, enabled: bool) -> Result<ReminderState, ReminderError> {
        if enabled {
            let interval = self.repository.get_reminder_settings()?.interval;
            self.enable(interval)
        } else {
            self.disable()
        }
    }

    /// Change the cadence
    ///
    /// While enabled the running schedule is cancelled and replaced. While
    /// disabled the interval is only stored for the next `enable`.
    pub fn set_interval(&self, interval: ReminderInterval) -> Result<ReminderState, ReminderError> {
        if self.state().is_enabled() {
            return self.enable(interval);
        }

        self.repository.set_reminder_interval(interval)?;
        tracing::debug!("Stored reminder interval of {} minutes", interval.minutes());
        Ok(self.state())
    }

    /// Bring the scheduler in line with the persisted settings
    ///
    /// Called once at start-up.
    pub fn restore(&self) -> Result<ReminderState, ReminderError> {
        let settings = self.repository.get_reminder_settings()?;

        let mut state = self.state.lock();
        self.on_cancel_requested()?;
        *state = ReminderState::Disabled;
        if !settings.enabled {
            return Ok(*state);
        }

        self.on_schedule_requested(settings.interval)?;
        *state = ReminderState::Enabled { interval: settings.interval };

        tracing::info!("Restored hydration reminders every {} minutes", settings.interval.minutes());
        Ok(*state)
    }

    /// Deliver one reminder; this is what each scheduled firing runs
    pub fn on_fire(&self) -> Result<(), ReminderError> {
        self.notifier.notify(&Notification::hydration())
    }

    /// Callback handed to the scheduler
    ///
    /// It only holds the notifier, so firings never touch repository state.
    pub fn firing_callback(&self) -> ReminderCallback {
        let notifier = Arc::clone(&self.notifier);
        Arc::new(move || notifier.notify(&Notification::hydration()))
    }

    fn on_schedule_requested(&self, interval: ReminderInterval) -> Result<(), ReminderError> {
        tracing::debug!("Scheduling hydration reminder every {} minutes", interval.minutes());
        self.scheduler.schedule(interval, self.firing_callback())
    }

    fn on_cancel_requested(&self) -> Result<(), ReminderError> {
        self.scheduler.cancel()
    }
}
