/// Public library interface for the wellness tracker
///
/// This module exports the repository, statistics, reminder policy and
/// command layers, plus `WellnessTracker`, which wires them to a SQLite
/// database file.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

pub mod analytics;
pub mod commands;
pub mod domain;
pub mod reminder;
pub mod repository;
pub mod storage;

// Re-export public modules and types
pub use commands::CommandError;
pub use domain::*;
pub use reminder::{
    Notification, Notifier, ReminderError, ReminderPolicy, ReminderScheduler, ReminderState, TokioReminderScheduler,
    TracingNotifier,
};
pub use repository::{RepositoryError, WellnessRepository};
pub use storage::{MemoryPreferenceStore, PreferenceStore, SqlitePreferenceStore, StorageError};

/// Errors that can occur while opening or running the tracker
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Database error: {0}")]
    Database(#[from] StorageError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Reminder error: {0}")]
    Reminder(#[from] ReminderError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A wellness tracker backed by one SQLite database file
///
/// Days are counted in the machine's local time zone.
pub struct WellnessTracker {
    repository: Arc<WellnessRepository<SqlitePreferenceStore>>,
}

impl WellnessTracker {
    /// Open (or create) the tracker database at `db_path`
    pub fn open(db_path: PathBuf) -> Result<Self, TrackerError> {
        tracing::info!("Opening wellness tracker database: {:?}", db_path);

        let store = SqlitePreferenceStore::new(&db_path)?;
        Ok(Self::with_store(store))
    }

    /// A tracker whose data lives only as long as the process
    pub fn in_memory() -> Result<Self, TrackerError> {
        Ok(Self::with_store(SqlitePreferenceStore::in_memory()?))
    }

    fn with_store(store: SqlitePreferenceStore) -> Self {
        Self {
            repository: Arc::new(WellnessRepository::new(store)),
        }
    }

    pub fn repository(&self) -> &WellnessRepository<SqlitePreferenceStore> {
        &self.repository
    }

    /// Reminder policy persisting through this tracker's repository
    pub fn reminder_policy(
        &self,
        scheduler: Arc<dyn ReminderScheduler>,
        notifier: Arc<dyn Notifier>,
    ) -> ReminderPolicy<SqlitePreferenceStore> {
        ReminderPolicy::new(Arc::clone(&self.repository), scheduler, notifier)
    }

    /// Deliver hydration reminders until Ctrl-C
    ///
    /// Returns straight away if reminders are turned off.
    pub async fn run_reminders(&self, notifier: Arc<dyn Notifier>) -> Result<(), TrackerError> {
        let scheduler = Arc::new(TokioReminderScheduler::current()?);
        let policy = self.reminder_policy(scheduler.clone(), notifier);

        match policy.restore()? {
            ReminderState::Disabled => {
                tracing::warn!("Water reminders are disabled; nothing to run");
                return Ok(());
            }
            ReminderState::Enabled { interval } => {
                tracing::info!("Reminding every {} minutes; press Ctrl-C to stop", interval.minutes());
            }
        }

        tokio::signal::ctrl_c().await?;
        scheduler.cancel()?;

        tracing::info!("Reminder loop stopped");
        Ok(())
    }
}
