/// Domain module containing the wellness entities and their validation rules
///
/// This module defines the records the tracker persists (Habit, HabitCompletion,
/// MoodEntry, HydrationState, UserProfile, ReminderSettings). They are plain
/// values: the repository loads them, callers copy and modify them, and the
/// repository writes them back.

pub mod habit;
pub mod completion;
pub mod mood;
pub mod hydration;
pub mod profile;
pub mod types;

// Re-export public types for easy access
pub use habit::*;
pub use completion::*;
pub use mood::*;
pub use hydration::*;
pub use profile::*;
pub use types::*;

use thiserror::Error;

/// Errors that can occur during domain operations
///
/// Any of these means the record was rejected at construction time and
/// never reached the store.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid habit name: {0}")]
    InvalidHabitName(String),

    #[error("Invalid value: {message}")]
    InvalidValue { message: String },

    #[error("Invalid reminder interval: {0} minutes (must be between 1 and {max})", max = MAX_REMINDER_INTERVAL_MINUTES)]
    InvalidInterval(u64),
}
