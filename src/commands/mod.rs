/// User-facing commands over the repository
///
/// Each command takes a `...Params` struct, performs one action through the
/// repository (or the reminder policy), and returns a serializable
/// `...Response` carrying a human-readable `message`. The CLI is a thin
/// shell around these.

pub mod habits;
pub mod hydration;
pub mod mood;
pub mod progress;
pub mod settings;

pub use habits::*;
pub use hydration::*;
pub use mood::*;
pub use progress::*;
pub use settings::*;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use thiserror::Error;

use crate::domain::{DomainError, HabitId, MoodEntryId};
use crate::reminder::ReminderError;
use crate::repository::{RepositoryError, WellnessRepository};
use crate::storage::PreferenceStore;

/// Errors a command can report back to the user
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Habit not found: {0}")]
    HabitNotFound(String),

    #[error("Mood entry not found: {0}")]
    MoodEntryNotFound(String),

    #[error(transparent)]
    Invalid(#[from] DomainError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Reminder(#[from] ReminderError),
}

/// Parse a habit id typed by the user
fn parse_habit_id(raw: &str) -> Result<HabitId, CommandError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(CommandError::InvalidInput("Habit ID cannot be empty".to_string()));
    }
    HabitId::from_string(raw).map_err(|_| CommandError::InvalidInput(format!("Invalid habit ID format: {}", raw)))
}

fn parse_mood_entry_id(raw: &str) -> Result<MoodEntryId, CommandError> {
    let raw = raw.trim();
    MoodEntryId::from_string(raw).map_err(|_| CommandError::InvalidInput(format!("Invalid mood entry ID format: {}", raw)))
}

/// Resolve an optional `YYYY-MM-DD` argument to an instant on that day
///
/// No date means now.
fn resolve_day<S: PreferenceStore, Tz: TimeZone>(
    repo: &WellnessRepository<S, Tz>,
    date: Option<&str>,
) -> Result<DateTime<Utc>, CommandError> {
    match date {
        Some(raw) => {
            let day = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                .map_err(|_| CommandError::InvalidInput(format!("Invalid date '{}', expected YYYY-MM-DD", raw)))?;
            Ok(repo.start_of(day))
        }
        None => Ok(Utc::now()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryPreferenceStore;

    #[test]
    fn test_parse_habit_id_rejects_garbage() {
        assert!(matches!(parse_habit_id("  "), Err(CommandError::InvalidInput(_))));
        assert!(matches!(parse_habit_id("not-a-uuid"), Err(CommandError::InvalidInput(_))));

        let id = HabitId::new();
        assert_eq!(parse_habit_id(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn test_resolve_day() {
        let repo = WellnessRepository::with_timezone(MemoryPreferenceStore::new(), Utc);
        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

        assert_eq!(resolve_day(&repo, Some("2024-05-01")).unwrap(), repo.start_of(day));
        assert!(matches!(resolve_day(&repo, Some("05/01/2024")), Err(CommandError::InvalidInput(_))));
    }
}
