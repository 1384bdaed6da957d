/// Repository over the preference store
///
/// `WellnessRepository` is the only component that reads or writes the
/// store. Every entity family is kept as one JSON value per key and changed
/// by read-modify-write of the whole value. Writes to a family are
/// serialized by that family's lock; reads take no lock and return a
/// deserialized copy.

pub mod habits;
pub mod moods;
pub mod wellbeing;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::domain::{normalize_to_day_start, start_of_day, DomainError};
use crate::storage::{PreferenceStore, StorageError};

/// Keys under which each record or collection is stored
pub mod keys {
    pub const HABITS: &str = "habits";
    pub const HABIT_COMPLETIONS: &str = "habit_completions";
    pub const MOOD_ENTRIES: &str = "mood_entries";
    pub const HYDRATION_DATA: &str = "hydration_data";
    pub const USER_NAME: &str = "user_name";
    pub const ONBOARDING_COMPLETED: &str = "onboarding_completed";
    pub const REMINDER_ENABLED: &str = "reminder_enabled";
    pub const REMINDER_INTERVAL: &str = "reminder_interval";
}

/// Errors returned by repository operations
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid record: {0}")]
    Invalid(#[from] DomainError),

    #[error("Stored value for '{key}' is unreadable; refusing to overwrite it")]
    CorruptRecord { key: String },
}

/// One lock per entity family
#[derive(Default)]
struct MutationLocks {
    habits: Mutex<()>,
    completions: Mutex<()>,
    moods: Mutex<()>,
    hydration: Mutex<()>,
    settings: Mutex<()>,
}

/// Typed access to everything the tracker persists
///
/// `tz` decides where calendar days start when completions are keyed.
pub struct WellnessRepository<S, Tz: TimeZone = Local> {
    store: S,
    tz: Tz,
    locks: MutationLocks,
}

impl<S: PreferenceStore> WellnessRepository<S, Local> {
    /// Repository using the machine's local time zone
    pub fn new(store: S) -> Self {
        Self::with_timezone(store, Local)
    }
}

impl<S: PreferenceStore, Tz: TimeZone> WellnessRepository<S, Tz> {
    pub fn with_timezone(store: S, tz: Tz) -> Self {
        Self {
            store,
            tz,
            locks: MutationLocks::default(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn timezone(&self) -> &Tz {
        &self.tz
    }

    /// Today's date in the repository's time zone
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.tz).date_naive()
    }

    /// Start of the day containing `instant`, in the repository's time zone
    pub fn day_start(&self, instant: DateTime<Utc>) -> DateTime<Utc> {
        normalize_to_day_start(instant, &self.tz)
    }

    /// Start of the calendar day `day`, in the repository's time zone
    pub fn start_of(&self, day: NaiveDate) -> DateTime<Utc> {
        start_of_day(day, &self.tz)
    }

    /// Wipe every key, returning the store to first-run defaults
    pub fn clear_all(&self) -> Result<(), RepositoryError> {
        // Fixed order so concurrent writers can't deadlock against this.
        let _habits = self.locks.habits.lock();
        let _completions = self.locks.completions.lock();
        let _moods = self.locks.moods.lock();
        let _hydration = self.locks.hydration.lock();
        let _settings = self.locks.settings.lock();

        self.store.clear()?;
        tracing::info!("Cleared all wellness data");
        Ok(())
    }

    // Serialization helpers shared by the entity modules

    /// Decode the value stored under `key`
    ///
    /// `Ok(None)` if the key is absent. A value that fails to decode is
    /// reported as `CorruptRecord`.
    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, RepositoryError> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(None);
        };

        match serde_json::from_str::<Option<T>>(&raw) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::error!("Unreadable value stored under '{}': {}", key, e);
                Err(RepositoryError::CorruptRecord { key: key.to_string() })
            }
        }
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), RepositoryError> {
        let json = serde_json::to_string(value)?;
        self.store.set(key, &json)?;
        Ok(())
    }

    /// Snapshot of the collection under `key`
    ///
    /// Missing or unreadable collections read as empty. Store failures
    /// still propagate.
    fn load_list<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, RepositoryError> {
        match self.read_json::<Vec<T>>(key) {
            Ok(items) => Ok(items.unwrap_or_default()),
            Err(RepositoryError::CorruptRecord { .. }) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    /// Decode a single record, falling back to `default` when it is missing
    /// or unreadable
    fn load_or<T: DeserializeOwned>(&self, key: &str, default: impl FnOnce() -> T) -> Result<T, RepositoryError> {
        match self.read_json::<T>(key) {
            Ok(Some(value)) => Ok(value),
            Ok(None) | Err(RepositoryError::CorruptRecord { .. }) => Ok(default()),
            Err(e) => Err(e),
        }
    }

    /// Read-modify-write of the collection under `key` while holding `lock`
    ///
    /// `apply` edits the list in place and returns its result plus whether
    /// anything changed; the list is written back only on change. An
    /// unreadable collection aborts the mutation instead of being replaced.
    fn mutate_list<T, R>(
        &self,
        lock: &Mutex<()>,
        key: &str,
        apply: impl FnOnce(&mut Vec<T>) -> (R, bool),
    ) -> Result<R, RepositoryError>
    where
        T: DeserializeOwned + Serialize,
    {
        let _guard = lock.lock();

        let mut items: Vec<T> = self.read_json::<Vec<T>>(key)?.unwrap_or_default();
        let (result, changed) = apply(&mut items);

        if changed {
            self.write_json(key, &items)?;
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Habit;
    use crate::storage::MemoryPreferenceStore;

    fn repo() -> WellnessRepository<MemoryPreferenceStore, Utc> {
        WellnessRepository::with_timezone(MemoryPreferenceStore::new(), Utc)
    }

    #[test]
    fn test_missing_collection_reads_empty() {
        let repo = repo();
        assert!(repo.list_habits().unwrap().is_empty());
    }

    #[test]
    fn test_null_collection_reads_empty() {
        let repo = repo();
        repo.store().set(keys::HABITS, "null").unwrap();
        assert!(repo.list_habits().unwrap().is_empty());

        // and can be written over, since it decoded fine
        repo.add_habit(Habit::new("Read", "", 10, "pages").unwrap()).unwrap();
        assert_eq!(repo.list_habits().unwrap().len(), 1);
    }

    #[test]
    fn test_corrupt_collection_reads_empty_but_is_not_overwritten() {
        let repo = repo();
        repo.store().set(keys::HABITS, "{not json").unwrap();

        assert!(repo.list_habits().unwrap().is_empty());

        let result = repo.add_habit(Habit::new("Read", "", 10, "pages").unwrap());
        assert!(matches!(result, Err(RepositoryError::CorruptRecord { ref key }) if key == keys::HABITS));
        assert_eq!(repo.store().get(keys::HABITS).unwrap().as_deref(), Some("{not json"));
    }

    #[test]
    fn test_clear_all_restores_defaults() {
        let repo = repo();
        repo.add_habit(Habit::new("Read", "", 10, "pages").unwrap()).unwrap();
        repo.set_user_name("Sam").unwrap();
        repo.set_reminder_enabled(false).unwrap();

        repo.clear_all().unwrap();

        assert!(repo.list_habits().unwrap().is_empty());
        assert_eq!(repo.get_user_profile().unwrap().user_name, "");
        assert!(repo.get_reminder_settings().unwrap().enabled);
    }
}
