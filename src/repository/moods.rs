/// Mood journal operations

use chrono::TimeZone;

use crate::domain::{MoodEntry, MoodEntryId};
use crate::repository::{keys, RepositoryError, WellnessRepository};
use crate::storage::PreferenceStore;

impl<S: PreferenceStore, Tz: TimeZone> WellnessRepository<S, Tz> {
    /// All mood entries in insertion order
    pub fn list_mood_entries(&self) -> Result<Vec<MoodEntry>, RepositoryError> {
        self.load_list(keys::MOOD_ENTRIES)
    }

    /// Mood entries newest first, the order the journal shows them in
    pub fn recent_mood_entries(&self) -> Result<Vec<MoodEntry>, RepositoryError> {
        let mut entries = self.list_mood_entries()?;
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(entries)
    }

    pub fn get_mood_entry(&self, id: &MoodEntryId) -> Result<Option<MoodEntry>, RepositoryError> {
        Ok(self.list_mood_entries()?.into_iter().find(|e| &e.id == id))
    }

    pub fn add_mood_entry(&self, entry: MoodEntry) -> Result<(), RepositoryError> {
        entry.validate()?;

        self.mutate_list(&self.locks.moods, keys::MOOD_ENTRIES, |entries: &mut Vec<MoodEntry>| {
            tracing::debug!("Logged mood {} ({})", entry.emoji, entry.id);
            entries.push(entry);
            ((), true)
        })
    }

    /// Replace the entry with the same id; false if there is none
    pub fn update_mood_entry(&self, entry: MoodEntry) -> Result<bool, RepositoryError> {
        entry.validate()?;

        self.mutate_list(&self.locks.moods, keys::MOOD_ENTRIES, |entries: &mut Vec<MoodEntry>| {
            match entries.iter_mut().find(|e| e.id == entry.id) {
                Some(existing) => {
                    tracing::debug!("Updated mood entry {}", entry.id);
                    *existing = entry;
                    (true, true)
                }
                None => {
                    tracing::warn!("Update for unknown mood entry {} ignored", entry.id);
                    (false, false)
                }
            }
        })
    }

    /// Remove every entry with this id, returning how many were removed
    pub fn delete_mood_entry(&self, id: &MoodEntryId) -> Result<usize, RepositoryError> {
        self.mutate_list(&self.locks.moods, keys::MOOD_ENTRIES, |entries: &mut Vec<MoodEntry>| {
            let before = entries.len();
            entries.retain(|e| &e.id != id);
            let removed = before - entries.len();
            (removed, removed > 0)
        })
    }
}
