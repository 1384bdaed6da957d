/// Mood journal entries
///
/// A mood entry is an emoji picked from a fixed palette plus an optional note.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::domain::{to_stored_precision, DomainError, MoodEntryId};

/// Emojis offered when logging a mood, saddest first
pub const MOOD_PALETTE: [&str; 6] = ["😢", "😔", "😐", "😊", "😄", "🤩"];

/// Emoji preselected when logging a new mood
pub const DEFAULT_MOOD: &str = "😊";

/// Score given to emojis missing from the score table
pub const NEUTRAL_MOOD_SCORE: u8 = 3;

const MOOD_SCORES: &[(&str, u8)] = &[
    ("😢", 1), ("😭", 1), ("😔", 1),
    ("😐", 2), ("😑", 2), ("😶", 2),
    ("😊", 3), ("🙂", 3), ("😌", 3),
    ("😄", 4), ("😃", 4), ("🤗", 4),
    ("🤩", 5), ("🥳", 5), ("😍", 5),
];

/// Map an emoji to a 1-5 mood score
pub fn mood_score(emoji: &str) -> u8 {
    MOOD_SCORES
        .iter()
        .find(|(e, _)| *e == emoji)
        .map(|(_, score)| *score)
        .unwrap_or(NEUTRAL_MOOD_SCORE)
}

/// One mood journal entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    pub id: MoodEntryId,
    pub emoji: String,
    /// Free text, possibly empty
    #[serde(default)]
    pub note: String,
    /// When the entry was created
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

impl MoodEntry {
    /// Create a new mood entry stamped with the current time
    pub fn new(emoji: impl Into<String>, note: impl Into<String>) -> Result<Self, DomainError> {
        Self::at(emoji, note, Utc::now())
    }

    /// Create a new mood entry with an explicit timestamp
    pub fn at(
        emoji: impl Into<String>,
        note: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let entry = Self {
            id: MoodEntryId::new(),
            emoji: emoji.into(),
            note: note.into().trim().to_string(),
            timestamp: to_stored_precision(timestamp),
        };
        entry.validate()?;
        Ok(entry)
    }

    /// Check the emoji is from the palette and the note fits
    pub fn validate(&self) -> Result<(), DomainError> {
        if !MOOD_PALETTE.contains(&self.emoji.as_str()) {
            return Err(DomainError::InvalidValue {
                message: format!(
                    "Mood must be one of {}, got '{}'",
                    MOOD_PALETTE.join(" "),
                    self.emoji
                ),
            });
        }
        if self.note.chars().count() > 500 {
            return Err(DomainError::Validation {
                message: "Note cannot be longer than 500 characters".to_string(),
            });
        }
        Ok(())
    }

    /// Score of this entry's emoji on the 1-5 scale
    pub fn score(&self) -> u8 {
        mood_score(&self.emoji)
    }

    pub fn has_note(&self) -> bool {
        !self.note.trim().is_empty()
    }
}
