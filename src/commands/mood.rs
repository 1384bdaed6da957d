/// Mood journal commands

use chrono::TimeZone;
use serde::{Deserialize, Serialize};

use crate::commands::{parse_mood_entry_id, CommandError};
use crate::domain::{MoodEntry, DEFAULT_MOOD, MOOD_PALETTE};
use crate::repository::WellnessRepository;
use crate::storage::PreferenceStore;

#[derive(Debug, Default, Deserialize)]
pub struct LogMoodParams {
    /// One of the palette emojis; defaults to 😊
    pub emoji: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LogMoodResponse {
    pub success: bool,
    pub entry_id: String,
    pub message: String,
}

pub fn log_mood<S: PreferenceStore, Tz: TimeZone>(
    repo: &WellnessRepository<S, Tz>,
    params: LogMoodParams,
) -> Result<LogMoodResponse, CommandError> {
    let emoji = params.emoji.unwrap_or_else(|| DEFAULT_MOOD.to_string());
    let entry = MoodEntry::new(emoji.trim(), params.note.unwrap_or_default())?;
    repo.add_mood_entry(entry.clone())?;

    Ok(LogMoodResponse {
        success: true,
        entry_id: entry.id.to_string(),
        message: format!("{} Mood logged! Thanks for checking in.", entry.emoji),
    })
}

#[derive(Debug, Default, Deserialize)]
pub struct EditMoodParams {
    pub entry_id: String,
    pub emoji: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MoodChangeResponse {
    pub success: bool,
    pub message: String,
}

pub fn edit_mood<S: PreferenceStore, Tz: TimeZone>(
    repo: &WellnessRepository<S, Tz>,
    params: EditMoodParams,
) -> Result<MoodChangeResponse, CommandError> {
    let entry_id = parse_mood_entry_id(&params.entry_id)?;
    let mut entry = repo
        .get_mood_entry(&entry_id)?
        .ok_or_else(|| CommandError::MoodEntryNotFound(params.entry_id.clone()))?;

    if let Some(emoji) = params.emoji {
        entry.emoji = emoji.trim().to_string();
    }
    if let Some(note) = params.note {
        entry.note = note.trim().to_string();
    }

    let updated = repo.update_mood_entry(entry)?;
    Ok(MoodChangeResponse {
        success: updated,
        message: if updated {
            "Mood entry updated".to_string()
        } else {
            format!("No mood entry with ID {}", params.entry_id)
        },
    })
}

#[derive(Debug, Deserialize)]
pub struct DeleteMoodParams {
    pub entry_id: String,
}

pub fn delete_mood<S: PreferenceStore, Tz: TimeZone>(
    repo: &WellnessRepository<S, Tz>,
    params: DeleteMoodParams,
) -> Result<MoodChangeResponse, CommandError> {
    let entry_id = parse_mood_entry_id(&params.entry_id)?;
    let removed = repo.delete_mood_entry(&entry_id)?;

    Ok(MoodChangeResponse {
        success: removed > 0,
        message: if removed > 0 {
            "Mood entry deleted".to_string()
        } else {
            format!("No mood entry with ID {}", params.entry_id)
        },
    })
}

#[derive(Debug, Default, Deserialize)]
pub struct ListMoodsParams {
    /// Show at most this many, newest first
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct MoodSummary {
    pub id: String,
    pub emoji: String,
    pub note: String,
    pub score: u8,
    /// Local time, `YYYY-MM-DD HH:MM`
    pub logged_at: String,
}

#[derive(Debug, Serialize)]
pub struct ListMoodsResponse {
    pub entries: Vec<MoodSummary>,
    pub message: String,
}

pub fn list_moods<S: PreferenceStore, Tz: TimeZone>(
    repo: &WellnessRepository<S, Tz>,
    params: ListMoodsParams,
) -> Result<ListMoodsResponse, CommandError>
where
    Tz::Offset: std::fmt::Display,
{
    let mut entries = repo.recent_mood_entries()?;
    if let Some(limit) = params.limit {
        entries.truncate(limit);
    }

    let summaries: Vec<MoodSummary> = entries
        .iter()
        .map(|entry| MoodSummary {
            id: entry.id.to_string(),
            emoji: entry.emoji.clone(),
            note: entry.note.clone(),
            score: entry.score(),
            logged_at: entry
                .timestamp
                .with_timezone(repo.timezone())
                .format("%Y-%m-%d %H:%M")
                .to_string(),
        })
        .collect();

    let message = if summaries.is_empty() {
        format!("No moods logged yet. How are you feeling? {}", MOOD_PALETTE.join(" "))
    } else {
        summaries
            .iter()
            .map(|s| {
                if s.note.is_empty() {
                    format!("{} {}  [{}]", s.logged_at, s.emoji, s.id)
                } else {
                    format!("{} {} {}  [{}]", s.logged_at, s.emoji, s.note, s.id)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    Ok(ListMoodsResponse {
        entries: summaries,
        message,
    })
}
