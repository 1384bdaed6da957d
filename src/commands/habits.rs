/// Habit commands: create, edit, delete, list and log progress

use chrono::{TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::analytics::{habit_progress_percent, HabitStreak};
use crate::commands::{parse_habit_id, resolve_day, CommandError};
use crate::domain::{Habit, HabitCategory, HabitCompletion};
use crate::repository::WellnessRepository;
use crate::storage::PreferenceStore;

/// Parameters for creating a new habit
///
/// Anything left out is taken from the category's defaults.
#[derive(Debug, Default, Deserialize)]
pub struct CreateHabitParams {
    pub category: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub target_count: Option<u32>,
    pub unit: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateHabitResponse {
    pub success: bool,
    pub habit_id: String,
    pub message: String,
}

pub fn create_habit<S: PreferenceStore, Tz: TimeZone>(
    repo: &WellnessRepository<S, Tz>,
    params: CreateHabitParams,
) -> Result<CreateHabitResponse, CommandError> {
    let category = HabitCategory::parse(&params.category);
    let name = params.name.filter(|n| !n.trim().is_empty());

    if category == HabitCategory::Other && name.is_none() {
        return Err(CommandError::InvalidInput(
            "A name is required for habits in the Other category".to_string(),
        ));
    }

    let mut habit = Habit::from_category(category, name)?;
    habit.update(None, params.description, params.target_count, params.unit, None)?;

    repo.add_habit(habit.clone())?;

    Ok(CreateHabitResponse {
        success: true,
        habit_id: habit.id.to_string(),
        message: format!(
            "✅ Created {} habit '{}' with a daily target of {}",
            category.display_name(),
            habit.name,
            habit.target_display()
        ),
    })
}

/// Parameters for editing a habit; unset fields keep their value
#[derive(Debug, Default, Deserialize)]
pub struct UpdateHabitParams {
    pub habit_id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub target_count: Option<u32>,
    pub unit: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct UpdateHabitResponse {
    pub success: bool,
    pub message: String,
}

pub fn update_habit<S: PreferenceStore, Tz: TimeZone>(
    repo: &WellnessRepository<S, Tz>,
    params: UpdateHabitParams,
) -> Result<UpdateHabitResponse, CommandError> {
    let habit_id = parse_habit_id(&params.habit_id)?;
    let mut habit = repo
        .get_habit(&habit_id)?
        .ok_or_else(|| CommandError::HabitNotFound(params.habit_id.clone()))?;

    if params.name.is_none()
        && params.description.is_none()
        && params.target_count.is_none()
        && params.unit.is_none()
        && params.is_active.is_none()
    {
        return Ok(UpdateHabitResponse {
            success: true,
            message: format!("No changes requested for '{}'", habit.name),
        });
    }

    habit.update(params.name, params.description, params.target_count, params.unit, params.is_active)?;
    let updated = repo.update_habit(habit.clone())?;

    Ok(UpdateHabitResponse {
        success: updated,
        message: if updated {
            format!("✏️ Updated '{}' ({})", habit.name, habit.target_display())
        } else {
            format!("Habit '{}' was removed before it could be updated", habit.name)
        },
    })
}

#[derive(Debug, Deserialize)]
pub struct DeleteHabitParams {
    pub habit_id: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteHabitResponse {
    pub success: bool,
    pub removed: usize,
    pub message: String,
}

/// Delete a habit; its completion history stays in the store
pub fn delete_habit<S: PreferenceStore, Tz: TimeZone>(
    repo: &WellnessRepository<S, Tz>,
    params: DeleteHabitParams,
) -> Result<DeleteHabitResponse, CommandError> {
    let habit_id = parse_habit_id(&params.habit_id)?;
    let name = repo.get_habit(&habit_id)?.map(|h| h.name);
    let removed = repo.delete_habit(&habit_id)?;

    let message = match (removed, name) {
        (0, _) | (_, None) => format!("No habit with ID {}", params.habit_id),
        (_, Some(name)) => format!("🗑️ Deleted '{}'", name),
    };

    Ok(DeleteHabitResponse {
        success: removed > 0,
        removed,
        message,
    })
}

#[derive(Debug, Default, Deserialize)]
pub struct ListHabitsParams {
    /// Include paused habits
    #[serde(default)]
    pub include_inactive: bool,
}

/// One habit with today's progress
#[derive(Debug, Serialize)]
pub struct HabitSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub target: String,
    pub is_active: bool,
    pub completed_today: u32,
    pub progress_percent: u32,
    pub is_completed_today: bool,
}

#[derive(Debug, Serialize)]
pub struct ListHabitsResponse {
    pub habits: Vec<HabitSummary>,
    pub message: String,
}

pub fn list_habits<S: PreferenceStore, Tz: TimeZone>(
    repo: &WellnessRepository<S, Tz>,
    params: ListHabitsParams,
) -> Result<ListHabitsResponse, CommandError> {
    let habits = if params.include_inactive {
        repo.list_habits()?
    } else {
        repo.active_habits()?
    };
    let today = repo.completions_for_date(Utc::now())?;

    let summaries: Vec<HabitSummary> = habits
        .iter()
        .map(|habit| {
            let completion = today.iter().find(|c| c.habit_id == habit.id);
            let count = completion.map(|c| c.completed_count).unwrap_or(0);
            HabitSummary {
                id: habit.id.to_string(),
                name: habit.name.clone(),
                description: habit.description.clone(),
                target: habit.target_display(),
                is_active: habit.is_active,
                completed_today: count,
                progress_percent: habit_progress_percent(count, habit.target_count),
                is_completed_today: completion.is_some_and(|c| c.is_completed),
            }
        })
        .collect();

    let message = if summaries.is_empty() {
        "No habits yet. Add one to get started! 🌱".to_string()
    } else {
        let mut lines = vec![format!("📋 {} habit{}", summaries.len(), if summaries.len() == 1 { "" } else { "s" })];
        for s in &summaries {
            let check = if s.is_completed_today { "✅" } else { "⬜" };
            let paused = if s.is_active { "" } else { " (paused)" };
            lines.push(format!(
                "{} {}{}: {}/{} ({}%)  [{}]",
                check, s.name, paused, s.completed_today, s.target, s.progress_percent, s.id
            ));
        }
        lines.join("\n")
    };

    Ok(ListHabitsResponse {
        habits: summaries,
        message,
    })
}

/// Parameters for logging progress on a habit
#[derive(Debug, Default, Deserialize)]
pub struct LogHabitParams {
    pub habit_id: String,
    /// Units to add; defaults to 1
    pub amount: Option<u32>,
    /// Replace the day's count instead of adding to it
    pub set_count: Option<u32>,
    /// `YYYY-MM-DD`, defaults to today
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LogHabitResponse {
    pub success: bool,
    pub completed_count: u32,
    pub target_count: u32,
    pub progress_percent: u32,
    pub is_completed: bool,
    pub current_streak: u32,
    pub message: String,
}

pub fn log_habit<S: PreferenceStore, Tz: TimeZone>(
    repo: &WellnessRepository<S, Tz>,
    params: LogHabitParams,
) -> Result<LogHabitResponse, CommandError> {
    let habit = find_habit(repo, &params.habit_id)?;
    let at = resolve_day(repo, params.date.as_deref())?;

    let completion = match params.set_count {
        Some(count) => repo.record_progress(&habit, count, at)?,
        None => repo.add_progress(&habit, params.amount.unwrap_or(1), at)?,
    };

    progress_response(repo, &habit, completion)
}

/// Parameters for ticking a habit off (or unticking it) for a day
#[derive(Debug, Default, Deserialize)]
pub struct CheckHabitParams {
    pub habit_id: String,
    pub completed: bool,
    pub date: Option<String>,
}

pub fn check_habit<S: PreferenceStore, Tz: TimeZone>(
    repo: &WellnessRepository<S, Tz>,
    params: CheckHabitParams,
) -> Result<LogHabitResponse, CommandError> {
    let habit = find_habit(repo, &params.habit_id)?;
    let at = resolve_day(repo, params.date.as_deref())?;

    let completion = repo.set_completed(&habit, params.completed, at)?;
    progress_response(repo, &habit, completion)
}

#[derive(Debug, Default, Deserialize)]
pub struct ClearHabitDayParams {
    pub habit_id: String,
    pub date: Option<String>,
}

/// Forget a day's progress entirely
pub fn clear_habit_day<S: PreferenceStore, Tz: TimeZone>(
    repo: &WellnessRepository<S, Tz>,
    params: ClearHabitDayParams,
) -> Result<DeleteHabitResponse, CommandError> {
    let habit_id = parse_habit_id(&params.habit_id)?;
    let at = resolve_day(repo, params.date.as_deref())?;
    let removed = repo.delete_habit_completion(&habit_id, at)?;

    Ok(DeleteHabitResponse {
        success: removed > 0,
        removed,
        message: if removed > 0 {
            "Cleared progress for that day".to_string()
        } else {
            "Nothing was logged for that day".to_string()
        },
    })
}

fn find_habit<S: PreferenceStore, Tz: TimeZone>(
    repo: &WellnessRepository<S, Tz>,
    raw_id: &str,
) -> Result<Habit, CommandError> {
    let habit_id = parse_habit_id(raw_id)?;
    repo.get_habit(&habit_id)?
        .ok_or_else(|| CommandError::HabitNotFound(raw_id.to_string()))
}

fn progress_response<S: PreferenceStore, Tz: TimeZone>(
    repo: &WellnessRepository<S, Tz>,
    habit: &Habit,
    completion: HabitCompletion,
) -> Result<LogHabitResponse, CommandError> {
    let history = repo.completions_for_habit(&habit.id)?;
    let streak = HabitStreak::calculate(habit.id.clone(), &history, repo.today(), repo.timezone());
    let percent = habit_progress_percent(completion.completed_count, habit.target_count);

    let message = if completion.is_completed {
        format!(
            "🎉 '{}' done for the day ({}/{})! {}",
            habit.name,
            completion.completed_count,
            habit.target_display(),
            streak.motivational_message()
        )
    } else {
        format!(
            "📈 '{}': {}/{} ({}%)",
            habit.name,
            completion.completed_count,
            habit.target_display(),
            percent
        )
    };

    Ok(LogHabitResponse {
        success: true,
        completed_count: completion.completed_count,
        target_count: habit.target_count,
        progress_percent: percent,
        is_completed: completion.is_completed,
        current_streak: streak.current_streak,
        message,
    })
}
