/// Progress and trend reports

use chrono::TimeZone;
use serde::{Deserialize, Serialize};

use crate::analytics::{
    completion_rate, habit_completion_series, mood_trend, progress_message, weekly_series, DayProgress, HabitRate,
    HabitStreak, MoodTrendPoint, WEEK_DAYS,
};
use crate::commands::CommandError;
use crate::repository::WellnessRepository;
use crate::storage::PreferenceStore;

#[derive(Debug, Default, Deserialize)]
pub struct ProgressParams {
    /// Include per-habit streaks
    #[serde(default)]
    pub include_streaks: bool,
}

#[derive(Debug, Serialize)]
pub struct StreakSummary {
    pub habit_name: String,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    /// Share of active habits completed today
    pub today_percent: u32,
    pub weekly: Vec<DayProgress>,
    pub habits: Vec<HabitRate>,
    pub streaks: Vec<StreakSummary>,
    pub message: String,
}

/// Today's completion rate, the last week, and each habit's record
pub fn progress_report<S: PreferenceStore, Tz: TimeZone>(
    repo: &WellnessRepository<S, Tz>,
    params: ProgressParams,
) -> Result<ProgressResponse, CommandError> {
    let habits = repo.active_habits()?;
    let today = repo.today();
    let todays = repo.completions_for_day(today)?;
    let week = repo.completions_for_days(today, WEEK_DAYS)?;
    let all = repo.list_habit_completions()?;

    let today_percent = completion_rate(&habits, &todays);
    let weekly = weekly_series(&habits, &week, today, repo.timezone());
    let rates = habit_completion_series(&habits, &all);

    let streaks: Vec<StreakSummary> = if params.include_streaks {
        habits
            .iter()
            .map(|habit| {
                let streak = HabitStreak::calculate(habit.id.clone(), &all, today, repo.timezone());
                StreakSummary {
                    habit_name: habit.name.clone(),
                    current_streak: streak.current_streak,
                    longest_streak: streak.longest_streak,
                    message: streak.motivational_message(),
                }
            })
            .collect()
    } else {
        Vec::new()
    };

    let mut lines = vec![format!("📊 Today: {}%. {}", today_percent, progress_message(today_percent))];
    lines.push(
        weekly
            .iter()
            .map(|d| format!("{} {}%", d.label, d.percent))
            .collect::<Vec<_>>()
            .join(" | "),
    );
    for rate in &rates {
        lines.push(format!("  {:<8} {:>3}%", rate.label, rate.percent));
    }
    for streak in &streaks {
        lines.push(format!(
            "🔥 {}: {} day(s), best {}. {}",
            streak.habit_name, streak.current_streak, streak.longest_streak, streak.message
        ));
    }

    Ok(ProgressResponse {
        today_percent,
        weekly,
        habits: rates,
        streaks,
        message: lines.join("\n"),
    })
}

#[derive(Debug, Serialize)]
pub struct MoodTrendResponse {
    pub points: Vec<MoodTrendPoint>,
    pub message: String,
}

/// Average mood per day across the whole journal
pub fn mood_trend_report<S: PreferenceStore, Tz: TimeZone>(
    repo: &WellnessRepository<S, Tz>,
) -> Result<MoodTrendResponse, CommandError> {
    let entries = repo.list_mood_entries()?;
    let points = mood_trend(&entries, repo.timezone());

    let message = if points.is_empty() {
        "No moods logged yet".to_string()
    } else {
        points
            .iter()
            .map(|p| format!("{}  {:.1}  ({} entr{})", p.label, p.average_score, p.entries, if p.entries == 1 { "y" } else { "ies" }))
            .collect::<Vec<_>>()
            .join("\n")
    };

    Ok(MoodTrendResponse { points, message })
}
