/// Statistics over habit and mood snapshots
///
/// Everything here is a pure function of the records passed in. Nothing
/// reads the store; callers load snapshots from the repository first.

pub mod streak;
pub mod trend;

pub use streak::*;
pub use trend::*;

use std::collections::HashSet;

use serde::Serialize;

use crate::domain::{Habit, HabitCompletion, HabitId};

/// Round `part / whole` to a whole percentage; 0 when `whole` is 0
fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    (100.0 * part as f64 / whole as f64).round() as u32
}

/// Share of active habits completed, 0-100
///
/// `completions` is normally one day's records. Each active habit counts
/// once however many completed records it has; records for inactive or
/// deleted habits are ignored. Zero active habits gives 0.
pub fn completion_rate(habits: &[Habit], completions: &[HabitCompletion]) -> u32 {
    let active: HashSet<&HabitId> = habits.iter().filter(|h| h.is_active).map(|h| &h.id).collect();
    if active.is_empty() {
        return 0;
    }

    let completed: HashSet<&HabitId> = completions
        .iter()
        .filter(|c| c.is_completed && active.contains(&c.habit_id))
        .map(|c| &c.habit_id)
        .collect();

    percent(completed.len(), active.len())
}

/// Progress toward a single day's target, clamped to 0-100
pub fn habit_progress_percent(completed_count: u32, target_count: u32) -> u32 {
    percent(completed_count as usize, target_count as usize).min(100)
}

/// Share of the supplied days on which `habit` was completed, 0-100
///
/// The caller picks the window by choosing which completions to pass.
pub fn per_habit_completion_rate(habit: &Habit, completions: &[HabitCompletion]) -> u32 {
    let for_habit: Vec<&HabitCompletion> = completions.iter().filter(|c| c.habit_id == habit.id).collect();
    let completed = for_habit.iter().filter(|c| c.is_completed).count();
    percent(completed, for_habit.len())
}

/// One bar of the per-habit completion chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HabitRate {
    pub habit_id: HabitId,
    /// Habit name cut to 8 characters
    pub label: String,
    pub percent: u32,
}

const HABIT_LABEL_CHARS: usize = 8;

/// Per-habit completion rates for the active habits, in habit order
pub fn habit_completion_series(habits: &[Habit], completions: &[HabitCompletion]) -> Vec<HabitRate> {
    habits
        .iter()
        .filter(|h| h.is_active)
        .map(|habit| HabitRate {
            habit_id: habit.id.clone(),
            label: habit.name.chars().take(HABIT_LABEL_CHARS).collect(),
            percent: per_habit_completion_rate(habit, completions),
        })
        .collect()
}

/// Encouragement for a day's completion rate
pub fn progress_message(rate: u32) -> &'static str {
    match rate {
        r if r >= 100 => "Perfect! You've completed all your habits today! 🎉",
        r if r >= 80 => "Great job! You're almost there! 💪",
        r if r >= 50 => "Good progress! Keep it up! ✨",
        r if r > 0 => "Every step counts! You're doing great! 🌟",
        _ => "Ready to start your wellness journey? Let's go! 🚀",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn habit(name: &str, target: u32) -> Habit {
        Habit::new(name, "", target, "times").unwrap()
    }

    #[test]
    fn test_completion_rate_with_no_habits_is_zero() {
        assert_eq!(completion_rate(&[], &[]), 0);

        let stray = HabitCompletion::new(crate::domain::HabitId::new(), Utc::now(), &Utc, 1, true);
        assert_eq!(completion_rate(&[], &[stray]), 0);
    }

    #[test]
    fn test_completion_rate_counts_active_habits_once() {
        let a = habit("A", 1);
        let b = habit("B", 1);
        let mut paused = habit("Paused", 1);
        paused.is_active = false;
        let now = Utc::now();

        let completions = vec![
            HabitCompletion::record(&a, now, &Utc, 1),
            HabitCompletion::record(&a, now, &Utc, 1),
            HabitCompletion::record(&paused, now, &Utc, 1),
            HabitCompletion::record(&b, now, &Utc, 0),
        ];

        assert_eq!(completion_rate(&[a, b, paused], &completions), 50);
    }

    #[test]
    fn test_completion_rate_rounds() {
        let habits: Vec<Habit> = (0..3).map(|i| habit(&format!("H{}", i), 1)).collect();
        let completions = vec![HabitCompletion::record(&habits[0], Utc::now(), &Utc, 1)];
        assert_eq!(completion_rate(&habits, &completions), 33);

        let completions: Vec<HabitCompletion> = habits[..2]
            .iter()
            .map(|h| HabitCompletion::record(h, Utc::now(), &Utc, 1))
            .collect();
        assert_eq!(completion_rate(&habits, &completions), 67);
    }

    #[test]
    fn test_progress_percent_clamps() {
        assert_eq!(habit_progress_percent(4, 8), 50);
        assert_eq!(habit_progress_percent(12, 8), 100);
        assert_eq!(habit_progress_percent(3, 0), 0);
    }

    #[test]
    fn test_per_habit_rate_and_series() {
        let read = habit("Reading every night", 1);
        let other = habit("Other", 1);
        let day = Utc::now();
        let completions = vec![
            HabitCompletion::record(&read, day, &Utc, 1),
            HabitCompletion::record(&read, day - chrono::Duration::days(1), &Utc, 0),
            HabitCompletion::record(&other, day, &Utc, 1),
        ];

        assert_eq!(per_habit_completion_rate(&read, &completions), 50);
        assert_eq!(per_habit_completion_rate(&habit("Empty", 1), &completions), 0);

        let series = habit_completion_series(&[read.clone(), other], &completions);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].label, "Reading ");
        assert_eq!(series[0].percent, 50);
        assert_eq!(series[1].percent, 100);
    }

    #[test]
    fn test_progress_messages() {
        assert!(progress_message(100).contains("Perfect"));
        assert!(progress_message(85).contains("almost"));
        assert!(progress_message(50).contains("Good progress"));
        assert!(progress_message(1).contains("Every step"));
        assert!(progress_message(0).contains("Ready"));
    }
}
