/// Daily streak calculation
///
/// A streak is a run of consecutive calendar days on which a habit's
/// completion record was marked completed.

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate, TimeZone};
use serde::Serialize;

use crate::domain::{HabitCompletion, HabitId};

/// Streak statistics for one habit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HabitStreak {
    /// Which habit this streak data is for
    pub habit_id: HabitId,
    /// Consecutive completed days ending today (or yesterday, if today is
    /// still open)
    pub current_streak: u32,
    /// Best run ever recorded
    pub longest_streak: u32,
    /// Most recent completed day
    pub last_completed: Option<NaiveDate>,
    /// Number of distinct completed days
    pub total_completions: u32,
}

impl HabitStreak {
    /// Create an empty streak for a habit that hasn't been completed yet
    pub fn new(habit_id: HabitId) -> Self {
        Self {
            habit_id,
            current_streak: 0,
            longest_streak: 0,
            last_completed: None,
            total_completions: 0,
        }
    }

    /// Calculate streaks for `habit_id` from its completion records
    ///
    /// Records for other habits and records not marked completed are
    /// ignored. Days are taken in `tz`.
    pub fn calculate<Tz: TimeZone>(
        habit_id: HabitId,
        completions: &[HabitCompletion],
        today: NaiveDate,
        tz: &Tz,
    ) -> Self {
        let days: BTreeSet<NaiveDate> = completions
            .iter()
            .filter(|c| c.habit_id == habit_id && c.is_completed)
            .map(|c| c.local_day(tz))
            .filter(|day| *day <= today)
            .collect();

        if days.is_empty() {
            return Self::new(habit_id);
        }

        let current_streak = Self::current_run(&days, today);
        let longest_streak = Self::longest_run(&days);

        Self {
            habit_id,
            current_streak,
            longest_streak: longest_streak.max(current_streak),
            last_completed: days.iter().next_back().copied(),
            total_completions: days.len() as u32,
        }
    }

    /// Get a motivational message based on current streak status
    pub fn motivational_message(&self) -> String {
        match self.current_streak {
            0 => "Ready to start your streak! Every journey begins with a single step.".to_string(),
            1 => "Great start! One day down, keep the momentum going.".to_string(),
            2..=6 => format!("Nice work! {} days in a row. You're building a strong habit.", self.current_streak),
            7..=13 => format!("Excellent! {} days strong. You're in the groove now!", self.current_streak),
            14..=29 => format!("Amazing! {} days straight. This is becoming second nature.", self.current_streak),
            _ => format!("Incredible! {} days of consistency. You're a habit master!", self.current_streak),
        }
    }

    /// Count back from today, or from yesterday if today isn't done yet
    fn current_run(days: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
        let mut checking = if days.contains(&today) {
            today
        } else {
            today - Duration::days(1)
        };

        let mut run = 0;
        while days.contains(&checking) {
            run += 1;
            checking -= Duration::days(1);
        }
        run
    }

    fn longest_run(days: &BTreeSet<NaiveDate>) -> u32 {
        let mut longest = 0;
        let mut run = 0;
        let mut previous: Option<NaiveDate> = None;

        for day in days {
            run = match previous {
                Some(prev) if *day - prev == Duration::days(1) => run + 1,
                _ => 1,
            };
            longest = longest.max(run);
            previous = Some(*day);
        }
        longest
    }
}
