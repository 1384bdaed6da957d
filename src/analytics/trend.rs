/// Day-by-day series for the progress and mood charts

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate, TimeZone};
use serde::Serialize;

use crate::analytics::completion_rate;
use crate::domain::{Habit, HabitCompletion, MoodEntry};

/// Days covered by the weekly progress chart
pub const WEEK_DAYS: u32 = 7;

/// One day of the weekly completion chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayProgress {
    pub day: NaiveDate,
    /// Short weekday name ("Mon")
    pub label: String,
    pub percent: u32,
}

/// One day of the mood trend chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodTrendPoint {
    pub day: NaiveDate,
    /// Month and day ("Mar 04")
    pub label: String,
    /// Mean of the day's mood scores, 1.0-5.0
    pub average_score: f64,
    pub entries: usize,
}

/// Completion rate for each of the 7 days ending on `today`, oldest first
///
/// Each day is rated on its own with [`completion_rate`] against the same
/// habit list. Days are matched in `tz`.
pub fn weekly_series<Tz: TimeZone>(
    habits: &[Habit],
    completions: &[HabitCompletion],
    today: NaiveDate,
    tz: &Tz,
) -> Vec<DayProgress> {
    (0..WEEK_DAYS as i64)
        .rev()
        .map(|offset| {
            let day = today - Duration::days(offset);
            let day_completions: Vec<HabitCompletion> = completions
                .iter()
                .filter(|c| c.local_day(tz) == day)
                .cloned()
                .collect();

            DayProgress {
                day,
                label: day.format("%a").to_string(),
                percent: completion_rate(habits, &day_completions),
            }
        })
        .collect()
}

/// Average mood score per calendar day, in date order
///
/// Entries are grouped by their local day in `tz`. Emojis without a score
/// count as neutral.
pub fn mood_trend<Tz: TimeZone>(entries: &[MoodEntry], tz: &Tz) -> Vec<MoodTrendPoint> {
    let mut by_day: BTreeMap<NaiveDate, (u32, usize)> = BTreeMap::new();

    for entry in entries {
        let day = entry.timestamp.with_timezone(tz).date_naive();
        let slot = by_day.entry(day).or_insert((0, 0));
        slot.0 += u32::from(entry.score());
        slot.1 += 1;
    }

    by_day
        .into_iter()
        .map(|(day, (total, count))| MoodTrendPoint {
            day,
            label: day.format("%b %d").to_string(),
            average_score: total as f64 / count as f64,
            entries: count,
        })
        .collect()
}
