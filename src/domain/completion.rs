/// Daily habit progress records and day normalization
///
/// A `HabitCompletion` is keyed by `(habit_id, date)` where `date` is always
/// the start of a local calendar day. Every reader and writer must go through
/// [`normalize_to_day_start`] so two logs on the same day land on one record.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, NaiveTime, SubsecRound, TimeZone, Utc};
use crate::domain::{Habit, HabitId};

/// Progress toward one habit's target on one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitCompletion {
    /// Which habit this progress is for
    pub habit_id: HabitId,
    /// Start of the local calendar day this record covers
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub date: DateTime<Utc>,
    /// Units done so far that day
    pub completed_count: u32,
    /// Stored alongside the count; see [`HabitCompletion::reconcile`]
    pub is_completed: bool,
}

impl HabitCompletion {
    /// Build a record from raw values
    ///
    /// `date` is normalized to the start of its day in `tz`; the flag is
    /// taken as given.
    pub fn new<Tz: TimeZone>(
        habit_id: HabitId,
        date: DateTime<Utc>,
        tz: &Tz,
        completed_count: u32,
        is_completed: bool,
    ) -> Self {
        Self {
            habit_id,
            date: normalize_to_day_start(date, tz),
            completed_count,
            is_completed,
        }
    }

    /// Record `completed_count` units of `habit` on the day containing `at`
    ///
    /// The completed flag is derived from the habit's target.
    pub fn record<Tz: TimeZone>(habit: &Habit, at: DateTime<Utc>, tz: &Tz, completed_count: u32) -> Self {
        Self::new(
            habit.id.clone(),
            at,
            tz,
            completed_count,
            habit.is_met_by(completed_count),
        )
    }

    /// Whether this record is for `habit_id` on the same normalized day
    pub fn same_key(&self, other: &HabitCompletion) -> bool {
        self.habit_id == other.habit_id && self.date == other.date
    }

    /// Recompute the completed flag from the count and the habit's target
    ///
    /// Returns true if the flag changed.
    pub fn reconcile(&mut self, target_count: u32) -> bool {
        let derived = self.completed_count >= target_count;
        let changed = derived != self.is_completed;
        self.is_completed = derived;
        changed
    }

    /// Calendar day of this record in `tz`
    pub fn local_day<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDate {
        self.date.with_timezone(tz).date_naive()
    }
}

/// Drop the sub-millisecond part of `instant`
///
/// Timestamps are stored as epoch milliseconds, so records built with this
/// read back equal to what was written.
pub fn to_stored_precision(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant.trunc_subsecs(3)
}

/// Collapse an instant to the start of its calendar day in `tz`
///
/// Idempotent. When local midnight does not exist (a DST jump at 00:00) the
/// first valid instant of that day is used instead.
pub fn normalize_to_day_start<Tz: TimeZone>(instant: DateTime<Utc>, tz: &Tz) -> DateTime<Utc> {
    let local_day = instant.with_timezone(tz).date_naive();
    start_of_day(local_day, tz)
}

/// First instant of `day` in `tz`, as UTC
pub fn start_of_day<Tz: TimeZone>(day: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    let midnight = day.and_time(NaiveTime::MIN);

    if let Some(start) = tz.from_local_datetime(&midnight).earliest() {
        return start.with_timezone(&Utc);
    }

    // Midnight skipped by a transition: walk forward to the first local
    // time that exists.
    (1..=24 * 4)
        .map(|quarter| midnight + chrono::Duration::minutes(15 * quarter))
        .find_map(|candidate| tz.from_local_datetime(&candidate).earliest())
        .map(|start| start.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
}
