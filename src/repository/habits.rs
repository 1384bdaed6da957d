/// Habit and daily completion operations

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::domain::{Habit, HabitCompletion, HabitId};
use crate::repository::{keys, RepositoryError, WellnessRepository};
use crate::storage::PreferenceStore;

impl<S: PreferenceStore, Tz: TimeZone> WellnessRepository<S, Tz> {
    /// All habits in insertion order
    pub fn list_habits(&self) -> Result<Vec<Habit>, RepositoryError> {
        self.load_list(keys::HABITS)
    }

    /// Habits that count toward daily statistics
    pub fn active_habits(&self) -> Result<Vec<Habit>, RepositoryError> {
        let mut habits = self.list_habits()?;
        habits.retain(|h| h.is_active);
        Ok(habits)
    }

    pub fn get_habit(&self, habit_id: &HabitId) -> Result<Option<Habit>, RepositoryError> {
        Ok(self.list_habits()?.into_iter().find(|h| &h.id == habit_id))
    }

    /// Append a habit
    ///
    /// Ids are expected to be fresh; a duplicate is logged and stored anyway.
    pub fn add_habit(&self, habit: Habit) -> Result<(), RepositoryError> {
        habit.validate()?;

        self.mutate_list(&self.locks.habits, keys::HABITS, |habits: &mut Vec<Habit>| {
            if habits.iter().any(|h| h.id == habit.id) {
                tracing::warn!("Adding habit with an id that already exists: {}", habit.id);
            }
            tracing::debug!("Created habit: {} ({})", habit.name, habit.id);
            habits.push(habit);
            ((), true)
        })
    }

    /// Replace the first habit with the same id
    ///
    /// Returns false, without writing, when no habit has that id. A changed
    /// target re-derives the completed flag on that habit's completions.
    pub fn update_habit(&self, habit: Habit) -> Result<bool, RepositoryError> {
        habit.validate()?;

        let previous_target = self.mutate_list(&self.locks.habits, keys::HABITS, |habits: &mut Vec<Habit>| {
            match habits.iter_mut().find(|h| h.id == habit.id) {
                Some(existing) => {
                    tracing::debug!("Updated habit: {} ({})", habit.name, habit.id);
                    let previous = existing.target_count;
                    *existing = habit.clone();
                    (Some(previous), true)
                }
                None => {
                    tracing::warn!("Update for unknown habit {} ignored", habit.id);
                    (None, false)
                }
            }
        })?;

        match previous_target {
            Some(previous) => {
                if previous != habit.target_count {
                    self.reconcile_completions(&habit)?;
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Recompute `is_completed` on every completion of `habit` from its target
    ///
    /// Returns how many records changed.
    pub fn reconcile_completions(&self, habit: &Habit) -> Result<usize, RepositoryError> {
        self.mutate_list(
            &self.locks.completions,
            keys::HABIT_COMPLETIONS,
            |completions: &mut Vec<HabitCompletion>| {
                let changed = completions
                    .iter_mut()
                    .filter(|c| c.habit_id == habit.id)
                    .map(|c| c.reconcile(habit.target_count))
                    .filter(|flipped| *flipped)
                    .count();
                if changed > 0 {
                    tracing::debug!(
                        "Re-derived {} completion(s) for {} at target {}",
                        changed,
                        habit.id,
                        habit.target_count
                    );
                }
                (changed, changed > 0)
            },
        )
    }

    /// Remove every habit with this id, returning how many were removed
    ///
    /// Completions for the habit are left in place.
    pub fn delete_habit(&self, habit_id: &HabitId) -> Result<usize, RepositoryError> {
        self.mutate_list(&self.locks.habits, keys::HABITS, |habits: &mut Vec<Habit>| {
            let before = habits.len();
            habits.retain(|h| &h.id != habit_id);
            let removed = before - habits.len();
            if removed > 0 {
                tracing::debug!("Deleted habit: {}", habit_id);
            }
            (removed, removed > 0)
        })
    }

    /// Every stored completion, in insertion order
    pub fn list_habit_completions(&self) -> Result<Vec<HabitCompletion>, RepositoryError> {
        self.load_list(keys::HABIT_COMPLETIONS)
    }

    /// Insert or replace the completion for `(habit_id, day)`
    ///
    /// The date is normalized to the start of its day first, so any instant
    /// within the day addresses the same record.
    pub fn upsert_habit_completion(&self, mut completion: HabitCompletion) -> Result<(), RepositoryError> {
        completion.date = self.day_start(completion.date);

        self.mutate_list(
            &self.locks.completions,
            keys::HABIT_COMPLETIONS,
            |completions: &mut Vec<HabitCompletion>| {
                match completions.iter_mut().find(|c| c.same_key(&completion)) {
                    Some(existing) => *existing = completion,
                    None => completions.push(completion),
                }
                ((), true)
            },
        )
    }

    /// Replace an existing completion; returns false if there is none
    pub fn update_habit_completion(&self, mut completion: HabitCompletion) -> Result<bool, RepositoryError> {
        completion.date = self.day_start(completion.date);

        self.mutate_list(
            &self.locks.completions,
            keys::HABIT_COMPLETIONS,
            |completions: &mut Vec<HabitCompletion>| {
                match completions.iter_mut().find(|c| c.same_key(&completion)) {
                    Some(existing) => {
                        *existing = completion;
                        (true, true)
                    }
                    None => {
                        tracing::warn!(
                            "Update for missing completion of habit {} on {} ignored",
                            completion.habit_id,
                            completion.date
                        );
                        (false, false)
                    }
                }
            },
        )
    }

    /// Remove the completion for `habit_id` on the day containing `date`
    pub fn delete_habit_completion(
        &self,
        habit_id: &HabitId,
        date: DateTime<Utc>,
    ) -> Result<usize, RepositoryError> {
        let day = self.day_start(date);

        self.mutate_list(
            &self.locks.completions,
            keys::HABIT_COMPLETIONS,
            |completions: &mut Vec<HabitCompletion>| {
                let before = completions.len();
                completions.retain(|c| !(&c.habit_id == habit_id && c.date == day));
                let removed = before - completions.len();
                (removed, removed > 0)
            },
        )
    }

    /// Completions on the day containing `date`
    pub fn completions_for_date(&self, date: DateTime<Utc>) -> Result<Vec<HabitCompletion>, RepositoryError> {
        let day = self.day_start(date);
        let mut completions = self.list_habit_completions()?;
        completions.retain(|c| c.date == day);
        Ok(completions)
    }

    /// Completions on the calendar day `day`
    pub fn completions_for_day(&self, day: NaiveDate) -> Result<Vec<HabitCompletion>, RepositoryError> {
        self.completions_for_date(self.start_of(day))
    }

    pub fn completions_for_habit(&self, habit_id: &HabitId) -> Result<Vec<HabitCompletion>, RepositoryError> {
        let mut completions = self.list_habit_completions()?;
        completions.retain(|c| &c.habit_id == habit_id);
        Ok(completions)
    }

    /// Completions from the `days` calendar days ending with `last_day`
    pub fn completions_for_days(
        &self,
        last_day: NaiveDate,
        days: u32,
    ) -> Result<Vec<HabitCompletion>, RepositoryError> {
        if days == 0 {
            return Ok(Vec::new());
        }
        let first_day = last_day - chrono::Duration::days(i64::from(days) - 1);
        let from = self.start_of(first_day);
        let until = self.start_of(last_day);

        let mut completions = self.list_habit_completions()?;
        completions.retain(|c| c.date >= from && c.date <= until);
        Ok(completions)
    }

    /// Store `completed_count` units for `habit` on the day containing `at`
    pub fn record_progress(
        &self,
        habit: &Habit,
        completed_count: u32,
        at: DateTime<Utc>,
    ) -> Result<HabitCompletion, RepositoryError> {
        let completion = HabitCompletion::record(habit, at, &self.tz, completed_count);
        self.upsert_habit_completion(completion.clone())?;
        Ok(completion)
    }

    /// Tick or untick a habit for the day: full target or zero
    pub fn set_completed(
        &self,
        habit: &Habit,
        completed: bool,
        at: DateTime<Utc>,
    ) -> Result<HabitCompletion, RepositoryError> {
        let count = if completed { habit.target_count } else { 0 };
        self.record_progress(habit, count, at)
    }

    /// Jump straight to the habit's target for the day
    pub fn mark_completed(&self, habit: &Habit, at: DateTime<Utc>) -> Result<HabitCompletion, RepositoryError> {
        self.set_completed(habit, true, at)
    }

    /// Add `delta` units to the day's progress, starting from zero if none
    pub fn add_progress(
        &self,
        habit: &Habit,
        delta: u32,
        at: DateTime<Utc>,
    ) -> Result<HabitCompletion, RepositoryError> {
        let day = self.day_start(at);

        self.mutate_list(
            &self.locks.completions,
            keys::HABIT_COMPLETIONS,
            |completions: &mut Vec<HabitCompletion>| {
                let current = completions
                    .iter()
                    .find(|c| c.habit_id == habit.id && c.date == day)
                    .map(|c| c.completed_count)
                    .unwrap_or(0);

                let updated = HabitCompletion::record(habit, day, &self.tz, current.saturating_add(delta));
                match completions.iter_mut().find(|c| c.same_key(&updated)) {
                    Some(existing) => *existing = updated.clone(),
                    None => completions.push(updated.clone()),
                }
                (updated, true)
            },
        )
    }
}
