/// Hydration counter, user profile and reminder settings
///
/// These are single records or scalars rather than collections, so each
/// write replaces the stored value outright.

use chrono::{DateTime, TimeZone, Utc};

use crate::domain::{
    to_stored_precision, HydrationState, ReminderInterval, ReminderSettings, UserProfile,
    DEFAULT_USER_NAME,
};
use crate::repository::{keys, RepositoryError, WellnessRepository};
use crate::storage::PreferenceStore;

impl<S: PreferenceStore, Tz: TimeZone> WellnessRepository<S, Tz> {
    /// The hydration counter, or a fresh one if none is stored
    pub fn get_hydration_state(&self) -> Result<HydrationState, RepositoryError> {
        self.load_or(keys::HYDRATION_DATA, HydrationState::default)
    }

    /// Store a hydration counter, clamping the count into `[0, target]`
    pub fn set_hydration_state(&self, state: HydrationState) -> Result<HydrationState, RepositoryError> {
        let _guard = self.locks.hydration.lock();
        self.write_hydration(state)
    }

    /// Drink one glass; the count stops at the target
    pub fn add_glass(&self, at: DateTime<Utc>) -> Result<HydrationState, RepositoryError> {
        self.mutate_hydration(|state| state.add_glass(at))
    }

    /// Undo one glass; the count stops at zero
    pub fn remove_glass(&self, at: DateTime<Utc>) -> Result<HydrationState, RepositoryError> {
        self.mutate_hydration(|state| state.remove_glass(at))
    }

    /// Back to zero glasses with the default target
    ///
    /// The stored counter is dropped, so later reads fall back to defaults.
    pub fn reset_hydration(&self) -> Result<HydrationState, RepositoryError> {
        let _guard = self.locks.hydration.lock();
        self.store.remove(keys::HYDRATION_DATA)?;
        tracing::debug!("Hydration counter reset");
        Ok(HydrationState::default())
    }

    /// Change the daily target, keeping today's count where possible
    pub fn set_hydration_target(&self, target_glasses: u32) -> Result<HydrationState, RepositoryError> {
        let _guard = self.locks.hydration.lock();
        let mut state = self.get_hydration_state()?;
        state.target_glasses = target_glasses;
        state.last_updated = to_stored_precision(Utc::now());
        self.write_hydration(state)
    }

    fn mutate_hydration(
        &self,
        apply: impl FnOnce(&mut HydrationState) -> bool,
    ) -> Result<HydrationState, RepositoryError> {
        let _guard = self.locks.hydration.lock();
        let mut state = self.get_hydration_state()?;
        if apply(&mut state) {
            return self.write_hydration(state);
        }
        Ok(state)
    }

    /// Validate, clamp and write; caller holds the hydration lock
    fn write_hydration(&self, mut state: HydrationState) -> Result<HydrationState, RepositoryError> {
        state.validate()?;
        if state.clamp() {
            tracing::debug!("Clamped hydration count to target {}", state.target_glasses);
        }
        self.write_json(keys::HYDRATION_DATA, &state)?;
        tracing::debug!("Hydration now {}/{}", state.glasses_drunk, state.target_glasses);
        Ok(state)
    }

    pub fn get_user_profile(&self) -> Result<UserProfile, RepositoryError> {
        Ok(UserProfile {
            user_name: self.load_or(keys::USER_NAME, String::new)?,
            onboarding_completed: self.load_or(keys::ONBOARDING_COMPLETED, || false)?,
        })
    }

    pub fn set_user_name(&self, user_name: &str) -> Result<(), RepositoryError> {
        let _guard = self.locks.settings.lock();
        self.write_json(keys::USER_NAME, user_name.trim())
    }

    pub fn set_onboarding_completed(&self, completed: bool) -> Result<(), RepositoryError> {
        let _guard = self.locks.settings.lock();
        self.write_json(keys::ONBOARDING_COMPLETED, &completed)
    }

    /// Finish onboarding with the given name, or the default when skipped
    pub fn complete_onboarding(&self, user_name: Option<&str>) -> Result<UserProfile, RepositoryError> {
        let name = user_name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_USER_NAME);

        let _guard = self.locks.settings.lock();
        self.write_json(keys::USER_NAME, name)?;
        self.write_json(keys::ONBOARDING_COMPLETED, &true)?;
        tracing::info!("Onboarding completed for {}", name);

        Ok(UserProfile {
            user_name: name.to_string(),
            onboarding_completed: true,
        })
    }

    /// Send the user back through onboarding; the stored name is kept
    pub fn restart_onboarding(&self) -> Result<(), RepositoryError> {
        self.set_onboarding_completed(false)?;
        tracing::info!("Onboarding restarted");
        Ok(())
    }

    /// Stored reminder settings, with defaults for anything unset or invalid
    pub fn get_reminder_settings(&self) -> Result<ReminderSettings, RepositoryError> {
        let defaults = ReminderSettings::default();
        let enabled = self.load_or(keys::REMINDER_ENABLED, || defaults.enabled)?;
        let minutes: i64 = self.load_or(keys::REMINDER_INTERVAL, || defaults.interval.minutes() as i64)?;

        let interval = u64::try_from(minutes)
            .ok()
            .and_then(|m| ReminderInterval::new(m).ok())
            .unwrap_or_else(|| {
                tracing::warn!("Stored reminder interval {} is invalid, using default", minutes);
                defaults.interval
            });

        Ok(ReminderSettings { enabled, interval })
    }

    pub fn set_reminder_enabled(&self, enabled: bool) -> Result<(), RepositoryError> {
        let _guard = self.locks.settings.lock();
        self.write_json(keys::REMINDER_ENABLED, &enabled)
    }

    pub fn set_reminder_interval(&self, interval: ReminderInterval) -> Result<(), RepositoryError> {
        let _guard = self.locks.settings.lock();
        self.write_json(keys::REMINDER_INTERVAL, &interval.minutes())
    }

    /// Write both reminder keys under one lock
    pub fn set_reminder_settings(&self, settings: ReminderSettings) -> Result<(), RepositoryError> {
        let _guard = self.locks.settings.lock();
        self.write_json(keys::REMINDER_INTERVAL, &settings.interval.minutes())?;
        self.write_json(keys::REMINDER_ENABLED, &settings.enabled)
    }
}
