/// User profile and reminder settings
///
/// Both are stored as independent scalar keys rather than one record, so
/// each field has its own default.

use std::time::Duration;

use crate::domain::DomainError;

/// Name used when onboarding is skipped
pub const DEFAULT_USER_NAME: &str = "User";

/// Reminder cadence used when none has been set
pub const DEFAULT_REMINDER_INTERVAL_MINUTES: u64 = 60;

/// Longest accepted reminder cadence: one week
pub const MAX_REMINDER_INTERVAL_MINUTES: u64 = 7 * 24 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserProfile {
    /// Empty until onboarding stores one
    pub user_name: String,
    pub onboarding_completed: bool,
}

impl UserProfile {
    /// Name to greet the user with
    pub fn display_name(&self) -> &str {
        if self.user_name.trim().is_empty() {
            DEFAULT_USER_NAME
        } else {
            &self.user_name
        }
    }
}

/// Validated reminder cadence in minutes, within `1..=MAX_REMINDER_INTERVAL_MINUTES`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReminderInterval(u64);

impl ReminderInterval {
    pub fn new(minutes: u64) -> Result<Self, DomainError> {
        if minutes == 0 || minutes > MAX_REMINDER_INTERVAL_MINUTES {
            return Err(DomainError::InvalidInterval(minutes));
        }
        Ok(Self(minutes))
    }

    pub fn minutes(&self) -> u64 {
        self.0
    }

    pub fn as_duration(&self) -> Duration {
        Duration::from_secs(self.0 * 60)
    }
}

impl Default for ReminderInterval {
    fn default() -> Self {
        Self(DEFAULT_REMINDER_INTERVAL_MINUTES)
    }
}

/// Persisted reminder preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderSettings {
    pub enabled: bool,
    pub interval: ReminderInterval,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            interval: ReminderInterval::default(),
        }
    }
}
