/// Onboarding, profile, reminder and reset commands

use chrono::TimeZone;
use serde::{Deserialize, Serialize};

use crate::commands::CommandError;
use crate::domain::ReminderInterval;
use crate::reminder::{ReminderPolicy, ReminderState};
use crate::repository::WellnessRepository;
use crate::storage::PreferenceStore;

#[derive(Debug, Default, Deserialize)]
pub struct OnboardingParams {
    /// Leave out to skip; the user is then called "User"
    pub user_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user_name: String,
    pub onboarding_completed: bool,
    pub reminders_enabled: bool,
    pub reminder_interval_minutes: u64,
    pub message: String,
}

pub fn complete_onboarding<S: PreferenceStore, Tz: TimeZone>(
    repo: &WellnessRepository<S, Tz>,
    params: OnboardingParams,
) -> Result<ProfileResponse, CommandError> {
    let profile = repo.complete_onboarding(params.user_name.as_deref())?;
    let mut response = show_profile(repo)?;
    response.message = format!("👋 Welcome, {}! Let's build some healthy habits.", profile.display_name());
    Ok(response)
}

pub fn restart_onboarding<S: PreferenceStore, Tz: TimeZone>(
    repo: &WellnessRepository<S, Tz>,
) -> Result<ProfileResponse, CommandError> {
    repo.restart_onboarding()?;
    let mut response = show_profile(repo)?;
    response.message = "Onboarding will run again next time".to_string();
    Ok(response)
}

pub fn show_profile<S: PreferenceStore, Tz: TimeZone>(
    repo: &WellnessRepository<S, Tz>,
) -> Result<ProfileResponse, CommandError> {
    let profile = repo.get_user_profile()?;
    let reminders = repo.get_reminder_settings()?;

    let reminder_line = if reminders.enabled {
        format!("on, every {} minutes", reminders.interval.minutes())
    } else {
        "off".to_string()
    };

    Ok(ProfileResponse {
        user_name: profile.display_name().to_string(),
        onboarding_completed: profile.onboarding_completed,
        reminders_enabled: reminders.enabled,
        reminder_interval_minutes: reminders.interval.minutes(),
        message: format!(
            "Hello, {}! Onboarding {}. Water reminders {}.",
            profile.display_name(),
            if profile.onboarding_completed { "complete" } else { "pending" },
            reminder_line
        ),
    })
}

/// Change reminder settings; either field may be left out
#[derive(Debug, Default, Deserialize)]
pub struct ReminderParams {
    pub enabled: Option<bool>,
    pub interval_minutes: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct ReminderResponse {
    pub enabled: bool,
    pub interval_minutes: u64,
    pub message: String,
}

pub fn configure_reminders<S: PreferenceStore, Tz: TimeZone>(
    policy: &ReminderPolicy<S, Tz>,
    params: ReminderParams,
) -> Result<ReminderResponse, CommandError> {
    // Validate before touching anything
    let interval = params.interval_minutes.map(ReminderInterval::new).transpose()?;

    policy.restore()?;
    if let Some(interval) = interval {
        policy.set_interval(interval)?;
    }
    if let Some(enabled) = params.enabled {
        policy.set_enabled(enabled)?;
    }

    let settings = policy.repository().get_reminder_settings()?;
    let message = match policy.state() {
        ReminderState::Enabled { interval } => {
            format!("⏰ Water reminders every {} minutes", interval.minutes())
        }
        ReminderState::Disabled => "🔕 Water reminders are off".to_string(),
    };

    Ok(ReminderResponse {
        enabled: settings.enabled,
        interval_minutes: settings.interval.minutes(),
        message,
    })
}

#[derive(Debug, Default, Deserialize)]
pub struct ResetParams {
    /// Must be true; guards against accidental wipes
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub success: bool,
    pub message: String,
}

/// Erase every habit, mood, counter and setting
pub fn reset_all<S: PreferenceStore, Tz: TimeZone>(
    repo: &WellnessRepository<S, Tz>,
    params: ResetParams,
) -> Result<ResetResponse, CommandError> {
    if !params.confirm {
        return Ok(ResetResponse {
            success: false,
            message: "Nothing was deleted. Confirm to erase all data.".to_string(),
        });
    }

    repo.clear_all()?;
    Ok(ResetResponse {
        success: true,
        message: "All data cleared. Starting fresh! 🌱".to_string(),
    })
}
