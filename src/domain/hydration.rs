/// Hydration counter
///
/// A single record tracking glasses of water against a daily target. It is
/// overwritten wholesale on every change.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::domain::{to_stored_precision, DomainError};

/// Target used when none has been set
pub const DEFAULT_TARGET_GLASSES: u32 = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HydrationState {
    pub glasses_drunk: u32,
    pub target_glasses: u32,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub last_updated: DateTime<Utc>,
}

impl Default for HydrationState {
    fn default() -> Self {
        Self {
            glasses_drunk: 0,
            target_glasses: DEFAULT_TARGET_GLASSES,
            last_updated: to_stored_precision(Utc::now()),
        }
    }
}

impl HydrationState {
    /// A fresh counter with a custom target
    pub fn with_target(target_glasses: u32) -> Result<Self, DomainError> {
        let state = Self {
            target_glasses,
            ..Self::default()
        };
        state.validate()?;
        Ok(state)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.target_glasses == 0 {
            return Err(DomainError::InvalidValue {
                message: "Hydration target must be at least 1 glass".to_string(),
            });
        }
        Ok(())
    }

    /// Clamp the count into `[0, target]`
    ///
    /// Returns true if the count had to be adjusted.
    pub fn clamp(&mut self) -> bool {
        if self.glasses_drunk > self.target_glasses {
            self.glasses_drunk = self.target_glasses;
            return true;
        }
        false
    }

    /// One more glass, stopping at the target
    pub fn add_glass(&mut self, now: DateTime<Utc>) -> bool {
        if self.glasses_drunk >= self.target_glasses {
            return false;
        }
        self.glasses_drunk += 1;
        self.last_updated = to_stored_precision(now);
        true
    }

    /// One glass fewer, stopping at zero
    pub fn remove_glass(&mut self, now: DateTime<Utc>) -> bool {
        if self.glasses_drunk == 0 {
            return false;
        }
        self.glasses_drunk -= 1;
        self.last_updated = to_stored_precision(now);
        true
    }

    pub fn goal_reached(&self) -> bool {
        self.glasses_drunk >= self.target_glasses
    }

    /// Progress toward the target, 0-100
    pub fn progress_percent(&self) -> u32 {
        if self.target_glasses == 0 {
            return 0;
        }
        let percent = (100.0 * self.glasses_drunk as f64 / self.target_glasses as f64).round() as u32;
        percent.min(100)
    }

    /// Encouragement shown next to the counter
    pub fn status_message(&self) -> &'static str {
        if self.glasses_drunk == 0 {
            "Let's start hydrating! Your body needs water! 🚰"
        } else if self.glasses_drunk < self.target_glasses / 2 {
            "Keep going! You're doing great! 💪"
        } else if self.glasses_drunk < self.target_glasses {
            "Halfway there! You're doing great! ✨"
        } else {
            "Amazing! You've reached your hydration goal! 🎉"
        }
    }
}
