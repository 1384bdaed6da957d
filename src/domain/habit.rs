/// Habit entity and related functionality
///
/// This module defines the Habit struct that represents something the user
/// wants to do every day, along with its validation rules.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::domain::{defaults_for_category, to_stored_precision, DomainError, HabitCategory, HabitId, DEFAULT_UNIT};

/// A habit is a recurring activity with a daily numeric target
///
/// e.g. "Drink Water", 8 glasses. Progress toward the target is recorded
/// separately as one `HabitCompletion` per day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    /// Unique identifier, never changes after creation
    pub id: HabitId,
    /// Display name (e.g., "Drink Water", "Read")
    pub name: String,
    /// Free-text description, possibly empty
    pub description: String,
    /// How many units make a completed day (always >= 1)
    pub target_count: u32,
    /// Unit for the target (e.g., "glasses", "minutes")
    pub unit: String,
    /// Inactive habits are kept but excluded from daily statistics
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// When this habit was created
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

impl Habit {
    /// Create a new habit with validation
    ///
    /// An empty unit falls back to "times".
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        target_count: u32,
        unit: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let name = name.into().trim().to_string();
        let description = description.into().trim().to_string();
        let mut unit = unit.into().trim().to_string();
        if unit.is_empty() {
            unit = DEFAULT_UNIT.to_string();
        }

        let habit = Self {
            id: HabitId::new(),
            name,
            description,
            target_count,
            unit,
            is_active: true,
            created_at: to_stored_precision(Utc::now()),
        };
        habit.validate()?;
        Ok(habit)
    }

    /// Create a habit pre-filled from a category template
    ///
    /// `Other` has no default name, so a name must be supplied for it.
    pub fn from_category(category: HabitCategory, name: Option<String>) -> Result<Self, DomainError> {
        let defaults = defaults_for_category(category);
        let name = name.unwrap_or_else(|| defaults.name.to_string());
        Self::new(name, defaults.description, defaults.target_count, defaults.unit)
    }

    /// Update the habit's editable properties with validation
    ///
    /// The id and creation time are preserved. Nothing is applied if any
    /// new value is invalid.
    pub fn update(
        &mut self,
        name: Option<String>,
        description: Option<String>,
        target_count: Option<u32>,
        unit: Option<String>,
        is_active: Option<bool>,
    ) -> Result<(), DomainError> {
        let mut updated = self.clone();

        if let Some(new_name) = name {
            updated.name = new_name.trim().to_string();
        }
        if let Some(new_description) = description {
            updated.description = new_description.trim().to_string();
        }
        if let Some(new_target) = target_count {
            updated.target_count = new_target;
        }
        if let Some(new_unit) = unit {
            let trimmed = new_unit.trim();
            updated.unit = if trimmed.is_empty() { DEFAULT_UNIT.to_string() } else { trimmed.to_string() };
        }
        if let Some(new_is_active) = is_active {
            updated.is_active = new_is_active;
        }

        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Check every field against the business rules
    ///
    /// The repository calls this before persisting, so a record edited
    /// field-by-field by a caller is still checked.
    pub fn validate(&self) -> Result<(), DomainError> {
        Self::validate_name(&self.name)?;
        Self::validate_description(&self.description)?;
        Self::validate_target_and_unit(self.target_count, &self.unit)?;
        Ok(())
    }

    /// Whether `completed_count` meets this habit's daily target
    pub fn is_met_by(&self, completed_count: u32) -> bool {
        completed_count >= self.target_count
    }

    /// Get a display string for the target (e.g., "8 glasses")
    pub fn target_display(&self) -> String {
        format!("{} {}", self.target_count, self.unit)
    }

    // Validation helper methods

    /// Validate habit name according to business rules
    fn validate_name(name: &str) -> Result<(), DomainError> {
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be empty".to_string()
            ));
        }

        if trimmed.chars().count() > 100 {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be longer than 100 characters".to_string()
            ));
        }

        Ok(())
    }

    fn validate_description(description: &str) -> Result<(), DomainError> {
        if description.chars().count() > 500 {
            return Err(DomainError::Validation {
                message: "Description cannot be longer than 500 characters".to_string()
            });
        }
        Ok(())
    }

    /// Validate target count and unit together
    fn validate_target_and_unit(target_count: u32, unit: &str) -> Result<(), DomainError> {
        if target_count == 0 {
            return Err(DomainError::InvalidValue {
                message: "Target count must be greater than 0".to_string()
            });
        }
        if target_count > 10000 {
            return Err(DomainError::InvalidValue {
                message: "Target count cannot exceed 10000".to_string()
            });
        }

        let trimmed = unit.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidValue {
                message: "Unit cannot be empty".to_string()
            });
        }
        if trimmed.chars().count() > 20 {
            return Err(DomainError::InvalidValue {
                message: "Unit cannot be longer than 20 characters".to_string()
            });
        }

        Ok(())
    }
}
