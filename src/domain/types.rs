/// Identifier types and the habit category table
///
/// Ids are UUID newtypes that serialize as plain strings, so a persisted
/// collection reads as `[{"id": "…", …}]`.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a habit
///
/// This is a wrapper around UUID to provide type safety - you can't accidentally
/// pass a habit ID where a mood entry ID is expected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitId(pub Uuid);

impl HabitId {
    /// Generate a new random habit ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a habit ID from its string form (CLI arguments, stored keys)
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s.trim())?))
    }
}

impl Default for HabitId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unique identifier for a mood entry
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoodEntryId(pub Uuid);

impl MoodEntryId {
    /// Generate a new random mood entry ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a mood entry ID from its string form
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s.trim())?))
    }
}

impl Default for MoodEntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MoodEntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Habit templates offered when creating a habit
///
/// Picking a category pre-fills the habit's name, description, target and unit.
/// The category itself is not stored on the habit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HabitCategory {
    WaterDrinking,
    Exercise,
    Sleep,
    Meditation,
    Reading,
    Walking,
    Journaling,
    Learning,
    Other,
}

/// Values a new habit starts with for a given category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HabitDefaults {
    pub name: &'static str,
    pub description: &'static str,
    pub target_count: u32,
    pub unit: &'static str,
}

/// Unit used when a habit is created without one
pub const DEFAULT_UNIT: &str = "times";

const CATEGORY_DEFAULTS: &[(HabitCategory, HabitDefaults)] = &[
    (HabitCategory::WaterDrinking, HabitDefaults {
        name: "Drink Water",
        description: "Stay hydrated throughout the day",
        target_count: 8,
        unit: "glasses",
    }),
    (HabitCategory::Exercise, HabitDefaults {
        name: "Exercise",
        description: "Physical activity for health",
        target_count: 1,
        unit: "session",
    }),
    (HabitCategory::Sleep, HabitDefaults {
        name: "Sleep",
        description: "Get adequate rest",
        target_count: 8,
        unit: "hours",
    }),
    (HabitCategory::Meditation, HabitDefaults {
        name: "Meditation",
        description: "Mindfulness practice",
        target_count: 1,
        unit: "session",
    }),
    (HabitCategory::Reading, HabitDefaults {
        name: "Reading",
        description: "Read books or articles",
        target_count: 30,
        unit: "minutes",
    }),
    (HabitCategory::Walking, HabitDefaults {
        name: "Walking",
        description: "Take a walk",
        target_count: 30,
        unit: "minutes",
    }),
    (HabitCategory::Journaling, HabitDefaults {
        name: "Journaling",
        description: "Write in journal",
        target_count: 1,
        unit: "entry",
    }),
    (HabitCategory::Learning, HabitDefaults {
        name: "Learning",
        description: "Learn something new",
        target_count: 1,
        unit: "hour",
    }),
];

const OTHER_DEFAULTS: HabitDefaults = HabitDefaults {
    name: "",
    description: "",
    target_count: 1,
    unit: DEFAULT_UNIT,
};

impl HabitCategory {
    /// Every category, in the order they are offered to the user
    pub const ALL: [HabitCategory; 9] = [
        HabitCategory::WaterDrinking,
        HabitCategory::Exercise,
        HabitCategory::Sleep,
        HabitCategory::Meditation,
        HabitCategory::Reading,
        HabitCategory::Walking,
        HabitCategory::Journaling,
        HabitCategory::Learning,
        HabitCategory::Other,
    ];

    /// Get the display name for this category
    pub fn display_name(&self) -> &'static str {
        match self {
            HabitCategory::WaterDrinking => "Water Drinking",
            HabitCategory::Exercise => "Exercise",
            HabitCategory::Sleep => "Sleep",
            HabitCategory::Meditation => "Meditation",
            HabitCategory::Reading => "Reading",
            HabitCategory::Walking => "Walking",
            HabitCategory::Journaling => "Journaling",
            HabitCategory::Learning => "Learning",
            HabitCategory::Other => "Other",
        }
    }

    /// Parse a category from user input
    ///
    /// Accepts the display name or a compact form ("water", "water-drinking"),
    /// case-insensitively. Unknown input maps to `Other`.
    pub fn parse(input: &str) -> Self {
        let normalized: String = input
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect();

        match normalized.as_str() {
            "water" | "waterdrinking" | "hydration" => HabitCategory::WaterDrinking,
            "exercise" => HabitCategory::Exercise,
            "sleep" => HabitCategory::Sleep,
            "meditation" => HabitCategory::Meditation,
            "reading" => HabitCategory::Reading,
            "walking" => HabitCategory::Walking,
            "journaling" => HabitCategory::Journaling,
            "learning" => HabitCategory::Learning,
            _ => HabitCategory::Other,
        }
    }
}

/// Look up the defaults a new habit of this category starts with
pub fn defaults_for_category(category: HabitCategory) -> HabitDefaults {
    CATEGORY_DEFAULTS
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, defaults)| *defaults)
        .unwrap_or(OTHER_DEFAULTS)
}
