/// Layout of the JSON values written to the preference store
use chrono::{TimeZone, Utc};
use serde_json::Value;
use wellness_tracker::repository::keys;
use wellness_tracker::*;

fn repo() -> WellnessRepository<MemoryPreferenceStore, Utc> {
    WellnessRepository::with_timezone(MemoryPreferenceStore::new(), Utc)
}

fn stored(repo: &WellnessRepository<MemoryPreferenceStore, Utc>, key: &str) -> Value {
    let raw = repo.store().get(key).unwrap().expect("key should be set");
    serde_json::from_str(&raw).unwrap()
}

#[test]
fn test_completion_fields_are_camel_case_millis() {
    let repo = repo();
    let habit = Habit::new("Drink Water", "", 8, "glasses").unwrap();
    let at = Utc.with_ymd_and_hms(2024, 5, 20, 14, 30, 0).unwrap();
    repo.record_progress(&habit, 3, at).unwrap();

    let value = stored(&repo, keys::HABIT_COMPLETIONS);
    let record = &value[0];
    assert_eq!(record["habitId"], Value::String(habit.id.to_string()));
    assert_eq!(record["completedCount"], 3);
    assert_eq!(record["isCompleted"], false);
    let midnight = Utc.with_ymd_and_hms(2024, 5, 20, 0, 0, 0).unwrap();
    assert_eq!(record["date"], midnight.timestamp_millis());
}

#[test]
fn test_habit_and_hydration_layout() {
    let repo = repo();
    let habit = Habit::new("Read", "Before bed", 30, "minutes").unwrap();
    repo.add_habit(habit.clone()).unwrap();
    repo.add_glass(Utc::now()).unwrap();

    let habits = stored(&repo, keys::HABITS);
    assert_eq!(habits[0]["id"], Value::String(habit.id.to_string()));
    assert_eq!(habits[0]["targetCount"], 30);
    assert_eq!(habits[0]["isActive"], true);
    assert!(habits[0]["createdAt"].is_i64());

    let hydration = stored(&repo, keys::HYDRATION_DATA);
    assert_eq!(hydration["glassesDrunk"], 1);
    assert_eq!(hydration["targetGlasses"], 8);
    assert!(hydration["lastUpdated"].is_i64());
}

#[test]
fn test_scalar_settings_layout() {
    let repo = repo();
    repo.set_user_name("Kai").unwrap();
    repo.set_reminder_enabled(false).unwrap();
    repo.set_reminder_interval(ReminderInterval::new(90).unwrap()).unwrap();

    assert_eq!(stored(&repo, keys::USER_NAME), "Kai");
    assert_eq!(stored(&repo, keys::REMINDER_ENABLED), false);
    assert_eq!(stored(&repo, keys::REMINDER_INTERVAL), 90);
}

#[test]
fn test_reads_records_written_by_older_versions() {
    let repo = repo();
    let id = HabitId::new();
    repo.store()
        .set(
            keys::HABITS,
            &format!(
                r#"[{{"id":"{}","name":"Walk","description":"","targetCount":30,"unit":"minutes","createdAt":1700000000000}}]"#,
                id
            ),
        )
        .unwrap();
    repo.store()
        .set(keys::MOOD_ENTRIES, r#"[{"id":"6f1c1c1e-6c4e-4d43-9a51-2b1f0d0e7a11","emoji":"😊","timestamp":1700000000000}]"#)
        .unwrap();

    let habits = repo.list_habits().unwrap();
    assert_eq!(habits[0].id, id);
    assert!(habits[0].is_active);

    let moods = repo.list_mood_entries().unwrap();
    assert_eq!(moods[0].note, "");
}
