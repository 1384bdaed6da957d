/// Persistence tests through `WellnessTracker` and a SQLite file
use std::sync::Arc;
use std::thread;

use chrono::{Duration, Utc};
use tempfile::TempDir;
use wellness_tracker::analytics::completion_rate;
use wellness_tracker::*;

fn temp_tracker() -> (TempDir, WellnessTracker) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let tracker = WellnessTracker::open(dir.path().join("wellness.db")).expect("Failed to open tracker");
    (dir, tracker)
}

#[test]
fn test_data_survives_reopen() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = dir.path().join("nested").join("wellness.db");

    let habit = Habit::new("Drink Water", "Stay hydrated", 8, "glasses").unwrap();
    let mood = MoodEntry::new("😄", "sunny walk").unwrap();
    {
        let tracker = WellnessTracker::open(db_path.clone()).expect("Failed to open tracker");
        let repo = tracker.repository();
        repo.add_habit(habit.clone()).unwrap();
        repo.record_progress(&habit, 5, Utc::now()).unwrap();
        repo.add_mood_entry(mood.clone()).unwrap();
        repo.add_glass(Utc::now()).unwrap();
        repo.complete_onboarding(Some("Robin")).unwrap();
        repo.set_reminder_interval(ReminderInterval::new(45).unwrap()).unwrap();
    }

    let tracker = WellnessTracker::open(db_path).expect("Failed to reopen tracker");
    let repo = tracker.repository();

    assert_eq!(repo.list_habits().unwrap(), vec![habit.clone()]);
    assert_eq!(repo.completions_for_habit(&habit.id).unwrap()[0].completed_count, 5);
    assert_eq!(repo.list_mood_entries().unwrap(), vec![mood]);
    assert_eq!(repo.get_hydration_state().unwrap().glasses_drunk, 1);

    let profile = repo.get_user_profile().unwrap();
    assert_eq!(profile.user_name, "Robin");
    assert!(profile.onboarding_completed);

    let reminders = repo.get_reminder_settings().unwrap();
    assert!(reminders.enabled);
    assert_eq!(reminders.interval.minutes(), 45);
}

#[test]
fn test_drink_water_full_day_scores_100() {
    let (_dir, tracker) = temp_tracker();
    let repo = tracker.repository();

    let habit = Habit::from_category(HabitCategory::WaterDrinking, None).unwrap();
    assert_eq!(habit.target_count, 8);
    repo.add_habit(habit.clone()).unwrap();

    let completion = repo.record_progress(&habit, 8, Utc::now()).unwrap();
    assert!(completion.is_completed);

    let habits = repo.active_habits().unwrap();
    let today = repo.completions_for_date(Utc::now()).unwrap();
    assert_eq!(completion_rate(&habits, &today), 100);
}

#[test]
fn test_repeated_upserts_leave_one_record_per_day() {
    let (_dir, tracker) = temp_tracker();
    let repo = tracker.repository();
    let habit = Habit::new("Read", "", 30, "minutes").unwrap();
    repo.add_habit(habit.clone()).unwrap();

    let day = repo.start_of(repo.today());
    for (offset_hours, count) in [(1, 5), (9, 12), (20, 30)] {
        repo.record_progress(&habit, count, day + Duration::hours(offset_hours)).unwrap();
    }
    repo.record_progress(&habit, 10, day - Duration::hours(2)).unwrap();

    let completions = repo.completions_for_habit(&habit.id).unwrap();
    assert_eq!(completions.len(), 2);

    let todays: Vec<_> = completions.iter().filter(|c| c.date == day).collect();
    assert_eq!(todays.len(), 1);
    assert_eq!(todays[0].completed_count, 30);
    assert!(todays[0].is_completed);
}

#[test]
fn test_delete_leaves_no_trace_and_keeps_history() {
    let (_dir, tracker) = temp_tracker();
    let repo = tracker.repository();
    let keep = Habit::new("Walk", "", 30, "minutes").unwrap();
    let gone = Habit::new("Sleep", "", 8, "hours").unwrap();
    repo.add_habit(keep.clone()).unwrap();
    repo.add_habit(gone.clone()).unwrap();
    repo.mark_completed(&gone, Utc::now()).unwrap();

    assert_eq!(repo.delete_habit(&gone.id).unwrap(), 1);

    let habits = repo.list_habits().unwrap();
    assert_eq!(habits.len(), 1);
    assert_eq!(habits[0].id, keep.id);
    // Completions are not cascaded
    assert_eq!(repo.completions_for_habit(&gone.id).unwrap().len(), 1);

    // A deleted habit no longer counts toward the daily rate
    let today = repo.completions_for_date(Utc::now()).unwrap();
    assert_eq!(analytics::completion_rate(&habits, &today), 0);
}

#[test]
fn test_clear_all_on_disk() {
    let (_dir, tracker) = temp_tracker();
    let repo = tracker.repository();
    repo.add_habit(Habit::new("Walk", "", 30, "minutes").unwrap()).unwrap();
    repo.add_mood_entry(MoodEntry::new("😊", "").unwrap()).unwrap();
    repo.set_reminder_enabled(false).unwrap();

    repo.clear_all().unwrap();

    assert!(repo.list_habits().unwrap().is_empty());
    assert!(repo.list_mood_entries().unwrap().is_empty());
    assert_eq!(repo.get_hydration_state().unwrap().glasses_drunk, 0);
    assert_eq!(repo.get_reminder_settings().unwrap(), ReminderSettings::default());
    assert_eq!(repo.get_user_profile().unwrap(), UserProfile::default());
}

#[test]
fn test_concurrent_progress_is_not_lost() {
    let repo = Arc::new(WellnessRepository::with_timezone(
        SqlitePreferenceStore::in_memory().unwrap(),
        Utc,
    ));
    let habit = Habit::new("Drink Water", "", 8, "glasses").unwrap();
    repo.add_habit(habit.clone()).unwrap();
    let now = Utc::now();

    let workers: Vec<_> = (0..8)
        .map(|_| {
            let repo = Arc::clone(&repo);
            let habit = habit.clone();
            thread::spawn(move || {
                for _ in 0..10 {
                    repo.add_progress(&habit, 1, now).unwrap();
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    let completions = repo.completions_for_habit(&habit.id).unwrap();
    assert_eq!(completions.len(), 1);
    assert_eq!(completions[0].completed_count, 80);
}

#[test]
fn test_concurrent_writes_to_different_families() {
    let repo = Arc::new(WellnessRepository::with_timezone(MemoryPreferenceStore::new(), Utc));

    let habits_repo = Arc::clone(&repo);
    let habits = thread::spawn(move || {
        for i in 0..25 {
            habits_repo
                .add_habit(Habit::new(format!("Habit {}", i), "", 1, "times").unwrap())
                .unwrap();
        }
    });
    let moods_repo = Arc::clone(&repo);
    let moods = thread::spawn(move || {
        for _ in 0..25 {
            moods_repo.add_mood_entry(MoodEntry::new("😐", "").unwrap()).unwrap();
        }
    });
    habits.join().unwrap();
    moods.join().unwrap();

    assert_eq!(repo.list_habits().unwrap().len(), 25);
    assert_eq!(repo.list_mood_entries().unwrap().len(), 25);
}

#[test]
fn test_commands_against_sqlite() {
    let (_dir, tracker) = temp_tracker();
    let repo = tracker.repository();

    let created = commands::create_habit(
        repo,
        commands::CreateHabitParams {
            category: "Walking".to_string(),
            ..Default::default()
        },
    )
    .unwrap();

    let logged = commands::log_habit(
        repo,
        commands::LogHabitParams {
            habit_id: created.habit_id.clone(),
            set_count: Some(30),
            ..Default::default()
        },
    )
    .unwrap();
    assert!(logged.is_completed);

    let report = commands::progress_report(repo, commands::ProgressParams { include_streaks: true }).unwrap();
    assert_eq!(report.today_percent, 100);
    assert_eq!(report.streaks[0].current_streak, 1);
}
