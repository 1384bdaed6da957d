/// Basic unit tests to verify core functionality
use chrono::{Duration, FixedOffset, NaiveDate, TimeZone, Timelike, Utc};
use wellness_tracker::analytics::*;
use wellness_tracker::*;

#[test]
fn test_habit_creation() {
    let habit = Habit::new("Meditate", "Ten quiet minutes", 1, "session");

    assert!(habit.is_ok());
    let habit = habit.unwrap();
    assert_eq!(habit.name, "Meditate");
    assert!(habit.is_active);
}

#[test]
fn test_habit_validation_boundaries() {
    assert!(Habit::new("", "", 1, "times").is_err());
    assert!(Habit::new("x".repeat(101), "", 1, "times").is_err());
    assert!(Habit::new("Run", "", 0, "km").is_err());
    assert!(Habit::new("Run", "", 10_001, "km").is_err());
    assert!(Habit::new("Run", "", 10_000, "km").is_ok());
    assert_eq!(Habit::new("Run", "", 5, "").unwrap().unit, "times");
}

#[test]
fn test_every_category_builds_a_habit() {
    for category in HabitCategory::ALL {
        let name = (category == HabitCategory::Other).then(|| "Custom".to_string());
        let habit = Habit::from_category(category, name).unwrap();
        assert!(habit.target_count >= 1);
    }
}

#[test]
fn test_normalize_is_idempotent_across_zones() {
    let instant = Utc.with_ymd_and_hms(2024, 7, 1, 3, 45, 12).unwrap();
    for hours in [-11, -5, 0, 5, 9, 14] {
        let tz = FixedOffset::east_opt(hours * 3600).unwrap();
        let once = normalize_to_day_start(instant, &tz);
        assert_eq!(normalize_to_day_start(once, &tz), once);

        let local = once.with_timezone(&tz);
        assert_eq!((local.hour(), local.minute(), local.second()), (0, 0, 0));
    }
}

#[test]
fn test_completion_rate_zero_active_habits() {
    let mut habit = Habit::new("Paused", "", 1, "times").unwrap();
    habit.is_active = false;
    let done = HabitCompletion::record(&habit, Utc::now(), &Utc, 1);

    assert_eq!(completion_rate(&[habit], &[done]), 0);
}

#[test]
fn test_weekly_series_is_oldest_first() {
    let habit = Habit::new("Walk", "", 1, "walk").unwrap();
    let today = NaiveDate::from_ymd_opt(2024, 3, 3).unwrap();
    let monday = today - Duration::days(6);
    let completions = vec![HabitCompletion::record(&habit, start_of_day(monday, &Utc), &Utc, 1)];

    let series = weekly_series(&[habit], &completions, today, &Utc);
    let days: Vec<NaiveDate> = series.iter().map(|d| d.day).collect();
    assert!(days.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(series[0].percent, 100);
    assert!(series[1..].iter().all(|d| d.percent == 0));
}

#[test]
fn test_mood_scores_and_unknown_emoji() {
    assert_eq!(mood_score("😢"), 1);
    assert_eq!(mood_score("😐"), 2);
    assert_eq!(mood_score("😊"), 3);
    assert_eq!(mood_score("😄"), 4);
    assert_eq!(mood_score("🤩"), 5);
    assert_eq!(mood_score("🦀"), 3);
}

#[test]
fn test_hydration_counter_bounds() {
    let mut state = HydrationState::default();
    assert!(!state.remove_glass(Utc::now()));
    for _ in 0..12 {
        state.add_glass(Utc::now());
    }
    assert_eq!(state.glasses_drunk, DEFAULT_TARGET_GLASSES);
    assert!(state.goal_reached());
}

#[test]
fn test_reminder_interval_must_be_positive() {
    assert!(matches!(ReminderInterval::new(0), Err(DomainError::InvalidInterval(0))));
    assert_eq!(ReminderInterval::default().minutes(), 60);
}

#[test]
fn test_streak_with_gap() {
    let habit = Habit::new("Journal", "", 1, "entry").unwrap();
    let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
    let days = [1, 2, 3, 8, 9, 10];
    let completions: Vec<HabitCompletion> = days
        .iter()
        .map(|d| {
            let day = NaiveDate::from_ymd_opt(2024, 1, *d).unwrap();
            HabitCompletion::record(&habit, start_of_day(day, &Utc), &Utc, 1)
        })
        .collect();

    let streak = HabitStreak::calculate(habit.id.clone(), &completions, today, &Utc);
    assert_eq!(streak.current_streak, 3);
    assert_eq!(streak.longest_streak, 3);
    assert_eq!(streak.total_completions, 6);
}
