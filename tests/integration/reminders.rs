/// Reminder policy driving the real tokio scheduler under paused time
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio_test::assert_ok;
use wellness_tracker::*;

#[derive(Default)]
struct CountingNotifier {
    delivered: AtomicU32,
}

impl Notifier for CountingNotifier {
    fn notify(&self, notification: &Notification) -> Result<(), ReminderError> {
        assert_eq!(notification, &Notification::hydration());
        self.delivered.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn minutes(m: u64) -> ReminderInterval {
    ReminderInterval::new(m).unwrap()
}

#[tokio::test(start_paused = true)]
async fn test_enable_fires_then_disable_stops() {
    let tracker = WellnessTracker::in_memory().unwrap();
    let scheduler = Arc::new(TokioReminderScheduler::current().unwrap());
    let notifier = Arc::new(CountingNotifier::default());
    let policy = tracker.reminder_policy(scheduler.clone(), notifier.clone());

    assert_ok!(policy.enable(minutes(30)));
    assert!(scheduler.is_scheduled());

    tokio::time::sleep(Duration::from_secs(30 * 60 + 1)).await;
    assert_eq!(notifier.delivered.load(Ordering::SeqCst), 1);

    assert_ok!(policy.set_enabled(false));
    assert!(!scheduler.is_scheduled());
    assert!(!tracker.repository().get_reminder_settings().unwrap().enabled);

    tokio::time::sleep(Duration::from_secs(3 * 60 * 60)).await;
    assert_eq!(notifier.delivered.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_interval_change_replaces_cadence() {
    let tracker = WellnessTracker::in_memory().unwrap();
    let scheduler = Arc::new(TokioReminderScheduler::current().unwrap());
    let notifier = Arc::new(CountingNotifier::default());
    let policy = tracker.reminder_policy(scheduler.clone(), notifier.clone());

    assert_ok!(policy.enable(minutes(60)));
    assert_ok!(policy.set_interval(minutes(10)));

    // 35 minutes at a 10 minute cadence: three firings, not three plus one
    tokio::time::sleep(Duration::from_secs(35 * 60)).await;
    assert_eq!(notifier.delivered.load(Ordering::SeqCst), 3);

    let settings = tracker.repository().get_reminder_settings().unwrap();
    assert_eq!(settings.interval.minutes(), 10);
}

#[tokio::test(start_paused = true)]
async fn test_restore_respects_persisted_disable() {
    let tracker = WellnessTracker::in_memory().unwrap();
    tracker.repository().set_reminder_enabled(false).unwrap();

    let scheduler = Arc::new(TokioReminderScheduler::current().unwrap());
    let policy = tracker.reminder_policy(scheduler.clone(), Arc::new(TracingNotifier));

    assert_eq!(policy.restore().unwrap(), ReminderState::Disabled);
    assert!(!scheduler.is_scheduled());
}
