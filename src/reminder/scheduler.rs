/// Tokio-backed reminder scheduler
///
/// Runs one recurring task on a tokio runtime. The first firing happens one
/// full interval after scheduling.

use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::domain::ReminderInterval;
use crate::reminder::{ReminderCallback, ReminderError, ReminderScheduler};

/// How a failed firing is retried
///
/// Attempt `n` (1-based) that fails waits `step * n` before the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub step: Duration,
}

impl RetryPolicy {
    fn delay_after(&self, attempt: u32) -> Duration {
        self.step * attempt
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            step: Duration::from_secs(10),
        }
    }
}

pub struct TokioReminderScheduler {
    handle: Handle,
    task: Mutex<Option<JoinHandle<()>>>,
    retry: RetryPolicy,
}

impl TokioReminderScheduler {
    pub fn new(handle: Handle) -> Self {
        Self {
            handle,
            task: Mutex::new(None),
            retry: RetryPolicy::default(),
        }
    }

    /// Scheduler on the runtime this is called from
    pub fn current() -> Result<Self, ReminderError> {
        let handle = Handle::try_current().map_err(|e| ReminderError::Schedule(e.to_string()))?;
        Ok(Self::new(handle))
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Whether a recurring trigger is currently installed
    pub fn is_scheduled(&self) -> bool {
        self.task.lock().as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl ReminderScheduler for TokioReminderScheduler {
    fn schedule(&self, interval: ReminderInterval, callback: ReminderCallback) -> Result<(), ReminderError> {
        let period = interval.as_duration();
        let retry = self.retry;

        let mut task = self.task.lock();
        if let Some(previous) = task.take() {
            previous.abort();
        }

        *task = Some(self.handle.spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                fire_with_retry(&callback, retry).await;
            }
        }));

        tracing::debug!("Reminder task scheduled every {:?}", period);
        Ok(())
    }

    fn cancel(&self) -> Result<(), ReminderError> {
        if let Some(task) = self.task.lock().take() {
            task.abort();
            tracing::debug!("Reminder task cancelled");
        }
        Ok(())
    }
}

impl Drop for TokioReminderScheduler {
    fn drop(&mut self) {
        if let Some(task) = self.task.get_mut().take() {
            task.abort();
        }
    }
}

async fn fire_with_retry(callback: &ReminderCallback, retry: RetryPolicy) {
    let mut attempt = 1;
    loop {
        match callback() {
            Ok(()) => return,
            Err(e) if attempt < retry.max_attempts => {
                let delay = retry.delay_after(attempt);
                tracing::warn!("Reminder attempt {} failed: {}; retrying in {:?}", attempt, e, delay);
                time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => {
                tracing::error!("Reminder failed after {} attempts: {}", attempt, e);
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn counting_callback(counter: Arc<AtomicU32>) -> ReminderCallback {
        Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    }

    fn one_minute() -> ReminderInterval {
        ReminderInterval::new(1).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_once_per_interval() {
        let scheduler = TokioReminderScheduler::current().unwrap();
        let fired = Arc::new(AtomicU32::new(0));
        scheduler.schedule(one_minute(), counting_callback(fired.clone())).unwrap();

        time::sleep(Duration::from_secs(30)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        time::sleep(Duration::from_secs(31)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        time::sleep(Duration::from_secs(60)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 2);
        assert!(scheduler.is_scheduled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_firing() {
        let scheduler = TokioReminderScheduler::current().unwrap();
        let fired = Arc::new(AtomicU32::new(0));
        scheduler.schedule(one_minute(), counting_callback(fired.clone())).unwrap();

        scheduler.cancel().unwrap();
        scheduler.cancel().unwrap();
        assert!(!scheduler.is_scheduled());

        time::sleep(Duration::from_secs(300)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reschedule_replaces_previous_trigger() {
        let scheduler = TokioReminderScheduler::current().unwrap();
        let first = Arc::new(AtomicU32::new(0));
        let second = Arc::new(AtomicU32::new(0));

        scheduler.schedule(one_minute(), counting_callback(first.clone())).unwrap();
        scheduler.schedule(one_minute(), counting_callback(second.clone())).unwrap();

        time::sleep(Duration::from_secs(61)).await;
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_firing_is_retried_with_backoff() {
        let scheduler = TokioReminderScheduler::current().unwrap();
        let attempts = Arc::new(AtomicU32::new(0));
        let counter = attempts.clone();
        let callback: ReminderCallback = Arc::new(move || {
            let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
            if n < 3 {
                Err(ReminderError::Notify("notification service unavailable".into()))
            } else {
                Ok(())
            }
        });
        scheduler.schedule(one_minute(), callback).unwrap();

        // First attempt at 60s, retries at +10s and +20s after that
        time::sleep(Duration::from_secs(61)).await;
        assert_eq!(attempts.load(Ordering::SeqCst), 1);

        time::sleep(Duration::from_secs(10)).await;
        assert_eq!(attempts.load(Ordering::SeqCst), 2);

        time::sleep(Duration::from_secs(20)).await;
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_retry_delay_is_linear() {
        let retry = RetryPolicy::default();
        assert_eq!(retry.delay_after(1), Duration::from_secs(10));
        assert_eq!(retry.delay_after(3), Duration::from_secs(30));
    }
}
