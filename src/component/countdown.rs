use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{Local, NaiveDateTime};

use serde::Serialize;

use tokio::sync::watch;
use tokio::task::JoinHandle;

const SECOND_MS: i64 = 1_000;
const MINUTE_MS: i64 = 60 * SECOND_MS;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

const TICK: Duration = Duration::from_secs(1);

/// Source of the current local wall-clock time
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// The machine's local time
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock that only moves when told to
#[derive(Debug, Clone)]
pub struct FixedClock(Arc<Mutex<NaiveDateTime>>);

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self(Arc::new(Mutex::new(now)))
    }

    pub fn set(&self, now: NaiveDateTime) {
        *self.0.lock().unwrap_or_else(|e| e.into_inner()) = now;
    }

    pub fn advance(&self, by: chrono::Duration) {
        let mut now = self.0.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *self.0.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Whole days, hours, minutes and seconds left until the event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Remaining {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Remaining {
    /// Break `max(0, target - now)` down by floor division.
    /// Once the target has passed every component stays at zero.
    pub fn between(target: NaiveDateTime, now: NaiveDateTime) -> Self {
        let distance = (target - now).num_milliseconds().max(0);

        Self {
            days: distance / DAY_MS,
            hours: (distance % DAY_MS) / HOUR_MS,
            minutes: (distance % HOUR_MS) / MINUTE_MS,
            seconds: (distance % MINUTE_MS) / SECOND_MS,
        }
    }

    pub fn is_expired(&self) -> bool {
        *self == Self::default()
    }

    pub fn total_seconds(&self) -> i64 {
        self.days * 86_400 + self.hours * 3_600 + self.minutes * 60 + self.seconds
    }
}

/// A once-per-second countdown publisher.
///
/// The timer task lives exactly as long as the ticker: dropping it aborts the task.
/// After the first expired value the task stops and the receiver keeps `00:00:00:00`.
#[derive(Debug)]
pub struct CountdownTicker {
    receiver: watch::Receiver<Remaining>,
    task: JoinHandle<()>,
}

impl CountdownTicker {
    pub fn spawn(target: NaiveDateTime, clock: Arc<dyn Clock>) -> Self {
        let (sender, receiver) = watch::channel(Remaining::between(target, clock.now()));

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(TICK);
            // The first tick is immediate and the channel already holds that value
            interval.tick().await;
            loop {
                interval.tick().await;

                let remaining = Remaining::between(target, clock.now());
                if sender.send(remaining).is_err() {
                    break;
                }
                if remaining.is_expired() {
                    tracing::debug!("Countdown reached the event, stopping ticker");
                    break;
                }
            }
        });

        Self { receiver, task }
    }

    pub fn current(&self) -> Remaining {
        *self.receiver.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Remaining> {
        self.receiver.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for CountdownTicker {
    fn drop(&mut self) {
        self.task.abort();
    }
}
