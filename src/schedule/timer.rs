//! Timer queue with cancellation.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Handle used to cancel a scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimerId(pub u64);

#[derive(Clone, Debug)]
struct Timer<T> {
    id: TimerId,
    due: Duration,
    task: T,
}

/// Virtual-clock timer queue.
///
/// Tasks fire in due-time order; ties fire in scheduling order.
#[derive(Clone, Debug)]
pub struct Scheduler<T> {
    now: Duration,
    next_id: u64,
    timers: Vec<Timer<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            timers: Vec::new(),
        }
    }
}

impl<T> Scheduler<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Run `task` once `delay` has elapsed from now.
    pub fn schedule(&mut self, delay: Duration, task: T) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.timers.push(Timer {
            id,
            due: self.now + delay,
            task,
        });
        id
    }

    /// Cancel a pending task. Returns `false` if it already fired or was
    /// cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    /// Cancel every pending task. Returns how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let count = self.timers.len();
        self.timers.clear();
        count
    }

    #[must_use]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Pop the earliest task due at or before `until`, moving the clock to
    /// its due time.
    pub fn pop_due(&mut self, until: Duration) -> Option<T> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= until)
            .min_by_key(|(_, t)| (t.due, t.id))
            .map(|(i, _)| i)?;

        let timer = self.timers.remove(index);
        if timer.due > self.now {
            self.now = timer.due;
        }
        Some(timer.task)
    }

    /// Move the clock forward to `until` once no more tasks are due.
    pub fn settle(&mut self, until: Duration) {
        if until > self.now {
            self.now = until;
        }
    }
}
