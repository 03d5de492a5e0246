//! Virtual-time timer queue.
//!
//! Every delayed effect on the page (debounce windows, animation steps,
//! notification dwell) is a task parked here. Nothing sleeps: the host moves
//! the clock forward and collects whatever became due.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// Handle for cancelling a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Timer queue ordered by due time, then by scheduling order.
#[derive(Debug)]
pub struct Scheduler<T> {
    now: Duration,
    next_seq: u64,
    queue: BTreeMap<(Duration, TimerId), T>,
    /// Due time of every pending timer, for keyed cancellation.
    due: HashMap<TimerId, Duration>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            queue: BTreeMap::new(),
            due: HashMap::new(),
        }
    }

    /// Time elapsed since the scheduler was created.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule `task` to run `delay` after the current time.
    pub fn schedule(&mut self, delay: Duration, task: T) -> TimerId {
        let id = TimerId(self.next_seq);
        self.next_seq += 1;
        let due = self.now + delay;
        self.queue.insert((due, id), task);
        self.due.insert(id, due);
        id
    }

    /// Cancel a pending task. Returns false if it already ran or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.due.remove(&id) {
            Some(due) => self.queue.remove(&(due, id)).is_some(),
            None => false,
        }
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.due.contains_key(&id)
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Pop the earliest task due at or before `until`, moving the clock to its
    /// due time.
    ///
    /// Callers drain in a loop; tasks scheduled by a popped task are picked up
    /// by the same loop when they fall inside the window.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TimerId, T)> {
        let (&(due, id), _) = self.queue.iter().next()?;
        if due > until {
            return None;
        }
        let task = self.queue.remove(&(due, id))?;
        self.due.remove(&id);
        self.now = self.now.max(due);
        Some((id, task))
    }

    /// Move the clock forward without running anything. Never moves it back.
    pub fn settle_at(&mut self, at: Duration) {
        self.now = self.now.max(at);
    }
}

/// Trailing-edge debounce over a [`Scheduler`].
///
/// Each trigger cancels the pending task and schedules a fresh one, so only
/// the last trigger in a quiet window survives.
#[derive(Debug)]
pub struct Debouncer {
    wait: Duration,
    pending: Option<TimerId>,
}

impl Debouncer {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            pending: None,
        }
    }

    pub fn trigger<T>(&mut self, scheduler: &mut Scheduler<T>, task: T) -> TimerId {
        if let Some(previous) = self.pending.take() {
            scheduler.cancel(previous);
        }
        let id = scheduler.schedule(self.wait, task);
        self.pending = Some(id);
        id
    }

    /// Forget the pending timer once it has fired.
    pub fn fired(&mut self, id: TimerId) {
        if self.pending == Some(id) {
            self.pending = None;
        }
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }
}
