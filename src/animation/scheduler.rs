use std::collections::BTreeSet;
use std::time::Duration;

use crate::foundation::core::ViewSize;

/// Identifies one scheduled tick. Handles are never reused by a scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TickHandle(pub u64);

/// Monotonic time source, measured from an arbitrary host-defined origin.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// One-shot delayed callbacks. The host calls back into the indicator with the handle once the
/// delay has elapsed, unless the handle was cancelled first.
pub trait Scheduler {
    fn schedule(&mut self, delay: Duration) -> TickHandle;

    /// Returns `false` when the handle already fired or was never scheduled.
    fn cancel(&mut self, handle: TickHandle) -> bool;
}

/// Everything an indicator needs from its hosting view.
pub trait Host: Clock + Scheduler {
    /// Current drawable size, queried on demand.
    fn size(&self) -> ViewSize;

    fn request_redraw(&mut self);
}

/// Pending one-shot timers ordered by due time, then by handle.
///
/// Hosts that run their own event loop can embed this to implement [`Scheduler`].
#[derive(Clone, Debug, Default)]
pub struct TimerQueue {
    next_id: u64,
    pending: BTreeSet<(Duration, TickHandle)>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, due: Duration) -> TickHandle {
        let handle = TickHandle(self.next_id);
        self.next_id += 1;
        self.pending.insert((due, handle));
        handle
    }

    pub fn cancel(&mut self, handle: TickHandle) -> bool {
        let found = self.pending.iter().find(|(_, h)| *h == handle).copied();
        match found {
            Some(entry) => self.pending.remove(&entry),
            None => false,
        }
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.pending.first().map(|(due, _)| *due)
    }

    /// Remove and return the earliest timer regardless of its due time.
    pub fn pop_next(&mut self) -> Option<(Duration, TickHandle)> {
        self.pending.pop_first()
    }

    /// Remove and return the earliest timer whose due time is `<= now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<TickHandle> {
        match self.pending.first() {
            Some(&(due, _)) if due <= now => self.pending.pop_first().map(|(_, h)| h),
            _ => None,
        }
    }

    pub fn contains(&self, handle: TickHandle) -> bool {
        self.pending.iter().any(|(_, h)| *h == handle)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/scheduler.rs"]
mod tests;
