use std::time::Duration;

use crate::animation::scheduler::{Clock, Host, Scheduler, TickHandle, TimerQueue};
use crate::foundation::core::ViewSize;

/// Headless [`Host`] with a manual clock.
///
/// Time only moves when the caller advances it or when a redraw is requested with a non-zero
/// `redraw_cost`, which stands in for the time a tick spends computing.
#[derive(Clone, Debug)]
pub struct VirtualHost {
    size: ViewSize,
    now: Duration,
    timers: TimerQueue,
    redraw_cost: Duration,
    redraw_requested: bool,
    redraws: u64,
}

impl VirtualHost {
    pub fn new(size: ViewSize) -> Self {
        Self {
            size,
            now: Duration::ZERO,
            timers: TimerQueue::new(),
            redraw_cost: Duration::ZERO,
            redraw_requested: false,
            redraws: 0,
        }
    }

    pub fn with_redraw_cost(mut self, cost: Duration) -> Self {
        self.redraw_cost = cost;
        self
    }

    pub fn set_size(&mut self, size: ViewSize) {
        self.size = size;
    }

    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }

    /// Jump the clock to the earliest pending tick and hand its handle out.
    pub fn advance_to_next_tick(&mut self) -> Option<TickHandle> {
        let (due, handle) = self.timers.pop_next()?;
        self.now = self.now.max(due);
        Some(handle)
    }

    /// Pop a tick that is due at the current time without moving the clock.
    pub fn pop_due_tick(&mut self) -> Option<TickHandle> {
        self.timers.pop_due(self.now)
    }

    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    /// Returns and clears the redraw flag.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    pub fn redraws(&self) -> u64 {
        self.redraws
    }
}

impl Clock for VirtualHost {
    fn now(&self) -> Duration {
        self.now
    }
}

impl Scheduler for VirtualHost {
    fn schedule(&mut self, delay: Duration) -> TickHandle {
        self.timers.insert(self.now + delay)
    }

    fn cancel(&mut self, handle: TickHandle) -> bool {
        self.timers.cancel(handle)
    }
}

impl Host for VirtualHost {
    fn size(&self) -> ViewSize {
        self.size
    }

    fn request_redraw(&mut self) {
        self.now += self.redraw_cost;
        self.redraw_requested = true;
        self.redraws += 1;
    }
}
