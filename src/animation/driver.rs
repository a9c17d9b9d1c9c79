use std::time::Duration;

use crate::animation::scheduler::{Host, Scheduler, TickHandle};
use crate::foundation::core::ViewSize;
use crate::geometry::phase::PhaseOffsets;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    Running,
}

/// Result of delivering a tick handle to the driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The tick ran and the next one was scheduled after `next_delay`.
    Ran { next_delay: Duration },
    /// The handle was cancelled, superseded or arrived while idle; nothing happened.
    Stale,
}

/// Fixed-cadence tick loop.
///
/// At most one tick is pending at any time: the next tick is scheduled only once the current
/// one has finished, with the delay shortened by the time the tick itself took.
#[derive(Clone, Debug)]
pub struct AnimationDriver {
    state: DriverState,
    pending: Option<TickHandle>,
    interval: Duration,
    wave_hz: f64,
    offsets: PhaseOffsets,
    ticks: u64,
}

impl AnimationDriver {
    pub fn new(interval: Duration, wave_hz: f64) -> Self {
        Self {
            state: DriverState::Idle,
            pending: None,
            interval,
            wave_hz,
            offsets: PhaseOffsets::default(),
            ticks: 0,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == DriverState::Running
    }

    pub fn pending(&self) -> Option<TickHandle> {
        self.pending
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn offsets(&self) -> PhaseOffsets {
        self.offsets
    }

    /// Number of ticks that actually ran.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn reset_offsets(&mut self, offsets: PhaseOffsets) {
        self.offsets = offsets;
    }

    /// Delay before the next tick given how long the current one took.
    pub fn next_delay(&self, elapsed: Duration) -> Duration {
        self.interval.saturating_sub(elapsed)
    }

    /// Enter `Running` with an immediate tick. Any chain already pending is cancelled first, so
    /// exactly one chain exists afterwards.
    pub fn start<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let Some(old) = self.pending.take() {
            scheduler.cancel(old);
        }
        self.pending = Some(scheduler.schedule(Duration::ZERO));
        if self.state == DriverState::Idle {
            tracing::debug!("wave animation started");
        }
        self.state = DriverState::Running;
    }

    /// Enter `Idle` and cancel the pending tick. Returns whether a tick was cancelled.
    pub fn stop<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) -> bool {
        let cancelled = match self.pending.take() {
            Some(handle) => scheduler.cancel(handle),
            None => false,
        };
        if self.state == DriverState::Running {
            tracing::debug!(cancelled, "wave animation stopped");
        }
        self.state = DriverState::Idle;
        cancelled
    }

    /// Run one tick: advance both phases, let `recompute` rebuild geometry for the current
    /// size, request a redraw and schedule the follow-up tick.
    pub fn on_tick<H, F>(&mut self, handle: TickHandle, host: &mut H, recompute: F) -> TickOutcome
    where
        H: Host + ?Sized,
        F: FnOnce(PhaseOffsets, ViewSize),
    {
        if self.state != DriverState::Running || self.pending != Some(handle) {
            tracing::trace!(?handle, "ignoring stale tick");
            return TickOutcome::Stale;
        }
        self.pending = None;

        let started = host.now();
        self.offsets.advance(self.wave_hz);
        recompute(self.offsets, host.size());
        host.request_redraw();
        self.ticks += 1;

        let elapsed = host.now().saturating_sub(started);
        let next_delay = self.next_delay(elapsed);
        self.pending = Some(host.schedule(next_delay));
        TickOutcome::Ran { next_delay }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/driver.rs"]
mod tests;
