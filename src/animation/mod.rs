//! Tick scheduling and the animation state machine.

/// Idle/Running state machine that owns the phase offsets.
pub mod driver;
/// Host-facing scheduling traits and a reusable timer queue.
pub mod scheduler;
/// Deterministic in-memory host.
pub mod virtual_host;
