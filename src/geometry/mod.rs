/// Wave path sampling.
pub mod engine;
/// Phase accumulators.
pub mod phase;
/// Clamped progress and the derived water line.
pub mod progress;
