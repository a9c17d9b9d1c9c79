/// Shared value types (sizes, colors) and `kurbo` re-exports.
pub mod core;
/// Crate error type.
pub mod error;
