//! Frame drawing: a backend-agnostic plan, the surface contract and the CPU backend.

/// `vello_cpu` raster backend.
pub mod cpu;
/// Draw ops compiled from indicator state.
pub mod plan;
/// Surface trait and plan execution.
pub mod surface;
/// Parley-based layout for the progress label.
pub mod text;
