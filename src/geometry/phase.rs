/// Fraction of the wavelength the back wave starts ahead of the front wave.
pub const BELOW_PHASE_LEAD: f64 = 0.4;

/// Horizontal phase accumulators for the two waves.
///
/// Both grow by a fixed step on every tick and wrap to zero instead of running past
/// `f64::MAX`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PhaseOffsets {
    pub above: f64,
    pub below: f64,
}

impl PhaseOffsets {
    pub fn new(above: f64, below: f64) -> Self {
        Self { above, below }
    }

    /// Starting offsets for a freshly measured wave. The back wave leads by `0.4 * wavelength`.
    pub fn for_wavelength(wavelength: f64) -> Self {
        Self::new(0.0, wavelength * BELOW_PHASE_LEAD)
    }

    pub fn advance(&mut self, step: f64) {
        self.above = wrapping_advance(self.above, step);
        self.below = wrapping_advance(self.below, step);
    }
}

/// `offset + step`, or `0` when the sum would pass the largest finite value.
pub fn wrapping_advance(offset: f64, step: f64) -> f64 {
    if offset > f64::MAX - step {
        return 0.0;
    }
    let next = offset + step;
    if next.is_finite() { next } else { 0.0 }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/phase.rs"]
mod tests;
