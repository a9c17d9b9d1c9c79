use std::f64::consts::TAU;

use crate::config::model::{WaveConfig, WaveWidthRate};
use crate::foundation::core::{BezPath, Point, ViewSize};
use crate::geometry::phase::PhaseOffsets;
use crate::geometry::progress::wave_top_for;

/// Horizontal distance between two sine samples, in pixels.
pub const SAMPLE_STEP: f64 = 20.0;

/// Wavelength snapshot taken once, from the first stable view size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveMetrics {
    /// Width the wavelength was derived from (the circle diameter).
    pub base_width: u32,
    pub wavelength: f64,
    /// Angular frequency, `2pi / wavelength`.
    pub omega: f64,
}

impl WaveMetrics {
    /// Returns `None` while the view has no usable width.
    pub fn measure(size: ViewSize, rate: WaveWidthRate) -> Option<Self> {
        let base_width = size.diameter();
        if size.is_empty() || base_width == 0 {
            return None;
        }
        let wavelength = 2.0 * f64::from(base_width) * f64::from(rate.factor());
        Some(Self {
            base_width,
            wavelength,
            omega: TAU / wavelength,
        })
    }
}

/// One closed wave polygon: bottom-left corner, sine samples left to right, bottom-right corner.
#[derive(Clone, Debug, PartialEq)]
pub struct WavePath {
    pub left_bottom: Point,
    pub samples: Vec<Point>,
    pub right_bottom: Point,
}

impl WavePath {
    /// Closed path ready for filling.
    pub fn to_bez_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.left_bottom);
        for &p in &self.samples {
            path.line_to(p);
        }
        path.line_to(self.right_bottom);
        path.close_path();
        path
    }
}

/// Immutable geometry produced by one tick.
#[derive(Clone, Debug, PartialEq)]
pub struct WaveGeometry {
    pub size: ViewSize,
    pub wave_top: f64,
    pub offsets: PhaseOffsets,
    pub above: WavePath,
    pub below: WavePath,
}

/// Maps view size, progress and phase offsets to the two wave fill paths.
#[derive(Clone, Debug)]
pub struct WaveGeometryEngine {
    config: WaveConfig,
    metrics: Option<WaveMetrics>,
}

impl WaveGeometryEngine {
    pub fn new(config: WaveConfig) -> Self {
        Self {
            config,
            metrics: None,
        }
    }

    pub fn config(&self) -> &WaveConfig {
        &self.config
    }

    pub fn metrics(&self) -> Option<WaveMetrics> {
        self.metrics
    }

    pub fn is_initialized(&self) -> bool {
        self.metrics.is_some()
    }

    /// Measure the wavelength once. Later calls keep the first measurement.
    pub fn initialize(&mut self, size: ViewSize) -> Option<WaveMetrics> {
        if self.metrics.is_none() {
            self.metrics = WaveMetrics::measure(size, self.config.wave_width_rate);
        }
        self.metrics
    }

    /// Sample both waves for the current size. `None` until initialized or while the width is
    /// zero.
    pub fn compute_paths(
        &self,
        size: ViewSize,
        progress: u8,
        offsets: PhaseOffsets,
    ) -> Option<WaveGeometry> {
        let metrics = self.metrics?;
        if size.is_empty() {
            return None;
        }

        let wave_top = wave_top_for(size.height, progress);
        let build = |offset: f64| {
            let bottom = f64::from(size.height);
            WavePath {
                left_bottom: Point::new(0.0, bottom),
                samples: sample_wave(
                    size.width,
                    wave_top,
                    offset,
                    self.config.wave_height,
                    metrics.omega,
                ),
                right_bottom: Point::new(f64::from(size.width), bottom),
            }
        };

        Some(WaveGeometry {
            size,
            wave_top,
            offsets,
            above: build(offsets.above),
            below: build(offsets.below),
        })
    }
}

/// `y = amplitude * sin(omega * (x + offset)) + top` for `x = 0, step, ..` up to and including
/// `width + step`, so the last segment always runs past the right edge.
pub fn sample_wave(width: u32, top: f64, offset: f64, amplitude: f64, omega: f64) -> Vec<Point> {
    let max_right = f64::from(width) + SAMPLE_STEP;
    let count = (max_right / SAMPLE_STEP).floor() as usize + 1;
    (0..count)
        .map(|i| {
            let x = i as f64 * SAMPLE_STEP;
            Point::new(x, amplitude * (omega * (x + offset)).sin() + top)
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/engine.rs"]
mod tests;
