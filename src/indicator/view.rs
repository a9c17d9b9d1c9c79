use crate::animation::driver::{AnimationDriver, DriverState, TickOutcome};
use crate::animation::scheduler::{Host, TickHandle};
use crate::config::model::{IndicatorConfig, WaveConfig};
use crate::foundation::core::ViewSize;
use crate::foundation::error::WaveResult;
use crate::geometry::engine::{WaveGeometry, WaveGeometryEngine, WaveMetrics};
use crate::geometry::phase::PhaseOffsets;
use crate::geometry::progress::ProgressState;

/// Window visibility as reported by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

/// Circular wave progress indicator.
///
/// The host forwards its lifecycle events (`on_visibility_changed`, `on_focus_changed`,
/// `on_resize`, `on_tick`, `on_detached`) and draws the result of
/// [`WaveProgress::compile_frame`] whenever a redraw was requested.
#[derive(Clone, Debug)]
pub struct WaveProgress {
    config: IndicatorConfig,
    progress: ProgressState,
    engine: WaveGeometryEngine,
    driver: AnimationDriver,
    visible: bool,
    geometry: Option<WaveGeometry>,
}

impl WaveProgress {
    pub fn new(config: IndicatorConfig) -> WaveResult<Self> {
        config.validate()?;
        let wave = config.wave();
        Ok(Self {
            progress: ProgressState::new(config.progress, 0),
            engine: WaveGeometryEngine::new(wave),
            driver: AnimationDriver::new(config.refresh_interval(), wave.wave_hz),
            visible: false,
            geometry: None,
            config,
        })
    }

    pub fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    /// Wave parameters and colors the geometry engine was built with.
    pub fn wave_config(&self) -> &WaveConfig {
        self.engine.config()
    }

    /// Clamp to `[0, 100]` and move the water line. The new level shows up on the next tick.
    pub fn set_progress(&mut self, value: i32) {
        self.progress.set_progress(value);
    }

    pub fn progress(&self) -> u8 {
        self.progress.progress()
    }

    pub fn wave_top_height(&self) -> f64 {
        self.progress.wave_top_height()
    }

    pub fn driver_state(&self) -> DriverState {
        self.driver.state()
    }

    pub fn metrics(&self) -> Option<WaveMetrics> {
        self.engine.metrics()
    }

    pub fn offsets(&self) -> PhaseOffsets {
        self.driver.offsets()
    }

    /// Geometry produced by the most recent tick.
    pub fn geometry(&self) -> Option<&WaveGeometry> {
        self.geometry.as_ref()
    }

    pub fn pending_tick(&self) -> Option<TickHandle> {
        self.driver.pending()
    }

    pub fn on_resize(&mut self, size: ViewSize) {
        self.progress.set_height(size.height);
    }

    pub fn on_visibility_changed<H: Host + ?Sized>(&mut self, visibility: Visibility, host: &mut H) {
        match visibility {
            Visibility::Hidden => {
                self.visible = false;
                self.driver.stop(host);
            }
            Visibility::Visible => {
                self.visible = true;
                if self.try_initialize(host) {
                    // Restart unconditionally so a repeated "visible" never leaves two chains.
                    self.driver.start(host);
                }
            }
        }
    }

    pub fn on_focus_changed<H: Host + ?Sized>(&mut self, focused: bool, host: &mut H) {
        if !focused || !self.visible {
            return;
        }
        if self.try_initialize(host) && !self.driver.is_running() {
            self.driver.start(host);
        }
    }

    /// The host is tearing the view down; no tick may fire afterwards.
    pub fn on_detached<H: Host + ?Sized>(&mut self, host: &mut H) {
        self.visible = false;
        self.driver.stop(host);
    }

    pub fn on_tick<H: Host + ?Sized>(&mut self, handle: TickHandle, host: &mut H) -> TickOutcome {
        let engine = &self.engine;
        let geometry = &mut self.geometry;
        let progress = &mut self.progress;
        self.driver.on_tick(handle, host, |offsets, size| {
            // Keep the water line in step with the size the paths are sampled at.
            progress.set_height(size.height);
            *geometry = engine.compute_paths(size, progress.progress(), offsets);
        })
    }

    /// One-time wavelength measurement. Returns whether the engine is ready.
    fn try_initialize<H: Host + ?Sized>(&mut self, host: &mut H) -> bool {
        if self.engine.is_initialized() {
            return true;
        }
        let size = host.size();
        match self.engine.initialize(size) {
            Some(metrics) => {
                self.driver
                    .reset_offsets(PhaseOffsets::for_wavelength(metrics.wavelength));
                self.progress.set_height(size.height);
                tracing::debug!(
                    width = size.width,
                    height = size.height,
                    wavelength = metrics.wavelength,
                    "wave geometry initialized"
                );
                true
            }
            None => {
                tracing::debug!(?size, "view not measured yet, deferring wave start");
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/indicator/view.rs"]
mod tests;
