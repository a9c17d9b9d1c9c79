use std::time::Duration;

use crate::animation::driver::TickOutcome;
use crate::animation::scheduler::Clock;
use crate::animation::virtual_host::VirtualHost;
use crate::config::model::IndicatorConfig;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, MAX_FRAME_SIDE, ViewSize};
use crate::foundation::error::{WaveError, WaveResult};
use crate::indicator::view::{Visibility, WaveProgress};
use crate::render::cpu::{CpuRenderer, FrameRGBA, RenderSettings};

/// Progress ramp rendered by [`Playback::render_range`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RangeOpts {
    pub from: i32,
    pub to: i32,
    pub duration: Duration,
}

impl RangeOpts {
    /// One frame per tick interval, at least one.
    pub fn frame_count(&self, interval: Duration) -> u64 {
        if interval.is_zero() {
            return 1;
        }
        (self.duration.as_nanos() / interval.as_nanos()).max(1) as u64
    }

    /// Linear ramp from `from` to `to`, both included, rounded to whole percent.
    pub fn progress_at(&self, frame: u64, frames: u64) -> i32 {
        if frames <= 1 {
            return self.to;
        }
        let t = frame as f64 / (frames - 1) as f64;
        (f64::from(self.from) + f64::from(self.to - self.from) * t).round() as i32
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlaybackStats {
    pub frames: u64,
    pub ticks: u64,
    /// Virtual time covered by the rendered ticks.
    pub elapsed: Duration,
}

/// An indicator shown in a [`VirtualHost`], plus a CPU renderer for its frames.
pub struct Playback {
    view: WaveProgress,
    host: VirtualHost,
    renderer: CpuRenderer,
    size: ViewSize,
}

impl Playback {
    /// Build the indicator and deliver the "visible" and "focused" events, so the first tick is
    /// pending when this returns.
    pub fn new(config: IndicatorConfig, size: ViewSize, settings: RenderSettings) -> WaveResult<Self> {
        if size.width == 0 || size.height == 0 {
            return Err(WaveError::validation("playback size must be non-zero"));
        }
        if size.width > MAX_FRAME_SIDE || size.height > MAX_FRAME_SIDE {
            return Err(WaveError::validation(format!(
                "playback size must be <= {MAX_FRAME_SIDE} per side"
            )));
        }
        let mut host = VirtualHost::new(size);
        let mut view = WaveProgress::new(config)?;
        view.on_resize(size);
        view.on_visibility_changed(Visibility::Visible, &mut host);
        view.on_focus_changed(true, &mut host);

        Ok(Self {
            view,
            host,
            renderer: CpuRenderer::new(settings)?,
            size,
        })
    }

    pub fn view(&self) -> &WaveProgress {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut WaveProgress {
        &mut self.view
    }

    pub fn host(&self) -> &VirtualHost {
        &self.host
    }

    /// Fire the next pending tick. Returns a frame when the tick requested a redraw.
    pub fn step(&mut self) -> WaveResult<Option<FrameRGBA>> {
        let handle = self
            .host
            .advance_to_next_tick()
            .ok_or_else(|| WaveError::validation("animation is not running"))?;
        match self.view.on_tick(handle, &mut self.host) {
            TickOutcome::Ran { .. } if self.host.take_redraw() => self.render_current().map(Some),
            _ => Ok(None),
        }
    }

    pub fn render_current(&mut self) -> WaveResult<FrameRGBA> {
        self.renderer.render(&self.view.compile_frame(self.size))
    }

    /// Step through a progress ramp, one frame per tick.
    #[tracing::instrument(skip(self, sink))]
    pub fn render_range(&mut self, opts: RangeOpts, sink: &mut dyn FrameSink) -> WaveResult<PlaybackStats> {
        let interval = self.view.config().refresh_interval();
        let frames = opts.frame_count(interval);
        // Exact tick rate, e.g. 100/3 for a 30 ms interval.
        let fps = Fps::from_interval(interval)?;
        let started = self.host.now();

        sink.begin(SinkConfig {
            width: self.size.width,
            height: self.size.height,
            fps,
        })?;

        let mut stats = PlaybackStats::default();
        for i in 0..frames {
            self.view.set_progress(opts.progress_at(i, frames));
            stats.ticks += 1;
            if let Some(frame) = self.step()? {
                sink.push_frame(stats.frames, &frame)?;
                stats.frames += 1;
            }
        }
        sink.end()?;

        stats.elapsed = self.host.now().saturating_sub(started);
        tracing::debug!(frames = stats.frames, ticks = stats.ticks, "range rendered");
        Ok(stats)
    }
}

/// Render one frame at `progress` after `ticks` animation ticks (at least one).
pub fn render_still(
    config: IndicatorConfig,
    size: ViewSize,
    progress: i32,
    ticks: u32,
    settings: RenderSettings,
) -> WaveResult<FrameRGBA> {
    let mut playback = Playback::new(config, size, settings)?;
    playback.view_mut().set_progress(progress);
    for _ in 0..ticks.max(1) {
        playback.step()?;
    }
    playback.render_current()
}

#[cfg(test)]
#[path = "../../tests/unit/playback/session.rs"]
mod tests;
