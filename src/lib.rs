//! Wavefill renders a circular "liquid fill" progress indicator: two phase-shifted sine waves
//! clipped to a circle, with the water line tracking a 0..=100 progress value.
//!
//! The crate splits the widget into three layers:
//!
//! - a [`WaveGeometryEngine`] that turns size, progress and phase into closed wave outlines
//! - an [`AnimationDriver`] that owns the self-rescheduling tick chain on a [`Host`]
//! - a [`FramePlan`] of draw ops executed by the `vello_cpu` backend ([`CpuRenderer`])
//!
//! [`WaveProgress`] ties them together behind the host's lifecycle events, and [`Playback`]
//! drives it headlessly into a [`FrameSink`].
#![forbid(unsafe_code)]

mod foundation;

/// Tick scheduling: driver state machine, host traits and a virtual host.
pub mod animation;
/// Indicator configuration.
pub mod config;
/// Frame sinks (in-memory, PNG sequence, ffmpeg).
pub mod encode;
/// Wave geometry.
pub mod geometry;
/// The indicator widget.
pub mod indicator;
pub mod playback;
/// Draw plans and the CPU backend.
pub mod render;

pub use crate::foundation::core::{
    BezPath, Circle, Fps, MAX_FRAME_SIDE, Point, Rect, Rgba8, Vec2, ViewSize,
};
pub use crate::foundation::error::{WaveError, WaveResult};

pub use crate::animation::driver::{AnimationDriver, DriverState, TickOutcome};
pub use crate::animation::scheduler::{Clock, Host, Scheduler, TickHandle, TimerQueue};
pub use crate::animation::virtual_host::VirtualHost;
pub use crate::config::model::{IndicatorConfig, WaveConfig, WaveSpeed, WaveWidthRate};
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
pub use crate::encode::png::{PngSequenceSink, write_png};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::geometry::engine::{WaveGeometry, WaveGeometryEngine, WaveMetrics, WavePath};
pub use crate::geometry::phase::PhaseOffsets;
pub use crate::geometry::progress::ProgressState;
pub use crate::indicator::view::{Visibility, WaveProgress};
pub use crate::playback::session::{Playback, PlaybackStats, RangeOpts, render_still};
pub use crate::render::cpu::{CpuRenderer, FrameRGBA, RenderSettings};
pub use crate::render::plan::{DrawOp, FramePlan, compile_frame};
pub use crate::render::surface::{DrawSurface, execute_plan};
