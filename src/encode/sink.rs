use std::path::Path;

use crate::foundation::core::{Fps, MAX_FRAME_SIDE, rgba_len};
use crate::foundation::error::{WaveError, WaveResult};
use crate::render::cpu::FrameRGBA;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SinkConfig {
    pub width: u32,
    pub height: u32,
    /// Frame rate of the produced sequence (one frame per tick).
    pub fps: Fps,
}

impl SinkConfig {
    pub fn validate(&self) -> WaveResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(WaveError::validation("sink width/height must be non-zero"));
        }
        if self.width > MAX_FRAME_SIDE || self.height > MAX_FRAME_SIDE {
            return Err(WaveError::validation(format!(
                "sink width/height must be <= {MAX_FRAME_SIDE}"
            )));
        }
        if self.fps.num == 0 || self.fps.den == 0 {
            return Err(WaveError::validation("sink fps must be non-zero"));
        }
        Ok(())
    }

    /// Bytes in one RGBA8 frame.
    pub fn frame_len(&self) -> WaveResult<usize> {
        rgba_len(self.width, self.height)
            .ok_or_else(|| WaveError::validation("frame byte size overflows usize"))
    }
}

/// Consumer of rendered frames.
///
/// `push_frame` is called with strictly increasing indices between `begin` and `end`.
pub trait FrameSink {
    fn begin(&mut self, cfg: SinkConfig) -> WaveResult<()>;
    fn push_frame(&mut self, idx: u64, frame: &FrameRGBA) -> WaveResult<()>;
    fn end(&mut self) -> WaveResult<()>;
}

/// Keeps every frame in memory. Useful for tests and previews.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(u64, FrameRGBA)>,
    finished: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    pub fn frames(&self) -> &[(u64, FrameRGBA)] {
        &self.frames
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> WaveResult<()> {
        cfg.validate()?;
        self.cfg = Some(cfg);
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: u64, frame: &FrameRGBA) -> WaveResult<()> {
        check_frame(self.cfg.as_ref(), self.frames.last().map(|(i, _)| *i), idx, frame)?;
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> WaveResult<()> {
        self.finished = true;
        Ok(())
    }
}

/// Shared ordering and size checks for sinks.
pub(crate) fn check_frame(
    cfg: Option<&SinkConfig>,
    last_idx: Option<u64>,
    idx: u64,
    frame: &FrameRGBA,
) -> WaveResult<()> {
    let cfg = cfg.ok_or_else(|| WaveError::encode("sink not started"))?;
    if let Some(last) = last_idx
        && idx <= last
    {
        return Err(WaveError::encode("sink received out-of-order frame index"));
    }
    if frame.width != cfg.width || frame.height != cfg.height {
        return Err(WaveError::validation(format!(
            "frame size mismatch: got {}x{}, expected {}x{}",
            frame.width, frame.height, cfg.width, cfg.height
        )));
    }
    if frame.data.len() != cfg.frame_len()? {
        return Err(WaveError::validation(
            "frame.data size mismatch with width*height*4",
        ));
    }
    Ok(())
}

/// Create the parent directory of `path` when it has one.
pub fn ensure_parent_dir(path: &Path) -> WaveResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
