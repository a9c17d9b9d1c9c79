use std::path::PathBuf;

use anyhow::Context as _;

use crate::encode::sink::{FrameSink, SinkConfig, check_frame};
use crate::foundation::error::{WaveError, WaveResult};
use crate::render::cpu::FrameRGBA;

/// Writes `<prefix>_<index>.png` files (index zero-padded to 5 digits) into a directory.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    prefix: String,
    cfg: Option<SinkConfig>,
    last_idx: Option<u64>,
    written: Vec<PathBuf>,
}

impl PngSequenceSink {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
            cfg: None,
            last_idx: None,
            written: Vec::new(),
        }
    }

    pub fn frame_path(&self, idx: u64) -> PathBuf {
        self.dir.join(format!("{}_{idx:05}.png", self.prefix))
    }

    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> WaveResult<()> {
        cfg.validate()?;
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create output dir '{}'", self.dir.display()))?;
        self.cfg = Some(cfg);
        self.last_idx = None;
        self.written.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: u64, frame: &FrameRGBA) -> WaveResult<()> {
        check_frame(self.cfg.as_ref(), self.last_idx, idx, frame)?;
        self.last_idx = Some(idx);

        let path = self.frame_path(idx);
        write_png(&path, frame)?;
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> WaveResult<()> {
        if self.cfg.take().is_none() {
            return Err(WaveError::encode("png sink not started"));
        }
        tracing::info!(
            frames = self.written.len(),
            dir = %self.dir.display(),
            "png sequence written"
        );
        Ok(())
    }
}

/// Save one frame as a straight-alpha PNG.
pub fn write_png(path: &std::path::Path, frame: &FrameRGBA) -> WaveResult<()> {
    crate::encode::sink::ensure_parent_dir(path)?;
    image::save_buffer_with_format(
        path,
        &frame.to_straight_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
