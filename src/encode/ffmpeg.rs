use std::io::Write as _;
use std::path::PathBuf;
use std::process::{Child, ChildStdin, Command, Stdio};

use crate::encode::sink::{FrameSink, SinkConfig, check_frame, ensure_parent_dir};
use crate::foundation::core::Rgba8;
use crate::foundation::error::{WaveError, WaveResult};
use crate::render::cpu::FrameRGBA;

/// Options for [`FfmpegSink`].
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    pub out_path: PathBuf,
    pub overwrite: bool,
    /// Color the transparent corners around the circle are flattened onto.
    pub background: Rgba8,
}

impl FfmpegSinkOpts {
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            background: Rgba8::rgb(0, 0, 0),
        }
    }
}

/// Spawns the system `ffmpeg` and streams raw RGBA frames to its stdin (h264, yuv420p).
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,
    child: Option<Child>,
    stdin: Option<ChildStdin>,
    cfg: Option<SinkConfig>,
    last_idx: Option<u64>,
    scratch: Vec<u8>,
}

impl FfmpegSink {
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            child: None,
            stdin: None,
            cfg: None,
            last_idx: None,
            scratch: Vec::new(),
        }
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> WaveResult<()> {
        cfg.validate()?;
        let frame_len = cfg.frame_len()?;
        if !cfg.width.is_multiple_of(2) || !cfg.height.is_multiple_of(2) {
            return Err(WaveError::validation(
                "ffmpeg sink width/height must be even (required for yuv420p mp4 output)",
            ));
        }

        ensure_parent_dir(&self.opts.out_path)?;
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(WaveError::validation(format!(
                "output file '{}' already exists",
                self.opts.out_path.display()
            )));
        }
        if !is_ffmpeg_on_path() {
            return Err(WaveError::encode(
                "ffmpeg is required for MP4 encoding, but was not found on PATH",
            ));
        }

        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        cmd.arg(if self.opts.overwrite { "-y" } else { "-n" });
        cmd.args([
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "-s",
            &format!("{}x{}", cfg.width, cfg.height),
            "-r",
            &cfg.fps.to_string(),
            "-i",
            "pipe:0",
            "-an",
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-movflags",
            "+faststart",
        ]);
        cmd.arg(&self.opts.out_path);

        let mut child = cmd.spawn().map_err(|e| {
            WaveError::encode(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| WaveError::encode("failed to open ffmpeg stdin"))?;

        tracing::debug!(out = %self.opts.out_path.display(), "ffmpeg started");
        self.scratch = vec![0u8; frame_len];
        self.child = Some(child);
        self.stdin = Some(stdin);
        self.cfg = Some(cfg);
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: u64, frame: &FrameRGBA) -> WaveResult<()> {
        check_frame(self.cfg.as_ref(), self.last_idx, idx, frame)?;
        self.last_idx = Some(idx);

        flatten_over_background(
            &mut self.scratch,
            &frame.data,
            frame.premultiplied,
            self.opts.background,
        )?;
        let Some(stdin) = self.stdin.as_mut() else {
            return Err(WaveError::encode("ffmpeg sink is already finalized"));
        };
        stdin
            .write_all(&self.scratch)
            .map_err(|e| WaveError::encode(format!("failed to write frame to ffmpeg: {e}")))?;
        Ok(())
    }

    fn end(&mut self) -> WaveResult<()> {
        drop(self.stdin.take());
        let child = self
            .child
            .take()
            .ok_or_else(|| WaveError::encode("ffmpeg sink not started"))?;
        let output = child
            .wait_with_output()
            .map_err(|e| WaveError::encode(format!("failed to wait for ffmpeg: {e}")))?;
        self.cfg = None;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(WaveError::encode(format!(
                "ffmpeg exited with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }
        tracing::info!(out = %self.opts.out_path.display(), "mp4 written");
        Ok(())
    }
}

/// Composite RGBA8 pixels over an opaque background color.
pub(crate) fn flatten_over_background(
    dst: &mut [u8],
    src: &[u8],
    premultiplied: bool,
    background: Rgba8,
) -> WaveResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(WaveError::validation(
            "flatten_over_background expects equal-length rgba8 buffers",
        ));
    }

    let bg = [background.r, background.g, background.b];
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let a = u16::from(s[3]);
        let inv = 255 - a;
        for c in 0..3 {
            let fg = if premultiplied {
                u16::from(s[c])
            } else {
                mul_div255(u16::from(s[c]), a)
            };
            d[c] = (fg + mul_div255(u16::from(bg[c]), inv)).min(255) as u8;
        }
        d[3] = 255;
    }
    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u16 {
    ((u32::from(x) * u32::from(y) + 127) / 255) as u16
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
