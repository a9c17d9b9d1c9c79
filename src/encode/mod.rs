//! Frame sinks.
//!
//! Sinks consume rendered frames in order and are driven by [`crate::Playback`].

/// MP4 output through the system `ffmpeg` binary.
pub mod ffmpeg;
/// Numbered PNG files.
pub mod png;
/// Sink trait and the in-memory sink.
pub mod sink;
