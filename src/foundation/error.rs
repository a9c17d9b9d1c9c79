/// Convenience result type used throughout the fallible parts of wavefill.
pub type WaveResult<T> = Result<T, WaveError>;

/// Top-level error type.
///
/// The animation core itself never fails: progress is clamped, zero sizes mean "not ready" and
/// phase accumulation wraps. Errors come from the outer layers (configuration, rendering,
/// encoding).
#[derive(thiserror::Error, Debug)]
pub enum WaveError {
    /// Invalid user-provided configuration or arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// A draw plan could not be executed on a surface.
    #[error("render error: {0}")]
    Render(String),

    /// A frame sink failed to accept or finalize frames.
    #[error("encode error: {0}")]
    Encode(String),

    /// Configuration could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped foreign error (IO, image codecs, ...).
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WaveError {
    /// Build a [`WaveError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`WaveError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`WaveError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`WaveError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
