use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgba8;
use crate::foundation::error::{WaveError, WaveResult};

pub const PROGRESS_MAX: u8 = 100;
pub const DEFAULT_WAVE_HEIGHT: f64 = 20.0;
pub const DEFAULT_REFRESH_INTERVAL_MS: u64 = 20;

/// Wavelength multiplier: wavelength = `2 * width * rate`.
///
/// A larger rate gives a longer, smoother wave.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WaveWidthRate {
    Large,
    #[default]
    Middle,
    Small,
}

impl WaveWidthRate {
    pub fn factor(self) -> u32 {
        match self {
            Self::Large => 1,
            Self::Middle => 2,
            Self::Small => 3,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Large => "large",
            Self::Middle => "middle",
            Self::Small => "small",
        }
    }
}

impl TryFrom<u32> for WaveWidthRate {
    type Error = WaveError;

    fn try_from(v: u32) -> WaveResult<Self> {
        match v {
            1 => Ok(Self::Large),
            2 => Ok(Self::Middle),
            3 => Ok(Self::Small),
            other => Err(WaveError::validation(format!(
                "wave_width_rate must be 1, 2 or 3 (got {other})"
            ))),
        }
    }
}

impl std::str::FromStr for WaveWidthRate {
    type Err = WaveError;

    fn from_str(s: &str) -> WaveResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "large" | "1" => Ok(Self::Large),
            "middle" | "2" => Ok(Self::Middle),
            "small" | "3" => Ok(Self::Small),
            other => Err(WaveError::validation(format!(
                "unknown wave_width_rate \"{other}\" (expected large|middle|small or 1|2|3)"
            ))),
        }
    }
}

impl Serialize for WaveWidthRate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for WaveWidthRate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Num(u32),
            Name(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Num(n) => Self::try_from(n).map_err(serde::de::Error::custom),
            Repr::Name(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Phase increment applied on every tick, in pixels per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum WaveSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
    Custom(f64),
}

impl WaveSpeed {
    pub fn px_per_tick(self) -> f64 {
        match self {
            Self::Slow => 5.0,
            Self::Normal => 10.0,
            Self::Fast => 15.0,
            Self::Custom(v) => v,
        }
    }
}

impl std::str::FromStr for WaveSpeed {
    type Err = WaveError;

    fn from_str(s: &str) -> WaveResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "slow" => Ok(Self::Slow),
            "normal" => Ok(Self::Normal),
            "fast" => Ok(Self::Fast),
            other => other.parse::<f64>().map(Self::Custom).map_err(|_| {
                WaveError::validation(format!(
                    "unknown wave_hz \"{other}\" (expected slow|normal|fast or a number)"
                ))
            }),
        }
    }
}

impl Serialize for WaveSpeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Slow => serializer.serialize_str("slow"),
            Self::Normal => serializer.serialize_str("normal"),
            Self::Fast => serializer.serialize_str("fast"),
            Self::Custom(v) => serializer.serialize_f64(*v),
        }
    }
}

impl<'de> Deserialize<'de> for WaveSpeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Num(f64),
            Name(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Num(v) => Ok(Self::Custom(v)),
            Repr::Name(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Wave shape and motion parameters. Fixed once an indicator is built.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveConfig {
    /// Sine amplitude in pixels.
    pub wave_height: f64,
    pub wave_width_rate: WaveWidthRate,
    pub wave_hz: f64,
    pub above_color: Rgba8,
    pub below_color: Rgba8,
}

impl Default for WaveConfig {
    fn default() -> Self {
        IndicatorConfig::default().wave()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Full configuration surface of a [`crate::WaveProgress`] indicator.
///
/// Every field is optional in JSON; missing fields take the defaults below.
pub struct IndicatorConfig {
    /// Fill color of the front wave.
    pub above_wave_color: Rgba8,
    /// Fill color of the back wave, drawn first.
    pub below_wave_color: Rgba8,
    /// Color of the empty part of the circle.
    pub background_color: Rgba8,
    /// Initial progress, clamped to `[0, 100]`.
    pub progress: i32,
    /// Wave amplitude in pixels.
    pub wave_height: f64,
    /// Wavelength multiplier (`large` = 1, `middle` = 2, `small` = 3).
    pub wave_width_rate: WaveWidthRate,
    /// Phase increment per tick.
    pub wave_hz: WaveSpeed,
    /// Color of the centered progress number.
    pub progress_text_color: Rgba8,
    /// Font size of the progress number in pixels.
    pub progress_text_size: f32,
    /// Whether the progress number is drawn.
    pub progress_text_visible: bool,
    /// Color of the ring border.
    pub stroke_color: Rgba8,
    /// Ring border width in pixels; `0` disables the ring.
    pub stroke_width: f64,
    /// Target tick period in milliseconds.
    pub refresh_interval_ms: u64,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            above_wave_color: Rgba8::rgb(0x00, 0xff, 0x00),
            below_wave_color: Rgba8::rgb(0x88, 0xff, 0x00),
            background_color: Rgba8::DARK_GRAY,
            progress: 0,
            wave_height: DEFAULT_WAVE_HEIGHT,
            wave_width_rate: WaveWidthRate::default(),
            wave_hz: WaveSpeed::default(),
            progress_text_color: Rgba8::WHITE,
            progress_text_size: 10.0,
            progress_text_visible: false,
            stroke_color: Rgba8::rgb(0x00, 0x0f, 0xff),
            stroke_width: 0.0,
            refresh_interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
        }
    }
}

impl IndicatorConfig {
    pub fn from_json_str(s: &str) -> WaveResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| WaveError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load_json(path: &Path) -> WaveResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> WaveResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| WaveError::serde(e.to_string()))
    }

    pub fn validate(&self) -> WaveResult<()> {
        if !self.wave_height.is_finite() || self.wave_height < 0.0 {
            return Err(WaveError::validation(
                "wave_height must be finite and >= 0",
            ));
        }
        let hz = self.wave_hz.px_per_tick();
        if !hz.is_finite() || hz <= 0.0 {
            return Err(WaveError::validation("wave_hz must be finite and > 0"));
        }
        if !self.progress_text_size.is_finite() || self.progress_text_size < 0.0 {
            return Err(WaveError::validation(
                "progress_text_size must be finite and >= 0",
            ));
        }
        if !self.stroke_width.is_finite() || self.stroke_width < 0.0 {
            return Err(WaveError::validation(
                "stroke_width must be finite and >= 0",
            ));
        }
        if self.refresh_interval_ms == 0 {
            return Err(WaveError::validation("refresh_interval_ms must be > 0"));
        }
        Ok(())
    }

    /// Wave parameters handed to the geometry engine.
    pub fn wave(&self) -> WaveConfig {
        WaveConfig {
            wave_height: self.wave_height,
            wave_width_rate: self.wave_width_rate,
            wave_hz: self.wave_hz.px_per_tick(),
            above_color: self.above_wave_color,
            below_color: self.below_wave_color,
        }
    }

    pub fn refresh_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.refresh_interval_ms)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
