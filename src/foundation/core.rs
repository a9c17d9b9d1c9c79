use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{WaveError, WaveResult};

pub use kurbo::{BezPath, Circle, Point, Rect, Vec2};

/// Drawable size of the hosting view in whole pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewSize {
    pub width: u32,
    pub height: u32,
}

impl ViewSize {
    pub const ZERO: Self = Self {
        width: 0,
        height: 0,
    };

    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn square(side: u32) -> Self {
        Self::new(side, side)
    }

    /// A view with zero width cannot host wave geometry yet.
    pub fn is_empty(self) -> bool {
        self.width == 0
    }

    /// Diameter of the indicator circle: the smaller side.
    pub fn diameter(self) -> u32 {
        self.width.min(self.height)
    }

    /// Circle inscribed in the top-left square of side [`ViewSize::diameter`].
    pub fn clip_circle(self) -> Circle {
        let r = f64::from(self.diameter()) / 2.0;
        Circle::new(Point::new(r, r), r)
    }

    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }
}

/// Largest side a frame may have; the raster backend addresses pixels with `u16`.
pub const MAX_FRAME_SIDE: u32 = u16::MAX as u32;

/// Rational frame rate, `num / den` frames per second.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Fps {
    pub num: u32,
    pub den: u32,
}

impl Fps {
    pub fn new(num: u32, den: u32) -> WaveResult<Self> {
        if den == 0 {
            return Err(WaveError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(WaveError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// One frame per `interval`, reduced: 20 ms gives `50/1`, 30 ms gives `100/3`.
    pub fn from_interval(interval: Duration) -> WaveResult<Self> {
        let ms = u32::try_from(interval.as_millis())
            .map_err(|_| WaveError::validation("frame interval is too long"))?;
        if ms == 0 {
            return Err(WaveError::validation("frame interval must be at least 1 ms"));
        }
        let g = gcd(1000, ms);
        Self::new(1000 / g, ms / g)
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }
}

impl std::fmt::Display for Fps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Byte length of a tightly packed RGBA8 frame, `None` if it does not fit in `usize`.
pub fn rgba_len(width: u32, height: u32) -> Option<usize> {
    usize::try_from(width)
        .ok()?
        .checked_mul(usize::try_from(height).ok()?)?
        .checked_mul(4)
}

/// Straight-alpha RGBA8 color.
///
/// Deserializes from `"#RRGGBB"`, `"#RRGGBBAA"`, `[r,g,b]`, `[r,g,b,a]` or an
/// `{"r","g","b","a"}` object; serializes to a hex string.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const DARK_GRAY: Self = Self::rgb(0x44, 0x44, 0x44);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (the `#` is optional, case-insensitive).
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        fn hex_byte(pair: &str) -> Result<u8, String> {
            u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
        }

        if !s.is_ascii() {
            return Err("hex color must be ASCII".to_owned());
        }
        match s.len() {
            6 => Ok(Self::rgb(
                hex_byte(&s[0..2])?,
                hex_byte(&s[2..4])?,
                hex_byte(&s[4..6])?,
            )),
            8 => Ok(Self::new(
                hex_byte(&s[0..2])?,
                hex_byte(&s[2..4])?,
                hex_byte(&s[4..6])?,
                hex_byte(&s[6..8])?,
            )),
            _ => Err("hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)".to_owned()),
        }
    }

    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Premultiplied bytes, rounded to nearest.
    pub fn to_premul(self) -> [u8; 4] {
        fn premul(c: u8, a: u8) -> u8 {
            (((u16::from(c) * u16::from(a)) + 127) / 255) as u8
        }
        [
            premul(self.r, self.a),
            premul(self.g, self.a),
            premul(self.b, self.a),
            self.a,
        ]
    }

    pub fn is_transparent(self) -> bool {
        self.a == 0
    }
}

impl Serialize for Rgba8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgba8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            Obj {
                r: u8,
                g: u8,
                b: u8,
                #[serde(default = "opaque")]
                a: u8,
            },
            Arr(Vec<u8>),
        }

        fn opaque() -> u8 {
            255
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => Self::from_hex(&s).map_err(serde::de::Error::custom),
            Repr::Obj { r, g, b, a } => Ok(Self::new(r, g, b, a)),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Ok(Self::rgb(*r, *g, *b)),
                [r, g, b, a] => Ok(Self::new(*r, *g, *b, *a)),
                _ => Err(serde::de::Error::custom(
                    "color array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
