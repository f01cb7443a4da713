//! Color types.
//!
//! `Rgba8` is the straight-alpha 8-bit color users specify (hex strings in
//! settings, the final output buffer). `RgbaPre` is the premultiplied f32
//! color every intermediate layer is stored in, so blurring and blending
//! never bleed color out of transparent pixels.

use std::fmt;
use std::str::FromStr;

use crate::basics::uround;
use crate::error::{Error, Result};

// ============================================================================
// Rgba8 (8-bit per channel, straight alpha)
// ============================================================================

/// RGBA color with u8 components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn new_opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub fn with_opacity(c: &Rgba8, a: u8) -> Self {
        Self { a, ..*c }
    }

    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`. The `#` is optional and
    /// digits are case-insensitive.
    pub fn from_hex(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidColor(s.to_string());
        let digits = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let nibble = |i: usize| u8::from_str_radix(&digits[i..i + 1], 16).map_err(|_| invalid());
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        match digits.len() {
            3 => {
                let (r, g, b) = (nibble(0)?, nibble(1)?, nibble(2)?);
                Ok(Self::new_opaque(r * 17, g * 17, b * 17))
            }
            6 => Ok(Self::new_opaque(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(invalid()),
        }
    }

    /// Lowercase `#rrggbb`, with an alpha pair appended when not opaque.
    pub fn to_hex(&self) -> String {
        if self.is_opaque() {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    pub fn to_pre(&self) -> RgbaPre {
        RgbaPre::from_rgba8(self)
    }
}

impl FromStr for Rgba8 {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Rgba8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ============================================================================
// RgbaPre (premultiplied f32)
// ============================================================================

/// Premultiplied RGBA color with f32 components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RgbaPre {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl RgbaPre {
    pub const TRANSPARENT: RgbaPre = RgbaPre::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgba8(c: &Rgba8) -> Self {
        let a = c.a as f32 / 255.0;
        Self {
            r: c.r as f32 / 255.0 * a,
            g: c.g as f32 / 255.0 * a,
            b: c.b as f32 / 255.0 * a,
            a,
        }
    }

    /// Demultiply and quantize.
    pub fn to_rgba8(&self) -> Rgba8 {
        if self.a <= 0.0 {
            return Rgba8::default();
        }
        let a = self.a.min(1.0);
        let q = |v: f32| uround(((v / a).clamp(0.0, 1.0) * 255.0) as f64) as u8;
        Rgba8::new(q(self.r), q(self.g), q(self.b), uround((a * 255.0) as f64) as u8)
    }

    /// Multiply all four channels by `k` (coverage, opacity).
    #[inline]
    pub fn scale(&self, k: f32) -> Self {
        Self::new(self.r * k, self.g * k, self.b * k, self.a * k)
    }

    /// Linear interpolation toward `c` by `k`.
    #[inline]
    pub fn lerp(&self, c: &RgbaPre, k: f32) -> Self {
        Self::new(
            self.r + (c.r - self.r) * k,
            self.g + (c.g - self.g) * k,
            self.b + (c.b - self.b) * k,
            self.a + (c.a - self.a) * k,
        )
    }

    /// Source-over: `src + self * (1 - src.a)`.
    #[inline]
    pub fn blend(&mut self, src: &RgbaPre) {
        let inv = 1.0 - src.a;
        self.r = src.r + self.r * inv;
        self.g = src.g + self.g * inv;
        self.b = src.b + self.b * inv;
        self.a = src.a + self.a * inv;
    }
}
