//! Appearance settings and the edits a settings panel applies to them.
//!
//! Settings load from TOML; every field is optional and falls back to the
//! default. Numeric setters clamp into the slider ranges below, while
//! `validate` rejects out-of-range values that arrive through
//! deserialization.

use std::cmp::Ordering;
use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::Rgba8;
use crate::error::{Error, Result};

pub const BLOB_COUNT_RANGE: RangeInclusive<u32> = 1..=10;
pub const SIZE_RANGE: RangeInclusive<f64> = 0.1..=1.0;
pub const POINT_COUNT_RANGE: RangeInclusive<u32> = 3..=24;
/// Blur standard deviation in pixels.
pub const BLUR_RANGE: RangeInclusive<f64> = 0.0..=100.0;
pub const GRAIN_RANGE: RangeInclusive<f64> = 0.0..=1.0;
/// Largest seed. TOML integers are signed 64-bit.
pub const MAX_SEED: u64 = i64::MAX as u64;

/// Color appended by `add_color`.
pub const NEW_COLOR: &str = "#ffffff";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Blob palette as hex strings; blob `i` uses `colors[i % len]`.
    pub colors: Vec<String>,
    pub blob_count: u32,
    /// Blob size as a fraction of the smaller canvas dimension.
    pub size: f64,
    /// Polar points per blob outline.
    pub point_count: u32,
    pub background: String,
    /// Gaussian blur standard deviation, in pixels.
    pub blur: f64,
    /// Grain strength, 0 disables it.
    pub grain: f64,
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            colors: vec!["#ff7e5f".to_string(), "#feb47b".to_string()],
            blob_count: 2,
            size: 0.5,
            point_count: 8,
            background: "#121212".to_string(),
            blur: 40.0,
            grain: 0.04,
            seed: 0,
        }
    }
}

fn check_range<T: Into<f64> + PartialOrd + Copy>(
    field: &'static str,
    value: T,
    range: &RangeInclusive<T>,
) -> Result<()> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(Error::OutOfRange {
            field,
            value: value.into(),
            min: (*range.start()).into(),
            max: (*range.end()).into(),
        })
    }
}

fn check_seed(seed: u64) -> Result<()> {
    if seed > MAX_SEED {
        return Err(Error::OutOfRange {
            field: "seed",
            value: seed as f64,
            min: 0.0,
            max: MAX_SEED as f64,
        });
    }
    Ok(())
}

/// NaN maps to the start of the range.
fn clamp_to<T: PartialOrd + Copy>(value: T, range: &RangeInclusive<T>) -> T {
    match value.partial_cmp(range.start()) {
        None | Some(Ordering::Less) => *range.start(),
        _ if value > *range.end() => *range.end(),
        _ => value,
    }
}

impl Settings {
    /// Parse a TOML document; missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// Check every field against its range and parse every color.
    pub fn validate(&self) -> Result<()> {
        check_range("blob_count", self.blob_count, &BLOB_COUNT_RANGE)?;
        check_range("size", self.size, &SIZE_RANGE)?;
        check_range("point_count", self.point_count, &POINT_COUNT_RANGE)?;
        check_range("blur", self.blur, &BLUR_RANGE)?;
        check_range("grain", self.grain, &GRAIN_RANGE)?;
        check_seed(self.seed)?;
        self.palette()?;
        self.background_color()?;
        Ok(())
    }

    /// Parsed palette. Fails on an empty palette or any invalid entry.
    pub fn palette(&self) -> Result<Vec<Rgba8>> {
        if self.colors.is_empty() {
            return Err(Error::EmptyPalette);
        }
        self.colors.iter().map(|c| Rgba8::from_hex(c)).collect()
    }

    pub fn background_color(&self) -> Result<Rgba8> {
        Rgba8::from_hex(&self.background)
    }

    // ------------------------------------------------------------------------
    // Edits
    // ------------------------------------------------------------------------

    /// Replace palette entry `index`. The value must be a valid hex color.
    pub fn set_color(&mut self, index: usize, value: &str) -> Result<()> {
        let len = self.colors.len();
        let slot = self
            .colors
            .get_mut(index)
            .ok_or(Error::NoSuchColor { index, len })?;
        Rgba8::from_hex(value)?;
        *slot = value.trim().to_string();
        Ok(())
    }

    /// Append a white entry to the palette.
    pub fn add_color(&mut self) {
        self.colors.push(NEW_COLOR.to_string());
    }

    /// Remove palette entry `index`. The last remaining color is never
    /// removed; returns whether anything changed.
    pub fn remove_color(&mut self, index: usize) -> bool {
        if self.colors.len() <= 1 || index >= self.colors.len() {
            return false;
        }
        self.colors.remove(index);
        true
    }

    pub fn set_background(&mut self, value: &str) -> Result<()> {
        Rgba8::from_hex(value)?;
        self.background = value.trim().to_string();
        Ok(())
    }

    pub fn set_blob_count(&mut self, n: u32) {
        self.blob_count = clamp_to(n, &BLOB_COUNT_RANGE);
    }

    pub fn set_size(&mut self, size: f64) {
        self.size = clamp_to(size, &SIZE_RANGE);
    }

    pub fn set_point_count(&mut self, n: u32) {
        self.point_count = clamp_to(n, &POINT_COUNT_RANGE);
    }

    pub fn set_blur(&mut self, blur: f64) {
        self.blur = clamp_to(blur, &BLUR_RANGE);
    }

    pub fn set_grain(&mut self, grain: f64) {
        self.grain = clamp_to(grain, &GRAIN_RANGE);
    }

    /// Rejects seeds above `MAX_SEED`.
    pub fn set_seed(&mut self, seed: u64) -> Result<()> {
        check_seed(seed)?;
        self.seed = seed;
        Ok(())
    }

    /// Move to the next seed, giving a new arrangement with the same look.
    /// Wraps from `MAX_SEED` back to 0.
    pub fn randomize(&mut self) {
        self.seed = if self.seed >= MAX_SEED { 0 } else { self.seed + 1 };
    }
}
