//! Gradient color lookup table.
//!
//! Builds a LUT from SVG-style color stops. Entries are premultiplied, so a
//! stop list like `color@0, transparent color@1` fades coverage without the
//! dark fringe a straight-alpha interpolation produces.

use crate::basics::uround;
use crate::color::{Rgba8, RgbaPre};

/// Trait for color lookup functions used by gradient spans.
pub trait ColorFunction {
    fn size(&self) -> usize;
    fn get(&self, index: usize) -> RgbaPre;
}

#[derive(Debug, Clone, Copy)]
struct ColorPoint {
    offset: f64,
    color: RgbaPre,
}

/// Gradient color lookup table, 256 entries unless told otherwise.
#[derive(Debug, Clone)]
pub struct GradientLut {
    color_profile: Vec<ColorPoint>,
    color_lut: Vec<RgbaPre>,
}

impl GradientLut {
    pub fn new(lut_size: usize) -> Self {
        Self {
            color_profile: Vec::new(),
            color_lut: vec![RgbaPre::TRANSPARENT; lut_size.max(2)],
        }
    }

    pub fn new_default() -> Self {
        Self::new(256)
    }

    /// Two-stop fade from `color` at the center to fully transparent.
    pub fn fade_out(color: Rgba8) -> Self {
        let mut lut = Self::new_default();
        lut.add_color(0.0, color);
        lut.add_color(1.0, Rgba8::with_opacity(&color, 0));
        lut.build_lut();
        lut
    }

    /// Add a color stop at the given offset (clamped to [0..1]).
    pub fn add_color(&mut self, offset: f64, color: Rgba8) {
        self.color_profile.push(ColorPoint {
            offset: offset.clamp(0.0, 1.0),
            color: color.to_pre(),
        });
    }

    /// Interpolate the stops into the table. Needs at least 2 stops;
    /// stops are sorted by offset and duplicates dropped.
    pub fn build_lut(&mut self) {
        self.color_profile
            .sort_by(|a, b| a.offset.total_cmp(&b.offset));
        self.color_profile
            .dedup_by(|a, b| (a.offset - b.offset).abs() < 1e-10);

        let (Some(first), Some(last)) = (self.color_profile.first(), self.color_profile.last())
        else {
            return;
        };
        if self.color_profile.len() < 2 {
            return;
        }
        let (first, last) = (first.color, last.color);

        let size = self.color_lut.len();
        let max_index = (size - 1) as f64;
        let mut start = uround(self.color_profile[0].offset * max_index) as usize;
        self.color_lut[..start].fill(first);

        for pair in self.color_profile.windows(2) {
            let end = uround(pair[1].offset * max_index) as usize;
            let len = (end - start).max(1) as f32;
            for (k, slot) in self.color_lut[start..=end].iter_mut().enumerate() {
                *slot = pair[0].color.lerp(&pair[1].color, k as f32 / len);
            }
            start = end;
        }
        self.color_lut[start..].fill(last);
    }
}

impl ColorFunction for GradientLut {
    fn size(&self) -> usize {
        self.color_lut.len()
    }

    fn get(&self, index: usize) -> RgbaPre {
        self.color_lut[index]
    }
}
