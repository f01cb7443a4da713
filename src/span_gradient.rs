//! Radial gradient span generator.
//!
//! Maps a pixel center to `distance(center) / radius`, pads outside
//! `[0, 1]`, and samples the color function at that offset. Matches a
//! canvas radial gradient whose inner circle has radius 0 and shares the
//! outer circle's center.

use crate::basics::PointD;
use crate::color::RgbaPre;
use crate::gradient_lut::{ColorFunction, GradientLut};

#[derive(Debug, Clone)]
pub struct RadialGradient<C: ColorFunction = GradientLut> {
    center: PointD,
    radius: f64,
    colors: C,
}

impl<C: ColorFunction> RadialGradient<C> {
    pub fn new(center: PointD, radius: f64, colors: C) -> Self {
        Self {
            center,
            radius,
            colors,
        }
    }

    /// Gradient offset of the point, clamped to `[0, 1]`.
    pub fn offset_at(&self, x: f64, y: f64) -> f64 {
        if self.radius <= 0.0 {
            return 1.0;
        }
        (self.center.distance(PointD::new(x, y)) / self.radius).clamp(0.0, 1.0)
    }

    /// Color at a device point.
    pub fn color_at(&self, x: f64, y: f64) -> RgbaPre {
        let last = self.colors.size() - 1;
        let index = (self.offset_at(x, y) * last as f64).round() as usize;
        self.colors.get(index.min(last))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba8;

    fn red_fade(radius: f64) -> RadialGradient {
        RadialGradient::new(
            PointD::new(50.0, 50.0),
            radius,
            GradientLut::fade_out(Rgba8::new_opaque(255, 0, 0)),
        )
    }

    #[test]
    fn test_offset_at() {
        let g = red_fade(20.0);
        assert_eq!(g.offset_at(50.0, 50.0), 0.0);
        assert!((g.offset_at(60.0, 50.0) - 0.5).abs() < 1e-12);
        assert_eq!(g.offset_at(90.0, 50.0), 1.0);
    }

    #[test]
    fn test_color_center_opaque_edge_transparent() {
        let g = red_fade(20.0);
        assert_eq!(g.color_at(50.0, 50.0).a, 1.0);
        assert_eq!(g.color_at(50.0, 75.0).a, 0.0);
        let mid = g.color_at(50.0, 60.0);
        assert!((mid.a - 0.5).abs() < 0.01, "a={}", mid.a);
    }

    #[test]
    fn test_zero_radius_is_transparent() {
        let g = red_fade(0.0);
        assert_eq!(g.color_at(50.0, 50.0).a, 0.0);
    }

    #[test]
    fn test_color_symmetric_about_center() {
        let g = red_fade(10.0);
        let row: Vec<RgbaPre> = (40..60).map(|x| g.color_at(x as f64 + 0.5, 49.5)).collect();
        // Pixel centers 40.5 .. 59.5 mirror around x = 50.
        for i in 0..10 {
            assert!((row[i].a - row[19 - i].a).abs() < 1e-6);
        }
        assert!(row[9].a > row[0].a);
    }
}
