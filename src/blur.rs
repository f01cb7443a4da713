//! Recursive (IIR) Gaussian blur.
//!
//! Young–van Vliet recursive approximation: a forward and a backward
//! third-order filter per line, run horizontally then vertically. Cost per
//! pixel is independent of sigma, which matters for blur amounts near
//! 100 px. Operates on premultiplied channels so transparent pixels don't
//! leak black into colored ones.

use crate::color::RgbaPre;
use crate::pixmap::Pixmap;

/// Smallest sigma the recursive coefficients are valid for.
pub const MIN_SIGMA: f64 = 0.5;

/// Padding, in pixels, that holds all visible energy of a blur with the
/// given standard deviation.
pub fn blur_extent(sigma: f64) -> u32 {
    if sigma < MIN_SIGMA {
        0
    } else {
        (3.0 * sigma).ceil() as u32
    }
}

/// Filter coefficients `(b, b1, b2, b3)` for a standard deviation.
#[derive(Debug, Clone, Copy)]
struct Coefficients {
    b: f32,
    b1: f32,
    b2: f32,
    b3: f32,
}

impl Coefficients {
    fn new(sigma: f64) -> Self {
        let q = if sigma < 2.5 {
            3.97156 - 4.14554 * (1.0 - 0.26891 * sigma).sqrt()
        } else {
            0.98711 * sigma - 0.96330
        };
        let q2 = q * q;
        let q3 = q2 * q;

        let b0 = 1.0 / (1.578250 + 2.444130 * q + 1.428100 * q2 + 0.422205 * q3);
        let b1 = 2.44413 * q + 2.85619 * q2 + 1.26661 * q3;
        let b2 = -1.42810 * q2 - 1.26661 * q3;
        let b3 = 0.422205 * q3;
        let b = 1.0 - (b1 + b2 + b3) * b0;

        Self {
            b: b as f32,
            b1: (b1 * b0) as f32,
            b2: (b2 * b0) as f32,
            b3: (b3 * b0) as f32,
        }
    }

    #[inline]
    fn calc(&self, c1: &RgbaPre, c2: &RgbaPre, c3: &RgbaPre, c4: &RgbaPre) -> RgbaPre {
        RgbaPre::new(
            self.b * c1.r + self.b1 * c2.r + self.b2 * c3.r + self.b3 * c4.r,
            self.b * c1.g + self.b1 * c2.g + self.b2 * c3.g + self.b3 * c4.g,
            self.b * c1.b + self.b1 * c2.b + self.b2 * c3.b + self.b3 * c4.b,
            self.b * c1.a + self.b1 * c2.a + self.b2 * c3.a + self.b3 * c4.a,
        )
    }
}

/// Scratch buffers reused across lines.
struct LineBlur {
    k: Coefficients,
    sum1: Vec<RgbaPre>,
    sum2: Vec<RgbaPre>,
}

impl LineBlur {
    fn new(k: Coefficients, len: usize) -> Self {
        Self {
            k,
            sum1: vec![RgbaPre::TRANSPARENT; len],
            sum2: vec![RgbaPre::TRANSPARENT; len],
        }
    }

    /// Blur one line in place. Needs at least 3 pixels; edges extend.
    fn run(&mut self, line: &mut [RgbaPre]) {
        let n = line.len();
        let k = self.k;
        let (s1, s2) = (&mut self.sum1, &mut self.sum2);

        // Forward pass
        s1[0] = k.calc(&line[0], &line[0], &line[0], &line[0]);
        s1[1] = k.calc(&line[1], &s1[0], &s1[0], &s1[0]);
        s1[2] = k.calc(&line[2], &s1[1], &s1[0], &s1[0]);
        for x in 3..n {
            s1[x] = k.calc(&line[x], &s1[x - 1], &s1[x - 2], &s1[x - 3]);
        }

        // Backward pass
        let m = n - 1;
        s2[m] = k.calc(&s1[m], &s1[m], &s1[m], &s1[m]);
        s2[m - 1] = k.calc(&s1[m - 1], &s2[m], &s2[m], &s2[m]);
        s2[m - 2] = k.calc(&s1[m - 2], &s2[m - 1], &s2[m], &s2[m]);
        for x in (0..m.saturating_sub(2)).rev() {
            s2[x] = k.calc(&s1[x], &s2[x + 1], &s2[x + 2], &s2[x + 3]);
        }

        for (dst, c) in line.iter_mut().zip(s2.iter()) {
            let a = c.a.clamp(0.0, 1.0);
            *dst = RgbaPre::new(c.r.clamp(0.0, a), c.g.clamp(0.0, a), c.b.clamp(0.0, a), a);
        }
    }
}

/// Apply a Gaussian blur with standard deviation `sigma` pixels, in place.
pub fn recursive_blur(pm: &mut Pixmap, sigma: f64) {
    recursive_blur_x(pm, sigma);
    recursive_blur_y(pm, sigma);
}

/// Horizontal pass.
pub fn recursive_blur_x(pm: &mut Pixmap, sigma: f64) {
    let w = pm.width() as usize;
    if sigma < MIN_SIGMA || w < 3 {
        return;
    }
    let mut lb = LineBlur::new(Coefficients::new(sigma), w);
    for y in 0..pm.height() {
        lb.run(pm.row_mut(y));
    }
}

/// Vertical pass.
pub fn recursive_blur_y(pm: &mut Pixmap, sigma: f64) {
    let w = pm.width() as usize;
    let h = pm.height() as usize;
    if sigma < MIN_SIGMA || h < 3 {
        return;
    }
    let mut lb = LineBlur::new(Coefficients::new(sigma), h);
    let mut column = vec![RgbaPre::TRANSPARENT; h];
    let data = pm.data_mut();
    for x in 0..w {
        for (y, c) in column.iter_mut().enumerate() {
            *c = data[y * w + x];
        }
        lb.run(&mut column);
        for (y, c) in column.iter().enumerate() {
            data[y * w + x] = *c;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba8;

    fn dot(w: u32, h: u32, x: u32, y: u32) -> Pixmap {
        let mut pm = Pixmap::new(w, h).unwrap();
        pm.set_pixel(x, y, Rgba8::new_opaque(255, 255, 255).to_pre());
        pm
    }

    #[test]
    fn test_blur_extent() {
        assert_eq!(blur_extent(0.0), 0);
        assert_eq!(blur_extent(0.4), 0);
        assert_eq!(blur_extent(40.0), 120);
        assert_eq!(blur_extent(2.1), 7);
    }

    #[test]
    fn test_small_sigma_is_noop() {
        let mut pm = dot(10, 10, 5, 5);
        let before = pm.clone();
        recursive_blur(&mut pm, 0.3);
        assert_eq!(pm.data(), before.data());
    }

    #[test]
    fn test_spreads_pixel() {
        let mut pm = dot(21, 21, 10, 10);
        recursive_blur(&mut pm, 2.0);
        let center = pm.pixel(10, 10);
        let near = pm.pixel(11, 10);
        let far = pm.pixel(16, 10);
        assert!(center.a > near.a && near.a > far.a);
        assert!(near.a > 0.0);
        assert!((pm.pixel(9, 10).a - near.a).abs() < 1e-3, "blur should be symmetric");
    }

    #[test]
    fn test_preserves_energy() {
        let mut pm = dot(41, 41, 20, 20);
        recursive_blur(&mut pm, 3.0);
        let total: f32 = pm.data().iter().map(|p| p.a).sum();
        assert!((total - 1.0).abs() < 0.05, "total alpha {total}");
    }

    #[test]
    fn test_uniform_stays_uniform() {
        let mut pm = Pixmap::new(10, 10).unwrap();
        pm.fill(Rgba8::new_opaque(100, 100, 100));
        recursive_blur(&mut pm, 4.0);
        for p in pm.data() {
            let c = p.to_rgba8();
            assert!((c.r as i32 - 100).abs() <= 1, "r={}", c.r);
            assert_eq!(c.a, 255);
        }
    }

    #[test]
    fn test_premultiplied_edges_keep_color() {
        // A red dot on transparent must stay pure red after demultiply.
        let mut pm = Pixmap::new(15, 15).unwrap();
        pm.set_pixel(7, 7, Rgba8::new_opaque(255, 0, 0).to_pre());
        recursive_blur(&mut pm, 1.5);
        let c = pm.pixel(9, 7).to_rgba8();
        assert!(c.a > 0);
        assert_eq!((c.r, c.g, c.b), (255, 0, 0));
    }

    #[test]
    fn test_tiny_dimensions_skip_axis() {
        let mut pm = dot(2, 9, 1, 4);
        recursive_blur(&mut pm, 2.0);
        // Horizontal pass skipped; vertical still spreads.
        assert_eq!(pm.pixel(0, 4).a, 0.0);
        assert!(pm.pixel(1, 5).a > 0.0);
    }
}
