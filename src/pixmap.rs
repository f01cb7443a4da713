//! Premultiplied RGBA pixel buffer.
//!
//! Row-major, top-to-bottom. The final image and every per-blob layer are
//! `Pixmap`s; `to_rgba8` produces the straight-alpha byte buffer a canvas
//! `ImageData` or a PNG encoder expects.

use crate::color::{Rgba8, RgbaPre};
use crate::error::{Error, Result};
use crate::gradient_lut::ColorFunction;
use crate::span_gradient::RadialGradient;

#[derive(Debug, Clone)]
pub struct Pixmap {
    width: u32,
    height: u32,
    data: Vec<RgbaPre>,
}

impl Pixmap {
    /// Transparent pixmap. Both dimensions must be non-zero.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::EmptyCanvas { width, height });
        }
        Ok(Self {
            width,
            height,
            data: vec![RgbaPre::TRANSPARENT; width as usize * height as usize],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[RgbaPre] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [RgbaPre] {
        &mut self.data
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn pixel(&self, x: u32, y: u32) -> RgbaPre {
        self.data[self.index(x, y)]
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, c: RgbaPre) {
        let i = self.index(x, y);
        self.data[i] = c;
    }

    pub fn row(&self, y: u32) -> &[RgbaPre] {
        let start = self.index(0, y);
        &self.data[start..start + self.width as usize]
    }

    pub fn row_mut(&mut self, y: u32) -> &mut [RgbaPre] {
        let start = self.index(0, y);
        let w = self.width as usize;
        &mut self.data[start..start + w]
    }

    /// Overwrite every pixel.
    pub fn fill(&mut self, c: Rgba8) {
        self.data.fill(c.to_pre());
    }

    /// Blend a horizontal span shaded by `gradient`, one coverage value per
    /// pixel starting at `(x, y)`. Pixels past the right edge are dropped.
    pub fn blend_gradient_hspan<C: ColorFunction>(
        &mut self,
        x: u32,
        y: u32,
        covers: &[f32],
        gradient: &RadialGradient<C>,
    ) {
        if y >= self.height || x >= self.width {
            return;
        }
        let len = covers.len().min((self.width - x) as usize);
        let py = y as f64 + 0.5;
        let row = self.row_mut(y);
        for (i, (dst, cover)) in row[x as usize..x as usize + len]
            .iter_mut()
            .zip(covers)
            .enumerate()
        {
            if *cover <= 0.0 {
                continue;
            }
            let src = gradient.color_at((x as usize + i) as f64 + 0.5, py);
            dst.blend(&src.scale(*cover));
        }
    }

    /// Source-over `src` placed with its top-left corner at `(dx, dy)`,
    /// scaled by a global `alpha`. Parts of `src` outside `self` are clipped.
    pub fn composite(&mut self, src: &Pixmap, dx: i32, dy: i32, alpha: f32) {
        if alpha <= 0.0 {
            return;
        }
        let x0 = dx.max(0);
        let y0 = dy.max(0);
        let x1 = (dx + src.width as i32).min(self.width as i32);
        let y1 = (dy + src.height as i32).min(self.height as i32);
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        for y in y0..y1 {
            let src_row = src.row((y - dy) as u32);
            let dst_row = self.row_mut(y as u32);
            let sx = (x0 - dx) as usize;
            let n = (x1 - x0) as usize;
            for (d, s) in dst_row[x0 as usize..x1 as usize]
                .iter_mut()
                .zip(&src_row[sx..sx + n])
            {
                if s.a > 0.0 {
                    d.blend(&s.scale(alpha));
                }
            }
        }
    }

    /// Straight-alpha RGBA bytes, `width * height * 4` long.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len() * 4);
        for p in &self.data {
            let c = p.to_rgba8();
            out.extend_from_slice(&[c.r, c.g, c.b, c.a]);
        }
        out
    }
}
