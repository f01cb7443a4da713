//! Anti-aliased scanline rasterizer.
//!
//! Edges are accumulated as signed area/cover contributions into one cell
//! row per scanline (the cell approach of a classic scanline AA rasterizer,
//! with f32 cells instead of 24.8 fixed point). Sweeping a row integrates
//! the cells left to right; the running sum is the winding-weighted
//! coverage of each pixel, and the non-zero rule clamps `|sum|` to 1.
//!
//! Edges are clipped to the target box before accumulation. Parts left or
//! right of the box collapse onto its vertical border, which keeps the
//! winding contribution for the pixels inside exact.

use crate::basics::{PathCmd, PointD, VertexSource};

/// Coverage below this is treated as empty when trimming spans.
const COVER_EPSILON: f32 = 1.0 / 512.0;

pub struct RasterizerScanlineAa {
    width: usize,
    height: usize,
    stride: usize,
    cells: Vec<f32>,
    covers: Vec<f32>,
    start: PointD,
    last: PointD,
    open: bool,
    min_row: usize,
    max_row: usize,
}

impl RasterizerScanlineAa {
    pub fn new(width: u32, height: u32) -> Self {
        let width = width as usize;
        let height = height as usize;
        // Two spare cells absorb contributions from edges on the right border.
        let stride = width + 2;
        Self {
            width,
            height,
            stride,
            cells: vec![0.0; stride * height],
            covers: vec![0.0; width],
            start: PointD::default(),
            last: PointD::default(),
            open: false,
            min_row: usize::MAX,
            max_row: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.width as u32
    }

    pub fn height(&self) -> u32 {
        self.height as u32
    }

    /// Start a new contour, closing the previous one.
    pub fn move_to_d(&mut self, x: f64, y: f64) {
        self.close_polygon();
        self.start = PointD::new(x, y);
        self.last = self.start;
        self.open = true;
    }

    pub fn line_to_d(&mut self, x: f64, y: f64) {
        let p = PointD::new(x, y);
        if self.open {
            self.edge(self.last, p);
        } else {
            self.start = p;
            self.open = true;
        }
        self.last = p;
    }

    /// Close the current contour back to its start point.
    pub fn close_polygon(&mut self) {
        if self.open {
            if self.last != self.start {
                self.edge(self.last, self.start);
            }
            self.last = self.start;
            self.open = false;
        }
    }

    /// Feed a whole vertex source. Contours are closed implicitly; curve
    /// commands must be flattened first (see `ConvCurve`).
    pub fn add_path(&mut self, vs: &mut dyn VertexSource) {
        vs.rewind();
        let (mut x, mut y) = (0.0, 0.0);
        loop {
            match vs.vertex(&mut x, &mut y) {
                PathCmd::Stop => break,
                PathCmd::MoveTo => self.move_to_d(x, y),
                PathCmd::LineTo | PathCmd::Curve4 => self.line_to_d(x, y),
                PathCmd::EndPoly { .. } => self.close_polygon(),
            }
        }
        self.close_polygon();
    }

    /// Add one edge, clipped horizontally to `[0, width]`.
    pub fn edge(&mut self, p0: PointD, p1: PointD) {
        let finite = [p0.x, p0.y, p1.x, p1.y].iter().all(|v| v.is_finite());
        if !finite || p0.y == p1.y {
            return;
        }
        let w = self.width as f64;
        let dx = p1.x - p0.x;

        let mut ts = [0.0, 1.0, 1.0, 1.0];
        let mut n = 1;
        if dx != 0.0 {
            for bound in [0.0, w] {
                let t = (bound - p0.x) / dx;
                if t > 0.0 && t < 1.0 {
                    ts[n] = t;
                    n += 1;
                }
            }
        }
        ts[n] = 1.0;
        ts[1..n].sort_by(|a, b| a.total_cmp(b));

        let at = |t: f64| {
            PointD::new(
                (p0.x + dx * t).clamp(0.0, w),
                p0.y + (p1.y - p0.y) * t,
            )
        };
        for i in 0..n {
            self.accumulate_line(at(ts[i]), at(ts[i + 1]));
        }
    }

    fn accumulate_line(&mut self, p0: PointD, p1: PointD) {
        if p0.y == p1.y {
            return;
        }
        let (dir, p0, p1) = if p0.y < p1.y {
            (1.0f32, p0, p1)
        } else {
            (-1.0f32, p1, p0)
        };
        let h = self.height as f64;
        if p1.y <= 0.0 || p0.y >= h {
            return;
        }

        let dxdy = ((p1.x - p0.x) / (p1.y - p0.y)) as f32;
        let y_top = p0.y.max(0.0);
        let y_bottom = p1.y.min(h);
        let mut x = (p0.x + (y_top - p0.y) * dxdy as f64) as f32;

        let row_start = y_top as usize;
        let row_end = (y_bottom.ceil() as usize).min(self.height);
        self.min_row = self.min_row.min(row_start);
        self.max_row = self.max_row.max(row_end);

        for y in row_start..row_end {
            let line = y * self.stride;
            let dy = ((y + 1) as f64).min(y_bottom) - (y as f64).max(y_top);
            let dy = dy as f32;
            let x_next = x + dxdy * dy;
            let d = dy * dir;

            let (x0, x1) = if x < x_next { (x, x_next) } else { (x_next, x) };
            let x0 = x0.max(0.0);
            let x0_floor = x0.floor();
            let x0i = x0_floor as usize;
            let x1_ceil = x1.ceil();
            let x1i = (x1_ceil.max(0.0) as usize).min(self.width + 1);

            if x1i <= x0i + 1 {
                let xmf = 0.5 * (x + x_next) - x0_floor;
                self.cells[line + x0i] += d - d * xmf;
                self.cells[line + x0i + 1] += d * xmf;
            } else {
                let s = (x1 - x0).recip();
                let x0f = x0 - x0_floor;
                let a0 = 0.5 * s * (1.0 - x0f) * (1.0 - x0f);
                let x1f = x1 - x1_ceil + 1.0;
                let am = 0.5 * s * x1f * x1f;
                self.cells[line + x0i] += d * a0;
                if x1i == x0i + 2 {
                    self.cells[line + x0i + 1] += d * (1.0 - a0 - am);
                } else {
                    let a1 = s * (1.5 - x0f);
                    self.cells[line + x0i + 1] += d * (a1 - a0);
                    for xi in x0i + 2..x1i - 1 {
                        self.cells[line + xi] += d * s;
                    }
                    let a2 = a1 + (x1i - x0i - 3) as f32 * s;
                    self.cells[line + x1i - 1] += d * (1.0 - a2 - am);
                }
                self.cells[line + x1i] += d * am;
            }
            x = x_next;
        }
    }

    /// Rows that may hold coverage.
    pub fn row_bounds(&self) -> Option<(u32, u32)> {
        (self.min_row < self.max_row).then_some((self.min_row as u32, self.max_row as u32))
    }

    /// Integrate every touched row and hand its non-empty span to `f` as
    /// `(y, x_start, covers)`, covers in `[0, 1]`.
    pub fn sweep<F>(&mut self, mut f: F)
    where
        F: FnMut(u32, u32, &[f32]),
    {
        let Some((y0, y1)) = self.row_bounds() else {
            return;
        };
        for y in y0 as usize..y1 as usize {
            let line = &self.cells[y * self.stride..y * self.stride + self.width];
            let mut acc = 0.0f32;
            let mut first = None;
            let mut last = 0;
            for (x, cell) in line.iter().enumerate() {
                acc += cell;
                let cover = acc.abs().min(1.0);
                self.covers[x] = cover;
                if cover > COVER_EPSILON {
                    first.get_or_insert(x);
                    last = x;
                }
            }
            if let Some(first) = first {
                f(y as u32, first as u32, &self.covers[first..=last]);
            }
        }
    }
}
