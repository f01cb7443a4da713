//! Path storage: the vertex container blob outlines are built into.
//!
//! Stores vertices with their path commands. Curves are kept as raw
//! `Curve4` control triples; `ConvCurve` flattens them on the way to the
//! rasterizer.

use crate::basics::{PathCmd, PointD, RectD, VertexSource};

/// A vertex with its command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexD {
    pub x: f64,
    pub y: f64,
    pub cmd: PathCmd,
}

impl VertexD {
    pub const fn new(x: f64, y: f64, cmd: PathCmd) -> Self {
        Self { x, y, cmd }
    }
}

/// Ordered vertex sequence, replayed through `VertexSource`.
#[derive(Debug, Clone, Default)]
pub struct PathStorage {
    vertices: Vec<VertexD>,
    iterator: usize,
}

impl PathStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, p: PointD) {
        self.vertices.push(VertexD::new(p.x, p.y, PathCmd::MoveTo));
    }

    pub fn line_to(&mut self, p: PointD) {
        self.vertices.push(VertexD::new(p.x, p.y, PathCmd::LineTo));
    }

    /// Cubic Bezier from the current point through two control points.
    pub fn curve4(&mut self, ctrl1: PointD, ctrl2: PointD, to: PointD) {
        self.vertices.push(VertexD::new(ctrl1.x, ctrl1.y, PathCmd::Curve4));
        self.vertices.push(VertexD::new(ctrl2.x, ctrl2.y, PathCmd::Curve4));
        self.vertices.push(VertexD::new(to.x, to.y, PathCmd::Curve4));
    }

    /// Close the current sub-path. Does nothing on an empty path or when the
    /// last command already ends a polygon.
    pub fn close_polygon(&mut self) {
        match self.vertices.last() {
            Some(v) if v.cmd.is_vertex() => {
                self.vertices.push(VertexD::new(0.0, 0.0, PathCmd::EndPoly { close: true }));
            }
            _ => {}
        }
    }

    pub fn total_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertex_at(&self, idx: usize) -> Option<&VertexD> {
        self.vertices.get(idx)
    }

    /// Shift every vertex by `(dx, dy)`.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        for v in self.vertices.iter_mut().filter(|v| v.cmd.is_vertex()) {
            v.x += dx;
            v.y += dy;
        }
    }

    /// Bounding box of every coordinate, control points included. Since a
    /// Bezier lies inside the hull of its control points the box also
    /// bounds the flattened outline.
    pub fn bounding_rect(&self) -> Option<RectD> {
        let mut it = self.vertices.iter().filter(|v| v.cmd.is_vertex());
        let first = it.next()?;
        let init = RectD::new(first.x, first.y, first.x, first.y);
        Some(it.fold(init, |r, v| {
            RectD::new(r.x1.min(v.x), r.y1.min(v.y), r.x2.max(v.x), r.y2.max(v.y))
        }))
    }
}

impl VertexSource for PathStorage {
    fn rewind(&mut self) {
        self.iterator = 0;
    }

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> PathCmd {
        let Some(v) = self.vertices.get(self.iterator) else {
            return PathCmd::Stop;
        };
        self.iterator += 1;
        *x = v.x;
        *y = v.y;
        v.cmd
    }
}
