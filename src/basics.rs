//! Foundation types: points, path commands and the vertex source trait.

use core::ops::{Add, Mul, Sub};

// ============================================================================
// Rounding
// ============================================================================

/// Round to the nearest unsigned integer, half up.
#[inline]
pub fn uround(v: f64) -> u32 {
    (v + 0.5) as u32
}

// ============================================================================
// PointD
// ============================================================================

/// A 2D point with f64 coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointD {
    pub x: f64,
    pub y: f64,
}

impl PointD {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `angle` radians and distance `dist` from `self`.
    pub fn polar(self, angle: f64, dist: f64) -> Self {
        Self::new(self.x + angle.cos() * dist, self.y + angle.sin() * dist)
    }

    pub fn distance(self, other: PointD) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl Add for PointD {
    type Output = PointD;
    fn add(self, rhs: PointD) -> PointD {
        PointD::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for PointD {
    type Output = PointD;
    fn sub(self, rhs: PointD) -> PointD {
        PointD::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for PointD {
    type Output = PointD;
    fn mul(self, k: f64) -> PointD {
        PointD::new(self.x * k, self.y * k)
    }
}

// ============================================================================
// RectD
// ============================================================================

/// Axis-aligned rectangle, `x1 <= x2` and `y1 <= y2` once normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectD {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl RectD {
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    /// Grow every side by `d`.
    pub fn expand(&self, d: f64) -> Self {
        Self::new(self.x1 - d, self.y1 - d, self.x2 + d, self.y2 + d)
    }

    /// Intersection with `other`, or `None` when they don't overlap.
    pub fn intersect(&self, other: &RectD) -> Option<Self> {
        let r = Self::new(
            self.x1.max(other.x1),
            self.y1.max(other.y1),
            self.x2.min(other.x2),
            self.y2.min(other.y2),
        );
        (r.x1 < r.x2 && r.y1 < r.y2).then_some(r)
    }
}

// ============================================================================
// Path commands
// ============================================================================

/// Path command emitted by a [`VertexSource`].
///
/// `Curve4` vertices come in triples: two control points, then the end point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathCmd {
    Stop,
    MoveTo,
    LineTo,
    Curve4,
    EndPoly { close: bool },
}

impl PathCmd {
    #[inline]
    pub fn is_stop(self) -> bool {
        self == PathCmd::Stop
    }

    /// True for commands that carry a coordinate.
    #[inline]
    pub fn is_vertex(self) -> bool {
        matches!(self, PathCmd::MoveTo | PathCmd::LineTo | PathCmd::Curve4)
    }

    #[inline]
    pub fn is_close(self) -> bool {
        self == PathCmd::EndPoly { close: true }
    }
}

/// A source of path vertices, consumed by rewinding then pulling vertices
/// until `PathCmd::Stop`.
pub trait VertexSource {
    fn rewind(&mut self);
    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> PathCmd;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounding() {
        assert_eq!(uround(2.49), 2);
        assert_eq!(uround(2.5), 3);
        assert_eq!(uround(0.0), 0);
    }

    #[test]
    fn test_point_polar() {
        let p = PointD::new(10.0, 10.0).polar(0.0, 5.0);
        assert!((p.x - 15.0).abs() < 1e-12);
        assert!((p.y - 10.0).abs() < 1e-12);
        let q = PointD::new(0.0, 0.0).polar(std::f64::consts::FRAC_PI_2, 2.0);
        assert!(q.x.abs() < 1e-12);
        assert!((q.y - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_rect_intersect() {
        let a = RectD::new(0.0, 0.0, 10.0, 10.0);
        let b = RectD::new(5.0, -5.0, 20.0, 5.0);
        assert_eq!(a.intersect(&b), Some(RectD::new(5.0, 0.0, 10.0, 5.0)));
        let c = RectD::new(11.0, 0.0, 12.0, 1.0);
        assert_eq!(a.intersect(&c), None);
    }

    #[test]
    fn test_path_cmd_predicates() {
        assert!(PathCmd::Stop.is_stop());
        assert!(PathCmd::Curve4.is_vertex());
        assert!(!PathCmd::EndPoly { close: false }.is_close());
        assert!(PathCmd::EndPoly { close: true }.is_close());
    }
}
