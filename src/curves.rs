//! Cubic Bezier flattening and spline conversion.
//!
//! Blob silhouettes are Catmull-Rom splines through their polar points,
//! converted segment by segment into cubic Beziers and flattened with the
//! incremental (forward-differencing) generator below.

use crate::basics::{uround, PathCmd, PointD, VertexSource};

// ============================================================================
// Curve4Points
// ============================================================================

/// Start point, two control points and end point of a cubic Bezier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Curve4Points {
    pub p1: PointD,
    pub c1: PointD,
    pub c2: PointD,
    pub p2: PointD,
}

impl Curve4Points {
    pub const fn new(p1: PointD, c1: PointD, c2: PointD, p2: PointD) -> Self {
        Self { p1, c1, c2, p2 }
    }
}

/// Convert the Catmull-Rom segment `p1 -> p2` (with neighbours `p0` and
/// `p3`) to cubic Bezier control points.
pub fn catrom_to_bezier(p0: PointD, p1: PointD, p2: PointD, p3: PointD) -> Curve4Points {
    Curve4Points::new(
        p1,
        PointD::new((-p0.x + 6.0 * p1.x + p2.x) / 6.0, (-p0.y + 6.0 * p1.y + p2.y) / 6.0),
        PointD::new((p1.x + 6.0 * p2.x - p3.x) / 6.0, (p1.y + 6.0 * p2.y - p3.y) / 6.0),
        p2,
    )
}

// ============================================================================
// Curve4Inc: incremental (forward differences) cubic Bezier
// ============================================================================

/// Incremental cubic Bezier flattener using forward differences.
///
/// The number of steps is a quarter of the control polygon length in device
/// pixels, never fewer than 4.
#[derive(Debug, Clone)]
pub struct Curve4Inc {
    num_steps: i32,
    step: i32,
    start: PointD,
    end: PointD,
    f: PointD,
    df: PointD,
    ddf: PointD,
    dddf: PointD,
    saved_f: PointD,
    saved_df: PointD,
    saved_ddf: PointD,
}

impl Curve4Inc {
    pub fn new() -> Self {
        Self {
            num_steps: 0,
            step: -1,
            start: PointD::default(),
            end: PointD::default(),
            f: PointD::default(),
            df: PointD::default(),
            ddf: PointD::default(),
            dddf: PointD::default(),
            saved_f: PointD::default(),
            saved_df: PointD::default(),
            saved_ddf: PointD::default(),
        }
    }

    pub fn reset(&mut self) {
        self.num_steps = 0;
        self.step = -1;
    }

    pub fn init(&mut self, cp: &Curve4Points) {
        let Curve4Points { p1, c1, c2, p2 } = *cp;
        self.start = p1;
        self.end = p2;

        let len = (p1.distance(c1) + c1.distance(c2) + c2.distance(p2)) * 0.25;
        self.num_steps = (uround(len) as i32).max(4);

        let step = 1.0 / self.num_steps as f64;
        let step2 = step * step;
        let step3 = step2 * step;

        let pre1 = 3.0 * step;
        let pre2 = 3.0 * step2;
        let pre4 = 6.0 * step2;
        let pre5 = 6.0 * step3;

        let tmp1 = p1 - c1 * 2.0 + c2;
        let tmp2 = (c1 - c2) * 3.0 - p1 + p2;

        self.saved_f = p1;
        self.saved_df = (c1 - p1) * pre1 + tmp1 * pre2 + tmp2 * step3;
        self.saved_ddf = tmp1 * pre4 + tmp2 * pre5;
        self.dddf = tmp2 * pre5;

        self.f = self.saved_f;
        self.df = self.saved_df;
        self.ddf = self.saved_ddf;
        self.step = self.num_steps;
    }
}

impl Default for Curve4Inc {
    fn default() -> Self {
        Self::new()
    }
}

impl VertexSource for Curve4Inc {
    fn rewind(&mut self) {
        if self.num_steps == 0 {
            self.step = -1;
            return;
        }
        self.step = self.num_steps;
        self.f = self.saved_f;
        self.df = self.saved_df;
        self.ddf = self.saved_ddf;
    }

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> PathCmd {
        if self.step < 0 {
            return PathCmd::Stop;
        }
        if self.step == self.num_steps {
            *x = self.start.x;
            *y = self.start.y;
            self.step -= 1;
            return PathCmd::MoveTo;
        }
        if self.step == 0 {
            *x = self.end.x;
            *y = self.end.y;
            self.step -= 1;
            return PathCmd::LineTo;
        }

        self.f = self.f + self.df;
        self.df = self.df + self.ddf;
        self.ddf = self.ddf + self.dddf;

        *x = self.f.x;
        *y = self.f.y;
        self.step -= 1;
        PathCmd::LineTo
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect_vertices(vs: &mut dyn VertexSource) -> Vec<(f64, f64, PathCmd)> {
        vs.rewind();
        let mut result = Vec::new();
        loop {
            let mut x = 0.0;
            let mut y = 0.0;
            let cmd = vs.vertex(&mut x, &mut y);
            if cmd.is_stop() {
                break;
            }
            result.push((x, y, cmd));
        }
        result
    }

    fn started(cp: &Curve4Points) -> Curve4Inc {
        let mut c = Curve4Inc::new();
        c.init(cp);
        c
    }

    fn arch() -> Curve4Points {
        Curve4Points::new(
            PointD::new(0.0, 0.0),
            PointD::new(33.0, 100.0),
            PointD::new(66.0, 100.0),
            PointD::new(100.0, 0.0),
        )
    }

    #[test]
    fn test_curve4_inc_basic() {
        let mut c = started(&arch());
        let verts = collect_vertices(&mut c);
        assert!(verts.len() >= 4);
        assert_eq!(verts[0].2, PathCmd::MoveTo);
        assert!(verts[0].0.abs() < 1e-6);
        let last = &verts[verts.len() - 1];
        assert!((last.0 - 100.0).abs() < 1e-6);
        assert!(last.1.abs() < 1e-6);
    }

    #[test]
    fn test_curve4_inc_reset() {
        let mut c = started(&arch());
        c.reset();
        c.rewind();
        let mut x = 0.0;
        let mut y = 0.0;
        assert!(c.vertex(&mut x, &mut y).is_stop());
    }

    #[test]
    fn test_curve4_inc_rewind_replays() {
        let mut c = started(&arch());
        let v1 = collect_vertices(&mut c);
        let v2 = collect_vertices(&mut c);
        assert_eq!(v1.len(), v2.len());
        for (a, b) in v1.iter().zip(v2.iter()) {
            assert!((a.0 - b.0).abs() < 1e-10);
            assert!((a.1 - b.1).abs() < 1e-10);
        }
    }

    #[test]
    fn test_curve4_inc_steps_follow_length() {
        let short = Curve4Points::new(
            PointD::new(0.0, 0.0),
            PointD::new(2.0, 4.0),
            PointD::new(6.0, 4.0),
            PointD::new(8.0, 0.0),
        );
        let v_short = collect_vertices(&mut started(&short));
        let v_long = collect_vertices(&mut started(&arch()));
        assert_eq!(v_short.len(), 5);
        assert!(v_long.len() > v_short.len());
    }

    #[test]
    fn test_curve4_inc_midpoint_on_curve() {
        // Control polygon of length 120 gives exactly 30 steps.
        let cp = Curve4Points::new(
            PointD::new(0.0, 0.0),
            PointD::new(0.0, 40.0),
            PointD::new(40.0, 40.0),
            PointD::new(40.0, 0.0),
        );
        let mut c = started(&cp);
        let verts = collect_vertices(&mut c);
        assert_eq!(verts.len(), 31);
        let mid = verts[15];
        assert!((mid.0 - 20.0).abs() < 1e-9, "x={}", mid.0);
        assert!((mid.1 - 30.0).abs() < 1e-9, "y={}", mid.1);
    }

    #[test]
    fn test_catrom_passes_through_inner_points() {
        let p0 = PointD::new(-10.0, 0.0);
        let p1 = PointD::new(0.0, 0.0);
        let p2 = PointD::new(10.0, 5.0);
        let p3 = PointD::new(20.0, 5.0);
        let cp = catrom_to_bezier(p0, p1, p2, p3);
        assert_eq!(cp.p1, p1);
        assert_eq!(cp.p2, p2);
        // Tangent at p1 is (p2 - p0) / 6.
        assert!((cp.c1.x - 20.0 / 6.0).abs() < 1e-12);
        assert!((cp.c1.y - 5.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_catrom_collinear_stays_on_line() {
        let pts: Vec<PointD> = (0..4).map(|i| PointD::new(i as f64 * 10.0, 0.0)).collect();
        let cp = catrom_to_bezier(pts[0], pts[1], pts[2], pts[3]);
        assert_eq!(cp.c1.y, 0.0);
        assert_eq!(cp.c2.y, 0.0);
        assert!(cp.c1.x > cp.p1.x && cp.c2.x < cp.p2.x);
    }
}
