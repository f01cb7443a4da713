//! Curve converter. Flattens `Curve4` commands into line segments.
//!
//! Wraps a vertex source; move-to, line-to and end-poly commands pass
//! through, each `Curve4` control triple is expanded by a `Curve4Inc`.

use crate::basics::{PathCmd, PointD, VertexSource};
use crate::curves::{Curve4Inc, Curve4Points};

pub struct ConvCurve<VS: VertexSource> {
    source: VS,
    last: PointD,
    curve4: Curve4Inc,
}

impl<VS: VertexSource> ConvCurve<VS> {
    pub fn new(source: VS) -> Self {
        Self {
            source,
            last: PointD::default(),
            curve4: Curve4Inc::new(),
        }
    }
}

impl<VS: VertexSource> VertexSource for ConvCurve<VS> {
    fn rewind(&mut self) {
        self.source.rewind();
        self.last = PointD::default();
        self.curve4.reset();
    }

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> PathCmd {
        if !self.curve4.vertex(x, y).is_stop() {
            self.last = PointD::new(*x, *y);
            return PathCmd::LineTo;
        }

        let mut cmd = self.source.vertex(x, y);
        if cmd == PathCmd::Curve4 {
            let ctrl1 = PointD::new(*x, *y);
            let (mut cx, mut cy) = (0.0, 0.0);
            let (mut ex, mut ey) = (0.0, 0.0);
            self.source.vertex(&mut cx, &mut cy);
            self.source.vertex(&mut ex, &mut ey);

            self.curve4.init(&Curve4Points::new(
                self.last,
                ctrl1,
                PointD::new(cx, cy),
                PointD::new(ex, ey),
            ));

            // The first vertex repeats the start point; skip it.
            self.curve4.vertex(x, y);
            self.curve4.vertex(x, y);
            cmd = PathCmd::LineTo;
        }

        if cmd.is_vertex() {
            self.last = PointD::new(*x, *y);
        }
        cmd
    }
}
