//! Seeded blob geometry.
//!
//! A blob is a ring of polar points with jittered radii around a center.
//! Geometry is stored resolution-independent: centers are fractions of the
//! canvas and point radii are fractions of the blob radius, so one seed
//! describes the same composition at every output size.

use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::basics::PointD;
use crate::color::Rgba8;
use crate::curves::catrom_to_bezier;
use crate::error::Result;
use crate::path_storage::PathStorage;
use crate::settings::Settings;

/// Point radius range, as a fraction of the blob radius.
pub const POINT_RADIUS_MIN: f64 = 0.5;
pub const POINT_RADIUS_SPREAD: f64 = 0.3;
/// Blob scale range.
pub const SCALE_MIN: f64 = 1.0;
pub const SCALE_SPREAD: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlobPoint {
    pub angle: f64,
    pub radius: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Blob {
    pub points: Vec<BlobPoint>,
    pub color: Rgba8,
    /// Center as fractions of canvas width and height.
    pub center: (f64, f64),
    pub scale: f64,
}

/// Generate `settings.blob_count` blobs from `settings.seed`.
///
/// Blob `i` takes `colors[i % colors.len()]`. Fails when the palette is
/// empty or holds an invalid color.
pub fn generate_blobs(settings: &Settings) -> Result<Vec<Blob>> {
    let palette = settings.palette()?;
    let mut rng = StdRng::seed_from_u64(settings.seed);
    let n = settings.point_count.max(3);

    let blobs = (0..settings.blob_count as usize)
        .map(|i| {
            let points = (0..n)
                .map(|k| BlobPoint {
                    angle: k as f64 / n as f64 * TAU,
                    radius: POINT_RADIUS_MIN + rng.random::<f64>() * POINT_RADIUS_SPREAD,
                })
                .collect();
            let cx: f64 = rng.random();
            let cy: f64 = rng.random();
            let scale = SCALE_MIN + rng.random::<f64>() * SCALE_SPREAD;
            Blob {
                points,
                color: palette[i % palette.len()],
                center: (cx, cy),
                scale,
            }
        })
        .collect();
    Ok(blobs)
}

impl Blob {
    /// Center in device pixels.
    pub fn center_px(&self, width: u32, height: u32) -> PointD {
        PointD::new(self.center.0 * width as f64, self.center.1 * height as f64)
    }

    /// Blob radius in device pixels: `min(w, h) * size * scale`.
    pub fn radius(&self, width: u32, height: u32, size: f64) -> f64 {
        width.min(height) as f64 * size * self.scale
    }

    /// Outline vertices in device pixels.
    pub fn vertices(&self, width: u32, height: u32, size: f64) -> Vec<PointD> {
        let center = self.center_px(width, height);
        let radius = self.radius(width, height, size);
        self.points
            .iter()
            .map(|p| center.polar(p.angle, p.radius * radius))
            .collect()
    }

    /// Closed smooth outline: a Catmull-Rom spline through every vertex,
    /// emitted as cubic Beziers.
    pub fn outline(&self, width: u32, height: u32, size: f64) -> PathStorage {
        let pts = self.vertices(width, height, size);
        let mut path = PathStorage::new();
        let n = pts.len();
        if n == 0 {
            return path;
        }
        path.move_to(pts[0]);
        for k in 0..n {
            let seg = catrom_to_bezier(
                pts[(k + n - 1) % n],
                pts[k],
                pts[(k + 1) % n],
                pts[(k + 2) % n],
            );
            path.curve4(seg.c1, seg.c2, seg.p2);
        }
        path.close_polygon();
        path
    }
}
