//! Film grain post-process.
//!
//! Monochrome noise: every pixel gets the same offset on all three color
//! channels, `(n - 0.5) * amount` with `n` uniform in `[0, 1)`. The noise
//! stream is seeded so a given seed always produces the same grain.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::pixmap::Pixmap;

/// Keeps the grain stream independent of the geometry stream for the same
/// user seed.
const GRAIN_STREAM: u64 = 0x6772_6169_6e00_0001;

/// Add grain of strength `amount` (0 = none, 1 = +-50% intensity).
pub fn apply_grain(pm: &mut Pixmap, amount: f32, seed: u64) {
    if amount <= 0.0 {
        return;
    }
    let mut rng = StdRng::seed_from_u64(seed ^ GRAIN_STREAM);
    for p in pm.data_mut() {
        let n: f32 = rng.random();
        // Premultiplied: the straight-alpha offset scales with coverage.
        let delta = (n - 0.5) * amount * p.a;
        p.r = (p.r + delta).clamp(0.0, p.a);
        p.g = (p.g + delta).clamp(0.0, p.a);
        p.b = (p.b + delta).clamp(0.0, p.a);
    }
}
