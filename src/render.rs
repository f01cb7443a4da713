//! Full background render.
//!
//! Pipeline per call:
//!
//! 1. fill the canvas with the background color
//! 2. for each blob: rasterize its outline into a private layer, shading
//!    coverage with a radial fade from the blob color to transparent
//! 3. blur the layer and composite it at the blob opacity
//! 4. add grain over the finished canvas
//!
//! Each layer spans the blob bounding box grown by the blur extent, clipped
//! to the canvas grown by the same extent, so blurring never cuts the soft
//! edge and off-canvas blobs cost nothing.

use crate::basics::{PointD, RectD};
use crate::blob::{generate_blobs, Blob};
use crate::blur::{blur_extent, recursive_blur};
use crate::conv_curve::ConvCurve;
use crate::error::Result;
use crate::gradient_lut::GradientLut;
use crate::grain::apply_grain;
use crate::pixmap::Pixmap;
use crate::rasterizer_scanline_aa::RasterizerScanlineAa;
use crate::settings::Settings;
use crate::span_gradient::RadialGradient;

/// Global alpha every blob layer is composited with.
pub const BLOB_OPACITY: f32 = 0.6;

/// Render `settings` into a new `width` x `height` pixmap.
pub fn render(settings: &Settings, width: u32, height: u32) -> Result<Pixmap> {
    settings.validate()?;
    let mut canvas = Pixmap::new(width, height)?;
    canvas.fill(settings.background_color()?);

    let blobs = generate_blobs(settings)?;
    let sigma = settings.blur;
    let pad = blur_extent(sigma) as f64;
    let bounds = RectD::new(0.0, 0.0, width as f64, height as f64).expand(pad);
    tracing::debug!(
        width,
        height,
        blobs = blobs.len(),
        sigma,
        seed = settings.seed,
        "rendering background"
    );

    for (i, blob) in blobs.iter().enumerate() {
        let Some((mut layer, x, y)) =
            render_layer(blob, settings.size, width, height, pad, &bounds)?
        else {
            tracing::trace!(blob = i, "blob layer empty, skipped");
            continue;
        };
        recursive_blur(&mut layer, sigma);
        canvas.composite(&layer, x, y, BLOB_OPACITY);
        tracing::trace!(
            blob = i,
            x,
            y,
            layer_width = layer.width(),
            layer_height = layer.height(),
            "blob composited"
        );
    }

    if settings.grain > 0.0 {
        apply_grain(&mut canvas, settings.grain as f32, settings.seed);
        tracing::debug!(amount = settings.grain, "grain applied");
    }
    Ok(canvas)
}

/// Render and convert to straight-alpha RGBA bytes.
pub fn render_rgba8(settings: &Settings, width: u32, height: u32) -> Result<Vec<u8>> {
    Ok(render(settings, width, height)?.to_rgba8())
}

/// Rasterize one blob into an unblurred layer. Returns the layer and the
/// canvas position of its top-left corner, or `None` when the padded blob
/// does not touch the padded canvas.
fn render_layer(
    blob: &Blob,
    size: f64,
    width: u32,
    height: u32,
    pad: f64,
    bounds: &RectD,
) -> Result<Option<(Pixmap, i32, i32)>> {
    let mut path = blob.outline(width, height, size);
    let Some(area) = path
        .bounding_rect()
        .and_then(|r| r.expand(pad).intersect(bounds))
    else {
        return Ok(None);
    };

    let x0 = area.x1.floor();
    let y0 = area.y1.floor();
    let lw = (area.x2.ceil() - x0) as u32;
    let lh = (area.y2.ceil() - y0) as u32;
    if lw == 0 || lh == 0 {
        return Ok(None);
    }
    path.translate(-x0, -y0);

    let center = blob.center_px(width, height);
    let gradient = RadialGradient::new(
        PointD::new(center.x - x0, center.y - y0),
        blob.radius(width, height, size),
        GradientLut::fade_out(blob.color),
    );

    let mut ras = RasterizerScanlineAa::new(lw, lh);
    let mut curve = ConvCurve::new(path);
    ras.add_path(&mut curve);

    let mut layer = Pixmap::new(lw, lh)?;
    ras.sweep(|y, x, covers| layer.blend_gradient_hspan(x, y, covers, &gradient));
    Ok(Some((layer, x0 as i32, y0 as i32)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba8;
    use crate::error::Error;

    fn crisp(seed: u64) -> Settings {
        Settings {
            colors: vec!["#ffffff".into()],
            blob_count: 1,
            size: 0.1,
            background: "#000000".into(),
            blur: 0.0,
            grain: 0.0,
            seed,
            ..Settings::default()
        }
    }

    #[test]
    fn test_rejects_empty_canvas() {
        let err = render(&Settings::default(), 0, 100).unwrap_err();
        assert!(matches!(err, Error::EmptyCanvas { width: 0, height: 100 }));
    }

    #[test]
    fn test_rejects_invalid_settings() {
        let mut s = Settings::default();
        s.blur = 250.0;
        assert!(matches!(render(&s, 10, 10), Err(Error::OutOfRange { field: "blur", .. })));
    }

    #[test]
    fn test_same_seed_same_pixels() {
        let s = Settings::default();
        let a = render_rgba8(&s, 96, 64).unwrap();
        let b = render_rgba8(&s, 96, 64).unwrap();
        assert_eq!(a.len(), 96 * 64 * 4);
        assert_eq!(a, b);

        let mut other = s.clone();
        other.randomize();
        assert_ne!(a, render_rgba8(&other, 96, 64).unwrap());
    }

    #[test]
    fn test_blob_center_at_blob_opacity() {
        for seed in 0..4 {
            let s = crisp(seed);
            let pm = render(&s, 200, 200).unwrap();
            let blob = &generate_blobs(&s).unwrap()[0];
            let c = blob.center_px(200, 200);
            let px = pm.pixel(c.x as u32, c.y as u32).to_rgba8();
            // White at (nearly) full gradient alpha over black, times 0.6.
            assert!((140..=154).contains(&px.r), "seed {seed}: r={}", px.r);
            assert_eq!(px.a, 255);
        }
    }

    #[test]
    fn test_background_outside_blob() {
        let s = crisp(9);
        let pm = render(&s, 200, 200).unwrap();
        let blob = &generate_blobs(&s).unwrap()[0];
        let bbox = blob.outline(200, 200, s.size).bounding_rect().unwrap();
        let bg = Rgba8::new_opaque(0, 0, 0);
        let mut checked = 0;
        for y in 0..200u32 {
            for x in 0..200u32 {
                let outside = (x as f64 + 1.0) < bbox.x1
                    || (x as f64) > bbox.x2
                    || (y as f64 + 1.0) < bbox.y1
                    || (y as f64) > bbox.y2;
                if outside {
                    assert_eq!(pm.pixel(x, y).to_rgba8(), bg, "({x}, {y})");
                    checked += 1;
                }
            }
        }
        assert!(checked > 0);
    }

    #[test]
    fn test_blur_softens_edge() {
        let sharp = crisp(2);
        let mut soft = sharp.clone();
        soft.blur = 6.0;

        let lit = |pm: &Pixmap| pm.data().iter().filter(|p| p.to_rgba8().r > 0).count();
        let a = render(&sharp, 200, 200).unwrap();
        let b = render(&soft, 200, 200).unwrap();
        assert!(lit(&b) > lit(&a));

        // Find a lit edge pixel in the sharp render with dark room beside it.
        let mut edge = None;
        for y in 0..200u32 {
            let row: Vec<u8> = (0..200u32).map(|x| a.pixel(x, y).to_rgba8().r).collect();
            if let Some(last) = row.iter().rposition(|&r| r > 0) {
                if last + 2 < 200 {
                    edge = Some((last as u32 + 2, y));
                    break;
                }
            }
            if let Some(first) = row.iter().position(|&r| r > 0) {
                if first >= 2 {
                    edge = Some((first as u32 - 2, y));
                    break;
                }
            }
        }
        let (x, y) = edge.expect("blob has a visible edge");
        assert_eq!(a.pixel(x, y).to_rgba8().r, 0);
        assert!(b.pixel(x, y).to_rgba8().r > 0);
    }

    #[test]
    fn test_composition_scales_with_canvas() {
        let s = Settings {
            blob_count: 3,
            size: 0.5,
            ..crisp(21)
        };
        let blobs = generate_blobs(&s).unwrap();
        for blob in &blobs {
            let (small, large) = (blob.center_px(96, 54), blob.center_px(192, 108));
            assert!((large.x - 2.0 * small.x).abs() < 1e-9);
            assert!((large.y - 2.0 * small.y).abs() < 1e-9);
            let r = blob.radius(96, 54, s.size);
            assert!((blob.radius(192, 108, s.size) - 2.0 * r).abs() < 1e-9);
        }

        // Each small pixel should match the mean of its 2x2 block.
        let small = render(&s, 96, 54).unwrap();
        let large = render(&s, 192, 108).unwrap();
        let mut total = 0.0;
        for y in 0..54u32 {
            for x in 0..96u32 {
                let block = [(0, 0), (1, 0), (0, 1), (1, 1)]
                    .iter()
                    .map(|&(dx, dy)| large.pixel(2 * x + dx, 2 * y + dy).r)
                    .sum::<f32>()
                    / 4.0;
                total += (small.pixel(x, y).r - block).abs();
            }
        }
        let mean = total / (96.0 * 54.0);
        assert!(mean < 3.0 / 255.0, "mean difference {mean}");
    }

    #[test]
    fn test_grain_only_perturbs() {
        let mut s = crisp(4);
        let plain = render(&s, 64, 64).unwrap();
        s.grain = 0.1;
        let grainy = render(&s, 64, 64).unwrap();
        assert_ne!(plain.data(), grainy.data());
        for (p, g) in plain.data().iter().zip(grainy.data()) {
            assert!((p.r - g.r).abs() <= 0.05 + 1e-6);
            assert_eq!(g.a, 1.0);
        }
    }
}
