//! # gradient-blob
//!
//! Soft gradient-blob backgrounds, rendered in pure Rust.
//!
//! A background is a handful of organic blobs scattered over a solid color.
//! Each blob is a closed spline through jittered polar points, shaded with a
//! radial fade from its color to transparent, blurred, and composited at
//! partial opacity. A light film grain goes over the result. Everything is
//! derived from a [`Settings`] value and its seed, so the same settings give
//! the same picture at any size.
//!
//! ## Pipeline
//!
//! 1. **Geometry**: [`blob::generate_blobs`] turns the seed into blobs
//! 2. **Outline**: Catmull-Rom splines become cubic Beziers in a
//!    [`path_storage::PathStorage`], flattened by [`conv_curve::ConvCurve`]
//! 3. **Rasterizer**: [`rasterizer_scanline_aa`] computes anti-aliased
//!    coverage per scanline
//! 4. **Shading**: [`span_gradient::RadialGradient`] colors covered pixels
//!    into a per-blob [`pixmap::Pixmap`] layer
//! 5. **Post**: [`blur`] softens each layer, layers are composited and
//!    [`grain`] adds noise
//!
//! ```no_run
//! use gradient_blob::{export, ExportSize, Settings};
//!
//! let mut settings = Settings::default();
//! settings.add_color();
//! settings.randomize();
//! let (name, png) = export(&settings, ExportSize::Hd, (800, 600))?;
//! std::fs::write(name, png)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Foundation
pub mod basics;
pub mod color;
pub mod error;

// Geometry
pub mod curves;
pub mod path_storage;
pub mod conv_curve;

// Rasterization & shading
pub mod rasterizer_scanline_aa;
pub mod gradient_lut;
pub mod span_gradient;
pub mod pixmap;

// Post-processing
pub mod blur;
pub mod grain;

// Backgrounds
pub mod blob;
pub mod settings;
pub mod render;
pub mod export;

pub use color::Rgba8;
pub use error::{Error, Result};
pub use export::{encode_png, export, file_name, save_png, ExportSize};
pub use pixmap::Pixmap;
pub use render::{render, render_rgba8};
pub use settings::Settings;
