//! PNG export at preset or custom sizes.
//!
//! Exports re-render from the settings rather than resampling the preview:
//! blob geometry is resolution independent, so a 4K export shows the same
//! composition as the on-screen canvas, only sharper.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::pixmap::Pixmap;
use crate::render::render;
use crate::settings::Settings;

/// Output size for an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportSize {
    /// Whatever size the preview canvas currently has.
    Current,
    Hd,
    #[serde(rename = "4k")]
    Uhd,
    Mobile,
    Social,
}

impl ExportSize {
    pub const ALL: [ExportSize; 5] = [
        ExportSize::Current,
        ExportSize::Hd,
        ExportSize::Uhd,
        ExportSize::Mobile,
        ExportSize::Social,
    ];

    /// Pixel dimensions; `current` is used for `ExportSize::Current`.
    pub fn dimensions(self, current: (u32, u32)) -> (u32, u32) {
        match self {
            ExportSize::Current => current,
            ExportSize::Hd => (1920, 1080),
            ExportSize::Uhd => (3840, 2160),
            ExportSize::Mobile => (1080, 1920),
            ExportSize::Social => (1200, 630),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ExportSize::Current => "current",
            ExportSize::Hd => "hd",
            ExportSize::Uhd => "4k",
            ExportSize::Mobile => "mobile",
            ExportSize::Social => "social",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExportSize::Current => "Current canvas size",
            ExportSize::Hd => "HD (1920x1080)",
            ExportSize::Uhd => "4K (3840x2160)",
            ExportSize::Mobile => "Mobile (1080x1920)",
            ExportSize::Social => "Social (1200x630)",
        }
    }
}

impl fmt::Display for ExportSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExportSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim().to_ascii_lowercase();
        ExportSize::ALL
            .into_iter()
            .find(|p| p.name() == s || (s == "uhd" && *p == ExportSize::Uhd))
            .ok_or(Error::UnknownPreset(s))
    }
}

/// Download file name for an image of the given size.
pub fn file_name(width: u32, height: u32) -> String {
    format!("gradient-blob-{width}x{height}.png")
}

/// Encode a pixmap as an RGBA PNG.
pub fn encode_png(pm: &Pixmap) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    PngEncoder::new(&mut out).write_image(
        &pm.to_rgba8(),
        pm.width(),
        pm.height(),
        ExtendedColorType::Rgba8,
    )?;
    Ok(out)
}

pub fn save_png(pm: &Pixmap, path: impl AsRef<Path>) -> Result<()> {
    fs::write(path.as_ref(), encode_png(pm)?)?;
    Ok(())
}

/// Render `settings` at `size` and encode it. Returns the file name and the
/// PNG bytes.
pub fn export(
    settings: &Settings,
    size: ExportSize,
    current: (u32, u32),
) -> Result<(String, Vec<u8>)> {
    let (width, height) = size.dimensions(current);
    tracing::info!(preset = %size, width, height, "exporting png");
    let pm = render(settings, width, height)?;
    Ok((file_name(width, height), encode_png(&pm)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    /// Width and height from the IHDR chunk.
    fn png_size(bytes: &[u8]) -> (u32, u32) {
        let w = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
        let h = u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);
        (w, h)
    }

    #[test]
    fn test_preset_dimensions() {
        assert_eq!(ExportSize::Current.dimensions((800, 450)), (800, 450));
        assert_eq!(ExportSize::Hd.dimensions((1, 1)), (1920, 1080));
        assert_eq!(ExportSize::Uhd.dimensions((1, 1)), (3840, 2160));
        assert_eq!(ExportSize::Mobile.dimensions((1, 1)), (1080, 1920));
        assert_eq!(ExportSize::Social.dimensions((1, 1)), (1200, 630));
    }

    #[test]
    fn test_preset_parse() {
        for p in ExportSize::ALL {
            assert_eq!(p.name().parse::<ExportSize>().unwrap(), p);
        }
        assert_eq!("UHD".parse::<ExportSize>().unwrap(), ExportSize::Uhd);
        assert_eq!(" Mobile ".parse::<ExportSize>().unwrap(), ExportSize::Mobile);
        assert!(matches!("8k".parse::<ExportSize>(), Err(Error::UnknownPreset(_))));
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name(1920, 1080), "gradient-blob-1920x1080.png");
    }

    #[test]
    fn test_encode_png_header() {
        let mut pm = Pixmap::new(7, 3).unwrap();
        pm.fill(crate::color::Rgba8::new_opaque(1, 2, 3));
        let png = encode_png(&pm).unwrap();
        assert_eq!(png[..8], PNG_SIGNATURE);
        assert_eq!(png_size(&png), (7, 3));
    }

    #[test]
    fn test_export_current_size() {
        let (name, png) = export(&Settings::default(), ExportSize::Current, (64, 40)).unwrap();
        assert_eq!(name, "gradient-blob-64x40.png");
        assert_eq!(png[..8], PNG_SIGNATURE);
        assert_eq!(png_size(&png), (64, 40));
    }

    #[test]
    fn test_export_rejects_empty_current() {
        assert!(matches!(
            export(&Settings::default(), ExportSize::Current, (0, 0)),
            Err(Error::EmptyCanvas { .. })
        ));
    }

    #[test]
    fn test_save_png() {
        let dir = std::env::temp_dir().join(format!("gradient-blob-test-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(file_name(5, 5));
        let pm = Pixmap::new(5, 5).unwrap();
        save_png(&pm, &path).unwrap();
        let bytes = fs::read(&path).unwrap();
        assert_eq!(png_size(&bytes), (5, 5));
        fs::remove_dir_all(&dir).unwrap();
    }
}
