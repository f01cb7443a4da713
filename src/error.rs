//! Error type shared by the whole crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid color {0:?}: expected #rgb, #rrggbb or #rrggbbaa")]
    InvalidColor(String),

    #[error("{field} = {value} is outside {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("color palette is empty")]
    EmptyPalette,

    #[error("color index {index} out of bounds for a palette of {len}")]
    NoSuchColor { index: usize, len: usize },

    #[error("unknown export preset {0:?}: expected current, hd, 4k, mobile or social")]
    UnknownPreset(String),

    #[error("cannot render into a {width}x{height} canvas")]
    EmptyCanvas { width: u32, height: u32 },

    #[error("settings parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("settings serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("png encode error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;
