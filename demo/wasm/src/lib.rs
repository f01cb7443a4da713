//! Browser bindings for the background generator.
//!
//! The page keeps one `BlobCanvas`, forwards settings-panel edits to it and
//! copies `render` output into an `ImageData`. Downloads go through
//! `export_png` / `export_file_name`.

use gradient_blob::{export, file_name, render_rgba8, ExportSize, Settings};
use wasm_bindgen::prelude::*;

/// Settings holder plus render entry points.
#[wasm_bindgen]
pub struct BlobCanvas {
    settings: Settings,
}

impl Default for BlobCanvas {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl BlobCanvas {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            settings: Settings::default(),
        }
    }

    /// Build from a TOML settings document.
    pub fn from_toml(toml: &str) -> Result<BlobCanvas, JsError> {
        Ok(Self {
            settings: Settings::from_toml_str(toml)?,
        })
    }

    pub fn to_toml(&self) -> Result<String, JsError> {
        Ok(self.settings.to_toml()?)
    }

    // =========================================================================
    // Colors
    // =========================================================================

    /// Palette as an array of hex strings.
    pub fn colors(&self) -> js_sys::Array {
        self.settings
            .colors
            .iter()
            .map(|c| JsValue::from_str(c))
            .collect()
    }

    pub fn color_count(&self) -> usize {
        self.settings.colors.len()
    }

    pub fn set_color(&mut self, index: usize, hex: &str) -> Result<(), JsError> {
        Ok(self.settings.set_color(index, hex)?)
    }

    pub fn add_color(&mut self) {
        self.settings.add_color();
    }

    /// Returns false when `index` is the only color left or out of range.
    pub fn remove_color(&mut self, index: usize) -> bool {
        self.settings.remove_color(index)
    }

    #[wasm_bindgen(getter)]
    pub fn background(&self) -> String {
        self.settings.background.clone()
    }

    pub fn set_background(&mut self, hex: &str) -> Result<(), JsError> {
        Ok(self.settings.set_background(hex)?)
    }

    // =========================================================================
    // Sliders (values are clamped to their ranges)
    // =========================================================================

    #[wasm_bindgen(getter)]
    pub fn blob_count(&self) -> u32 {
        self.settings.blob_count
    }

    #[wasm_bindgen(setter)]
    pub fn set_blob_count(&mut self, n: u32) {
        self.settings.set_blob_count(n);
    }

    #[wasm_bindgen(getter)]
    pub fn size(&self) -> f64 {
        self.settings.size
    }

    #[wasm_bindgen(setter)]
    pub fn set_size(&mut self, size: f64) {
        self.settings.set_size(size);
    }

    #[wasm_bindgen(getter)]
    pub fn point_count(&self) -> u32 {
        self.settings.point_count
    }

    #[wasm_bindgen(setter)]
    pub fn set_point_count(&mut self, n: u32) {
        self.settings.set_point_count(n);
    }

    #[wasm_bindgen(getter)]
    pub fn blur(&self) -> f64 {
        self.settings.blur
    }

    #[wasm_bindgen(setter)]
    pub fn set_blur(&mut self, blur: f64) {
        self.settings.set_blur(blur);
    }

    #[wasm_bindgen(getter)]
    pub fn grain(&self) -> f64 {
        self.settings.grain
    }

    #[wasm_bindgen(setter)]
    pub fn set_grain(&mut self, grain: f64) {
        self.settings.set_grain(grain);
    }

    #[wasm_bindgen(getter)]
    pub fn seed(&self) -> u64 {
        self.settings.seed
    }

    /// Seeds above `i64::MAX` are rejected so settings stay TOML-encodable.
    pub fn set_seed(&mut self, seed: u64) -> Result<(), JsError> {
        Ok(self.settings.set_seed(seed)?)
    }

    pub fn randomize(&mut self) {
        self.settings.randomize();
    }

    // =========================================================================
    // Output
    // =========================================================================

    /// RGBA pixels, `width * height * 4` bytes.
    pub fn render(&self, width: u32, height: u32) -> Result<Vec<u8>, JsError> {
        Ok(render_rgba8(&self.settings, width, height)?)
    }

    /// PNG bytes for a preset (`current`, `hd`, `4k`, `mobile`, `social`).
    /// `width` and `height` give the current canvas size.
    pub fn export_png(&self, preset: &str, width: u32, height: u32) -> Result<Vec<u8>, JsError> {
        let size: ExportSize = preset.parse()?;
        let (_, png) = export(&self.settings, size, (width, height))?;
        Ok(png)
    }

    /// Download name matching `export_png` for the same arguments.
    pub fn export_file_name(
        &self,
        preset: &str,
        width: u32,
        height: u32,
    ) -> Result<String, JsError> {
        let size: ExportSize = preset.parse()?;
        let (w, h) = size.dimensions((width, height));
        Ok(file_name(w, h))
    }
}

/// One-shot render from a TOML settings document.
#[wasm_bindgen]
pub fn render_blobs(settings_toml: &str, width: u32, height: u32) -> Result<Vec<u8>, JsError> {
    let settings = Settings::from_toml_str(settings_toml)?;
    Ok(render_rgba8(&settings, width, height)?)
}

/// Get the library version string.
#[wasm_bindgen]
pub fn version() -> String {
    concat!("gradient-blob ", env!("CARGO_PKG_VERSION")).to_string()
}
