//! blob-export: render gradient-blob backgrounds to PNG files.
//!
//! Usage:
//!   blob-export render [--config settings.toml] [--preset 4k] [--seed 7] [-o out.png]
//!   blob-export presets
//!   blob-export defaults > settings.toml
//!
//! Flags given to `render` override values read from `--config`.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use gradient_blob::{encode_png, file_name, render, ExportSize, Settings};

#[derive(Parser, Debug)]
#[command(name = "blob-export")]
#[command(about = "Render soft gradient-blob backgrounds to PNG")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one image
    Render(RenderArgs),
    /// List the export size presets
    Presets,
    /// Print the default settings as TOML
    Defaults,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Settings file (TOML); missing keys use defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Size preset: hd, 4k, mobile or social
    #[arg(short, long, conflicts_with_all = ["width", "height"])]
    preset: Option<ExportSize>,

    /// Image width in pixels
    #[arg(long, requires = "height")]
    width: Option<u32>,

    /// Image height in pixels
    #[arg(long, requires = "width")]
    height: Option<u32>,

    #[arg(long)]
    seed: Option<u64>,

    /// Comma-separated hex colors, e.g. "#ff7e5f,#feb47b"
    #[arg(long, value_delimiter = ',')]
    colors: Option<Vec<String>>,

    #[arg(long)]
    background: Option<String>,

    #[arg(long)]
    blob_count: Option<u32>,

    /// Blob size as a fraction of the smaller image side
    #[arg(long)]
    size: Option<f64>,

    #[arg(long)]
    point_count: Option<u32>,

    /// Blur radius in pixels
    #[arg(long)]
    blur: Option<f64>,

    #[arg(long)]
    grain: Option<f64>,

    /// Output path; defaults to gradient-blob-WxH.png
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Canvas size when neither a preset nor explicit dimensions are given.
const DEFAULT_SIZE: ExportSize = ExportSize::Hd;

impl RenderArgs {
    fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)
                .with_context(|| format!("Failed to load settings from {}", path.display()))?,
            None => Settings::default(),
        };

        if let Some(seed) = self.seed {
            settings.seed = seed;
        }
        if let Some(colors) = &self.colors {
            settings.colors = colors.iter().map(|c| c.trim().to_string()).collect();
        }
        if let Some(background) = &self.background {
            settings.background = background.clone();
        }
        if let Some(n) = self.blob_count {
            settings.blob_count = n;
        }
        if let Some(size) = self.size {
            settings.size = size;
        }
        if let Some(n) = self.point_count {
            settings.point_count = n;
        }
        if let Some(blur) = self.blur {
            settings.blur = blur;
        }
        if let Some(grain) = self.grain {
            settings.grain = grain;
        }

        settings.validate().context("Invalid settings")?;
        Ok(settings)
    }

    fn dimensions(&self) -> Result<(u32, u32)> {
        let (w, h) = match (self.preset, self.width, self.height) {
            (Some(ExportSize::Current), ..) => {
                bail!("the `current` preset needs --width and --height instead")
            }
            (Some(preset), ..) => preset.dimensions((0, 0)),
            (None, Some(w), Some(h)) => (w, h),
            _ => DEFAULT_SIZE.dimensions((0, 0)),
        };
        if w == 0 || h == 0 {
            bail!("image size must be non-zero, got {w}x{h}");
        }
        Ok((w, h))
    }
}

fn cmd_render(args: &RenderArgs) -> Result<()> {
    let settings = args.settings()?;
    let (width, height) = args.dimensions()?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(file_name(width, height)));

    tracing::info!(width, height, seed = settings.seed, "Rendering");
    let pixmap = render(&settings, width, height).context("Render failed")?;
    let png = encode_png(&pixmap).context("PNG encoding failed")?;
    std::fs::write(&output, png)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    tracing::info!("Wrote {}", output.display());
    Ok(())
}

fn cmd_presets() {
    for preset in ExportSize::ALL {
        match preset {
            ExportSize::Current => println!("{:<8} {}", preset.name(), preset.label()),
            _ => {
                let (w, h) = preset.dimensions((0, 0));
                println!("{:<8} {:>4}x{:<4}  {}", preset.name(), w, h, preset.label());
            }
        }
    }
}

fn cmd_defaults() -> Result<()> {
    print!("{}", Settings::default().to_toml()?);
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Command::Render(args) => cmd_render(args),
        Command::Presets => {
            cmd_presets();
            Ok(())
        }
        Command::Defaults => cmd_defaults(),
    }
}
