use clap::Parser;
use image::Rgba;
use photocard::{PipelineSession, RoundedMaskSpec};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "photocard")]
#[command(about = "Resize, tone-adjust, and card-ify a raster image")]
#[command(long_about = "\
Resize, tone-adjust, and card-ify a raster image

Stages run in a fixed order, each only when its flags are given:

  1. resize        --max-width/--max-height (aspect-preserving, never upscales;
                   applies EXIF orientation correction first)
  2. tone          --brightness/--contrast/--gamma (1.0 = no change)
  3. saturation    --saturation (1.0 = no change, 0 = grayscale, -1 = complement)
  4. round-corners --radius plus --back-color/--border-width/--border-color,
                   optional --shadow/--shadow-offset
  5. encode        by output extension: .png lossless, anything else JPEG
                   at --quality

Colors are hex RGB or RGBA, e.g. ffffff or 00000080.")]
#[command(version)]
struct Cli {
    /// Source image (JPEG, PNG, or TIFF)
    input: PathBuf,

    /// Output file; extension selects the format
    output: PathBuf,

    /// Bound the width, preserving aspect ratio
    #[arg(long)]
    max_width: Option<u32>,

    /// Bound the height, preserving aspect ratio
    #[arg(long)]
    max_height: Option<u32>,

    /// Brightness factor (1.0 = unchanged)
    #[arg(long)]
    brightness: Option<f32>,

    /// Contrast factor (1.0 = unchanged)
    #[arg(long)]
    contrast: Option<f32>,

    /// Gamma factor (1.0 = unchanged)
    #[arg(long)]
    gamma: Option<f32>,

    /// Saturation factor (1.0 = unchanged, 0 = grayscale, -1 = complement)
    #[arg(long)]
    saturation: Option<f32>,

    /// Corner radius in pixels; enables the rounded-corner stage
    #[arg(long)]
    radius: Option<i32>,

    /// Fill behind clipped corners and the shadow canvas
    #[arg(long, default_value = "ffffff", value_parser = parse_hex_color)]
    back_color: Rgba<u8>,

    /// Border stroke width (0 = no border)
    #[arg(long, default_value_t = 0)]
    border_width: u32,

    /// Border stroke color
    #[arg(long, default_value = "000000", value_parser = parse_hex_color)]
    border_color: Rgba<u8>,

    /// Render a drop shadow (grows the canvas by the offset)
    #[arg(long)]
    shadow: bool,

    /// Shadow displacement in pixels
    #[arg(long, default_value_t = 15)]
    shadow_offset: u32,

    /// JPEG quality, 1-100
    #[arg(long, default_value_t = photocard::DEFAULT_JPEG_QUALITY)]
    quality: u8,
}

/// Parse `rrggbb` or `rrggbbaa` hex into an RGBA color.
fn parse_hex_color(s: &str) -> Result<Rgba<u8>, String> {
    let s = s.strip_prefix('#').unwrap_or(s);
    if !s.is_ascii() {
        return Err(format!("invalid hex color {s:?}"));
    }
    let parse = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&s[range], 16).map_err(|e| format!("invalid hex color {s:?}: {e}"))
    };
    match s.len() {
        6 => Ok(Rgba([parse(0..2)?, parse(2..4)?, parse(4..6)?, 255])),
        8 => Ok(Rgba([
            parse(0..2)?,
            parse(2..4)?,
            parse(4..6)?,
            parse(6..8)?,
        ])),
        _ => Err(format!(
            "invalid hex color {s:?}: expected 6 or 8 hex digits"
        )),
    }
}

fn is_png(path: &std::path::Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut session = PipelineSession::load(&cli.input)?;

    if cli.max_width.is_some() || cli.max_height.is_some() {
        let max_w = cli.max_width.unwrap_or(u32::MAX);
        let max_h = cli.max_height.unwrap_or(u32::MAX);
        session.resize(max_w, max_h);
    }

    if cli.brightness.is_some() || cli.contrast.is_some() || cli.gamma.is_some() {
        session.adjust_bcg(
            cli.brightness.unwrap_or(1.0),
            cli.contrast.unwrap_or(1.0),
            cli.gamma.unwrap_or(1.0),
        );
    }

    if let Some(saturation) = cli.saturation {
        session.adjust_saturation(saturation);
    }

    if let Some(radius) = cli.radius {
        session.round_corners(&RoundedMaskSpec {
            radius,
            back_color: cli.back_color,
            border_width: cli.border_width,
            border_color: cli.border_color,
            shadow: cli.shadow,
            shadow_offset: cli.shadow_offset,
        });
    }

    if is_png(&cli.output) {
        session.save_as_png(&cli.output)?;
    } else {
        session.save_as_jpeg(&cli.output, cli.quality)?;
    }

    let (width, height) = session.dimensions();
    println!("{} {}x{}", cli.output.display(), width, height);
    Ok(())
}
