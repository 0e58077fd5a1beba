//! Headless caret snapshots
//!
//! Renders one frame of the caret layer to a PNG without opening a window.
//!
//! Usage:
//!   cargo run --bin snapshot -- --caret 40,12,2,18 --out caret.png
//!   cargo run --bin snapshot -- --preedit "にほん" --scale 2 --out preedit.png
//!   cargo run --bin snapshot -- --overstrike --caret 40,12,9,18 --phase off

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};

use caret::config::CaretConfig;
use caret::geometry::{Rect, ScrollOffset};
use caret::text::{FontBook, TextStyle};
use caret::theme::{load_theme, Theme};
use caret::timer::BlinkTimerConfig;
use caret::update::update;
use caret::view::{rasterize, Frame, GlyphCache};
use caret::{CaretModel, CaretMsg};

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Phase {
    /// First half of the blink period
    On,
    /// After one blink tick
    Off,
}

#[derive(Parser, Debug)]
#[command(name = "snapshot", about = "Render a caret frame to PNG")]
struct Args {
    /// Caret rectangle in content coordinates: x,y,width,height
    #[arg(long, default_value = "40,12,2,18", value_parser = parse_rect)]
    caret: Rect,
    /// Scroll offset: horizontal,vertical
    #[arg(long, default_value = "0,0", value_parser = parse_scroll)]
    scroll: ScrollOffset,
    /// Display scale factor
    #[arg(long, default_value_t = 1.0)]
    scale: f64,
    /// Blink phase to capture
    #[arg(long, value_enum, default_value_t = Phase::On)]
    phase: Phase,
    /// IME composition text shown in the pre-edit bubble
    #[arg(long)]
    preedit: Option<String>,
    /// Draw the translucent overstrike caret
    #[arg(long)]
    overstrike: bool,
    /// Theme id (builtin or ~/.config/caret/themes/{id}.yaml)
    #[arg(long)]
    theme: Option<String>,
    /// Font file for the pre-edit text
    #[arg(long)]
    font: Option<PathBuf>,
    /// Output PNG path
    #[arg(long, default_value = "snapshot.png")]
    out: PathBuf,
    /// Width in logical pixels
    #[arg(long, default_value_t = 240)]
    width: u32,
    /// Height in logical pixels
    #[arg(long, default_value_t = 48)]
    height: u32,
}

fn parse_floats<const N: usize>(s: &str) -> Result<[f32; N], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != N {
        return Err(format!("expected {} comma-separated numbers, got '{}'", N, s));
    }
    let mut out = [0.0; N];
    for (slot, part) in out.iter_mut().zip(parts) {
        *slot = part
            .parse()
            .map_err(|e| format!("invalid number '{}': {}", part, e))?;
    }
    Ok(out)
}

fn parse_rect(s: &str) -> Result<Rect, String> {
    let [x, y, width, height] = parse_floats::<4>(s)?;
    Ok(Rect::new(x, y, width, height))
}

fn parse_scroll(s: &str) -> Result<ScrollOffset, String> {
    let [horizontal, vertical] = parse_floats::<2>(s)?;
    Ok(ScrollOffset::new(horizontal, vertical))
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn build_model(args: &Args, theme: &Theme, config: &CaretConfig) -> CaretModel {
    let style = TextStyle {
        size: config.font_size,
        ..TextStyle::default()
    };
    // The off phase only exists while blinking, whatever the user config says
    let blink = match args.phase {
        Phase::Off if !config.blink_timer_config().blinks() => BlinkTimerConfig::default(),
        _ => config.blink_timer_config(),
    };
    let mut model = CaretModel::new(theme, style, blink);

    let setup = [
        CaretMsg::SetScaleFactor(args.scale),
        CaretMsg::ScrollTo(args.scroll),
        CaretMsg::SetOverstrike(args.overstrike),
        CaretMsg::SetPreedit(args.preedit.clone().unwrap_or_default()),
    ];
    for msg in setup {
        update(&mut model, msg);
    }

    model.caret.show_at(args.caret, Instant::now());
    if args.phase == Phase::Off {
        update(&mut model, CaretMsg::BlinkTick);
    }
    model
}

fn save_png(buffer: &[u32], width: u32, height: u32, path: &Path) -> Result<()> {
    // ARGB (0xAARRGGBB) to RGBA bytes
    let mut rgba = Vec::with_capacity((width * height * 4) as usize);
    for &pixel in buffer {
        rgba.push(((pixel >> 16) & 0xFF) as u8);
        rgba.push(((pixel >> 8) & 0xFF) as u8);
        rgba.push((pixel & 0xFF) as u8);
        rgba.push(((pixel >> 24) & 0xFF) as u8);
    }

    let img = image::ImageBuffer::<image::Rgba<u8>, Vec<u8>>::from_raw(width, height, rgba)
        .context("failed to create image buffer")?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }

    img.save(path)
        .with_context(|| format!("saving PNG to {}", path.display()))?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    if args.scale <= 0.0 {
        bail!("--scale must be positive, got {}", args.scale);
    }

    let mut config = CaretConfig::load();
    if let Some(theme) = &args.theme {
        config.theme = theme.clone();
    }
    if let Some(font) = &args.font {
        config.font_path = Some(font.clone());
    }

    let theme = load_theme(&config.theme).map_err(anyhow::Error::msg)?;

    let mut fonts = FontBook::new();
    let candidates = config.font_candidates();
    match fonts.load_first(candidates.iter().map(PathBuf::as_path)) {
        Ok(path) => eprintln!("Using font {}", path.display()),
        Err(e) if args.preedit.is_some() => {
            eprintln!("Warning: {:#}; pre-edit text will not be drawn", e)
        }
        Err(_) => {}
    }

    let model = build_model(&args, &theme, &config);
    let scene = model.render(&fonts);

    let width = ((args.width as f64) * args.scale).round().max(1.0) as u32;
    let height = ((args.height as f64) * args.scale).round().max(1.0) as u32;
    let mut buffer = vec![0u32; (width as usize) * (height as usize)];
    let mut frame = Frame::new(&mut buffer, width as usize, height as usize);
    frame.clear(theme.editor.background);

    let mut glyph_cache = GlyphCache::new();
    rasterize(
        &scene,
        &mut frame,
        args.scale as f32,
        &fonts,
        &mut glyph_cache,
    );

    save_png(&buffer, width, height, &args.out)?;
    eprintln!(
        "Rendered {} command(s) at {}x{} → {}",
        scene.len(),
        width,
        height,
        args.out.display()
    );
    Ok(())
}
