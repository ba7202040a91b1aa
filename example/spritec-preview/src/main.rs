//! Renders the stock sprite and writes it to disk so it can be looked at.
//!
//! Usage: `spritec-preview [OUT_DIR] [FRAMES]`
//!
//! Writes `frame.png` (one still, upscaled), `sheet.png` (a turntable spritesheet) and
//! `turntable.gif` (the same turntable, upscaled and looping). Set `RUST_LOG=debug` for
//! renderer logs.

use anyhow::{Context, Result, bail};
use spritec_core::{Animation, RenderConfig, Renderer, Spritesheet, export, meta};
use std::num::NonZeroU32;
use std::path::PathBuf;

/// Pixel upscale for the still and the GIF, matching the old 8x preview window.
const PREVIEW_SCALE: u32 = 8;
const DEFAULT_FRAMES: u32 = 8;
/// Hundredths of a second per GIF frame.
const GIF_DELAY: u16 = 12;

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| "spritec-preview".to_string()));
    let frames = match args.next() {
        Some(raw) => raw
            .parse::<u32>()
            .with_context(|| format!("FRAMES must be a positive integer, got {raw:?}"))?,
        None => DEFAULT_FRAMES,
    };
    if frames == 0 {
        bail!("FRAMES must be at least 1");
    }

    println!("[spritec] spritec-core {}", meta::version());
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let still = RenderConfig::builder().scale(PREVIEW_SCALE).build()?;
    let mut renderer = Renderer::new(still)?;
    let frame = renderer.render();
    let path = out_dir.join("frame.png");
    export::write_png(&frame, &path)?;
    println!(
        "[spritec] {}x{} still -> {}",
        frame.width(),
        frame.height(),
        path.display()
    );

    let spin = RenderConfig::builder()
        .animation(Animation::Turntable { frames })
        .build()?;
    let mut renderer = Renderer::new(spin)?;
    let mut sprites = Vec::with_capacity(frames as usize);
    for _ in 0..frames {
        sprites.push(renderer.render());
    }
    log::debug!("rendered {} turntable frames", sprites.len());

    let columns = NonZeroU32::new(frames.min(DEFAULT_FRAMES)).unwrap_or(NonZeroU32::MIN);
    let sheet = Spritesheet::compose(&sprites, columns)?;
    let path = out_dir.join("sheet.png");
    export::write_png(sheet.image(), &path)?;
    println!(
        "[spritec] {}-frame sheet ({} columns) -> {}",
        sheet.frame_count(),
        sheet.columns(),
        path.display()
    );

    let scale = NonZeroU32::new(PREVIEW_SCALE).unwrap_or(NonZeroU32::MIN);
    let upscaled: Vec<_> = sprites
        .iter()
        .map(|s| spritec_core::scale_buffer(s, scale))
        .collect::<Result<_, _>>()?;
    let path = out_dir.join("turntable.gif");
    export::write_gif(&upscaled, GIF_DELAY, &path)?;
    println!("[spritec] turntable -> {}", path.display());

    Ok(())
}
