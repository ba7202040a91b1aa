//! Encoding rendered frames for use outside the process.
//!
//! - PNG: one frame (or a whole spritesheet), RGBA8, no gamma chunk.
//! - GIF: an animation, one GIF frame per rendered frame, looping forever. Pixels with alpha 0
//!   become the GIF transparent index; other alpha values are treated as opaque because GIF
//!   has no partial transparency.

use crate::buffer::PixelBuffer;
use crate::error::{RenderError, RenderResult};
use anyhow::Context;
use std::path::Path;

/// Encode a frame as an RGBA8 PNG.
pub fn encode_png(frame: &PixelBuffer) -> RenderResult<Vec<u8>> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, frame.width(), frame.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(frame.as_bytes())?;
        writer.finish()?;
    }
    Ok(out)
}

/// Encode `frames` as a looping GIF with `delay_centis` hundredths of a second per frame.
pub fn encode_gif(frames: &[PixelBuffer], delay_centis: u16) -> RenderResult<Vec<u8>> {
    let first = frames.first().ok_or(RenderError::EmptySheet)?;
    let (w, h) = gif_dimensions(first)?;

    let mut out = Vec::new();
    {
        let mut encoder = gif::Encoder::new(&mut out, w, h, &[])?;
        encoder.set_repeat(gif::Repeat::Infinite)?;
        for (index, frame) in frames.iter().enumerate() {
            if frame.width() != first.width() || frame.height() != first.height() {
                return Err(RenderError::MismatchedFrames {
                    index,
                    width: first.width(),
                    height: first.height(),
                    actual_width: frame.width(),
                    actual_height: frame.height(),
                });
            }
            // The quantizer wants a mutable copy; it rewrites pixels in place.
            let mut rgba = frame.as_bytes().to_vec();
            let mut gif_frame = gif::Frame::from_rgba_speed(w, h, &mut rgba, 10);
            gif_frame.delay = delay_centis;
            gif_frame.dispose = gif::DisposalMethod::Background;
            encoder.write_frame(&gif_frame)?;
        }
    }
    Ok(out)
}

/// Write a frame to `path` as PNG.
pub fn write_png(frame: &PixelBuffer, path: impl AsRef<Path>) -> anyhow::Result<()> {
    let path = path.as_ref();
    let bytes = encode_png(frame).context("encoding PNG")?;
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
    log::debug!("wrote {}x{} PNG to {}", frame.width(), frame.height(), path.display());
    Ok(())
}

/// Write an animation to `path` as GIF.
pub fn write_gif(
    frames: &[PixelBuffer],
    delay_centis: u16,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let path = path.as_ref();
    let bytes = encode_gif(frames, delay_centis).context("encoding GIF")?;
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
    log::debug!("wrote {}-frame GIF to {}", frames.len(), path.display());
    Ok(())
}

fn gif_dimensions(frame: &PixelBuffer) -> RenderResult<(u16, u16)> {
    match (u16::try_from(frame.width()), u16::try_from(frame.height())) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        _ => Err(RenderError::FrameTooLarge {
            width: frame.width(),
            height: frame.height(),
        }),
    }
}
