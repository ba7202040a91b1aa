use crate::buffer::{BYTES_PER_PIXEL, PixelBuffer};
use crate::error::{RenderError, RenderResult};
use std::num::NonZeroU32;

/// Nearest-neighbour upscale: every source pixel becomes a `factor` x `factor` block.
///
/// Fails with [`RenderError::ScaleOverflow`] if the scaled size overflows `u32` or its byte
/// length overflows `usize`.
pub fn scale_buffer(src: &PixelBuffer, factor: NonZeroU32) -> RenderResult<PixelBuffer> {
    let mut dst = PixelBuffer::new(0, 0);
    scale_buffer_into(src, factor, &mut dst)?;
    Ok(dst)
}

/// As [`scale_buffer`], writing into `dst` and reusing its allocation.
///
/// `dst` is left untouched on error.
pub fn scale_buffer_into(
    src: &PixelBuffer,
    factor: NonZeroU32,
    dst: &mut PixelBuffer,
) -> RenderResult<()> {
    let k = factor.get();
    let (width, height) = scaled_size(src, k)?;
    dst.reshape(width, height);

    if k == 1 {
        for y in 0..src.height() {
            dst.row_mut(y).copy_from_slice(src.row(y));
        }
        return Ok(());
    }

    let k = k as usize;
    for sy in 0..src.height() {
        let src_row = src.row(sy);
        // Build the first output row of the block, then copy it down k - 1 times.
        let first = sy * factor.get();
        {
            let dst_row = dst.row_mut(first);
            for (sx, px) in src_row.chunks_exact(BYTES_PER_PIXEL).enumerate() {
                let start = sx * k * BYTES_PER_PIXEL;
                let span = &mut dst_row[start..start + k * BYTES_PER_PIXEL];
                for block in span.chunks_exact_mut(BYTES_PER_PIXEL) {
                    block.copy_from_slice(px);
                }
            }
        }
        for dy in 1..factor.get() {
            dst.copy_row(first, first + dy);
        }
    }
    Ok(())
}

fn scaled_size(src: &PixelBuffer, k: u32) -> RenderResult<(u32, u32)> {
    let overflow = || RenderError::ScaleOverflow {
        width: src.width(),
        height: src.height(),
        factor: k,
    };
    let width = src.width().checked_mul(k).ok_or_else(overflow)?;
    let height = src.height().checked_mul(k).ok_or_else(overflow)?;
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
        .ok_or_else(overflow)?;
    Ok((width, height))
}
