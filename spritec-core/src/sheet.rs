//! Packing several frames into a single spritesheet image.

use crate::buffer::PixelBuffer;
use crate::error::{RenderError, RenderResult};
use std::num::NonZeroU32;

/// A grid of equally sized frames laid out row-major from the top-left cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Spritesheet {
    image: PixelBuffer,
    frame_width: u32,
    frame_height: u32,
    columns: u32,
    frame_count: usize,
}

impl Spritesheet {
    /// Lay `frames` out `columns` wide. Cells past the last frame stay fully transparent.
    pub fn compose(frames: &[PixelBuffer], columns: NonZeroU32) -> RenderResult<Self> {
        let first = frames.first().ok_or(RenderError::EmptySheet)?;
        let (fw, fh) = (first.width(), first.height());
        if let Some((index, f)) = frames
            .iter()
            .enumerate()
            .find(|(_, f)| f.width() != fw || f.height() != fh)
        {
            return Err(RenderError::MismatchedFrames {
                index,
                width: fw,
                height: fh,
                actual_width: f.width(),
                actual_height: f.height(),
            });
        }

        let columns = columns.get().min(frames.len() as u32);
        let rows = (frames.len() as u32).div_ceil(columns);
        let too_large = || RenderError::SheetTooLarge {
            frame_width: fw,
            frame_height: fh,
            columns,
            rows,
        };
        let sheet_w = fw.checked_mul(columns).ok_or_else(too_large)?;
        let sheet_h = fh.checked_mul(rows).ok_or_else(too_large)?;
        (sheet_w as usize)
            .checked_mul(sheet_h as usize)
            .and_then(|n| n.checked_mul(crate::buffer::BYTES_PER_PIXEL))
            .ok_or_else(too_large)?;

        let mut image = PixelBuffer::new(sheet_w, sheet_h);
        let pitch = first.pitch();
        for (i, frame) in frames.iter().enumerate() {
            let col = i as u32 % columns;
            let row = i as u32 / columns;
            let x_off = col as usize * pitch;
            for y in 0..fh {
                let dst = image.row_mut(row * fh + y);
                dst[x_off..x_off + pitch].copy_from_slice(frame.row(y));
            }
        }

        log::debug!(
            "composed {} frame(s) of {fw}x{fh} into a {sheet_w}x{sheet_h} sheet",
            frames.len()
        );

        Ok(Self {
            image,
            frame_width: fw,
            frame_height: fh,
            columns,
            frame_count: frames.len(),
        })
    }

    pub fn image(&self) -> &PixelBuffer {
        &self.image
    }

    pub fn into_image(self) -> PixelBuffer {
        self.image
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Top-left pixel of cell `index`, or `None` past the last frame.
    pub fn frame_origin(&self, index: usize) -> Option<(u32, u32)> {
        if index >= self.frame_count {
            return None;
        }
        let i = index as u32;
        Some((
            (i % self.columns) * self.frame_width,
            (i / self.columns) * self.frame_height,
        ))
    }
}
