//! Pixel storage.
//!
//! [`PixelBuffer`] is what callers receive: tightly packed RGBA8, row-major, top-left origin,
//! no row padding (pitch == width * 4).

use crate::error::{RenderError, RenderResult};

/// Bytes per RGBA8 pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// An owned RGBA8 frame.
///
/// The byte length is always exactly `width * height * 4`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Allocate a fully transparent buffer.
    pub(crate) fn new(width: u32, height: u32) -> Self {
        let len = byte_len(width, height);
        Self {
            width,
            height,
            data: vec![0u8; len],
        }
    }

    /// Wrap existing RGBA8 bytes, checking that the length matches the dimensions.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> RenderResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
            .ok_or_else(|| RenderError::config("size", "pixel count overflows usize"))?;
        if data.len() != expected {
            return Err(RenderError::InvalidBufferLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per row.
    pub fn pitch(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// RGBA of the pixel at (x, y), or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = self.index(x, y);
        let p = &self.data[idx..idx + BYTES_PER_PIXEL];
        Some([p[0], p[1], p[2], p[3]])
    }

    /// Iterate pixels in row-major order.
    pub fn pixels(&self) -> impl ExactSizeIterator<Item = [u8; 4]> + '_ {
        self.data
            .chunks_exact(BYTES_PER_PIXEL)
            .map(|p| [p[0], p[1], p[2], p[3]])
    }

    pub(crate) fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let idx = self.index(x, y);
        self.data[idx..idx + BYTES_PER_PIXEL].copy_from_slice(&rgba);
    }

    pub(crate) fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let start = y as usize * self.pitch();
        let end = start + self.pitch();
        &mut self.data[start..end]
    }

    pub(crate) fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.pitch();
        &self.data[start..start + self.pitch()]
    }

    pub(crate) fn copy_row(&mut self, from: u32, to: u32) {
        let pitch = self.pitch();
        let start = from as usize * pitch;
        self.data.copy_within(start..start + pitch, to as usize * pitch);
    }

    /// Resize to new dimensions, reusing the allocation when possible.
    ///
    /// Contents are unspecified afterwards; callers overwrite every byte.
    pub(crate) fn reshape(&mut self, width: u32, height: u32) {
        if self.width != width || self.height != height {
            self.width = width;
            self.height = height;
            self.data.resize(byte_len(width, height), 0);
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL
    }
}

impl AsRef<[u8]> for PixelBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

/// Dimensions are validated before any buffer is created, so this cannot overflow here.
fn byte_len(width: u32, height: u32) -> usize {
    (width as usize) * (height as usize) * BYTES_PER_PIXEL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rgba_rejects_short_data() {
        let err = PixelBuffer::from_rgba(2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(
            err,
            RenderError::InvalidBufferLength {
                expected: 16,
                actual: 15
            }
        ));
    }

    #[test]
    fn pixel_reads_are_row_major_from_top_left() {
        let mut data = vec![0u8; 3 * 2 * 4];
        // (x=2, y=1) is the last pixel.
        data[20..24].copy_from_slice(&[1, 2, 3, 4]);
        let buf = PixelBuffer::from_rgba(3, 2, data).unwrap();
        assert_eq!(buf.pixel(2, 1), Some([1, 2, 3, 4]));
        assert_eq!(buf.pixel(3, 0), None);
        assert_eq!(buf.pixels().len(), 6);
        assert_eq!(buf.pitch(), 12);
    }

    #[test]
    fn reshape_keeps_length_invariant() {
        let mut buf = PixelBuffer::new(4, 4);
        buf.reshape(2, 3);
        assert_eq!(buf.as_bytes().len(), 2 * 3 * 4);
        buf.reshape(5, 5);
        assert_eq!(buf.as_bytes().len(), 5 * 5 * 4);
    }
}
