//! Error types for spritec-core.
//!
//! Rendering itself cannot fail once a [`Renderer`](crate::Renderer) exists. Everything that
//! can go wrong is caught while validating the configuration, or while composing/encoding
//! frames after the fact.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors from configuration, buffer construction, and frame export.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The renderer was configured with a value it cannot render with.
    ///
    /// Fatal to construction. Retrying with the same configuration always fails.
    #[error("invalid configuration for `{field}`: {reason}")]
    Configuration {
        /// Configuration field that failed validation.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// Raw RGBA bytes did not match the declared dimensions.
    #[error("pixel buffer length mismatch: expected {expected} bytes, got {actual}")]
    InvalidBufferLength { expected: usize, actual: usize },

    /// Frames passed to a spritesheet do not all share the same dimensions.
    #[error("frame {index} is {actual_width}x{actual_height}, expected {width}x{height}")]
    MismatchedFrames {
        index: usize,
        width: u32,
        height: u32,
        actual_width: u32,
        actual_height: u32,
    },

    /// A spritesheet or animation needs at least one frame.
    #[error("no frames to compose")]
    EmptySheet,

    /// `columns` x `rows` cells of the frame size do not fit in one image.
    #[error("a {columns}x{rows} sheet of {frame_width}x{frame_height} frames is too large")]
    SheetTooLarge {
        frame_width: u32,
        frame_height: u32,
        columns: u32,
        rows: u32,
    },

    /// Upscaling would give dimensions beyond `u32` or a byte length beyond `usize`.
    #[error("scaling {width}x{height} by {factor} overflows")]
    ScaleOverflow { width: u32, height: u32, factor: u32 },

    /// GIF stores dimensions as 16-bit values.
    #[error("{width}x{height} frames are too large for GIF (max 65535x65535)")]
    FrameTooLarge { width: u32, height: u32 },

    #[error(transparent)]
    Png(#[from] png::EncodingError),

    #[error(transparent)]
    Gif(#[from] gif::EncodingError),
}

impl RenderError {
    pub(crate) fn config(field: &'static str, reason: impl Into<String>) -> Self {
        RenderError::Configuration {
            field,
            reason: reason.into(),
        }
    }

    /// True for [`RenderError::Configuration`].
    pub fn is_configuration(&self) -> bool {
        matches!(self, RenderError::Configuration { .. })
    }
}
