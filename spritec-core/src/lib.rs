//! spritec-core: a deterministic software renderer that draws one small sprite per call.
//!
//! The host owns a [`Renderer`] and asks it for frames:
//! - Each call to [`Renderer::render`] returns a [`PixelBuffer`] of exactly
//!   `width * height * 4` bytes, RGBA8, row-major, top-left origin.
//! - The picture is a pure function of the [`RenderConfig`] and the frame counter. With the
//!   default [`Animation::Static`] every frame is byte-identical.
//! - Invalid configuration is rejected once, at construction, as
//!   [`RenderError::Configuration`]. Rendering itself never fails.
//!
//! Frames can be upscaled ([`scale_buffer`]), packed into a [`Spritesheet`], or written out as
//! PNG/GIF through [`export`].

mod buffer;
mod camera;
mod config;
mod error;
pub mod export;
mod geometry;
mod light;
mod math;
pub mod meta;
mod renderer;
mod scale;
mod shaders;
mod sheet;

pub use crate::buffer::{BYTES_PER_PIXEL, PixelBuffer};
pub use crate::camera::{Camera, PresetCamera, Projection};
pub use crate::config::{Animation, Outline, RenderConfig, RenderConfigBuilder, Size};
pub use crate::error::{RenderError, RenderResult};
pub use crate::geometry::{Mesh, builtin_model};
pub use crate::light::{Light, LightType};
pub use crate::math::{Mat4, Radians, Rgb, Rgba, Vec3, Vec4, rgba_from_u8, rgba_to_u8};
pub use crate::renderer::Renderer;
pub use crate::scale::{scale_buffer, scale_buffer_into};
pub use crate::shaders::{CEL_BANDS, cel_band};
pub use crate::sheet::Spritesheet;
