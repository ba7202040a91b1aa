//! Render configuration.
//!
//! A [`RenderConfig`] is fixed for the lifetime of a [`Renderer`](crate::Renderer). The
//! defaults reproduce the stock sprite job: 64x64, no upscaling, transparent background,
//! three-quarter camera at (8, 8, 8), no outline.

use crate::camera::Camera;
use crate::error::{RenderError, RenderResult};
use crate::light::Light;
use crate::math::{Rgba, rgba_is_finite};
use std::num::NonZeroU32;

/// Sprite dimensions in pixels, before scaling.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Size {
    pub width: NonZeroU32,
    pub height: NonZeroU32,
}

impl Size {
    /// Fails with [`RenderError::Configuration`] if either dimension is zero.
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        let width = NonZeroU32::new(width)
            .ok_or_else(|| RenderError::config("width", "must be greater than zero"))?;
        let height = NonZeroU32::new(height)
            .ok_or_else(|| RenderError::config("height", "must be greater than zero"))?;
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width.get()
    }

    pub fn height(&self) -> u32 {
        self.height.get()
    }

    /// Width over height.
    pub fn aspect(&self) -> f32 {
        self.width() as f32 / self.height() as f32
    }
}

const DEFAULT_EDGE: NonZeroU32 = NonZeroU32::new(64).unwrap();

impl Default for Size {
    fn default() -> Self {
        Self {
            width: DEFAULT_EDGE,
            height: DEFAULT_EDGE,
        }
    }
}

/// How the frame counter affects the picture.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum Animation {
    /// Every frame is identical.
    #[default]
    Static,
    /// The model makes one full turn about +Y every `frames` frames.
    Turntable { frames: u32 },
}

impl Animation {
    /// Number of distinct frames before the sequence repeats.
    pub fn period(&self) -> u32 {
        match *self {
            Animation::Static => 1,
            Animation::Turntable { frames } => frames,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Outline {
    /// Offset in model units. Zero disables the outline pass.
    pub thickness: f32,
    pub color: Rgba,
}

impl Default for Outline {
    fn default() -> Self {
        Self {
            thickness: 0.0,
            color: Rgba::black(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    pub size: Size,
    /// Integer nearest-neighbour upscale applied to the finished frame.
    pub scale: NonZeroU32,
    pub background: Rgba,
    pub camera: Camera,
    /// Lights in world space. When empty, a single white light shines along the view direction.
    pub lights: Vec<Light>,
    pub ambient_intensity: f32,
    pub outline: Outline,
    pub animation: Animation,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            size: Size::default(),
            scale: NonZeroU32::MIN,
            background: Rgba::zero(),
            camera: Camera::default(),
            lights: Vec::new(),
            ambient_intensity: 0.5,
            outline: Outline::default(),
            animation: Animation::Static,
        }
    }
}

impl RenderConfig {
    pub fn builder() -> RenderConfigBuilder {
        RenderConfigBuilder::new()
    }

    /// Output dimensions after scaling.
    pub fn output_size(&self) -> (u32, u32) {
        let s = self.scale.get();
        (
            self.size.width().saturating_mul(s),
            self.size.height().saturating_mul(s),
        )
    }

    /// Check every field. Called by [`Renderer::new`](crate::Renderer::new).
    pub fn validate(&self) -> RenderResult<()> {
        let scale = self.scale.get();
        let out_w = self
            .size
            .width()
            .checked_mul(scale)
            .ok_or_else(|| RenderError::config("scale", "scaled width overflows u32"))?;
        let out_h = self
            .size
            .height()
            .checked_mul(scale)
            .ok_or_else(|| RenderError::config("scale", "scaled height overflows u32"))?;
        (out_w as usize)
            .checked_mul(out_h as usize)
            .and_then(|n| n.checked_mul(crate::buffer::BYTES_PER_PIXEL))
            .ok_or_else(|| RenderError::config("size", "frame byte length overflows usize"))?;

        if !rgba_is_finite(self.background) {
            return Err(RenderError::config("background", "channels must be finite"));
        }
        self.camera.validate()?;
        for (i, light) in self.lights.iter().enumerate() {
            light.validate(i)?;
        }
        if !(self.ambient_intensity.is_finite() && self.ambient_intensity >= 0.0) {
            return Err(RenderError::config(
                "ambient_intensity",
                "must be finite and non-negative",
            ));
        }
        if !(self.outline.thickness.is_finite() && self.outline.thickness >= 0.0) {
            return Err(RenderError::config(
                "outline.thickness",
                "must be finite and non-negative",
            ));
        }
        if !rgba_is_finite(self.outline.color) {
            return Err(RenderError::config("outline.color", "channels must be finite"));
        }
        if self.animation.period() == 0 {
            return Err(RenderError::config(
                "animation.frames",
                "a turntable needs at least one frame",
            ));
        }
        Ok(())
    }
}

/// Consuming builder for [`RenderConfig`].
///
/// Plain integers are accepted here and checked in [`build`](Self::build), so a zero width
/// surfaces as a [`RenderError::Configuration`] rather than a panic.
#[derive(Debug, Default)]
pub struct RenderConfigBuilder {
    config: RenderConfig,
    width: Option<u32>,
    height: Option<u32>,
    scale: Option<u32>,
}

impl RenderConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn scale(mut self, scale: u32) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn background(mut self, background: Rgba) -> Self {
        self.config.background = background;
        self
    }

    pub fn camera(mut self, camera: impl Into<Camera>) -> Self {
        self.config.camera = camera.into();
        self
    }

    pub fn light(mut self, light: Light) -> Self {
        self.config.lights.push(light);
        self
    }

    pub fn ambient_intensity(mut self, ambient: f32) -> Self {
        self.config.ambient_intensity = ambient;
        self
    }

    pub fn outline(mut self, thickness: f32, color: Rgba) -> Self {
        self.config.outline = Outline { thickness, color };
        self
    }

    pub fn animation(mut self, animation: Animation) -> Self {
        self.config.animation = animation;
        self
    }

    pub fn build(mut self) -> RenderResult<RenderConfig> {
        if self.width.is_some() || self.height.is_some() {
            let d = Size::default();
            self.config.size = Size::new(
                self.width.unwrap_or(d.width()),
                self.height.unwrap_or(d.height()),
            )?;
        }
        if let Some(scale) = self.scale {
            self.config.scale = NonZeroU32::new(scale)
                .ok_or_else(|| RenderError::config("scale", "must be greater than zero"))?;
        }
        self.config.validate()?;
        Ok(self.config)
    }
}
