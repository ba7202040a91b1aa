use crate::buffer::PixelBuffer;
use crate::config::{Animation, RenderConfig, Size};
use crate::error::RenderResult;
use crate::geometry::{Mesh, builtin_model};
use crate::light::Light;
use crate::math::{Mat4, Rgba, rgba_to_u8};
use crate::scale::scale_buffer_into;
use crate::shaders::{CelShader, OutlineShader};
use euc::{Pipeline, Target, buffer::Buffer2d, rasterizer};
use std::f32::consts::TAU;

/// Cleared depth; NDC depth never exceeds it.
const FAR_DEPTH: f32 = 1.0;

/// Float color and depth targets at sprite resolution, plus the unscaled RGBA8 frame.
struct Targets {
    color: Buffer2d<Rgba>,
    depth: Buffer2d<f32>,
    base: PixelBuffer,
}

impl Targets {
    fn new(size: Size) -> Self {
        let dims = [size.width() as usize, size.height() as usize];
        Self {
            color: Buffer2d::new(dims, Rgba::zero()),
            depth: Buffer2d::new(dims, FAR_DEPTH),
            base: PixelBuffer::new(size.width(), size.height()),
        }
    }
}

/// Everything that stays fixed between frames.
struct Scene {
    config: RenderConfig,
    meshes: Vec<Mesh>,
    /// Lights actually used for shading: the configured ones, or a headlight.
    lights: Vec<Light>,
    view_projection: Mat4,
}

impl Scene {
    fn model_matrix(&self, frame: u64) -> Mat4 {
        match self.config.animation {
            Animation::Static => Mat4::identity(),
            Animation::Turntable { frames } => {
                let index = frame % u64::from(frames);
                let turn = index as f32 / frames as f32;
                Mat4::rotation_y(TAU * turn)
            }
        }
    }

    fn draw(&self, frame: u64, targets: &mut Targets, out: &mut PixelBuffer) -> RenderResult<()> {
        log::trace!("drawing frame {frame}");
        let Targets { color, depth, base } = targets;
        color.clear(self.config.background);
        depth.clear(FAR_DEPTH);

        let model = self.model_matrix(frame);
        let mvp = self.view_projection * model;
        let model_inverse_transpose = model.inverted().transposed();

        let outline = self.config.outline;
        if outline.thickness > 0.0 {
            for mesh in &self.meshes {
                OutlineShader {
                    mvp,
                    mesh,
                    outline_color: outline.color,
                    outline_thickness: outline.thickness,
                }
                .draw::<rasterizer::Triangles<_>, _>(mesh.indices(), color, depth);
            }
        }

        for mesh in &self.meshes {
            CelShader {
                mvp,
                model,
                model_inverse_transpose,
                mesh,
                lights: &self.lights,
                ambient_intensity: self.config.ambient_intensity,
            }
            .draw::<rasterizer::Triangles<_>, _>(mesh.indices(), color, depth);
        }

        let width = base.width() as usize;
        for (i, &c) in color.as_ref().iter().enumerate() {
            base.set_pixel((i % width) as u32, (i / width) as u32, rgba_to_u8(c));
        }
        scale_buffer_into(base, self.config.scale, out)
    }

    /// [`draw`](Self::draw) for a validated config, whose scaled size always fits.
    fn present(&self, frame: u64, targets: &mut Targets, out: &mut PixelBuffer) {
        if let Err(err) = self.draw(frame, targets, out) {
            log::error!("frame {frame} could not be scaled: {err}");
        }
    }
}

/// Draws one sprite frame per call.
///
/// The renderer owns its configuration, meshes and scratch targets. It holds no shared state, so
/// it can be moved to another thread, and the only thing that changes between calls is the
/// frame counter.
pub struct Renderer {
    scene: Scene,
    frame: u64,
    targets: Targets,
}

impl Renderer {
    /// Validate `config` and prepare to draw the built-in model.
    pub fn new(config: RenderConfig) -> RenderResult<Self> {
        Self::with_meshes(config, builtin_model())
    }

    /// As [`Renderer::new`], drawing `mesh` instead of the built-in model.
    pub fn with_mesh(config: RenderConfig, mesh: Mesh) -> RenderResult<Self> {
        Self::with_meshes(config, vec![mesh])
    }

    pub fn with_meshes(config: RenderConfig, meshes: Vec<Mesh>) -> RenderResult<Self> {
        config.validate()?;

        let lights = if config.lights.is_empty() {
            vec![Light::white(config.camera.forward())]
        } else {
            config.lights.clone()
        };
        let view_projection =
            config.camera.projection(config.size.aspect()) * config.camera.view();

        let (out_w, out_h) = config.output_size();
        log::debug!(
            "renderer: {}x{} sprite, scale {} -> {out_w}x{out_h}, {} mesh(es), {:?}",
            config.size.width(),
            config.size.height(),
            config.scale,
            meshes.len(),
            config.animation
        );

        Ok(Self {
            targets: Targets::new(config.size),
            scene: Scene {
                config,
                meshes,
                lights,
                view_projection,
            },
            frame: 0,
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.scene.config
    }

    /// Output dimensions (after scaling) of every frame this renderer produces.
    pub fn size(&self) -> (u32, u32) {
        self.scene.config.output_size()
    }

    /// The frame the next [`render`](Self::render) call will draw.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn set_frame(&mut self, frame: u64) {
        self.frame = frame;
    }

    pub fn reset(&mut self) {
        self.frame = 0;
    }

    /// Draw the current frame into a fresh buffer and advance the frame counter.
    pub fn render(&mut self) -> PixelBuffer {
        let mut out = PixelBuffer::new(0, 0);
        self.render_into(&mut out);
        out
    }

    /// As [`render`](Self::render), reusing `out`. It is resized if its dimensions differ.
    pub fn render_into(&mut self, out: &mut PixelBuffer) {
        self.scene.present(self.frame, &mut self.targets, out);
        self.frame = self.frame.wrapping_add(1);
    }

    /// Draw `frame` without touching the frame counter or the renderer's own targets.
    pub fn render_frame(&self, frame: u64) -> PixelBuffer {
        let mut targets = Targets::new(self.scene.config.size);
        let mut out = PixelBuffer::new(0, 0);
        self.scene.present(frame, &mut targets, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;

    #[test]
    fn counter_advances_and_resets() {
        let mut r = Renderer::new(RenderConfig::default()).unwrap();
        assert_eq!(r.frame(), 0);
        r.render();
        r.render();
        assert_eq!(r.frame(), 2);
        r.set_frame(40);
        assert_eq!(r.frame(), 40);
        r.reset();
        assert_eq!(r.frame(), 0);
    }

    #[test]
    fn turntable_model_matrix_wraps() {
        let cfg = RenderConfig::builder()
            .animation(Animation::Turntable { frames: 4 })
            .build()
            .unwrap();
        let r = Renderer::new(cfg).unwrap();
        assert_eq!(r.scene.model_matrix(1), r.scene.model_matrix(5));
        assert_eq!(r.scene.model_matrix(0), Mat4::identity());
    }

    #[test]
    fn headlight_follows_the_camera() {
        let r = Renderer::new(RenderConfig::default()).unwrap();
        assert_eq!(
            r.scene.lights,
            vec![Light::white(r.config().camera.forward())]
        );

        let down = Light::white(Vec3::new(0.0, -1.0, 0.0));
        let cfg = RenderConfig::builder().light(down).build().unwrap();
        let r = Renderer::new(cfg).unwrap();
        assert_eq!(r.scene.lights, vec![down]);
    }
}
