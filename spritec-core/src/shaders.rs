//! The two passes every mesh goes through: an inflated outline, then cel shading.

use crate::geometry::Mesh;
use crate::light::Light;
use crate::math::{
    Mat4, Rgb, Rgba, Vec3, Vec4, normalize_or_zero, transform_direction, transform_point,
};
use euc::{DepthStrategy, Interpolate, Pipeline};

/// Number of discrete lighting steps in the cel ramp.
pub const CEL_BANDS: u32 = 3;

/// Snap a diffuse term in [0, 1] onto the cel ramp: 0, 1/(n-1), ..., 1.
pub fn cel_band(diffuse: f32) -> f32 {
    let bands = CEL_BANDS as f32;
    let step = (diffuse.clamp(0.0, 1.0) * bands).floor().min(bands - 1.0);
    step / (bands - 1.0)
}

/// World-space surface point carried from the vertex to the fragment stage.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Surface {
    pub position: Vec3,
    pub normal: Vec3,
}

impl Interpolate for Surface {
    fn lerp2(a: Self, b: Self, x: f32, y: f32) -> Self {
        Self {
            position: a.position * x + b.position * y,
            normal: a.normal * x + b.normal * y,
        }
    }

    fn lerp3(a: Self, b: Self, c: Self, x: f32, y: f32, z: f32) -> Self {
        Self {
            position: a.position * x + b.position * y + c.position * z,
            normal: a.normal * x + b.normal * y + c.normal * z,
        }
    }
}

/// Flat-colored, banded diffuse lighting plus a constant ambient term.
pub struct CelShader<'a> {
    pub mvp: Mat4,
    pub model: Mat4,
    pub model_inverse_transpose: Mat4,

    pub mesh: &'a Mesh,

    pub lights: &'a [Light],
    pub ambient_intensity: f32,
}

impl CelShader<'_> {
    /// Light reaching a surface point, clamped to 1 per channel.
    pub fn light_at(&self, surface: &Surface) -> Rgb {
        let n = normalize_or_zero(surface.normal);
        let mut total = Rgb::broadcast(self.ambient_intensity);
        for light in self.lights {
            if let Some((to_light, color)) = light.incident(surface.position) {
                total += color * cel_band(n.dot(to_light));
            }
        }
        total.map(|c| c.min(1.0))
    }
}

impl Pipeline for CelShader<'_> {
    type Vertex = u32;
    type VsOut = Surface;
    type Pixel = Rgba;

    fn vert(&self, v_index: &Self::Vertex) -> ([f32; 4], Self::VsOut) {
        let i = *v_index as usize;
        let position = self.mesh.positions()[i];
        let normal = self.mesh.normals()[i];

        let surface = Surface {
            position: transform_point(self.model, position),
            normal: transform_direction(self.model_inverse_transpose, normal),
        };
        ((self.mvp * Vec4::from_point(position)).into_array(), surface)
    }

    fn frag(&self, surface: &Self::VsOut) -> Self::Pixel {
        let light = self.light_at(surface);
        let color = self.mesh.color();
        Rgba::new(color.r * light.r, color.g * light.g, color.b * light.b, 1.0)
    }
}

/// Draws the mesh pushed out along its welded normals in a flat color.
///
/// It tests depth but never writes it, so the cel pass drawn afterwards covers the inside
/// and only a rim around the silhouette is left.
pub struct OutlineShader<'a> {
    pub mvp: Mat4,

    pub mesh: &'a Mesh,

    pub outline_color: Rgba,
    /// Offset in model units.
    pub outline_thickness: f32,
}

impl Pipeline for OutlineShader<'_> {
    type Vertex = u32;
    type VsOut = ();
    type Pixel = Rgba;

    fn get_depth_strategy(&self) -> DepthStrategy {
        DepthStrategy::IfLessNoWrite
    }

    fn vert(&self, v_index: &Self::Vertex) -> ([f32; 4], Self::VsOut) {
        let i = *v_index as usize;
        let position =
            self.mesh.positions()[i] + self.mesh.outline_normals()[i] * self.outline_thickness;
        ((self.mvp * Vec4::from_point(position)).into_array(), ())
    }

    fn frag(&self, _: &Self::VsOut) -> Self::Pixel {
        self.outline_color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use euc::{Target, buffer::Buffer2d, rasterizer};

    fn cube() -> Mesh {
        Mesh::cuboid(Vec3::zero(), Vec3::new(1.0, 1.0, 1.0), Rgba::white())
    }

    fn shader<'a>(mesh: &'a Mesh, lights: &'a [Light], mvp: Mat4) -> CelShader<'a> {
        CelShader {
            mvp,
            model: Mat4::identity(),
            model_inverse_transpose: Mat4::identity(),
            mesh,
            lights,
            ambient_intensity: 0.5,
        }
    }

    fn surface(position: Vec3, normal: Vec3) -> Surface {
        Surface { position, normal }
    }

    #[test]
    fn cel_band_has_three_steps() {
        assert_eq!(cel_band(-0.3), 0.0);
        assert_eq!(cel_band(0.2), 0.0);
        assert_eq!(cel_band(0.5), 0.5);
        assert_eq!(cel_band(0.9), 1.0);
        assert_eq!(cel_band(1.0), 1.0);
    }

    #[test]
    fn unlit_faces_fall_back_to_ambient() {
        let mesh = cube();
        let lights = [Light::white(Vec3::new(0.0, -1.0, 0.0))];
        let shader = shader(&mesh, &lights, Mat4::identity());

        let below = shader.frag(&surface(Vec3::zero(), Vec3::new(0.0, -1.0, 0.0)));
        assert_eq!(below, Rgba::new(0.5, 0.5, 0.5, 1.0));
        let above = shader.frag(&surface(Vec3::zero(), Vec3::unit_y()));
        assert_eq!(above, Rgba::white());
    }

    #[test]
    fn point_light_only_reaches_nearby_surfaces() {
        let mesh = cube();
        let lights = [Light::point(Vec3::new(0.0, 2.0, 0.0), Rgb::white(), 1.0, Some(3.0))];
        let shader = shader(&mesh, &lights, Mat4::identity());
        let up = Vec3::unit_y();

        // One unit below the light: 1 / 1^2, windowed by range 3 to about 0.99.
        let near = shader.light_at(&surface(Vec3::new(0.0, 1.0, 0.0), up));
        assert!(near.r > 0.9, "{near:?}");
        // Out of range: ambient only.
        let far = shader.light_at(&surface(Vec3::new(0.0, -5.0, 0.0), up));
        assert_eq!(far, Rgb::broadcast(0.5));
    }

    #[test]
    fn spot_light_lights_inside_its_cone() {
        let mesh = cube();
        let lights = [Light::spot(
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, -1.0, 0.0),
            Rgb::white(),
            1.0,
            None,
            crate::math::Radians::from_degrees(10.0),
            crate::math::Radians::from_degrees(20.0),
        )];
        let shader = shader(&mesh, &lights, Mat4::identity());
        let up = Vec3::unit_y();

        let inside = shader.light_at(&surface(Vec3::zero(), up));
        assert_eq!(inside, Rgb::white());
        let outside = shader.light_at(&surface(Vec3::new(1.0, 0.0, 0.0), up));
        assert_eq!(outside, Rgb::broadcast(0.5));
    }

    #[test]
    fn cube_facing_the_camera_draws_its_front_face_lit() {
        let mesh = cube();
        let lights = [Light::white(Vec3::new(0.0, 0.0, -1.0))];
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 6.0), Vec3::zero(), Vec3::unit_y());
        let proj = Mat4::perspective_rh_no(40f32.to_radians(), 1.0, 0.1, 100.0);
        let shader = shader(&mesh, &lights, proj * view);

        let mut color = Buffer2d::new([16, 16], Rgba::zero());
        let mut depth = Buffer2d::new([16, 16], 1.0);
        shader.draw::<rasterizer::Triangles<_>, _>(mesh.indices(), &mut color, &mut depth);

        let pixels = color.as_ref();
        let centre = pixels[8 * 16 + 8];
        assert_eq!(centre, Rgba::white());
        assert_eq!(pixels[0], Rgba::zero());
        assert_eq!(color.size(), [16, 16]);
    }

    #[test]
    fn outline_leaves_a_rim_around_the_cel_pass() {
        let mesh = cube();
        let lights = [Light::white(Vec3::new(0.0, 0.0, -1.0))];
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 6.0), Vec3::zero(), Vec3::unit_y());
        let proj = Mat4::perspective_rh_no(40f32.to_radians(), 1.0, 0.1, 100.0);
        let mvp = proj * view;
        let black = Rgba::new(0.0, 0.0, 0.0, 1.0);

        let mut color = Buffer2d::new([32, 32], Rgba::zero());
        let mut depth = Buffer2d::new([32, 32], 1.0);
        OutlineShader {
            mvp,
            mesh: &mesh,
            outline_color: black,
            outline_thickness: 0.3,
        }
        .draw::<rasterizer::Triangles<_>, _>(mesh.indices(), &mut color, &mut depth);
        // The outline pass leaves depth untouched.
        assert!(depth.as_ref().iter().all(|&d| d == 1.0));

        shader(&mesh, &lights, mvp).draw::<rasterizer::Triangles<_>, _>(
            mesh.indices(),
            &mut color,
            &mut depth,
        );
        let pixels = color.as_ref();
        assert_eq!(pixels[16 * 32 + 16], Rgba::white());
        assert!(pixels.iter().any(|&p| p == black));
    }
}
