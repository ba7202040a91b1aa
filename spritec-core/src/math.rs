//! `f32` aliases over `vek` plus the few helpers the renderer needs on top.
//!
//! Conventions: right-handed world space, column vectors. Projections map depth into
//! [-1, 1] (`_no` variants).

use std::f32::consts::PI;

pub type Vec3 = vek::Vec3<f32>;
pub type Vec4 = vek::Vec4<f32>;
pub type Mat4 = vek::Mat4<f32>;
pub type Rgb = vek::Rgb<f32>;
pub type Rgba = vek::Rgba<f32>;

/// An angle in radians.
#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd)]
pub struct Radians(f32);

impl Radians {
    pub const fn from_radians(value: f32) -> Self {
        Radians(value)
    }

    pub fn from_degrees(value: f32) -> Self {
        Radians(value * PI / 180.0)
    }

    pub const fn get(self) -> f32 {
        self.0
    }
}

/// Unit vector in the same direction, or zero for a (near) zero-length input.
pub(crate) fn normalize_or_zero(v: Vec3) -> Vec3 {
    let len = v.magnitude();
    if len > f32::EPSILON { v / len } else { Vec3::zero() }
}

pub(crate) fn vec3_is_finite(v: Vec3) -> bool {
    v.into_array().iter().all(|c| c.is_finite())
}

pub(crate) fn rgba_is_finite(c: Rgba) -> bool {
    c.into_array().iter().all(|c| c.is_finite())
}

pub(crate) fn rgb_is_finite(c: Rgb) -> bool {
    c.into_array().iter().all(|c| c.is_finite())
}

/// Transform a point (w = 1) and drop w.
pub(crate) fn transform_point(m: Mat4, p: Vec3) -> Vec3 {
    Vec3::from(m * Vec4::from_point(p))
}

/// Transform a direction (w = 0) and drop w.
pub(crate) fn transform_direction(m: Mat4, d: Vec3) -> Vec3 {
    Vec3::from(m * Vec4::from_direction(d))
}

/// Build a color from 8-bit channels.
pub fn rgba_from_u8(r: u8, g: u8, b: u8, a: u8) -> Rgba {
    vek::Rgba::<u8>::new(r, g, b, a).map(|c| c as f32 / 255.0)
}

/// Quantize to 8-bit channels, clamping out-of-range values.
pub fn rgba_to_u8(c: Rgba) -> [u8; 4] {
    let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    [q(c.r), q(c.g), q(c.b), q(c.a)]
}
