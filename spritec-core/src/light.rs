//! Punctual lights: point, directional and spot.
//!
//! Attenuation follows the usual punctual-light model. Point and spot lights fall off with
//! the inverse square of distance, windowed smoothly to zero at `range` when one is given.
//! Spot lights additionally fade from full strength at `inner_cone_angle` to nothing at
//! `outer_cone_angle`.

use crate::error::{RenderError, RenderResult};
use crate::math::{Radians, Rgb, Vec3, normalize_or_zero, rgb_is_finite, vec3_is_finite};
use std::f32::consts::FRAC_PI_2;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum LightType {
    /// Emits in all directions from the light's position.
    Point {
        /// Linear color.
        color: Rgb,
        /// Candela (lm/sr).
        intensity: f32,
        /// Distance at which the light reaches zero. `None` means unbounded.
        range: Option<f32>,
    },

    /// Infinitely far away; only the direction matters and there is no attenuation.
    Directional {
        /// Linear color.
        color: Rgb,
        /// Lux (lm/m^2).
        intensity: f32,
    },

    /// A cone from the light's position along its direction.
    Spot {
        color: Rgb,
        intensity: f32,
        range: Option<f32>,
        /// Angle from the cone axis where falloff begins. `0 <= inner < outer`.
        inner_cone_angle: Radians,
        /// Angle from the cone axis where falloff ends. At most PI / 2.
        outer_cone_angle: Radians,
    },
}

/// A light placed in world space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Light {
    pub kind: LightType,
    /// Ignored by directional lights.
    pub position: Vec3,
    /// The way the light travels, not where it comes from. Ignored by point lights.
    pub direction: Vec3,
}

impl Light {
    pub fn directional(direction: Vec3, color: Rgb, intensity: f32) -> Self {
        Self {
            kind: LightType::Directional { color, intensity },
            position: Vec3::zero(),
            direction,
        }
    }

    /// White directional light of intensity 1 shining along `direction`.
    pub fn white(direction: Vec3) -> Self {
        Self::directional(normalize_or_zero(direction), Rgb::white(), 1.0)
    }

    pub fn point(position: Vec3, color: Rgb, intensity: f32, range: Option<f32>) -> Self {
        Self {
            kind: LightType::Point {
                color,
                intensity,
                range,
            },
            position,
            direction: Vec3::zero(),
        }
    }

    pub fn spot(
        position: Vec3,
        direction: Vec3,
        color: Rgb,
        intensity: f32,
        range: Option<f32>,
        inner_cone_angle: Radians,
        outer_cone_angle: Radians,
    ) -> Self {
        Self {
            kind: LightType::Spot {
                color,
                intensity,
                range,
                inner_cone_angle,
                outer_cone_angle,
            },
            position,
            direction,
        }
    }

    /// Light arriving at `point`: the unit vector towards the light and the color it brings.
    ///
    /// `None` when nothing arrives (outside the range or cone, or at the light itself).
    pub(crate) fn incident(&self, point: Vec3) -> Option<(Vec3, Rgb)> {
        match self.kind {
            LightType::Directional { color, intensity } => {
                Some((-normalize_or_zero(self.direction), color * intensity))
            }
            LightType::Point {
                color,
                intensity,
                range,
            } => {
                let (to_light, distance) = self.towards(point)?;
                let falloff = distance_falloff(distance, range);
                (falloff > 0.0).then(|| (to_light, color * (intensity * falloff)))
            }
            LightType::Spot {
                color,
                intensity,
                range,
                inner_cone_angle,
                outer_cone_angle,
            } => {
                let (to_light, distance) = self.towards(point)?;
                let cd = normalize_or_zero(self.direction).dot(-to_light);
                let falloff = distance_falloff(distance, range)
                    * cone_falloff(cd, inner_cone_angle, outer_cone_angle);
                (falloff > 0.0).then(|| (to_light, color * (intensity * falloff)))
            }
        }
    }

    fn towards(&self, point: Vec3) -> Option<(Vec3, f32)> {
        let offset = self.position - point;
        let distance = offset.magnitude();
        (distance > f32::EPSILON).then(|| (offset / distance, distance))
    }

    /// Check the light's parameters. `index` names the light in the error.
    pub(crate) fn validate(&self, index: usize) -> RenderResult<()> {
        let fail = |reason: &str| {
            Err(RenderError::config(
                "lights",
                format!("light {index}: {reason}"),
            ))
        };

        let (color, intensity, range) = match self.kind {
            LightType::Point {
                color,
                intensity,
                range,
            } => (color, intensity, range),
            LightType::Directional { color, intensity } => (color, intensity, None),
            LightType::Spot {
                color,
                intensity,
                range,
                ..
            } => (color, intensity, range),
        };
        if !rgb_is_finite(color) {
            return fail("color channels must be finite");
        }
        if !(intensity.is_finite() && intensity >= 0.0) {
            return fail("intensity must be finite and non-negative");
        }
        if let Some(range) = range {
            if !(range.is_finite() && range > 0.0) {
                return fail("range must be finite and positive");
            }
        }

        let needs_position = !matches!(self.kind, LightType::Directional { .. });
        let needs_direction = !matches!(self.kind, LightType::Point { .. });
        if needs_position && !vec3_is_finite(self.position) {
            return fail("position must be finite");
        }
        if needs_direction
            && !(vec3_is_finite(self.direction) && self.direction.magnitude() > f32::EPSILON)
        {
            return fail("direction must be finite and non-zero");
        }

        if let LightType::Spot {
            inner_cone_angle,
            outer_cone_angle,
            ..
        } = self.kind
        {
            let (inner, outer) = (inner_cone_angle.get(), outer_cone_angle.get());
            if !(inner >= 0.0 && inner < outer && outer <= FRAC_PI_2) {
                return fail("spot cone needs 0 <= inner < outer <= PI/2");
            }
        }
        Ok(())
    }
}

/// Inverse square law, windowed to reach zero at `range`.
fn distance_falloff(distance: f32, range: Option<f32>) -> f32 {
    let window = range.map_or(1.0, |r| (1.0 - (distance / r).powi(4)).clamp(0.0, 1.0));
    window / (distance * distance)
}

/// Smooth step from the outer to the inner cone. `cd` is the cosine of the angle between the
/// spot axis and the direction to the lit point.
fn cone_falloff(cd: f32, inner: Radians, outer: Radians) -> f32 {
    let (cos_inner, cos_outer) = (inner.get().cos(), outer.get().cos());
    let scale = 1.0 / (cos_inner - cos_outer).max(1e-3);
    let offset = -cos_outer * scale;
    let t = (cd * scale + offset).clamp(0.0, 1.0);
    t * t
}
