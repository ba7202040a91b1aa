//! Camera description and the view/projection matrices derived from it.

use crate::error::{RenderError, RenderResult};
use crate::math::{Mat4, Radians, Vec3, normalize_or_zero, vec3_is_finite};
use std::f32::consts::PI;
use vek::FrustumPlanes;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Projection {
    /// Perspective projection with a vertical field of view.
    Perspective { fovy: Radians },
    /// Orthographic projection showing `half_height` world units above and below the view
    /// axis.
    Orthographic { half_height: f32 },
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub projection: Projection,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(8.0, 8.0, 8.0),
            target: Vec3::zero(),
            up: Vec3::unit_y(),
            projection: Projection::Perspective {
                fovy: Radians::from_degrees(40.0),
            },
            near: 0.1,
            far: 100.0,
        }
    }
}

/// Named camera placements relative to a model at the origin.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PresetCamera {
    /// Three-quarter view from above, the default sprite angle.
    Perspective,
    /// Straight-on view from +Z.
    Front,
    /// View from +X.
    Side,
    /// Orthographic three-quarter view, the classic isometric-ish sprite look.
    Isometric,
    Custom(Camera),
}

impl From<PresetCamera> for Camera {
    fn from(preset: PresetCamera) -> Self {
        let base = Camera::default();
        match preset {
            PresetCamera::Perspective => base,
            PresetCamera::Front => Camera {
                eye: Vec3::new(0.0, 1.5, 12.0),
                target: Vec3::new(0.0, 1.5, 0.0),
                ..base
            },
            PresetCamera::Side => Camera {
                eye: Vec3::new(12.0, 1.5, 0.0),
                target: Vec3::new(0.0, 1.5, 0.0),
                ..base
            },
            PresetCamera::Isometric => Camera {
                projection: Projection::Orthographic { half_height: 3.0 },
                ..base
            },
            PresetCamera::Custom(camera) => camera,
        }
    }
}

impl Camera {
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        match self.projection {
            Projection::Perspective { fovy } => {
                Mat4::perspective_rh_no(fovy.get(), aspect, self.near, self.far)
            }
            Projection::Orthographic { half_height } => {
                let half_width = half_height * aspect;
                Mat4::orthographic_rh_no(FrustumPlanes {
                    left: -half_width,
                    right: half_width,
                    bottom: -half_height,
                    top: half_height,
                    near: self.near,
                    far: self.far,
                })
            }
        }
    }

    /// Unit vector from the eye towards the target.
    pub fn forward(&self) -> Vec3 {
        normalize_or_zero(self.target - self.eye)
    }

    pub fn validate(&self) -> RenderResult<()> {
        if ![self.eye, self.target, self.up].into_iter().all(vec3_is_finite) {
            return Err(RenderError::config("camera", "eye, target and up must be finite"));
        }
        let dir = self.target - self.eye;
        if dir.magnitude() <= f32::EPSILON {
            return Err(RenderError::config("camera", "eye and target coincide"));
        }
        if normalize_or_zero(dir)
            .cross(normalize_or_zero(self.up))
            .magnitude()
            <= 1e-6
        {
            return Err(RenderError::config(
                "camera",
                "up vector is zero or parallel to the view direction",
            ));
        }
        if !(self.near.is_finite() && self.far.is_finite()) || self.near <= 0.0 {
            return Err(RenderError::config("camera.near", "must be finite and positive"));
        }
        if self.far <= self.near {
            return Err(RenderError::config(
                "camera.far",
                format!("must be greater than near ({})", self.near),
            ));
        }
        match self.projection {
            Projection::Perspective { fovy } => {
                if !(fovy.get() > 0.0 && fovy.get() < PI) {
                    return Err(RenderError::config(
                        "camera.fovy",
                        "must lie strictly between 0 and PI radians",
                    ));
                }
            }
            Projection::Orthographic { half_height } => {
                if !(half_height.is_finite() && half_height > 0.0) {
                    return Err(RenderError::config(
                        "camera.half_height",
                        "must be finite and positive",
                    ));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec4;

    #[test]
    fn default_matches_three_quarter_view() {
        let cam = Camera::default();
        assert_eq!(cam.eye, Vec3::new(8.0, 8.0, 8.0));
        assert!(cam.validate().is_ok());
    }

    #[test]
    fn presets_are_valid() {
        for preset in [
            PresetCamera::Perspective,
            PresetCamera::Front,
            PresetCamera::Side,
            PresetCamera::Isometric,
        ] {
            assert!(Camera::from(preset).validate().is_ok(), "{preset:?}");
        }
    }

    #[test]
    fn looking_straight_down_the_up_axis_is_rejected() {
        let cam = Camera {
            eye: Vec3::new(0.0, 10.0, 0.0),
            ..Camera::default()
        };
        assert!(cam.validate().unwrap_err().is_configuration());
    }

    #[test]
    fn perspective_maps_near_and_far_planes_to_unit_depth() {
        let proj = Camera::default().projection(1.0);
        let near = proj * Vec4::new(0.0, 0.0, -0.1, 1.0);
        let far = proj * Vec4::new(0.0, 0.0, -100.0, 1.0);
        assert!((near.z / near.w + 1.0).abs() < 1e-4);
        assert!((far.z / far.w - 1.0).abs() < 1e-4);
    }

    #[test]
    fn orthographic_width_follows_aspect() {
        let cam = Camera::from(PresetCamera::Isometric);
        let proj = cam.projection(2.0);
        // half_height 3 at aspect 2 puts x = 6 on the right edge.
        let edge = proj * Vec4::new(6.0, 0.0, -1.0, 1.0);
        assert!((edge.x / edge.w - 1.0).abs() < 1e-5, "{edge:?}");
    }

    #[test]
    fn inverted_clip_planes_are_rejected() {
        let cam = Camera {
            near: 5.0,
            far: 1.0,
            ..Camera::default()
        };
        assert!(cam.validate().is_err());
    }
}
