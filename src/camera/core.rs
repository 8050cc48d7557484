use glam::{Mat4, Vec3};

use crate::{error::ConfigError, options::CameraOptions};

/// Pitch and yaw of the scene rotation, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewAngles {
    /// Rotation about the x axis.
    pub pitch: f32,
    /// Rotation about the y axis.
    pub yaw: f32,
}

impl ViewAngles {
    /// Angles from a `(pitch, yaw)` pair.
    pub const fn new(pitch: f32, yaw: f32) -> Self {
        Self { pitch, yaw }
    }

    /// Interpolate towards `other` by `t`.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            pitch: self.pitch + (other.pitch - self.pitch) * t,
            yaw: self.yaw + (other.yaw - self.yaw) * t,
        }
    }
}

/// Fixed perspective rig looking down -z at the origin. The rain volume is
/// rotated in front of it rather than the eye orbiting.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye position in world space.
    pub eye: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Camera {
    /// Rig for `options` at the given viewport size.
    pub fn new(options: &CameraOptions, width: u32, height: u32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, options.eye_distance),
            aspect: aspect_ratio(width, height),
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        }
    }

    /// Reject projection parameters that would produce a singular matrix.
    pub fn validate(options: &CameraOptions) -> Result<(), ConfigError> {
        if !(options.fovy > 0.0 && options.fovy < 180.0) {
            return Err(ConfigError::Camera("fovy must be in (0, 180) degrees"));
        }
        if !(options.znear.is_finite() && options.znear > 0.0) {
            return Err(ConfigError::Camera("znear must be positive"));
        }
        if !(options.zfar.is_finite() && options.zfar > options.znear) {
            return Err(ConfigError::Camera("zfar must exceed znear"));
        }
        if !options.eye_distance.is_finite() {
            return Err(ConfigError::Camera("eye_distance must be finite"));
        }
        Ok(())
    }

    /// Update the aspect ratio after a viewport resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = aspect_ratio(width, height);
    }

    /// Projection matrix. `perspective_rh` already uses the [0,1] depth
    /// range wgpu expects.
    pub fn build_projection(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }

    /// Combined projection, view, and scene rotation.
    pub fn build_matrix(&self, angles: ViewAngles) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye, Vec3::ZERO, Vec3::Y);
        let rotation = Mat4::from_rotation_x(angles.pitch.to_radians())
            * Mat4::from_rotation_y(angles.yaw.to_radians());
        self.build_projection() * view * rotation
    }
}

fn aspect_ratio(width: u32, height: u32) -> f32 {
    width.max(1) as f32 / height.max(1) as f32
}

#[cfg(test)]
mod tests {
    use glam::Vec4;

    use super::*;

    #[test]
    fn default_options_validate() {
        assert_eq!(Camera::validate(&CameraOptions::default()), Ok(()));
    }

    #[test]
    fn degenerate_projection_is_rejected() {
        let bad = [
            CameraOptions { fovy: 0.0, ..CameraOptions::default() },
            CameraOptions { znear: 0.0, ..CameraOptions::default() },
            CameraOptions { zfar: 1.0, ..CameraOptions::default() },
            CameraOptions { eye_distance: f32::INFINITY, ..CameraOptions::default() },
        ];
        for opts in bad {
            assert!(Camera::validate(&opts).is_err(), "{opts:?}");
        }
    }

    #[test]
    fn zero_height_does_not_divide_by_zero() {
        let cam = Camera::new(&CameraOptions::default(), 800, 0);
        assert_eq!(cam.aspect, 800.0);
    }

    #[test]
    fn origin_projects_to_screen_centre() {
        let cam = Camera::new(&CameraOptions::default(), 1280, 720);
        for angles in [ViewAngles::default(), ViewAngles::new(25.0, -20.0)] {
            let clip = cam.build_matrix(angles) * Vec4::new(0.0, 0.0, 0.0, 1.0);
            let ndc = clip / clip.w;
            assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
            assert!(ndc.z > 0.0 && ndc.z < 1.0);
        }
    }

    #[test]
    fn yaw_swings_points_sideways() {
        let cam = Camera::new(&CameraOptions::default(), 1000, 1000);
        let p = Vec4::new(0.0, 0.0, 10.0, 1.0);
        let ahead = cam.build_matrix(ViewAngles::default()) * p;
        let turned = cam.build_matrix(ViewAngles::new(0.0, 20.0)) * p;
        assert!((ahead.x / ahead.w).abs() < 1e-5);
        assert!(turned.x / turned.w > 0.0);
    }
}
