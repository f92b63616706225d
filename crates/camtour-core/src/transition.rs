//! Interpolation between two camera poses.
//!
//! [`interpolate`] is a pure function of its inputs: the navigation state
//! machine owns the clock, this module only maps progress to a pose.

use glam::{Mat4, Quat, Vec3};

use crate::easing::ease_in_out_cubic;
use crate::pose::CameraPose;

/// A pose ready for the renderer and the orbit controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderablePose {
    /// Camera center in world coordinates.
    pub position: Vec3,
    /// Camera-to-world rotation (renderer axes, looking down -Z).
    pub orientation: Quat,
    /// Pivot for the orbit controller.
    pub orbit_target: Vec3,
}

impl RenderablePose {
    /// Unit viewing direction in world space.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }

    /// Unit up direction in world space.
    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.orientation * Vec3::Y
    }

    /// Camera-to-world transform.
    #[must_use]
    pub fn camera_to_world(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.position)
    }

    /// World-to-camera (view) transform.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        self.camera_to_world().inverse()
    }

    /// Returns true if both poses match within `max_abs_diff`, treating `q`
    /// and `-q` as the same orientation.
    #[must_use]
    pub fn abs_diff_eq(&self, other: &Self, max_abs_diff: f32) -> bool {
        self.position.abs_diff_eq(other.position, max_abs_diff)
            && self.orbit_target.abs_diff_eq(other.orbit_target, max_abs_diff)
            && (1.0 - self.orientation.dot(other.orientation).abs()) <= max_abs_diff
    }
}

/// Returns the pose `progress` of the way from `from` to `to`.
///
/// `progress` is clamped to `[0, 1]` and eased with [`ease_in_out_cubic`].
/// The position moves along a straight line; the orientation follows the
/// shortest great arc between the two quaternions. The orbit target is placed
/// `orbit_target_distance` in front of the interpolated camera.
#[must_use]
pub fn interpolate(
    from: &CameraPose,
    to: &CameraPose,
    progress: f32,
    orbit_target_distance: f32,
) -> RenderablePose {
    let t = ease_in_out_cubic(progress);

    let position = from.position().lerp(to.position(), t);
    let orientation = from.orientation().slerp(to.orientation(), t).normalize();
    let orbit_target = position + orientation * Vec3::NEG_Z * orbit_target_distance;

    RenderablePose {
        position,
        orientation,
        orbit_target,
    }
}
