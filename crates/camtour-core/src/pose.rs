//! Normalized camera poses.
//!
//! Every pose is stored in one convention: `rotation` maps camera space to
//! world space, and camera space uses the renderer's axes (+X right, +Y up,
//! looking down -Z). [`normalize`] is the only place where source conventions
//! are converted, so nothing downstream needs to know how a file was written.

use glam::{Mat3, Quat, Vec3};

use crate::error::PoseError;
use crate::options::{CameraAxes, RotationConvention, TourOptions};
use crate::record::CameraRecord;
use crate::transition::RenderablePose;

/// Flips an OpenCV camera frame (y down, z forward) into the renderer frame.
const OPENCV_TO_OPENGL: Mat3 = Mat3::from_cols(Vec3::X, Vec3::NEG_Y, Vec3::NEG_Z);

/// One reconstructed viewpoint, validated and converted to renderer axes.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraPose {
    index: usize,
    position: Vec3,
    rotation: Mat3,
    orientation: Quat,
    forward_direction: Vec3,
    orbit_target: Vec3,
    id: Option<i64>,
    label: Option<String>,
}

impl CameraPose {
    /// Position in the navigable sequence.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Camera center in world coordinates.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Camera-to-world rotation in renderer axes.
    #[must_use]
    pub fn rotation(&self) -> Mat3 {
        self.rotation
    }

    /// `rotation` as a unit quaternion.
    #[must_use]
    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    /// Unit vector the camera looks along, in world space.
    #[must_use]
    pub fn forward_direction(&self) -> Vec3 {
        self.forward_direction
    }

    /// Pivot handed to the orbit controller while this camera is occupied.
    #[must_use]
    pub fn orbit_target(&self) -> Vec3 {
        self.orbit_target
    }

    /// Identifier from the pose source, if any.
    #[must_use]
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    /// Label from the pose source, if any.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Label, else a name derived from the id, else from the index.
    #[must_use]
    pub fn display_name(&self) -> String {
        match (&self.label, self.id) {
            (Some(label), _) => label.clone(),
            (None, Some(id)) => format!("Camera_{id}"),
            (None, None) => format!("Camera_{}", self.index),
        }
    }

    /// Distance between two camera centers.
    #[must_use]
    pub fn distance(&self, other: &CameraPose) -> f32 {
        self.position.distance(other.position)
    }

    /// The un-eased renderable pose of this camera.
    #[must_use]
    pub fn renderable(&self) -> RenderablePose {
        RenderablePose {
            position: self.position,
            orientation: self.orientation,
            orbit_target: self.orbit_target,
        }
    }
}

/// Frobenius norm of `R * R^T - I`.
#[must_use]
pub fn orthonormal_deviation(matrix: Mat3) -> f32 {
    let residual = matrix * matrix.transpose() - Mat3::IDENTITY;
    (residual.x_axis.length_squared()
        + residual.y_axis.length_squared()
        + residual.z_axis.length_squared())
    .sqrt()
}

/// Validates a camera record and converts it into a [`CameraPose`].
///
/// # Errors
///
/// Returns a [`PoseError`] if the center or rotation is non-finite, the
/// rotation is not orthonormal within `options.orthonormal_tolerance`, or the
/// rotation is a reflection.
pub fn normalize(
    record: &CameraRecord,
    index: usize,
    options: &TourOptions,
) -> Result<CameraPose, PoseError> {
    let position = Vec3::from_array(record.center);
    if !position.is_finite() {
        return Err(PoseError::NonFinitePosition(record.center));
    }

    if record.rotation.iter().flatten().any(|v| !v.is_finite()) {
        return Err(PoseError::NonFiniteRotation);
    }

    let raw = record.rotation_matrix();
    let deviation = orthonormal_deviation(raw);
    if deviation >= options.orthonormal_tolerance {
        return Err(PoseError::NotOrthonormal {
            deviation,
            tolerance: options.orthonormal_tolerance,
        });
    }

    let determinant = raw.determinant();
    if determinant < 0.0 {
        return Err(PoseError::ImproperRotation(determinant));
    }

    let camera_to_world = match options.rotation_convention {
        RotationConvention::WorldToCamera => raw.transpose(),
        RotationConvention::CameraToWorld => raw,
    };
    let rotation = match options.camera_axes {
        CameraAxes::OpenCv => camera_to_world * OPENCV_TO_OPENGL,
        CameraAxes::OpenGl => camera_to_world,
    };

    let orientation = Quat::from_mat3(&rotation).normalize();
    let forward_direction = (rotation * Vec3::NEG_Z).normalize();
    let orbit_target = position + forward_direction * options.orbit_target_distance;

    Ok(CameraPose {
        index,
        position,
        rotation,
        orientation,
        forward_direction,
        orbit_target,
        id: record.id,
        label: record.label.clone(),
    })
}
