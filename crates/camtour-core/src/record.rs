//! Wire format of a single camera in a pose source.

use glam::{Mat3, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::PoseError;

/// One camera as it appears in a pose source file.
///
/// `rotation` is row-major. How it maps world space to camera space is decided
/// by [`TourOptions::rotation_convention`](crate::TourOptions::rotation_convention)
/// when the record is normalized into a [`CameraPose`](crate::CameraPose).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraRecord {
    /// Camera center in world coordinates.
    pub center: [f32; 3],
    /// Row-major 3x3 rotation.
    pub rotation: [[f32; 3]; 3],
    /// Identifier assigned by the exporting tool.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Human-readable name, usually the source image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Translation column of the world-to-camera transform.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<[f32; 3]>,
    /// Full row-major 4x4 world-to-camera transform.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matrix: Option<[[f32; 4]; 4]>,
}

impl CameraRecord {
    /// Creates a record from a center and a row-major rotation.
    pub fn new(center: [f32; 3], rotation: [[f32; 3]; 3]) -> Self {
        Self {
            center,
            rotation,
            id: None,
            label: None,
            translation: None,
            matrix: None,
        }
    }

    /// Sets the label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the identifier.
    #[must_use]
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Builds a world-to-camera record (OpenCV axes) for a camera at `center`
    /// looking at `target`.
    ///
    /// The result matches the default options. `up` must not be parallel to
    /// the viewing direction.
    pub fn look_at(center: Vec3, target: Vec3, up: Vec3) -> Self {
        let z = (target - center).normalize();
        let x = (-up).cross(z).normalize();
        let y = z.cross(x);
        Self::new(center.to_array(), [x.to_array(), y.to_array(), z.to_array()])
    }

    /// Parses a 4x4 world-to-camera transform written as 16 whitespace
    /// separated numbers in row-major order, the way Agisoft Metashape stores
    /// a camera's `<transform>`.
    ///
    /// The camera center is recovered as `-R^T * t`.
    pub fn from_agisoft_transform(text: &str) -> Result<Self, PoseError> {
        let values = text
            .split_whitespace()
            .map(|token| {
                token.parse::<f32>().map_err(|_| {
                    PoseError::MalformedTransform(format!("'{token}' is not a number"))
                })
            })
            .collect::<Result<Vec<f32>, _>>()?;

        if values.len() != 16 {
            return Err(PoseError::MalformedTransform(format!(
                "expected 16 values, got {}",
                values.len()
            )));
        }

        let mut matrix = [[0.0_f32; 4]; 4];
        for (row, chunk) in matrix.iter_mut().zip(values.chunks_exact(4)) {
            row.copy_from_slice(chunk);
        }

        let rotation = [
            [matrix[0][0], matrix[0][1], matrix[0][2]],
            [matrix[1][0], matrix[1][1], matrix[1][2]],
            [matrix[2][0], matrix[2][1], matrix[2][2]],
        ];
        let translation = [matrix[0][3], matrix[1][3], matrix[2][3]];

        // Columns built from the rows of R give R^T.
        let rotation_transposed = Mat3::from_cols_array_2d(&rotation);
        let center = -(rotation_transposed * Vec3::from_array(translation));

        Ok(Self {
            center: center.to_array(),
            rotation,
            id: None,
            label: None,
            translation: Some(translation),
            matrix: Some(matrix),
        })
    }

    /// Returns the rotation as a glam matrix (rows of the record become rows
    /// of the matrix).
    pub fn rotation_matrix(&self) -> Mat3 {
        Mat3::from_cols_array_2d(&self.rotation).transpose()
    }

    /// Returns a display name: the label, else the id, else the position in
    /// the source.
    pub fn display_name(&self, fallback_index: usize) -> String {
        match (&self.label, self.id) {
            (Some(label), _) => label.clone(),
            (None, Some(id)) => format!("Camera_{id}"),
            (None, None) => format!("Camera_{fallback_index}"),
        }
    }
}
