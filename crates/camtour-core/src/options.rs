//! Configuration options for a camera tour.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TourError};
use crate::highlight::HighlightPalette;

/// Configuration options for a camera tour.
///
/// Every field has a default, so a JSON file only needs to list what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TourOptions {
    /// Length of a transition between two cameras, in seconds.
    pub transition_duration: f32,

    /// Cameras closer than this (world units) are connected in the view graph.
    pub max_connection_distance: f32,

    /// Camera occupied when the tour starts.
    pub initial_camera_index: usize,

    /// Distance in front of a camera at which the orbit target is placed.
    pub orbit_target_distance: f32,

    /// Maximum Frobenius norm of `R * R^T - I` accepted for an input rotation.
    pub orthonormal_tolerance: f32,

    /// Direction of the rotation matrices in the pose source.
    pub rotation_convention: RotationConvention,

    /// Camera-space axes the pose source was written in.
    pub camera_axes: CameraAxes,

    /// Whether the point cloud is visible when the tour starts.
    pub point_cloud_visible: bool,

    /// Base radius of a camera marker.
    pub marker_size: f32,

    /// Whether `marker_size` is relative to the scene length scale.
    pub marker_size_is_relative: bool,

    /// Whether the view graph edges are drawn.
    pub show_view_graph: bool,

    /// Marker colors and sizes per highlight class.
    pub highlight: HighlightPalette,
}

impl Default for TourOptions {
    fn default() -> Self {
        Self {
            transition_duration: 1.0,
            max_connection_distance: 2.0,
            initial_camera_index: 0,
            orbit_target_distance: 1.0,
            orthonormal_tolerance: 1e-3,
            rotation_convention: RotationConvention::WorldToCamera,
            camera_axes: CameraAxes::OpenCv,
            point_cloud_visible: true,
            marker_size: 0.01,
            marker_size_is_relative: true,
            show_view_graph: true,
            highlight: HighlightPalette::default(),
        }
    }
}

impl TourOptions {
    /// Parses options from a JSON string and validates them.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Reads options from a JSON file and validates them.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Sets the transition duration in seconds.
    #[must_use]
    pub fn with_transition_duration(mut self, seconds: f32) -> Self {
        self.transition_duration = seconds;
        self
    }

    /// Sets the view graph connection threshold.
    #[must_use]
    pub fn with_max_connection_distance(mut self, distance: f32) -> Self {
        self.max_connection_distance = distance;
        self
    }

    /// Sets the camera occupied at start.
    #[must_use]
    pub fn with_initial_camera_index(mut self, index: usize) -> Self {
        self.initial_camera_index = index;
        self
    }

    /// Sets the orbit target distance.
    #[must_use]
    pub fn with_orbit_target_distance(mut self, distance: f32) -> Self {
        self.orbit_target_distance = distance;
        self
    }

    /// Sets how input rotations are interpreted.
    #[must_use]
    pub fn with_rotation_convention(
        mut self,
        convention: RotationConvention,
        axes: CameraAxes,
    ) -> Self {
        self.rotation_convention = convention;
        self.camera_axes = axes;
        self
    }

    /// Checks every numeric field against its valid range.
    pub fn validate(&self) -> Result<()> {
        fn non_negative(name: &str, value: f32) -> Result<()> {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(TourError::InvalidOption(format!(
                    "{name} must be finite and non-negative, got {value}"
                )))
            }
        }
        fn positive(name: &str, value: f32) -> Result<()> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(TourError::InvalidOption(format!(
                    "{name} must be finite and positive, got {value}"
                )))
            }
        }

        non_negative("transition_duration", self.transition_duration)?;
        non_negative("max_connection_distance", self.max_connection_distance)?;
        positive("orbit_target_distance", self.orbit_target_distance)?;
        positive("orthonormal_tolerance", self.orthonormal_tolerance)?;
        non_negative("marker_size", self.marker_size)?;
        self.highlight.validate()
    }
}

/// Direction of the rotation matrices stored in a pose source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RotationConvention {
    /// `x_cam = R * (x_world - center)`, as photogrammetry tools export it.
    #[default]
    WorldToCamera,
    /// `x_world = R * x_cam + center`.
    CameraToWorld,
}

/// Camera-space axes of a pose source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CameraAxes {
    /// +X right, +Y down, +Z forward (Metashape, COLMAP, OpenCV).
    #[default]
    OpenCv,
    /// +X right, +Y up, -Z forward (the renderer's own axes).
    OpenGl,
}
