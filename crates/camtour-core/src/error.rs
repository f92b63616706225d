//! Error types for camtour.

use thiserror::Error;

/// Why a single camera record was refused by the pose model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PoseError {
    /// The camera center has a NaN or infinite component.
    #[error("camera center {0:?} is not finite")]
    NonFinitePosition([f32; 3]),

    /// The rotation matrix has a NaN or infinite entry.
    #[error("rotation matrix contains non-finite entries")]
    NonFiniteRotation,

    /// `R * R^T` is too far from the identity.
    #[error("rotation matrix is not orthonormal (|R*R^T - I| = {deviation}, tolerance {tolerance})")]
    NotOrthonormal {
        /// Frobenius norm of `R * R^T - I`.
        deviation: f32,
        /// Largest accepted deviation.
        tolerance: f32,
    },

    /// The matrix is orthonormal but mirrors space.
    #[error("rotation matrix is a reflection (determinant {0})")]
    ImproperRotation(f32),

    /// A textual 4x4 transform could not be parsed.
    #[error("malformed transform: {0}")]
    MalformedTransform(String),
}

/// The main error type for camtour operations.
#[derive(Error, Debug)]
pub enum TourError {
    /// A camera record failed validation.
    #[error("invalid pose for camera {index}: {source}")]
    InvalidPose {
        /// Position of the record in the pose source.
        index: usize,
        /// Why the record was refused.
        #[source]
        source: PoseError,
    },

    /// A configuration value is out of its valid range.
    #[error("invalid option: {0}")]
    InvalidOption(String),

    /// No camera survived loading.
    #[error("pose source contains no valid cameras")]
    EmptyPoseSet,

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Malformed camera export XML.
    #[error("XML error: {0}")]
    XmlError(#[from] quick_xml::Error),
}

/// A specialized Result type for camtour operations.
pub type Result<T> = std::result::Result<T, TourError>;
