//! Core of camtour.
//!
//! This crate turns camera extrinsics into navigable viewpoints and moves a
//! viewer between them:
//! - [`CameraRecord`] / [`PoseSource`]: the JSON pose source and its records
//! - [`agisoft`]: import of Agisoft Metashape camera exports
//! - [`CameraPose`]: a validated pose in the renderer's camera convention
//! - [`ViewGraph`]: which cameras are spatially close
//! - [`Navigator`]: the two-state navigation machine, driven by host ticks
//! - [`interpolate`]: eased position lerp and orientation slerp
//! - [`classify`]: current / adjacent / distant marker highlighting
//!
//! Nothing here renders or reads the clock; hosts supply both.

#![warn(missing_docs)]
// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Progress is computed in f64 seconds and handed to glam as f32
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod agisoft;
pub mod easing;
pub mod error;
pub mod highlight;
pub mod navigation;
pub mod options;
pub mod pose;
pub mod record;
pub mod source;
pub mod transition;
pub mod view_graph;

pub use easing::ease_in_out_cubic;
pub use error::{PoseError, Result, TourError};
pub use highlight::{classify, Highlight, HighlightPalette};
pub use navigation::{NavigationPhase, NavigationState, Navigator, TickOutcome, Transition};
pub use options::{CameraAxes, RotationConvention, TourOptions};
pub use pose::{normalize, orthonormal_deviation, CameraPose};
pub use record::CameraRecord;
pub use source::{LoadReport, PoseSource, SourceMetadata};
pub use transition::{interpolate, RenderablePose};
pub use view_graph::{Edge, ViewGraph};

// Re-export glam types for convenience
pub use glam::{Mat3, Mat4, Quat, Vec2, Vec3};
