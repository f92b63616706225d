//! camtour: camera tours through reconstructed scenes.
//!
//! A tour moves the viewer between the poses of the physical cameras that
//! captured a point cloud, with eased transitions and a proximity graph that
//! highlights nearby viewpoints.
//!
//! # Quick Start
//!
//! ```no_run
//! use camtour::*;
//!
//! struct MyRenderer;
//!
//! impl SceneRenderer for MyRenderer {
//!     fn apply_pose(&mut self, pose: &RenderablePose) { /* move the camera */ }
//!     fn set_point_cloud_visible(&mut self, visible: bool) {}
//!     fn update_markers(&mut self, markers: &[MarkerStyle]) {}
//!     fn draw_view_graph(&mut self, segments: &[(Vec3, Vec3)]) {}
//!     fn pick_marker(&self, screen: Vec2) -> Option<usize> { None }
//! }
//!
//! fn main() -> Result<()> {
//!     init_logging();
//!
//!     let mut renderer = MyRenderer;
//!     let mut tour = Tour::from_path("cameras.json", TourOptions::default())?;
//!     tour.start(&mut renderer);
//!
//!     // On input:
//!     tour.handle_key(Key::Right, 0.0, &mut renderer);
//!     // Every frame:
//!     tour.tick(0.016, &mut renderer);
//!     Ok(())
//! }
//! ```
//!
//! # Rotation convention
//!
//! Pose sources store world-to-camera rotations in OpenCV camera axes by
//! default (`center = -R^T * t`), which is what photogrammetry exports
//! produce. See [`TourOptions::rotation_convention`] and
//! [`TourOptions::camera_axes`] for other sources.

mod controls;
mod init;
mod renderer;
mod tour;

pub use controls::{Key, TourCommand};
pub use init::init_logging;
pub use renderer::{MarkerStyle, SceneExtent, SceneRenderer};
pub use tour::Tour;

// Re-export core types
pub use camtour_core::{
    classify, ease_in_out_cubic, interpolate, normalize, CameraAxes, CameraPose, CameraRecord,
    Edge, Highlight, HighlightPalette, LoadReport, Mat3, Mat4, NavigationPhase, NavigationState,
    Navigator, PoseError, PoseSource, Quat, RenderablePose, Result, RotationConvention,
    SourceMetadata, TickOutcome, TourError, TourOptions, Transition, Vec2, Vec3, ViewGraph,
};
