//! The rendering collaborators a tour drives.
//!
//! camtour never draws anything itself. A host implements [`SceneRenderer`]
//! on top of its scene graph (markers, lines, point cloud, orbit controls)
//! and hands it to the [`Tour`](crate::Tour) on every call that can change
//! what is on screen. [`SceneExtent`] reports how large the loaded scene is,
//! for marker sizing.

use camtour_core::{Highlight, RenderablePose, Vec2, Vec3};

/// How one camera marker should be drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    /// Camera index the marker belongs to.
    pub index: usize,
    /// Marker center in world coordinates.
    pub position: Vec3,
    /// Highlight class the style was derived from.
    pub highlight: Highlight,
    /// RGB color in `[0, 1]`.
    pub color: Vec3,
    /// Marker radius in world units.
    pub radius: f32,
}

/// Rendering engine, orbit controller and picking, as seen by a tour.
pub trait SceneRenderer {
    /// Moves the view camera to `pose` and re-targets the orbit controller at
    /// `pose.orbit_target`.
    fn apply_pose(&mut self, pose: &RenderablePose);

    /// Shows or hides the point cloud.
    fn set_point_cloud_visible(&mut self, visible: bool);

    /// Replaces the style of every camera marker.
    fn update_markers(&mut self, markers: &[MarkerStyle]);

    /// Replaces the drawn view graph edges. An empty slice clears them.
    fn draw_view_graph(&mut self, segments: &[(Vec3, Vec3)]);

    /// Returns the camera whose marker is under `screen` (pixels), if any.
    fn pick_marker(&self, screen: Vec2) -> Option<usize>;

    /// Marks a marker as hovered, or clears the hover state.
    fn set_hovered_marker(&mut self, _index: Option<usize>) {
        // Default no-op; hosts without hover feedback ignore this
    }
}

/// Size of the loaded scene, as reported by the point-cloud loader.
///
/// Only marker sizing depends on it.
pub trait SceneExtent {
    /// Characteristic length of the scene, usually its bounding diagonal.
    /// `None` while nothing is loaded.
    fn length_scale(&self) -> Option<f32>;
}

/// Bounding diagonal of a set of points, or `None` if it is empty or
/// degenerate.
impl SceneExtent for [Vec3] {
    fn length_scale(&self) -> Option<f32> {
        let (first, rest) = self.split_first()?;
        let (min, max) = rest
            .iter()
            .fold((*first, *first), |(min, max), p| (min.min(*p), max.max(*p)));
        let diagonal = (max - min).length();
        (diagonal.is_finite() && diagonal > 0.0).then_some(diagonal)
    }
}
