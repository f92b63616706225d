//! The tour controller: navigation core wired to a renderer.

use std::path::Path;
use std::sync::Arc;

use camtour_core::{
    classify, CameraPose, Highlight, Navigator, PoseError, PoseSource, Result, TickOutcome,
    TourOptions, Vec2, Vec3, ViewGraph,
};

use crate::controls::{Key, TourCommand};
use crate::renderer::{MarkerStyle, SceneExtent, SceneRenderer};

/// A camera tour through a reconstructed scene.
///
/// The tour owns the navigation state, the view graph and the current marker
/// highlights. Poses are shared read-only with the [`Navigator`].
pub struct Tour {
    options: TourOptions,
    graph: ViewGraph,
    navigator: Navigator,
    highlights: Vec<Highlight>,
    rejected: Vec<(usize, PoseError)>,
    point_cloud_visible: bool,
    length_scale: f32,
    hovered: Option<usize>,
}

impl Tour {
    /// Creates a tour over already normalized poses.
    ///
    /// # Errors
    ///
    /// Returns an error if `options` fail validation.
    pub fn new(poses: Arc<[CameraPose]>, options: TourOptions) -> Result<Self> {
        let navigator = Navigator::new(poses, &options)?;
        let graph = ViewGraph::build(navigator.poses(), options.max_connection_distance);
        let highlights = classify(navigator.poses(), &graph, navigator.current_index());
        let length_scale = camera_length_scale(navigator.poses());

        Ok(Self {
            point_cloud_visible: options.point_cloud_visible,
            options,
            graph,
            navigator,
            highlights,
            rejected: Vec::new(),
            length_scale,
            hovered: None,
        })
    }

    /// Creates a tour from a parsed pose source. Invalid records are skipped
    /// and reported by [`Tour::rejected`].
    pub fn from_source(source: &PoseSource, options: TourOptions) -> Result<Self> {
        options.validate()?;
        let report = source.normalize(&options);
        let mut tour = Self::new(report.poses, options)?;
        tour.rejected = report.rejected;
        Ok(tour)
    }

    /// Creates a tour that refuses any invalid record and an empty source.
    ///
    /// # Errors
    ///
    /// [`TourError::InvalidPose`](camtour_core::TourError::InvalidPose) for
    /// the first invalid record,
    /// [`TourError::EmptyPoseSet`](camtour_core::TourError::EmptyPoseSet) if
    /// no camera is listed, or an option validation error.
    pub fn from_source_strict(source: &PoseSource, options: TourOptions) -> Result<Self> {
        options.validate()?;
        let poses = source.normalize_strict(&options)?;
        Self::new(poses, options)
    }

    /// Creates a tour from a pose source file.
    pub fn from_path(path: impl AsRef<Path>, options: TourOptions) -> Result<Self> {
        let source = PoseSource::from_path(path)?;
        Self::from_source(&source, options)
    }

    /// Puts the renderer in the tour's initial state: point cloud visibility,
    /// view graph, markers, and the first camera placed without animation.
    pub fn start(&mut self, renderer: &mut dyn SceneRenderer) {
        renderer.set_point_cloud_visible(self.point_cloud_visible);
        self.push_view_graph(renderer);

        match self.navigator.initial_placement() {
            Some(pose) => {
                renderer.apply_pose(&pose);
                log::info!("tour started at {}", self.status_text());
            }
            None => log::warn!("tour has no cameras; nothing to place"),
        }

        self.recompute_highlights(renderer);
    }

    /// Executes a user command at host time `now`.
    ///
    /// Returns true if something changed. Navigation commands are dropped
    /// while a transition is in flight.
    pub fn handle_command(
        &mut self,
        command: TourCommand,
        now: f64,
        renderer: &mut dyn SceneRenderer,
    ) -> bool {
        let target = match command {
            TourCommand::TogglePointCloud => {
                self.point_cloud_visible = !self.point_cloud_visible;
                renderer.set_point_cloud_visible(self.point_cloud_visible);
                log::debug!("point cloud visible: {}", self.point_cloud_visible);
                return true;
            }
            TourCommand::NavigateTo(index) => Some(index),
            TourCommand::Previous => self.navigator.previous_index(),
            TourCommand::Next => self.navigator.next_index(),
            TourCommand::First => self.navigator.first_index(),
            TourCommand::Last => self.navigator.last_index(),
        };

        match target {
            Some(index) => self.navigator.request_navigate(index, now),
            None => {
                log::debug!("{command:?} has no target from {}", self.status_text());
                false
            }
        }
    }

    /// Executes the command bound to `key`.
    pub fn handle_key(&mut self, key: Key, now: f64, renderer: &mut dyn SceneRenderer) -> bool {
        self.handle_command(key.command(), now, renderer)
    }

    /// Navigates to the camera whose marker is under `screen`, if any.
    pub fn handle_click(
        &mut self,
        screen: Vec2,
        now: f64,
        renderer: &mut dyn SceneRenderer,
    ) -> bool {
        match renderer.pick_marker(screen) {
            Some(index) => self.handle_command(TourCommand::NavigateTo(index), now, renderer),
            None => false,
        }
    }

    /// Updates the hovered marker from a pointer position and returns it.
    pub fn handle_hover(
        &mut self,
        screen: Vec2,
        renderer: &mut dyn SceneRenderer,
    ) -> Option<usize> {
        let hovered = renderer
            .pick_marker(screen)
            .filter(|&i| i < self.navigator.len());
        if hovered != self.hovered {
            self.hovered = hovered;
            renderer.set_hovered_marker(hovered);
        }
        hovered
    }

    /// Advances the transition in flight and pushes the result to the
    /// renderer. Highlights are recomputed only when a transition completes.
    pub fn tick(&mut self, now: f64, renderer: &mut dyn SceneRenderer) -> TickOutcome {
        let outcome = self.navigator.tick(now);
        match outcome {
            TickOutcome::Idle => {}
            TickOutcome::InFlight { pose, .. } => renderer.apply_pose(&pose),
            TickOutcome::Completed { pose, .. } => {
                renderer.apply_pose(&pose);
                self.recompute_highlights(renderer);
                log::info!("arrived at {}", self.status_text());
            }
        }
        outcome
    }

    /// Sets the scene length scale used for marker sizing, usually the
    /// bounding diagonal of the loaded point cloud, and restyles the markers.
    pub fn set_scene_length_scale(&mut self, length_scale: f32, renderer: &mut dyn SceneRenderer) {
        if length_scale.is_finite() && length_scale > 0.0 {
            self.length_scale = length_scale;
            self.push_markers(renderer);
        } else {
            log::warn!("ignoring invalid scene length scale {length_scale}");
        }
    }

    /// Takes the marker length scale from the loaded scene. Does nothing if
    /// the scene has no usable extent yet.
    pub fn apply_scene_extent<E: SceneExtent + ?Sized>(
        &mut self,
        extent: &E,
        renderer: &mut dyn SceneRenderer,
    ) {
        match extent.length_scale() {
            Some(length_scale) => self.set_scene_length_scale(length_scale, renderer),
            None => log::debug!(
                "scene extent unavailable, keeping length scale {}",
                self.length_scale
            ),
        }
    }

    /// Shows or hides the view graph edges.
    pub fn set_show_view_graph(&mut self, show: bool, renderer: &mut dyn SceneRenderer) {
        self.options.show_view_graph = show;
        self.push_view_graph(renderer);
    }

    /// Camera currently occupied.
    #[must_use]
    pub fn current_camera(&self) -> Option<usize> {
        self.navigator.current_index()
    }

    /// Returns true while a transition is in flight.
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.navigator.is_transitioning()
    }

    /// Navigation state machine.
    #[must_use]
    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Proximity graph between cameras.
    #[must_use]
    pub fn view_graph(&self) -> &ViewGraph {
        &self.graph
    }

    /// Highlight class per camera, as of the last completed transition.
    #[must_use]
    pub fn highlights(&self) -> &[Highlight] {
        &self.highlights
    }

    /// Navigable poses.
    #[must_use]
    pub fn poses(&self) -> &[CameraPose] {
        self.navigator.poses()
    }

    /// Records skipped while loading.
    #[must_use]
    pub fn rejected(&self) -> &[(usize, PoseError)] {
        &self.rejected
    }

    /// Options the tour was created with.
    #[must_use]
    pub fn options(&self) -> &TourOptions {
        &self.options
    }

    /// Whether the point cloud is shown.
    #[must_use]
    pub fn point_cloud_visible(&self) -> bool {
        self.point_cloud_visible
    }

    /// Camera under the pointer, if any.
    #[must_use]
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Length scale used for marker sizing.
    #[must_use]
    pub fn length_scale(&self) -> f32 {
        self.length_scale
    }

    /// Marker radius for a highlight class.
    #[must_use]
    pub fn marker_radius(&self, highlight: Highlight) -> f32 {
        let base = if self.options.marker_size_is_relative {
            self.options.marker_size * self.length_scale
        } else {
            self.options.marker_size
        };
        base * self.options.highlight.scale(highlight)
    }

    /// Style of every marker under the current highlights.
    #[must_use]
    pub fn marker_styles(&self) -> Vec<MarkerStyle> {
        self.poses()
            .iter()
            .zip(&self.highlights)
            .map(|(pose, &highlight)| MarkerStyle {
                index: pose.index(),
                position: pose.position(),
                highlight,
                color: self.options.highlight.color(highlight),
                radius: self.marker_radius(highlight),
            })
            .collect()
    }

    /// One-line description of where the viewer is, for a status bar.
    #[must_use]
    pub fn status_text(&self) -> String {
        let total = self.navigator.len();
        if let Some(transition) = self.navigator.state().transition() {
            return format!("Moving to camera {}/{total}", transition.to + 1);
        }
        match self.navigator.current_pose() {
            Some(pose) => format!(
                "Camera {}/{total}: {}",
                pose.index() + 1,
                pose.display_name()
            ),
            None => "No cameras loaded".to_string(),
        }
    }

    fn recompute_highlights(&mut self, renderer: &mut dyn SceneRenderer) {
        self.highlights = classify(
            self.navigator.poses(),
            &self.graph,
            self.navigator.current_index(),
        );
        self.push_markers(renderer);
    }

    fn push_markers(&self, renderer: &mut dyn SceneRenderer) {
        renderer.update_markers(&self.marker_styles());
    }

    fn push_view_graph(&self, renderer: &mut dyn SceneRenderer) {
        if self.options.show_view_graph {
            renderer.draw_view_graph(&self.graph.line_segments(self.navigator.poses()));
        } else {
            renderer.draw_view_graph(&[]);
        }
    }
}

/// Bounding diagonal of the camera centers, or 1.0 when it is degenerate.
fn camera_length_scale(poses: &[CameraPose]) -> f32 {
    let centers: Vec<Vec3> = poses.iter().map(CameraPose::position).collect();
    centers.as_slice().length_scale().unwrap_or(1.0)
}
