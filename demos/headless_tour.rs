#![allow(clippy::cast_precision_loss)]
//! Runs a camera tour without a window.
//!
//! Loads a pose source (JSON, or an Agisoft `.xml` camera export) given on
//! the command line, or builds a ring of cameras looking at the origin, then
//! walks through every camera with a simulated 60 Hz clock and logs what a
//! renderer would receive.
//!
//! ```text
//! RUST_LOG=info cargo run --example headless_tour -- cameras.json
//! ```

use camtour::{
    CameraRecord, MarkerStyle, PoseSource, RenderablePose, SceneRenderer, TickOutcome, Tour,
    TourCommand, TourOptions, Vec2, Vec3,
};

/// Renderer that only logs.
struct LogRenderer {
    frames: usize,
}

impl SceneRenderer for LogRenderer {
    fn apply_pose(&mut self, pose: &RenderablePose) {
        self.frames += 1;
        log::trace!(
            "camera at ({:.2}, {:.2}, {:.2}) looking at ({:.2}, {:.2}, {:.2})",
            pose.position.x,
            pose.position.y,
            pose.position.z,
            pose.orbit_target.x,
            pose.orbit_target.y,
            pose.orbit_target.z
        );
    }

    fn set_point_cloud_visible(&mut self, visible: bool) {
        log::info!("point cloud visible: {visible}");
    }

    fn update_markers(&mut self, markers: &[MarkerStyle]) {
        for marker in markers {
            log::debug!(
                "marker {}: {:?} (radius {:.3})",
                marker.index,
                marker.highlight,
                marker.radius
            );
        }
    }

    fn draw_view_graph(&mut self, segments: &[(Vec3, Vec3)]) {
        log::info!("view graph has {} edges", segments.len());
    }

    fn pick_marker(&self, _screen: Vec2) -> Option<usize> {
        None
    }
}

/// Cameras evenly spaced on a circle, all looking at the origin.
fn ring_source(count: usize, radius: f32) -> PoseSource {
    let cameras = (0..count)
        .map(|i| {
            let angle = i as f32 / count as f32 * std::f32::consts::TAU;
            let center = Vec3::new(radius * angle.cos(), 1.0, radius * angle.sin());
            CameraRecord::look_at(center, Vec3::ZERO, Vec3::Y).with_label(format!("ring_{i:02}"))
        })
        .collect();
    PoseSource::new(cameras)
}

fn main() -> camtour::Result<()> {
    camtour::init_logging();

    let options = TourOptions::default()
        .with_transition_duration(1.5)
        .with_max_connection_distance(3.0);

    let source = match std::env::args().nth(1) {
        Some(path) if path.ends_with(".xml") => PoseSource::from_agisoft_xml_path(path)?,
        Some(path) => PoseSource::from_path(path)?,
        None => ring_source(12, 5.0),
    };

    let mut tour = Tour::from_source(&source, options)?;
    let mut renderer = LogRenderer { frames: 0 };
    tour.start(&mut renderer);

    let dt = 1.0 / 60.0;
    let mut now = 0.0;
    for _ in 1..tour.poses().len() {
        if !tour.handle_command(TourCommand::Next, now, &mut renderer) {
            break;
        }
        loop {
            now += dt;
            if let TickOutcome::Completed { .. } = tour.tick(now, &mut renderer) {
                break;
            }
        }
        log::info!("{}", tour.status_text());
    }

    log::info!(
        "visited {} cameras in {:.1}s ({} frames)",
        tour.poses().len(),
        now,
        renderer.frames
    );
    Ok(())
}
