//! Integration tests for camtour.
//!
//! A recording renderer stands in for the host's scene graph, and time is
//! simulated, so every test is deterministic.

use camtour::*;
use proptest::prelude::*;

/// Renderer that records everything the tour tells it.
#[derive(Default)]
struct RecordingRenderer {
    poses: Vec<RenderablePose>,
    point_cloud_visible: Option<bool>,
    markers: Vec<MarkerStyle>,
    marker_updates: usize,
    segments: Vec<(Vec3, Vec3)>,
    hovered: Option<usize>,
    /// Marker returned by `pick_marker`, regardless of the screen point.
    pick: Option<usize>,
}

impl SceneRenderer for RecordingRenderer {
    fn apply_pose(&mut self, pose: &RenderablePose) {
        self.poses.push(*pose);
    }

    fn set_point_cloud_visible(&mut self, visible: bool) {
        self.point_cloud_visible = Some(visible);
    }

    fn update_markers(&mut self, markers: &[MarkerStyle]) {
        self.markers = markers.to_vec();
        self.marker_updates += 1;
    }

    fn draw_view_graph(&mut self, segments: &[(Vec3, Vec3)]) {
        self.segments = segments.to_vec();
    }

    fn pick_marker(&self, _screen: Vec2) -> Option<usize> {
        self.pick
    }

    fn set_hovered_marker(&mut self, index: Option<usize>) {
        self.hovered = index;
    }
}

impl RecordingRenderer {
    fn last_pose(&self) -> RenderablePose {
        *self.poses.last().expect("no pose applied")
    }

    fn highlights(&self) -> Vec<Highlight> {
        self.markers.iter().map(|m| m.highlight).collect()
    }
}

const SOURCE: &str = r#"{
    "cameras": [
        { "id": 10, "label": "IMG_0010", "center": [0, 0, 0],  "rotation": [[1,0,0],[0,1,0],[0,0,1]] },
        { "id": 11, "label": "IMG_0011", "center": [1, 0, 0],  "rotation": [[1,0,0],[0,1,0],[0,0,1]] },
        { "id": 12, "label": "IMG_0012", "center": [10, 0, 0], "rotation": [[0,0,-1],[0,1,0],[1,0,0]] }
    ],
    "metadata": { "total_cameras": 3, "description": "test scene" }
}"#;

fn options() -> TourOptions {
    TourOptions::default()
        .with_transition_duration(1.0)
        .with_max_connection_distance(1.5)
}

fn started_tour() -> (Tour, RecordingRenderer) {
    let source = PoseSource::from_json_str(SOURCE).expect("valid source");
    let mut tour = Tour::from_source(&source, options()).expect("valid tour");
    let mut renderer = RecordingRenderer::default();
    tour.start(&mut renderer);
    (tour, renderer)
}

#[test]
fn test_start_places_first_camera_without_animation() {
    let (tour, renderer) = started_tour();

    assert_eq!(renderer.poses.len(), 1);
    assert_eq!(renderer.last_pose(), tour.poses()[0].renderable());
    assert_eq!(renderer.point_cloud_visible, Some(true));
    assert_eq!(renderer.segments, vec![(Vec3::ZERO, Vec3::X)]);
    assert_eq!(
        renderer.highlights(),
        vec![Highlight::Current, Highlight::Adjacent, Highlight::Distant]
    );
    assert_eq!(tour.status_text(), "Camera 1/3: IMG_0010");
}

#[test]
fn test_navigation_scenario() {
    let (mut tour, mut renderer) = started_tour();
    let start = tour.poses()[0].renderable();
    let end = tour.poses()[2].renderable();

    assert!(tour.handle_command(TourCommand::NavigateTo(2), 0.0, &mut renderer));
    assert!(tour.is_transitioning());

    tour.tick(0.0, &mut renderer);
    assert!(renderer.last_pose().abs_diff_eq(&start, 1e-5));

    tour.tick(0.5, &mut renderer);
    let mid = renderer.last_pose();
    assert!(mid.position.x > start.position.x && mid.position.x < end.position.x);
    assert!(!mid.abs_diff_eq(&start, 1e-3));
    assert!(!mid.abs_diff_eq(&end, 1e-3));
    // Highlights are not recomputed mid-flight.
    assert_eq!(renderer.marker_updates, 1);

    let outcome = tour.tick(1.0, &mut renderer);
    assert!(matches!(outcome, TickOutcome::Completed { index: 2, .. }));
    assert_eq!(renderer.last_pose(), end);
    assert!(!tour.is_transitioning());
    assert_eq!(tour.current_camera(), Some(2));
    assert_eq!(renderer.marker_updates, 2);
    assert_eq!(
        renderer.highlights(),
        vec![Highlight::Distant, Highlight::Distant, Highlight::Current]
    );
}

#[test]
fn test_requests_during_transition_are_dropped() {
    let (mut tour, mut renderer) = started_tour();
    assert!(tour.handle_command(TourCommand::NavigateTo(2), 0.0, &mut renderer));
    assert!(!tour.handle_key(Key::Home, 0.1, &mut renderer));
    assert!(!tour.handle_command(TourCommand::NavigateTo(1), 0.2, &mut renderer));

    let transition = tour.navigator().state().transition().unwrap();
    assert_eq!((transition.from, transition.to), (0, 2));

    tour.tick(2.0, &mut renderer);
    assert_eq!(tour.current_camera(), Some(2));
}

#[test]
fn test_out_of_range_and_current_targets_are_noops() {
    let (mut tour, mut renderer) = started_tour();
    let before = tour.navigator().state();

    assert!(!tour.handle_command(TourCommand::NavigateTo(0), 0.0, &mut renderer));
    assert!(!tour.handle_command(TourCommand::NavigateTo(3), 0.0, &mut renderer));
    assert!(!tour.handle_command(TourCommand::NavigateTo(usize::MAX), 0.0, &mut renderer));
    // Previous from the first camera has nowhere to go.
    assert!(!tour.handle_key(Key::Left, 0.0, &mut renderer));

    assert_eq!(tour.navigator().state(), before);
    assert_eq!(tour.tick(5.0, &mut renderer), TickOutcome::Idle);
}

#[test]
fn test_keyboard_walk() {
    let (mut tour, mut renderer) = started_tour();
    let mut now = 0.0;

    assert!(tour.handle_key(Key::Right, now, &mut renderer));
    now += 1.0;
    tour.tick(now, &mut renderer);
    assert_eq!(tour.current_camera(), Some(1));

    assert!(tour.handle_key(Key::End, now, &mut renderer));
    now += 1.0;
    tour.tick(now, &mut renderer);
    assert_eq!(tour.current_camera(), Some(2));

    // Next from the last camera does not wrap.
    assert!(!tour.handle_key(Key::Right, now, &mut renderer));

    assert!(tour.handle_key(Key::Home, now, &mut renderer));
    now += 1.0;
    tour.tick(now, &mut renderer);
    assert_eq!(tour.current_camera(), Some(0));
}

#[test]
fn test_toggle_point_cloud_works_mid_transition() {
    let (mut tour, mut renderer) = started_tour();
    tour.handle_command(TourCommand::NavigateTo(1), 0.0, &mut renderer);

    assert!(tour.handle_key(Key::P, 0.1, &mut renderer));
    assert_eq!(renderer.point_cloud_visible, Some(false));
    assert!(!tour.point_cloud_visible());
    assert!(tour.is_transitioning());

    tour.handle_command(TourCommand::TogglePointCloud, 0.2, &mut renderer);
    assert_eq!(renderer.point_cloud_visible, Some(true));
}

#[test]
fn test_click_and_hover_use_picking() {
    let (mut tour, mut renderer) = started_tour();

    renderer.pick = None;
    assert!(!tour.handle_click(Vec2::new(10.0, 10.0), 0.0, &mut renderer));

    renderer.pick = Some(1);
    assert_eq!(tour.handle_hover(Vec2::new(5.0, 5.0), &mut renderer), Some(1));
    assert_eq!(renderer.hovered, Some(1));

    assert!(tour.handle_click(Vec2::new(5.0, 5.0), 0.0, &mut renderer));
    tour.tick(1.0, &mut renderer);
    assert_eq!(tour.current_camera(), Some(1));

    renderer.pick = Some(42);
    assert_eq!(tour.handle_hover(Vec2::ZERO, &mut renderer), None);
    assert_eq!(renderer.hovered, None);
}

#[test]
fn test_scene_length_scale_resizes_markers() {
    let (mut tour, mut renderer) = started_tour();
    tour.set_scene_length_scale(100.0, &mut renderer);

    let current = renderer
        .markers
        .iter()
        .find(|m| m.highlight == Highlight::Current)
        .unwrap();
    let palette = &tour.options().highlight;
    assert!((current.radius - 0.01 * 100.0 * palette.current_scale).abs() < 1e-5);
    assert_eq!(current.color, palette.current_color);

    let updates = renderer.marker_updates;
    tour.set_scene_length_scale(f32::NAN, &mut renderer);
    assert_eq!(renderer.marker_updates, updates);
}

#[test]
fn test_hiding_view_graph_clears_segments() {
    let (mut tour, mut renderer) = started_tour();
    assert!(!renderer.segments.is_empty());
    tour.set_show_view_graph(false, &mut renderer);
    assert!(renderer.segments.is_empty());
}

#[test]
fn test_invalid_records_are_not_navigable() {
    let source = PoseSource::from_json_str(
        r#"{ "cameras": [
            { "center": [0, 0, 0], "rotation": [[1,0,0],[0,1,0],[0,0,1]] },
            { "center": [0, 0, 0], "rotation": [[1,1,0],[0,1,0],[0,0,1]] },
            { "center": [2, 0, 0], "rotation": [[1,0,0],[0,1,0],[0,0,1]] }
        ] }"#,
    )
    .unwrap();
    let tour = Tour::from_source(&source, options()).unwrap();

    assert_eq!(tour.poses().len(), 2);
    assert_eq!(tour.rejected().len(), 1);
    assert_eq!(tour.rejected()[0].0, 1);
    assert_eq!(tour.poses()[1].position(), Vec3::new(2.0, 0.0, 0.0));
}

#[test]
fn test_empty_tour_is_inert() {
    let mut tour = Tour::from_source(&PoseSource::default(), options()).unwrap();
    let mut renderer = RecordingRenderer::default();
    tour.start(&mut renderer);

    assert!(renderer.poses.is_empty());
    assert!(renderer.markers.is_empty());
    for key in [Key::Left, Key::Right, Key::Home, Key::End] {
        assert!(!tour.handle_key(key, 0.0, &mut renderer));
    }
    assert_eq!(tour.tick(1.0, &mut renderer), TickOutcome::Idle);
    assert_eq!(tour.current_camera(), None);
}

#[test]
fn test_agisoft_transforms_feed_a_tour() {
    let records = vec![
        CameraRecord::from_agisoft_transform("1 0 0 0  0 1 0 0  0 0 1 0  0 0 0 1")
            .unwrap()
            .with_label("A"),
        CameraRecord::from_agisoft_transform("1 0 0 -1  0 1 0 0  0 0 1 0  0 0 0 1")
            .unwrap()
            .with_label("B"),
    ];
    let tour = Tour::from_source(&PoseSource::new(records), options()).unwrap();
    assert_eq!(tour.poses()[1].position(), Vec3::new(1.0, 0.0, 0.0));
    assert!(tour.view_graph().are_connected(0, 1));
}

#[test]
fn test_options_from_json_drive_the_tour() {
    let options = TourOptions::from_json_str(
        r#"{ "transition_duration": 2.0, "max_connection_distance": 20.0, "initial_camera_index": 1 }"#,
    )
    .unwrap();
    let source = PoseSource::from_json_str(SOURCE).unwrap();
    let mut tour = Tour::from_source(&source, options).unwrap();
    let mut renderer = RecordingRenderer::default();
    tour.start(&mut renderer);

    assert_eq!(tour.current_camera(), Some(1));
    assert_eq!(tour.view_graph().len(), 3);

    tour.handle_command(TourCommand::NavigateTo(0), 0.0, &mut renderer);
    assert!(matches!(tour.tick(1.0, &mut renderer), TickOutcome::InFlight { .. }));
    assert!(matches!(tour.tick(2.0, &mut renderer), TickOutcome::Completed { index: 0, .. }));
}

#[test]
fn test_agisoft_xml_feeds_a_tour() {
    let xml = r#"<document><chunk><cameras>
        <camera id="10" label="IMG_0010"><transform>1 0 0 0 0 1 0 0 0 0 1 0 0 0 0 1</transform></camera>
        <camera id="11" enabled="false"><transform>1 0 0 -9 0 1 0 0 0 0 1 0 0 0 0 1</transform></camera>
        <camera id="12" label="IMG_0012"/>
        <camera id="13"><transform>1 0 0 -1 0 1 0 0 0 0 1 0 0 0 0 1</transform></camera>
    </cameras></chunk></document>"#;
    let source = PoseSource::from_agisoft_xml(xml).unwrap();
    let mut tour = Tour::from_source(&source, options()).unwrap();
    let mut renderer = RecordingRenderer::default();
    tour.start(&mut renderer);

    assert_eq!(tour.poses().len(), 2);
    assert!(tour.rejected().is_empty());
    assert!(tour.view_graph().are_connected(0, 1));

    assert!(tour.handle_key(Key::End, 0.0, &mut renderer));
    tour.tick(1.0, &mut renderer);
    assert_eq!(tour.status_text(), "Camera 2/2: Camera_13");
}

#[test]
fn test_status_text_names_unlabeled_camera_by_id() {
    let source = PoseSource::from_json_str(
        r#"{ "cameras": [ { "id": 10, "center": [0, 0, 0], "rotation": [[1,0,0],[0,1,0],[0,0,1]] } ] }"#,
    )
    .unwrap();
    let tour = Tour::from_source(&source, options()).unwrap();
    assert_eq!(tour.status_text(), "Camera 1/1: Camera_10");
}

#[test]
fn test_strict_tour_refuses_invalid_and_empty_sources() {
    let source = PoseSource::from_json_str(SOURCE).unwrap();
    assert!(Tour::from_source_strict(&source, options()).is_ok());

    let mut broken = source.clone();
    broken.cameras[1].rotation = [[1.0, 1.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
    assert!(matches!(
        Tour::from_source_strict(&broken, options()),
        Err(TourError::InvalidPose { index: 1, .. })
    ));

    assert!(matches!(
        Tour::from_source_strict(&PoseSource::default(), options()),
        Err(TourError::EmptyPoseSet)
    ));
}

#[test]
fn test_scene_extent_sets_marker_scale() {
    let (mut tour, mut renderer) = started_tour();
    let cloud = [Vec3::ZERO, Vec3::new(30.0, 40.0, 0.0), Vec3::new(5.0, 5.0, 5.0)];
    tour.apply_scene_extent(cloud.as_slice(), &mut renderer);
    assert!((tour.length_scale() - 50.0).abs() < 1e-4);

    let updates = renderer.marker_updates;
    let empty: [Vec3; 0] = [];
    tour.apply_scene_extent(empty.as_slice(), &mut renderer);
    assert!((tour.length_scale() - 50.0).abs() < 1e-4);
    assert_eq!(renderer.marker_updates, updates);
}

#[test]
fn test_invalid_duration_is_refused() {
    let options = TourOptions::default().with_transition_duration(f32::NAN);
    let source = PoseSource::from_json_str(SOURCE).unwrap();
    assert!(matches!(
        Tour::from_source(&source, options),
        Err(TourError::InvalidOption(_))
    ));
}

#[derive(Debug, Clone)]
enum Input {
    Command(TourCommand),
    Tick(f64),
}

fn arb_input() -> impl Strategy<Value = Input> {
    prop_oneof![
        (0usize..5).prop_map(|i| Input::Command(TourCommand::NavigateTo(i))),
        Just(Input::Command(TourCommand::Previous)),
        Just(Input::Command(TourCommand::Next)),
        Just(Input::Command(TourCommand::First)),
        Just(Input::Command(TourCommand::Last)),
        Just(Input::Command(TourCommand::TogglePointCloud)),
        (0.0f64..0.7).prop_map(Input::Tick),
    ]
}

proptest! {
    #[test]
    fn prop_state_stays_consistent(inputs in prop::collection::vec(arb_input(), 1..60)) {
        let (mut tour, mut renderer) = started_tour();
        let mut now = 0.0;

        for input in inputs {
            let before = tour.navigator().state().transition();
            match input {
                Input::Command(command) => {
                    tour.handle_command(command, now, &mut renderer);
                    // An in-flight transition is never replaced.
                    if let Some(before) = before {
                        prop_assert_eq!(tour.navigator().state().transition(), Some(before));
                    }
                }
                Input::Tick(dt) => {
                    now += dt;
                    tour.tick(now, &mut renderer);
                }
            }

            let current = tour.current_camera().unwrap();
            prop_assert!(current < tour.poses().len());
            if let Some(transition) = tour.navigator().state().transition() {
                prop_assert_eq!(transition.from, current);
                prop_assert!(transition.to != transition.from);
            }
            if let Some(pose) = renderer.poses.last() {
                prop_assert!((pose.orientation.length() - 1.0).abs() < 1e-4);
            }
        }
    }
}
