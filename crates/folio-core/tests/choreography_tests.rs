// Host-side scenario tests across the store, tracker, camera, mood engine,
// diagram builder and modal controller.

use folio_core::constants::BASE_FOV_DEG;
use folio_core::*;
use glam::{Vec2, Vec3};

const DT: f32 = 1.0 / 60.0;
const PANEL: Rect = Rect::new(320.0, 100.0, 640.0, 480.0);

fn settle(
    camera: &mut CameraChoreographer,
    mood: &mut MoodEngine,
    state: &SceneState,
    section: SectionId,
    frames: usize,
) -> CameraFrame {
    let mut frame = None;
    for _ in 0..frames {
        let snap = state.snapshot();
        frame = Some(camera.update(
            DT,
            CameraInputs {
                section,
                project_active: snap.active_project.is_some(),
                pointer: Vec2::ZERO,
            },
        ));
        mood.update_section(DT, section, snap.active_project, snap.hover_project);
    }
    frame.expect("at least one frame")
}

fn hero_base() -> Vec<Vec3> {
    geometry::icosphere(1.0, 2).positions
}

#[test]
fn every_section_converges_camera_and_mood() {
    let state = SceneState::new();
    let mut camera = CameraChoreographer::new(SectionId::Home);
    let mut mood = MoodEngine::new(hero_base(), SectionId::Home);
    for section in SectionId::ALL {
        let frame = settle(&mut camera, &mut mood, &state, section, 400);
        let pose = camera_pose(section);
        assert!(frame.eye.distance(pose.position) < 1e-3, "{section:?}");
        assert!((frame.fov_deg - BASE_FOV_DEG).abs() < 1e-3);
        let want = material_mood(section);
        let got = mood.current();
        assert!((got.roughness - want.roughness).abs() < 1e-3, "{section:?}");
        assert!((got.clearcoat_roughness - want.clearcoat_roughness).abs() < 1e-3);
        assert!((got.deform_amplitude - want.deform_amplitude).abs() < 1e-3);
    }
}

#[test]
fn scrolling_to_skills_targets_skills_pose_and_mood() {
    let state = SceneState::new();
    let mut tracker = ScrollTracker::new();
    for id in SectionId::ALL {
        tracker.register(id);
    }
    let samples = SectionId::ALL.iter().enumerate().map(|(i, id)| {
        let top = i as f64 * 900.0 - 3600.0;
        SectionSample {
            id: *id,
            top,
            bottom: top + 900.0,
        }
    });
    assert_eq!(tracker.update(samples, 400.0), Some(SectionId::Skills));

    let mut camera = CameraChoreographer::new(SectionId::Home);
    let mut mood = MoodEngine::new(hero_base(), SectionId::Home);
    settle(&mut camera, &mut mood, &state, tracker.current(), 1);
    assert_eq!(camera.aim(), CameraAim::Section(SectionId::Skills));
    assert_eq!(camera.aim().pose(), camera_pose(SectionId::Skills));

    settle(&mut camera, &mut mood, &state, tracker.current(), 600);
    assert_eq!(camera.base_position(), camera_pose(SectionId::Skills).position);
    let m = mood.current();
    let want = material_mood(SectionId::Skills);
    assert!((m.roughness - want.roughness).abs() < 1e-3);
}

#[test]
fn unknown_section_falls_back_to_default_mood() {
    let mut mood = MoodEngine::new(hero_base(), SectionId::Contact);
    for _ in 0..600 {
        mood.update(DT, mood_for_dom_id("not-a-section"), None, None);
    }
    let home = material_mood(SectionId::DEFAULT);
    assert!((mood.current().roughness - home.roughness).abs() < 1e-3);
    assert!((mood.current().deform_amplitude - home.deform_amplitude).abs() < 1e-3);
}

#[test]
fn clicking_nexus_card_records_and_then_consumes_origin() {
    let state = SceneState::new();
    let mut modal = ModalController::new(state.clone(), ModalTimings::default());
    let card = Rect::new(100.0, 200.0, 300.0, 120.0);
    modal.open(ProjectId::from_key("nexus").unwrap(), Some(card));
    assert_eq!(state.active_project(), Some(ProjectId::Nexus));
    assert_eq!(state.transition_origin(), Some(card));

    modal.panel_mounted(PANEL);
    let mut opened = false;
    for _ in 0..60 {
        opened |= modal.tick(DT) == Some(ModalEvent::Opened);
    }
    assert!(opened);
    assert_eq!(state.transition_origin(), None);
    assert_eq!(state.active_project(), Some(ProjectId::Nexus));
}

#[test]
fn open_then_immediate_close_always_cleans_up() {
    for ticks_before_close in [0usize, 1, 5, 100] {
        let state = SceneState::new();
        let mut modal = ModalController::new(state.clone(), ModalTimings::default());
        let card = Rect::new(10.0, 10.0, 200.0, 80.0);
        modal.open(ProjectId::PulseForge, Some(card));
        if ticks_before_close > 0 {
            modal.panel_mounted(PANEL);
        }
        for _ in 0..ticks_before_close {
            modal.tick(DT);
        }
        if modal.request_close(Some(card), PANEL).is_none() {
            for _ in 0..60 {
                modal.tick(DT);
            }
        }
        assert_eq!(modal.phase(), ModalPhase::Closed, "{ticks_before_close}");
        assert_eq!(state.active_project(), None);
        assert_eq!(state.transition_origin(), None);
    }
}

#[test]
fn second_project_never_reuses_first_origin() {
    let state = SceneState::new();
    let mut modal = ModalController::new(state.clone(), ModalTimings::default());
    let card_a = Rect::new(100.0, 200.0, 300.0, 120.0);
    let card_b = Rect::new(500.0, 200.0, 300.0, 120.0);

    // A opens and closes before its panel ever mounted.
    modal.open(ProjectId::Nexus, Some(card_a));
    modal.request_close(None, PANEL);
    assert_eq!(state.transition_origin(), None);

    // B opened without a card rect (e.g. keyboard) must not start from A's.
    modal.open(ProjectId::InboxIq, None);
    let style = modal.panel_mounted(PANEL);
    assert_eq!(style, PanelStyle::RESTING);

    modal.request_close(None, PANEL);

    // B opened from its own card starts from B's rect.
    modal.open(ProjectId::InboxIq, Some(card_b));
    let style = modal.panel_mounted(PANEL);
    assert_eq!(style.transform.apply(PANEL), card_b);
}

#[test]
fn opening_during_close_wins_over_the_old_close() {
    let state = SceneState::new();
    let mut modal = ModalController::new(state.clone(), ModalTimings::default());
    let card_a = Rect::new(100.0, 200.0, 300.0, 120.0);
    let card_b = Rect::new(600.0, 220.0, 280.0, 110.0);
    modal.open(ProjectId::Nexus, Some(card_a));
    modal.panel_mounted(PANEL);
    for _ in 0..60 {
        modal.tick(DT);
    }
    assert_eq!(modal.request_close(Some(card_a), PANEL), None);
    modal.tick(DT);
    modal.open(ProjectId::PulseForge, Some(card_b));
    assert_eq!(state.active_project(), Some(ProjectId::PulseForge));
    assert_eq!(state.transition_origin(), Some(card_b));
    assert_eq!(modal.phase(), ModalPhase::Opening);
}

#[test]
fn escape_while_open_disables_close_until_tween_finishes() {
    let state = SceneState::new();
    let mut modal = ModalController::new(state.clone(), ModalTimings::default());
    let card = Rect::new(100.0, 200.0, 300.0, 120.0);
    modal.open(ProjectId::Nexus, Some(card));
    modal.panel_mounted(PANEL);
    for _ in 0..60 {
        modal.tick(DT);
    }
    assert_eq!(modal.request_close(Some(card), PANEL), None);
    assert_eq!(modal.phase(), ModalPhase::Closing);
    let mut frames = 0;
    while modal.tick(DT) != Some(ModalEvent::Closed) {
        assert!(modal.close_disabled());
        assert_eq!(state.active_project(), Some(ProjectId::Nexus));
        frames += 1;
        assert!(frames < 120, "close tween never finished");
    }
    assert!(!modal.close_disabled());
    assert_eq!(state.active_project(), None);
}

#[test]
fn exploded_diagram_matches_graph_spec() {
    for project in ProjectId::ALL {
        let graph = graph_for(project);
        let frame = build_frame(SceneContent::Exploded(project), 2.5);
        assert_eq!(frame.count(Primitive::Box), graph.nodes.len());
        assert_eq!(frame.connectors.len(), graph.edges.len());
        for (connector, edge) in frame.connectors.iter().zip(graph.edges) {
            let from = graph.nodes.iter().find(|n| n.id == edge.from).unwrap();
            let to = graph.nodes.iter().find(|n| n.id == edge.to).unwrap();
            assert_eq!(connector.from, from.position);
            assert_eq!(connector.to, to.position);
            assert_eq!(connector.points.first(), Some(&from.position));
            assert_eq!(connector.points.last(), Some(&to.position));
        }
    }
}

#[test]
fn active_project_switches_scene_and_camera_together() {
    let state = SceneState::new();
    let mut camera = CameraChoreographer::new(SectionId::Projects);
    let mut mood = MoodEngine::new(hero_base(), SectionId::Projects);
    state.set_active_project(Some(ProjectId::InboxIq));
    settle(&mut camera, &mut mood, &state, SectionId::Projects, 120);
    assert_eq!(camera.aim(), CameraAim::Inspect);
    assert_eq!(
        select_content(state.active_project(), SectionId::Projects),
        SceneContent::Exploded(ProjectId::InboxIq)
    );
    assert!(mood.hover_pull() > 0.9);

    state.set_active_project(None);
    settle(&mut camera, &mut mood, &state, SectionId::Projects, 120);
    assert_eq!(camera.aim(), CameraAim::Section(SectionId::Projects));
    assert_eq!(camera.base_position(), camera_pose(SectionId::Projects).position);
}
