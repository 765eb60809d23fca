//! Headless integration tests for the ballroll plugin.

use bevy::input::ButtonState;
use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::prelude::*;

use crate::bevy::test_utils::TestApp;
use crate::bevy::*;
use crate::config::Tuning;
use crate::controller::GamePhase;
use crate::input::MoveKey;
use crate::level::{Checkpoint, LevelConfig, SessionCard};

fn level(ball_start: [f32; 3]) -> LevelConfig {
    LevelConfig {
        name: "test-track".to_string(),
        ball_start,
        respawn_points: vec![[0.0, 6.95, 0.0], [-20.81, 6.95, -0.07]],
        checkpoints: Vec::new(),
        goal: [500.0, 500.0, 500.0],
        session_cards: Vec::new(),
        finish_route: "/register".to_string(),
        track_scene: None,
        ball_scene: None,
        tuning: Tuning::default(),
    }
}

fn game_with(level: LevelConfig) -> TestApp {
    let mut app = TestApp::new();
    app.enter_game_mode();
    app.load_level(level, None);
    app
}

fn app_mode(app: &TestApp) -> AppMode {
    *app.world().resource::<State<AppMode>>().get()
}

#[test]
fn test_init_game_enters_game_mode() {
    let mut app = TestApp::new();
    assert_eq!(app_mode(&app), AppMode::Idle);
    app.enter_game_mode();
    assert_eq!(app_mode(&app), AppMode::Game);
}

#[test]
fn test_load_level_creates_controller() {
    let mut app = TestApp::new();
    app.enter_game_mode();

    app.push_command(GameCommand::LoadLevel {
        level: Box::new(level([0.0, 10.0, 0.0])),
        track: None,
    });
    let loaded = app.update_collecting::<LevelLoadedEvent>(1);

    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].level_name, "test-track");
    let controller = app.controller().expect("controller");
    assert_eq!(controller.phase(), GamePhase::Running);
    assert_eq!(app.physics().world.rigid_body_set.len(), 1);

    let summary = app.stores().session.get_summary();
    assert_eq!(summary.level_name, "test-track");
    assert!(summary.guide_visible);
}

#[test]
fn test_invalid_level_is_rejected() {
    let mut app = TestApp::new();
    app.enter_game_mode();

    let mut broken = level([0.0, 10.0, 0.0]);
    broken.respawn_points.clear();
    app.push_command(GameCommand::LoadLevel {
        level: Box::new(broken),
        track: None,
    });
    let loaded = app.update_collecting::<LevelLoadedEvent>(1);

    assert!(loaded.is_empty());
    assert!(app.controller().is_none());
}

#[test]
fn test_yield_defers_commands_to_next_frame() {
    let mut app = TestApp::new();
    app.push_command(GameCommand::InitGame);
    app.push_command(GameCommand::Yield);
    app.push_command(GameCommand::LoadLevel {
        level: Box::new(level([0.0, 10.0, 0.0])),
        track: None,
    });

    app.update();
    assert!(app.controller().is_none());
    assert!(!app.world().resource::<CommandQueue>().is_empty());

    app.update();
    assert!(app.controller().is_some());
    assert_eq!(app_mode(&app), AppMode::Game);
}

#[test]
fn test_ball_falls_under_gravity_each_frame() {
    let mut app = game_with(level([0.0, 10.0, 0.0]));
    let start = app.controller().unwrap().ball_pose().unwrap().position;

    app.update_n(30);

    let now = app.controller().unwrap().ball_pose().unwrap().position;
    assert!(now.y < start.y - 0.5, "{start} -> {now}");
}

#[test]
fn test_pause_freezes_and_resume_continues() {
    let mut app = game_with(level([0.0, 10.0, 0.0]));

    app.push_command(GameCommand::Pause);
    let paused = app.update_collecting::<PauseChangedEvent>(1);
    assert_eq!(paused.len(), 1);
    assert!(paused[0].paused);
    assert_eq!(app.controller().unwrap().phase(), GamePhase::Paused);

    let before = app.controller().unwrap().ball_pose().unwrap().position;
    app.update_n(20);
    assert_eq!(app.controller().unwrap().ball_pose().unwrap().position, before);
    assert_eq!(app.stores().session.get_summary().phase, GamePhase::Paused);

    app.push_command(GameCommand::TogglePause);
    let resumed = app.update_collecting::<PauseChangedEvent>(1);
    assert_eq!(resumed.len(), 1);
    assert!(!resumed[0].paused);

    app.update_n(10);
    let after = app.controller().unwrap().ball_pose().unwrap().position;
    assert!(after.y < before.y);
}

#[test]
fn test_fall_off_publishes_respawn() {
    let mut app = game_with(level([0.0, 0.0, 0.0]));

    let respawned = app.update_collecting::<BallRespawnedEvent>(60);

    assert!(!respawned.is_empty());
    assert_eq!(respawned[0].point, 0);
    assert_eq!(respawned[0].position, Vec3::new(0.0, 8.95, 0.0));
    assert!(app.stores().session.get_summary().respawn_count >= 1);
}

#[test]
fn test_checkpoint_entry_publishes_card() {
    let mut checkpoint_level = level([0.0, 5.0, 0.0]);
    checkpoint_level.checkpoints = vec![Checkpoint {
        id: "session-1".to_string(),
        position: [0.0, 5.0, 0.0],
    }];
    checkpoint_level.session_cards = vec![SessionCard {
        checkpoint_id: "session-1".to_string(),
        title: "Session 1".to_string(),
        description: "Description for session 1".to_string(),
        image_url: "/images/session-1.jpg".to_string(),
    }];
    let mut app = game_with(checkpoint_level);

    let entered = app.update_collecting::<CheckpointEnteredEvent>(20);

    assert_eq!(entered.len(), 1);
    assert_eq!(entered[0].checkpoint_id, "session-1");
    assert_eq!(entered[0].card.as_ref().map(|c| c.title.as_str()), Some("Session 1"));

    let summary = app.stores().session.get_summary();
    assert_eq!(summary.phase, GamePhase::AtCheckpoint);
    assert_eq!(summary.checkpoint_id.as_deref(), Some("session-1"));
    assert!(summary.card.is_some());
    assert_eq!(summary.checkpoint_progress, Some(1.0));

    let released = app.update_collecting::<CheckpointReleasedEvent>(60);
    assert_eq!(released.len(), 1);
    assert_eq!(app.controller().unwrap().phase(), GamePhase::Running);
    let summary = app.stores().session.get_summary();
    assert!(summary.card.is_none());
    assert!(summary.checkpoint_progress.is_none());
}

#[test]
fn test_win_runs_once_and_navigates() {
    let mut goal_level = level([0.0, 5.0, 0.0]);
    goal_level.goal = [0.0, 5.0, 0.0];
    let mut app = TestApp::new();
    app.enter_game_mode();

    // The ball starts inside the goal box, so the win fires on the load frame.
    app.push_command(GameCommand::LoadLevel {
        level: Box::new(goal_level),
        track: None,
    });
    let won = app.update_collecting::<GameWonEvent>(1);
    assert_eq!(won.len(), 1);
    assert_eq!(app.controller().unwrap().phase(), GamePhase::Finishing);

    let navigated = app.update_collecting::<NavigateEvent>(300);
    assert_eq!(navigated.len(), 1);
    assert_eq!(navigated[0].route, "/register");

    let controller = app.controller().unwrap();
    assert_eq!(controller.phase(), GamePhase::Finished);
    assert!(controller.win_latched());

    let summary = app.stores().session.get_summary();
    assert_eq!(summary.finished_route.as_deref(), Some("/register"));

    // Nothing moves or fires after the sequence is done.
    let settled = controller.ball_pose().unwrap().position;
    assert!(app.update_collecting::<GameWonEvent>(30).is_empty());
    assert_eq!(app.controller().unwrap().ball_pose().unwrap().position, settled);
}

#[test]
fn test_key_press_moves_input_and_dismisses_guide() {
    let mut app = game_with(level([0.0, 10.0, 0.0]));
    assert!(app.world().resource::<ControlGuide>().visible);

    app.world_mut().write_message(KeyboardInput {
        key_code: KeyCode::KeyW,
        logical_key: Key::Character("w".into()),
        state: ButtonState::Pressed,
        text: None,
        repeat: false,
        window: Entity::PLACEHOLDER,
    });
    let dismissed = app.update_collecting::<GuideDismissedEvent>(1);

    assert_eq!(dismissed.len(), 1);
    assert!(!app.world().resource::<ControlGuide>().visible);
    assert!(app.world().resource::<InputStateRes>().0.is_held(MoveKey::Forward));
    assert!(!app.stores().session.get_summary().guide_visible);

    // A second press does not fire again.
    app.world_mut().write_message(KeyboardInput {
        key_code: KeyCode::KeyW,
        logical_key: Key::Character("w".into()),
        state: ButtonState::Released,
        text: None,
        repeat: false,
        window: Entity::PLACEHOLDER,
    });
    app.update();
    assert!(!app.world().resource::<InputStateRes>().0.is_held(MoveKey::Forward));
}

#[test]
fn test_ball_mesh_and_camera_follow_controller() {
    let mut app = game_with(level([0.0, 10.0, 0.0]));
    let ball = app.world_mut().spawn((Transform::default(), BallMesh)).id();
    let camera = app.world_mut().spawn((Transform::default(), MainCamera)).id();

    app.update();

    let controller = app.controller().unwrap();
    let pose = controller.ball_pose().unwrap();
    let chase = controller.camera().look_transform();

    let ball_transform = app.world().get::<Transform>(ball).unwrap();
    assert_eq!(ball_transform.translation, pose.position);
    assert_eq!(ball_transform.rotation, pose.rotation);

    let camera_transform = app.world().get::<Transform>(camera).unwrap();
    assert_eq!(camera_transform.translation, chase.translation);
    assert_eq!(camera_transform.translation - pose.position, Vec3::new(6.0, 8.0, -8.0));
}

#[test]
fn test_clear_mode_tears_down_level() {
    let mut app = game_with(level([0.0, 10.0, 0.0]));
    let ball = app.world_mut().spawn((Transform::default(), BallMesh)).id();

    app.push_command(GameCommand::ClearMode);
    app.update_n(2);

    assert_eq!(app_mode(&app), AppMode::Idle);
    assert!(app.controller().is_none());
    assert_eq!(app.physics().world.rigid_body_set.len(), 0);
    assert!(app.world().get_entity(ball).is_err());
    assert_eq!(app.stores().session.get_summary().level_name, "");
}

#[test]
fn test_reloading_level_replaces_ball() {
    let mut app = game_with(level([0.0, 10.0, 0.0]));
    app.update_n(5);

    app.load_level(level([3.0, 20.0, 0.0]), None);

    assert_eq!(app.physics().world.rigid_body_set.len(), 1);
    let position = app.controller().unwrap().ball_pose().unwrap().position;
    assert!((position.x - 3.0).abs() < 1e-4);
}
