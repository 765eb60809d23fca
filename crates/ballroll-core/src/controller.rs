//! Per-frame game loop controller.
//!
//! [`GameController::tick`] runs once per rendered frame and performs, in
//! order: the fall-off check, checkpoint logic (or the finish sequence),
//! fixed-step physics, movement, the ball pose snapshot, the chase camera
//! update and the win check.

use bevy::math::Vec3;
use serde::{Deserialize, Serialize};

use crate::ball::{Ball, BallState};
use crate::camera::ChaseCamera;
use crate::checkpoint::{CheckpointTracker, CheckpointUpdate};
use crate::config::Tuning;
use crate::finish::{FinishSequence, FinishUpdate};
use crate::input::InputState;
use crate::level::{Checkpoint, LevelConfig, LevelError, SessionCard};
use crate::movement::{apply_intent, apply_slope_damping, camera_basis, frame_scale};
use crate::physics::{PHYSICS_DT, PhysicsWorld};
use crate::respawn::nearest_point;

/// Slack added before flooring the accumulator so float drift does not drop
/// a step at exact multiples of the timestep.
const ACCUMULATOR_EPSILON: f64 = 1e-6;

/// Current phase of the game loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball is free and driven by input.
    #[default]
    Running,
    /// Simulation is frozen by the player.
    Paused,
    /// Ball is captured by a checkpoint.
    AtCheckpoint,
    /// Win latched, end sequence in progress.
    Finishing,
    /// End sequence complete.
    Finished,
}

/// Notifications produced by a controller tick.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Respawned { point: usize, position: Vec3 },
    CheckpointEntered { index: usize, id: String },
    CheckpointReleased { index: usize, id: String },
    PauseChanged { paused: bool },
    WinTriggered,
    GoalReached,
    Finished { route: String },
}

#[derive(Debug, Clone)]
pub struct GameController {
    level: LevelConfig,
    respawn_points: Vec<Vec3>,
    ball: Ball,
    phase: GamePhase,
    checkpoints: CheckpointTracker,
    finish: FinishSequence,
    camera: ChaseCamera,
    pose: Option<BallState>,
    accumulator: f64,
}

impl GameController {
    /// Validates the level and spawns the ball at its start position.
    pub fn new(world: &mut PhysicsWorld, level: LevelConfig) -> Result<Self, LevelError> {
        level.validate()?;

        let start = level.ball_start();
        let ball = Ball::spawn(world, start, &level.tuning);
        let camera = ChaseCamera::new(level.tuning.camera_offset(), start);

        tracing::info!(
            "[ballroll] Level '{}' ready: {} respawn points, {} checkpoints",
            level.name,
            level.respawn_points.len(),
            level.checkpoints.len()
        );

        Ok(Self {
            respawn_points: level.respawn_positions(),
            checkpoints: CheckpointTracker::new(level.checkpoints.len()),
            pose: ball.snapshot(world),
            level,
            ball,
            phase: GamePhase::Running,
            finish: FinishSequence::new(),
            camera,
            accumulator: 0.0,
        })
    }

    /// Advances the game by one rendered frame of `dt` seconds.
    pub fn tick(&mut self, world: &mut PhysicsWorld, input: &mut InputState, dt: f32) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if matches!(self.phase, GamePhase::Paused | GamePhase::Finished) {
            return events;
        }

        let dt = dt.max(0.0);
        // Physics never integrates more than `max_substeps` steps in a frame.
        #[allow(clippy::cast_precision_loss)]
        let scale = frame_scale(dt).min(self.level.tuning.max_substeps as f32);

        // 1. Fall-off
        if matches!(self.phase, GamePhase::Running | GamePhase::AtCheckpoint)
            && let Some(event) = self.check_fall_off(world, input)
        {
            events.push(event);
        }

        // 2. Checkpoints, or the finish sequence
        match self.phase {
            GamePhase::Running | GamePhase::AtCheckpoint => {
                self.update_checkpoints(world, dt, scale, &mut events);
            }
            GamePhase::Finishing => self.advance_finish(world, dt, scale, &mut events),
            GamePhase::Paused | GamePhase::Finished => {}
        }

        // 3. Physics
        if matches!(self.phase, GamePhase::Running | GamePhase::AtCheckpoint) {
            let steps = self.consume_steps(dt);
            world.step_n(steps);
            if self.phase == GamePhase::Running {
                apply_slope_damping(world, &self.ball, &self.level.tuning, scale);
            }
        }

        // 4. Movement
        if self.phase == GamePhase::Running
            && let Some(position) = self.ball.position(world)
        {
            let basis = camera_basis(position, self.camera.position);
            apply_intent(world, &self.ball, &input.intent(), basis, &self.level.tuning, scale);
        }

        // 5. Pose for mesh sync
        self.pose = self.ball.snapshot(world);

        // 6. Camera
        if let Some(pose) = self.pose {
            self.camera.follow(pose.position);
        }

        // 7. Win check
        if self.phase == GamePhase::Running
            && self
                .finish
                .try_trigger(world, &self.ball, self.level.goal(), &self.level.tuning)
        {
            self.phase = GamePhase::Finishing;
            events.push(GameEvent::WinTriggered);
        }

        events
    }

    fn update_checkpoints(&mut self, world: &mut PhysicsWorld, dt: f32, scale: f32, events: &mut Vec<GameEvent>) {
        let update = self.checkpoints.update(
            world,
            &self.ball,
            &self.level.checkpoints,
            &self.level.tuning,
            dt,
            scale,
        );

        match update {
            CheckpointUpdate::Idle => {}
            CheckpointUpdate::Captured(_) => {
                self.phase = GamePhase::AtCheckpoint;
            }
            CheckpointUpdate::Entered(index) => {
                let id = self.level.checkpoints[index].id.clone();
                tracing::info!("[checkpoint] Entered '{id}'");
                events.push(GameEvent::CheckpointEntered { index, id });
            }
            CheckpointUpdate::Released(index) => {
                let id = self.level.checkpoints[index].id.clone();
                tracing::info!("[checkpoint] Released '{id}'");
                self.phase = GamePhase::Running;
                events.push(GameEvent::CheckpointReleased { index, id });
            }
        }
    }

    fn advance_finish(&mut self, world: &mut PhysicsWorld, dt: f32, scale: f32, events: &mut Vec<GameEvent>) {
        let update = self.finish.advance(
            world,
            &self.ball,
            self.level.goal(),
            &self.level.tuning,
            dt,
            scale,
        );

        match update {
            FinishUpdate::Idle => {}
            FinishUpdate::GoalReached => events.push(GameEvent::GoalReached),
            FinishUpdate::Finished => {
                self.phase = GamePhase::Finished;
                events.push(GameEvent::Finished {
                    route: self.level.finish_route.clone(),
                });
            }
        }
    }

    /// Number of fixed steps owed for a frame of `dt` seconds.
    fn consume_steps(&mut self, dt: f32) -> u32 {
        let step = f64::from(PHYSICS_DT);
        self.accumulator += f64::from(dt);

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let owed = ((self.accumulator + ACCUMULATOR_EPSILON) / step).floor() as u32;
        let steps = owed.min(self.level.tuning.max_substeps);

        self.accumulator = (self.accumulator - f64::from(steps) * step).max(0.0);
        if steps < owed {
            // Drop the backlog after a long stall instead of catching up.
            self.accumulator = self.accumulator.min(step);
        }
        steps
    }

    /// Moves a ball that fell below the threshold to the nearest respawn point.
    pub fn check_fall_off(&mut self, world: &mut PhysicsWorld, input: &mut InputState) -> Option<GameEvent> {
        let position = self.ball.position(world)?;
        if position.y >= self.level.tuning.fall_threshold_y {
            return None;
        }

        let point = nearest_point(&self.respawn_points, position)?;
        let target = self.respawn_points[point] + Vec3::Y * self.level.tuning.respawn_height_offset;

        self.ball.set_position(world, target);
        self.ball.stop(world);
        input.clear_keys();

        tracing::info!(
            "[ballroll] Respawned at point {point} ({:.2}, {:.2}, {:.2})",
            target.x,
            target.y,
            target.z
        );
        Some(GameEvent::Respawned { point, position: target })
    }

    pub fn pause(&mut self) -> Option<GameEvent> {
        if self.phase != GamePhase::Running {
            return None;
        }
        self.phase = GamePhase::Paused;
        tracing::info!("[ballroll] Paused");
        Some(GameEvent::PauseChanged { paused: true })
    }

    pub fn resume(&mut self) -> Option<GameEvent> {
        if self.phase != GamePhase::Paused {
            return None;
        }
        self.phase = GamePhase::Running;
        tracing::info!("[ballroll] Resumed");
        Some(GameEvent::PauseChanged { paused: false })
    }

    pub fn toggle_pause(&mut self) -> Option<GameEvent> {
        match self.phase {
            GamePhase::Paused => self.resume(),
            _ => self.pause(),
        }
    }

    /// Logs the ball coordinates and returns them.
    pub fn log_ball_position(&self, world: &PhysicsWorld) -> Option<Vec3> {
        let p = self.ball.position(world)?;
        tracing::info!("[ballroll] Ball position: x={:.2}, y={:.2}, z={:.2}", p.x, p.y, p.z);
        Some(p)
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_attached(&self) -> bool {
        self.checkpoints.is_attached()
    }

    pub fn win_latched(&self) -> bool {
        self.finish.is_latched()
    }

    /// Checkpoint the ball is currently dwelling on.
    pub fn active_checkpoint(&self) -> Option<&Checkpoint> {
        self.checkpoints
            .dwelling_on()
            .and_then(|index| self.level.checkpoints.get(index))
    }

    pub fn active_card(&self) -> Option<&SessionCard> {
        self.active_checkpoint()
            .and_then(|checkpoint| self.level.card_for(&checkpoint.id))
    }

    pub fn checkpoint_progress(&self) -> Option<f32> {
        self.checkpoints.progress()
    }

    /// Ball pose captured at the end of the last tick.
    pub fn ball_pose(&self) -> Option<BallState> {
        self.pose
    }

    pub fn camera(&self) -> &ChaseCamera {
        &self.camera
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn level(&self) -> &LevelConfig {
        &self.level
    }

    pub fn tuning(&self) -> &Tuning {
        &self.level.tuning
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::MoveKey;
    use crate::level::{TrackGeometry, TrackMeshData};

    fn open_level() -> LevelConfig {
        LevelConfig {
            name: "test".to_string(),
            ball_start: [0.0, 10.0, 0.0],
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

    fn floor() -> TrackGeometry {
        TrackGeometry::new(vec![
            TrackMeshData::from_flat_buffers(
                "floor",
                &[
                    -50.0, 0.0, -50.0, //
                    50.0, 0.0, -50.0, //
                    50.0, 0.0, 50.0, //
                    -50.0, 0.0, 50.0,
                ],
                &[0, 2, 1, 0, 3, 2],
            )
            .unwrap(),
        ])
    }

    fn controller(level: LevelConfig, gravity: bool) -> (PhysicsWorld, GameController) {
        let mut world = PhysicsWorld::new();
        world.set_gravity_enabled(gravity);
        let controller = GameController::new(&mut world, level).unwrap();
        (world, controller)
    }

    #[test]
    fn test_new_rejects_invalid_level() {
        let mut world = PhysicsWorld::new();
        let level = LevelConfig {
            respawn_points: Vec::new(),
            ..open_level()
        };
        assert!(matches!(
            GameController::new(&mut world, level),
            Err(LevelError::NoRespawnPoints)
        ));
    }

    #[test]
    fn test_new_spawns_ball_at_start() {
        let (world, controller) = controller(open_level(), true);
        assert_eq!(controller.phase(), GamePhase::Running);
        assert_eq!(
            controller.ball().position(&world),
            Some(Vec3::new(0.0, 10.0, 0.0))
        );
        assert_eq!(controller.camera().target, Vec3::new(0.0, 10.0, 0.0));
    }

    #[test]
    fn test_fall_off_respawns_at_nearest_point() {
        let (mut world, mut controller) = controller(open_level(), true);
        let mut input = InputState::new();
        input.press(MoveKey::Forward);

        let ball = *controller.ball();
        ball.set_position(&mut world, Vec3::new(1.0, -2.0, 0.5));
        ball.set_linvel(&mut world, Vec3::new(3.0, -10.0, 1.0));
        ball.set_angvel(&mut world, Vec3::new(1.0, 1.0, 1.0));

        let event = controller.check_fall_off(&mut world, &mut input);

        assert_eq!(
            event,
            Some(GameEvent::Respawned {
                point: 0,
                position: Vec3::new(0.0, 8.95, 0.0)
            })
        );
        let p = ball.position(&world).unwrap();
        assert!((p - Vec3::new(0.0, 8.95, 0.0)).length() < 1e-5);
        assert_eq!(ball.linvel(&world), Some(Vec3::ZERO));
        assert_eq!(ball.angvel(&world), Some(Vec3::ZERO));
        assert!(!input.is_held(MoveKey::Forward));
    }

    #[test]
    fn test_fall_off_above_threshold_is_noop() {
        let (mut world, mut controller) = controller(open_level(), true);
        let mut input = InputState::new();
        input.press(MoveKey::Left);

        let ball = *controller.ball();
        ball.set_position(&mut world, Vec3::new(4.0, -0.5, 2.0));
        ball.set_linvel(&mut world, Vec3::new(1.0, -1.0, 0.0));

        assert!(controller.check_fall_off(&mut world, &mut input).is_none());
        assert_eq!(ball.position(&world), Some(Vec3::new(4.0, -0.5, 2.0)));
        assert_eq!(ball.linvel(&world), Some(Vec3::new(1.0, -1.0, 0.0)));
        assert!(input.is_held(MoveKey::Left));
    }

    #[test]
    fn test_tick_respawns_falling_ball() {
        let (mut world, mut controller) = controller(open_level(), true);
        let mut input = InputState::new();
        controller
            .ball()
            .set_position(&mut world, Vec3::new(-19.0, -3.0, 0.0));

        let events = controller.tick(&mut world, &mut input, PHYSICS_DT);

        assert!(matches!(
            events.first(),
            Some(GameEvent::Respawned { point: 1, .. })
        ));
    }

    #[test]
    fn test_capture_radius_pulls_without_attaching() {
        let mut level = open_level();
        level.checkpoints = vec![Checkpoint {
            id: "session-1".to_string(),
            position: [0.0, 10.0, 2.0],
        }];
        level.session_cards = vec![SessionCard {
            checkpoint_id: "session-1".to_string(),
            title: "Session 1".to_string(),
            description: "Description for session 1".to_string(),
            image_url: "/images/session-1.jpg".to_string(),
        }];
        let (mut world, mut controller) = controller(level, false);
        let mut input = InputState::new();

        controller.tick(&mut world, &mut input, PHYSICS_DT);

        let v = controller.ball().linvel(&world).unwrap();
        assert!(v.z > 0.0);
        assert!(!controller.is_attached());
        assert!(controller.active_card().is_none());
        assert_eq!(controller.phase(), GamePhase::Running);
    }

    #[test]
    fn test_checkpoint_cycle_publishes_card() {
        let mut level = open_level();
        level.checkpoints = vec![
            Checkpoint {
                id: "session-1".to_string(),
                position: [0.0, 10.0, 0.5],
            },
            Checkpoint {
                id: "session-2".to_string(),
                position: [0.0, 10.0, -0.5],
            },
        ];
        level.session_cards = vec![SessionCard {
            checkpoint_id: "session-1".to_string(),
            title: "Session 1".to_string(),
            description: "Description for session 1".to_string(),
            image_url: "/images/session-1.jpg".to_string(),
        }];
        let (mut world, mut controller) = controller(level, true);
        let mut input = InputState::new();

        let mut events = Vec::new();
        let mut saw_card = false;
        for _ in 0..600 {
            events.extend(controller.tick(&mut world, &mut input, PHYSICS_DT));
            if controller.phase() == GamePhase::AtCheckpoint {
                assert!(controller.is_attached());
            }
            if let Some(card) = controller.active_card() {
                assert_eq!(card.title, "Session 1");
                saw_card = true;
            }
            if matches!(events.last(), Some(GameEvent::CheckpointReleased { .. })) {
                break;
            }
        }

        assert!(saw_card);
        assert_eq!(
            events,
            vec![
                GameEvent::CheckpointEntered {
                    index: 0,
                    id: "session-1".to_string()
                },
                GameEvent::CheckpointReleased {
                    index: 0,
                    id: "session-1".to_string()
                },
            ]
        );
        assert_eq!(controller.phase(), GamePhase::Running);
        assert!(!controller.is_attached());
    }

    #[test]
    fn test_second_checkpoint_does_not_pull_while_attached() {
        let mut level = open_level();
        level.checkpoints = vec![
            Checkpoint {
                id: "near".to_string(),
                position: [0.0, 10.0, 0.0],
            },
            Checkpoint {
                id: "other".to_string(),
                position: [2.0, 10.0, 0.0],
            },
        ];
        let (mut world, mut controller) = controller(level, false);
        let mut input = InputState::new();

        controller.tick(&mut world, &mut input, PHYSICS_DT);
        assert!(controller.is_attached());

        for _ in 0..30 {
            controller.tick(&mut world, &mut input, PHYSICS_DT);
            let p = controller.ball().position(&world).unwrap();
            assert!(p.x.abs() < 1e-4, "pulled toward second checkpoint: {p}");
        }
    }

    #[test]
    fn test_win_fires_once() {
        let mut level = open_level();
        level.goal = [0.0, 10.4, 0.0];
        let (mut world, mut controller) = controller(level, false);
        let mut input = InputState::new();

        let first = controller.tick(&mut world, &mut input, PHYSICS_DT);
        assert!(first.contains(&GameEvent::WinTriggered));
        assert!(controller.win_latched());
        assert_eq!(controller.phase(), GamePhase::Finishing);

        let second = controller.tick(&mut world, &mut input, PHYSICS_DT);
        assert!(!second.contains(&GameEvent::WinTriggered));
        assert_eq!(controller.phase(), GamePhase::Finishing);
    }

    #[test]
    fn test_finish_sequence_ends_with_route() {
        let mut level = open_level();
        level.goal = [0.0, 10.4, 0.0];
        let (mut world, mut controller) = controller(level, true);
        let mut input = InputState::new();

        let mut events = Vec::new();
        for _ in 0..2000 {
            events.extend(controller.tick(&mut world, &mut input, PHYSICS_DT));
            if controller.phase() == GamePhase::Finished {
                break;
            }
        }

        assert_eq!(
            events,
            vec![
                GameEvent::WinTriggered,
                GameEvent::GoalReached,
                GameEvent::Finished {
                    route: "/register".to_string()
                },
            ]
        );
        assert!(controller.ball().is_frozen(&world));

        // Finished ticks are no-ops.
        let frame = world.current_frame();
        assert!(controller.tick(&mut world, &mut input, PHYSICS_DT).is_empty());
        assert_eq!(world.current_frame(), frame);
    }

    #[test]
    fn test_pause_freezes_simulation() {
        let (mut world, mut controller) = controller(open_level(), true);
        let mut input = InputState::new();

        assert_eq!(
            controller.pause(),
            Some(GameEvent::PauseChanged { paused: true })
        );
        assert!(controller.pause().is_none());

        let before = controller.ball().position(&world);
        for _ in 0..10 {
            assert!(controller.tick(&mut world, &mut input, PHYSICS_DT).is_empty());
        }
        assert_eq!(controller.ball().position(&world), before);

        assert_eq!(
            controller.toggle_pause(),
            Some(GameEvent::PauseChanged { paused: false })
        );
        controller.tick(&mut world, &mut input, PHYSICS_DT);
        assert_ne!(controller.ball().position(&world), before);
    }

    #[test]
    fn test_one_physics_step_per_frame_at_60hz() {
        let (mut world, mut controller) = controller(open_level(), true);
        let mut input = InputState::new();

        for _ in 0..120 {
            controller.tick(&mut world, &mut input, PHYSICS_DT);
        }
        assert_eq!(world.current_frame(), 120);
    }

    #[test]
    fn test_long_frame_is_capped() {
        let (mut world, mut controller) = controller(open_level(), true);
        let mut input = InputState::new();

        controller.tick(&mut world, &mut input, 1.0);
        assert_eq!(world.current_frame(), u64::from(Tuning::default().max_substeps));
    }

    #[test]
    fn test_idle_ball_slows_every_frame() {
        let (mut world, mut controller) = controller(open_level(), false);
        let mut input = InputState::new();
        controller
            .ball()
            .set_linvel(&mut world, Vec3::new(2.0, 0.0, 1.0));

        let mut previous = 2.0_f32.hypot(1.0);
        for _ in 0..120 {
            controller.tick(&mut world, &mut input, PHYSICS_DT);
            let speed = controller.ball().linvel(&world).unwrap().length();
            assert!(speed < previous);
            assert!(speed > 0.0);
            previous = speed;
        }
    }

    fn held_displacement(dt: f32, frames: u32) -> f32 {
        let (mut world, mut controller) = controller(open_level(), false);
        let mut input = InputState::new();
        input.press(MoveKey::Forward);
        let start = controller.ball().position(&world).unwrap();

        for _ in 0..frames {
            controller.tick(&mut world, &mut input, dt);
        }
        controller.ball().position(&world).unwrap().distance(start)
    }

    #[test]
    fn test_displacement_independent_of_frame_rate() {
        let at_60 = held_displacement(1.0 / 60.0, 60);
        let at_30 = held_displacement(1.0 / 30.0, 30);
        assert!(at_60 > 1.0);
        assert!((at_60 - at_30).abs() / at_60 < 0.05, "{at_60} vs {at_30}");
    }

    fn ramp() -> TrackGeometry {
        // 45 degree slope rising along +x, running the full length of z.
        TrackGeometry::new(vec![
            TrackMeshData::from_flat_buffers(
                "ramp",
                &[
                    -10.0, -10.0, -10.0, //
                    10.0, 10.0, -10.0, //
                    10.0, 10.0, 10.0, //
                    -10.0, -10.0, 10.0,
                ],
                &[0, 2, 1, 0, 3, 2],
            )
            .unwrap(),
        ])
    }

    fn speed_along_ramp(dt: f32, frames: u32) -> f32 {
        let mut level = open_level();
        level.tuning.friction = 0.0;
        let offset = Vec3::new(-1.0, 1.0, 0.0).normalize() * level.tuning.ball_radius;
        level.ball_start = offset.to_array();

        let (mut world, mut controller) = controller(level, false);
        ramp().apply_to_world(&mut world, controller.tuning());
        world.step();

        let ball = *controller.ball();
        ball.set_linvel(&mut world, Vec3::Z);
        let mut input = InputState::new();
        for _ in 0..frames {
            controller.tick(&mut world, &mut input, dt);
        }
        ball.linvel(&world).unwrap().z
    }

    #[test]
    fn test_slope_damping_independent_of_frame_rate() {
        let at_60 = speed_along_ramp(1.0 / 60.0, 60);
        let at_144 = speed_along_ramp(1.0 / 144.0, 144);
        assert!(at_60 > 0.0 && at_60 < 0.01, "{at_60}");
        let ratio = at_144 / at_60;
        assert!((0.75..1.33).contains(&ratio), "{at_60} vs {at_144}");
    }

    #[test]
    fn test_stalled_frame_boost_matches_physics_cap() {
        let (mut world, mut controller) = controller(open_level(), false);
        let mut input = InputState::new();
        input.press(MoveKey::Forward);

        controller.tick(&mut world, &mut input, 1.0);

        let tuning = controller.tuning();
        #[allow(clippy::cast_precision_loss)]
        let expected = tuning.move_force * tuning.max_substeps as f32;
        let speed = controller.ball().linvel(&world).unwrap().length();
        assert!((speed - expected).abs() < 1e-4, "{speed} vs {expected}");
    }

    #[test]
    fn test_ball_rests_on_track() {
        let (mut world, mut controller) = controller(open_level(), true);
        floor().apply_to_world(&mut world, controller.tuning());
        let mut input = InputState::new();

        for _ in 0..240 {
            controller.tick(&mut world, &mut input, PHYSICS_DT);
        }

        let pose = controller.ball_pose().unwrap();
        assert!((pose.position.y - 0.5).abs() < 0.05, "{}", pose.position.y);
        assert_eq!(controller.camera().target, pose.position);
        assert!(world.narrow_phase.contact_pairs_with(controller.ball().collider_handle).count() > 0);
    }

    #[test]
    fn test_log_ball_position() {
        let (world, controller) = controller(open_level(), true);
        assert_eq!(
            controller.log_ball_position(&world),
            Some(Vec3::new(0.0, 10.0, 0.0))
        );
    }
}
