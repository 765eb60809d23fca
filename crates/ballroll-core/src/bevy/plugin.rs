//! Bevy plugins for the ballroll game.
//!
//! Provides:
//! - `BallrollHeadlessPlugin`: Logic-only plugin (no rendering/window dependencies) for headless testing
//! - `BallrollPlugin`: Full plugin including `BallrollHeadlessPlugin` + rendering and touch systems

use bevy::prelude::*;

use crate::bevy::events::*;
use crate::bevy::resources::*;
use crate::bevy::state_store::StateStores;
use crate::bevy::systems;

/// Application mode state for dynamic mode switching.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppMode {
    #[default]
    Idle,
    Game,
}

// ============================================================================
// Headless Plugin (logic only, no rendering/window dependencies)
// ============================================================================

/// Headless plugin containing all game logic without rendering or window dependencies.
///
/// Use this plugin in tests with `MinimalPlugins` and `InputPlugin` to run
/// ECS systems without requiring a windowing or rendering backend.
///
/// Excluded systems (rendering-dependent):
/// - Camera3d and light spawning (setup_game_camera)
/// - glTF scene spawning and track collider building (needs `AssetServer` and `Assets<Mesh>`)
/// - Touch joystick (needs `Window`)
#[derive(Default)]
pub struct BallrollHeadlessPlugin {
    pub command_queue: Option<CommandQueue>,
    pub state_stores: Option<StateStores>,
}

impl Plugin for BallrollHeadlessPlugin {
    fn build(&self, app: &mut App) {
        // ====================================================================
        // States
        // ====================================================================
        app.init_state::<AppMode>();

        // ====================================================================
        // Resources (all registered upfront, systems gated by run_if)
        // ====================================================================
        app.insert_resource(PhysicsWorldRes::default())
            .insert_resource(ControllerRes::default())
            .insert_resource(InputStateRes::default())
            .insert_resource(ControlGuide::default())
            .insert_resource(LevelRes::default())
            .insert_resource(self.command_queue.clone().unwrap_or_default())
            .insert_resource(self.state_stores.clone().unwrap_or_default());
        app.init_resource::<JoystickRes>();

        // ====================================================================
        // Messages (all registered upfront)
        // ====================================================================
        app.add_message::<LoadLevelEvent>()
            .add_message::<LevelLoadedEvent>()
            .add_message::<BallRespawnedEvent>()
            .add_message::<CheckpointEnteredEvent>()
            .add_message::<CheckpointReleasedEvent>()
            .add_message::<PauseChangedEvent>()
            .add_message::<GameWonEvent>()
            .add_message::<GoalReachedEvent>()
            .add_message::<NavigateEvent>()
            .add_message::<GuideDismissedEvent>();

        // ====================================================================
        // Core systems
        // ====================================================================

        // Commands and level loading (always active), then the frame tick
        // and render sync (Game only).
        app.add_systems(
            Update,
            (
                systems::process_commands,
                systems::handle_load_level,
                (
                    systems::read_keyboard,
                    systems::run_controller,
                    systems::sync_ball_mesh,
                    systems::update_chase_camera,
                )
                    .chain()
                    .run_if(in_state(AppMode::Game)),
            )
                .chain(),
        );

        // WASM exit and navigation systems
        #[cfg(all(target_arch = "wasm32", feature = "windowed"))]
        app.add_systems(
            Update,
            (
                crate::bevy::wasm_entry::check_exit_system,
                crate::bevy::wasm_entry::navigate_on_finish.after(systems::run_controller),
            ),
        );

        // State sync (always active)
        app.add_systems(PostUpdate, systems::sync_session_to_stores);

        // ====================================================================
        // OnExit transition systems (cleanup only, no camera spawning)
        // ====================================================================
        app.add_systems(OnExit(AppMode::Game), systems::cleanup_game_mode);
    }
}

// ============================================================================
// Unified Plugin (headless + rendering)
// ============================================================================

/// Full game plugin.
///
/// Includes `BallrollHeadlessPlugin` for all game logic, plus systems that
/// need `Camera3d`, `AssetServer`, `Assets<Mesh>` and `Window`.
#[derive(Default)]
pub struct BallrollPlugin {
    pub command_queue: Option<CommandQueue>,
    pub state_stores: Option<StateStores>,
    /// Show the on-screen joystick (phones and tablets).
    pub touch_controls: bool,
}

impl BallrollPlugin {
    pub fn new(command_queue: CommandQueue, state_stores: StateStores, touch_controls: bool) -> Self {
        Self {
            command_queue: Some(command_queue),
            state_stores: Some(state_stores),
            touch_controls,
        }
    }
}

impl Plugin for BallrollPlugin {
    fn build(&self, app: &mut App) {
        // ====================================================================
        // Headless logic (all game systems without rendering)
        // ====================================================================
        app.add_plugins(BallrollHeadlessPlugin {
            command_queue: self.command_queue.clone(),
            state_stores: self.state_stores.clone(),
        });

        if self.touch_controls {
            app.insert_resource(JoystickRes::enabled());
        }

        // ====================================================================
        // Scene spawning and track colliders
        // ====================================================================
        app.add_systems(
            Update,
            (
                systems::spawn_level_scenes,
                systems::tag_track_meshes,
                systems::build_track_colliders,
            )
                .chain()
                .after(systems::handle_load_level)
                .before(systems::run_controller)
                .run_if(in_state(AppMode::Game)),
        );

        // ====================================================================
        // Touch joystick (Game only), needs Window
        // ====================================================================
        app.add_systems(
            Update,
            systems::read_touch_joystick
                .before(systems::run_controller)
                .run_if(in_state(AppMode::Game)),
        );

        // ====================================================================
        // OnEnter camera setup (needs Camera3d)
        // ====================================================================
        app.add_systems(OnEnter(AppMode::Game), systems::setup_game_camera);
    }
}
