//! WASM entry points for the ballroll game.
//!
//! Provides JavaScript-callable functions to start the game on a canvas,
//! drive it with commands and poll its session state.

use std::sync::atomic::{AtomicBool, Ordering};

use bevy::prelude::*;
use bevy::winit::{UpdateMode, WinitSettings};
use parking_lot::Mutex;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Layer};
use tracing_web::MakeWebConsoleWriter;
use wasm_bindgen::prelude::*;

use crate::bevy::{BallrollPlugin, CommandQueue, GameCommand, NavigateEvent, StateStores};
use crate::input::is_mobile_user_agent;
use crate::level::LevelConfig;

// ============================================================================
// Global State
// ============================================================================

/// Atomic flag for signaling app shutdown (checked every frame by Bevy system).
static SHOULD_EXIT: AtomicBool = AtomicBool::new(false);

/// Atomic flag indicating whether the Bevy App has been started.
/// In WASM, the EventLoop can only be created once.
static APP_STARTED: AtomicBool = AtomicBool::new(false);

/// Global state that can be reset on page reload.
struct GlobalState {
    command_queue: CommandQueue,
    state_stores: StateStores,
}

impl GlobalState {
    fn new() -> Self {
        Self {
            command_queue: CommandQueue::new(),
            state_stores: StateStores::new(),
        }
    }
}

static GLOBAL_STATE: Mutex<Option<GlobalState>> = Mutex::new(None);

fn get_command_queue() -> CommandQueue {
    GLOBAL_STATE
        .lock()
        .get_or_insert_with(GlobalState::new)
        .command_queue
        .clone()
}

fn get_state_stores() -> StateStores {
    GLOBAL_STATE
        .lock()
        .get_or_insert_with(GlobalState::new)
        .state_stores
        .clone()
}

fn is_shutdown_requested() -> bool {
    SHOULD_EXIT.load(Ordering::SeqCst)
}

fn init_tracing() {
    let filter = EnvFilter::new("info,wgpu=error,naga=warn");

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(MakeWebConsoleWriter::new())
        .with_filter(filter);

    // A second start after a page-level reset keeps the first subscriber.
    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
}

fn is_touch_device() -> bool {
    web_sys::window()
        .and_then(|window| window.navigator().user_agent().ok())
        .is_some_and(|ua| is_mobile_user_agent(&ua))
}

/// Request the app to exit. Called before page unload.
/// The app will exit on the next frame when the exit system runs.
#[wasm_bindgen]
pub fn request_exit() {
    tracing::info!("[ballroll] request_exit called - signaling app to exit");
    SHOULD_EXIT.store(true, Ordering::SeqCst);
}

/// Reset global state. Called after app exits or before page unload.
#[wasm_bindgen]
pub fn reset_state() {
    tracing::info!("[ballroll] reset_state called - clearing global state");

    let mut guard = GLOBAL_STATE.lock();
    if let Some(state) = guard.as_ref() {
        state.command_queue.clear();
    }
    *guard = None;

    SHOULD_EXIT.store(false, Ordering::SeqCst);
}

/// Bevy system that checks if exit was requested and sends AppExit.
pub fn check_exit_system(mut exit: MessageWriter<AppExit>) {
    if is_shutdown_requested() {
        tracing::info!("[ballroll] check_exit_system: sending AppExit");
        exit.write(AppExit::Success);
    }
}

/// Bevy system that sends the page to the finish route.
pub fn navigate_on_finish(mut events: MessageReader<NavigateEvent>) {
    let Some(event) = events.read().last() else {
        return;
    };
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(e) = window.location().set_href(&event.route) {
        tracing::error!("[ballroll] Navigation to {} failed: {e:?}", event.route);
    }
}

// ============================================================================
// Initialization
// ============================================================================

/// Starts the Bevy app on the canvas with id `canvas_id`, in Idle mode.
///
/// Use `load_level()` or `load_default_level()` to start playing.
#[wasm_bindgen]
pub fn start_ballroll(canvas_id: &str) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    init_tracing();

    if APP_STARTED.load(Ordering::SeqCst) {
        tracing::info!("[ballroll] App already running, skipping creation");
        return Ok(());
    }

    let command_queue = get_command_queue();
    let state_stores = get_state_stores();
    let touch_controls = is_touch_device();

    tracing::info!("[ballroll] creating Bevy app for canvas: #{canvas_id} (touch controls: {touch_controls})");

    let mut app = App::new();

    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    canvas: Some(format!("#{canvas_id}")),
                    fit_canvas_to_parent: true,
                    prevent_default_event_handling: true,
                    ..default()
                }),
                ..default()
            })
            .disable::<bevy::log::LogPlugin>(),
    );

    app.insert_resource(WinitSettings {
        focused_mode: UpdateMode::Continuous,
        unfocused_mode: UpdateMode::Continuous,
    });

    app.add_plugins(BallrollPlugin::new(command_queue, state_stores, touch_controls));

    APP_STARTED.store(true, Ordering::SeqCst);

    tracing::info!("[ballroll] calling app.run()");
    app.run();
    tracing::info!("[ballroll] app.run() returned");

    Ok(())
}

fn queue_level(level: LevelConfig) -> Result<(), JsValue> {
    if is_shutdown_requested() {
        return Err(JsValue::from_str("Bevy app is shutting down"));
    }

    tracing::info!("[ballroll] queueing level '{}'", level.name);

    get_state_stores().session.clear();

    let queue = get_command_queue();
    queue.push(GameCommand::ClearMode);
    queue.push(GameCommand::Yield);
    queue.push(GameCommand::InitGame);
    queue.push(GameCommand::Yield);
    queue.push(GameCommand::LoadLevel {
        level: Box::new(level),
        track: None,
    });

    Ok(())
}

/// Enter game mode with the level described by `level_json`.
///
/// Command sequence: ClearMode → Yield → InitGame → Yield → LoadLevel
#[wasm_bindgen]
pub fn load_level(level_json: &str) -> Result<(), JsValue> {
    let level = LevelConfig::from_json(level_json)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse level: {e}")))?;
    queue_level(level)
}

/// Enter game mode with the shipped track.
#[wasm_bindgen]
pub fn load_default_level() -> Result<(), JsValue> {
    queue_level(LevelConfig::default_track())
}

// ============================================================================
// Commands
// ============================================================================

fn push_command(command: GameCommand) -> Result<(), JsValue> {
    if is_shutdown_requested() {
        return Err(JsValue::from_str("Bevy app is shutting down"));
    }
    get_command_queue().push(command);
    Ok(())
}

#[wasm_bindgen]
pub fn pause_game() -> Result<(), JsValue> {
    push_command(GameCommand::Pause)
}

#[wasm_bindgen]
pub fn resume_game() -> Result<(), JsValue> {
    push_command(GameCommand::Resume)
}

#[wasm_bindgen]
pub fn toggle_pause() -> Result<(), JsValue> {
    push_command(GameCommand::TogglePause)
}

/// Log the ball coordinates to the console.
#[wasm_bindgen]
pub fn log_ball_position() -> Result<(), JsValue> {
    push_command(GameCommand::LogBallPosition)
}

/// Check if the app is currently running.
#[wasm_bindgen]
pub fn is_app_running() -> bool {
    APP_STARTED.load(Ordering::SeqCst) && !is_shutdown_requested()
}

// ============================================================================
// State Getters
// ============================================================================

/// Get the session summary.
#[wasm_bindgen]
pub fn poll_session() -> JsValue {
    if is_shutdown_requested() {
        return JsValue::NULL;
    }
    let summary = get_state_stores().session.get_summary();
    serde_wasm_bindgen::to_value(&summary).unwrap_or(JsValue::NULL)
}

/// Get the session summary version (for change detection).
#[wasm_bindgen]
pub fn get_session_version() -> u64 {
    get_state_stores().session.get_version()
}
