//! WASM entry points for the focus scene.
//!
//! Provides JavaScript-callable functions to start and control the scene.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use bevy::prelude::*;
use bevy::window::WindowResolution;
use bevy::winit::{UpdateMode, WinitSettings};
use parking_lot::Mutex;
use wasm_bindgen::prelude::*;

use crate::bevy::{SceneCommand, SceneCommandQueue, SceneUnifiedPlugin, StateStores};
use crate::config::SceneConfig;
use crate::notify::ParentWindowNotifier;

// ============================================================================
// Global State
// ============================================================================

/// Atomic flag for signaling app shutdown (checked every frame by Bevy system).
static SHOULD_EXIT: AtomicBool = AtomicBool::new(false);

/// Whether the Bevy App has been started.
/// In WASM the EventLoop can only be created once.
static SCENE_APP_STARTED: AtomicBool = AtomicBool::new(false);

/// Global state that can be reset on page reload.
#[derive(Clone)]
struct GlobalState {
    command_queue: SceneCommandQueue,
    state_stores: StateStores,
}

impl GlobalState {
    fn new() -> Self {
        Self {
            command_queue: SceneCommandQueue::new(),
            state_stores: StateStores::new(),
        }
    }
}

static GLOBAL_STATE: Mutex<Option<GlobalState>> = Mutex::new(None);

fn global_state() -> GlobalState {
    GLOBAL_STATE.lock().get_or_insert_with(GlobalState::new).clone()
}

fn is_shutdown_requested() -> bool {
    SHOULD_EXIT.load(Ordering::SeqCst)
}

/// Request the Bevy app to exit on its next frame.
#[wasm_bindgen]
pub fn request_scene_exit() {
    tracing::info!("[scene] request_scene_exit called - signaling app to exit");
    SHOULD_EXIT.store(true, Ordering::SeqCst);
}

/// Reset global state. Called after app exits or before page unload.
#[wasm_bindgen]
pub fn reset_scene_state() {
    tracing::info!("[scene] reset_scene_state called - clearing global state");

    SHOULD_EXIT.store(true, Ordering::SeqCst);

    let mut guard = GLOBAL_STATE.lock();
    if let Some(ref state) = *guard {
        state.command_queue.clear();
    }
    *guard = None;

    SHOULD_EXIT.store(false, Ordering::SeqCst);
}

/// Bevy system that sends AppExit once exit was requested.
pub fn check_exit_system(mut exit: MessageWriter<bevy::app::AppExit>) {
    if SHOULD_EXIT.load(Ordering::SeqCst) {
        tracing::info!("[scene] check_exit_system: sending AppExit");
        exit.write(bevy::app::AppExit::Success);
    }
}

// ============================================================================
// Initialization
// ============================================================================

/// Starts the scene on the canvas with the given id.
///
/// `config_json` may be empty for the default scene. The render scale is
/// the configured pixel ratio, or the device pixel ratio when unset.
#[wasm_bindgen]
pub fn start_scene(canvas_id: &str, config_json: &str) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    tracing::info!("[scene] start_scene called");

    if SCENE_APP_STARTED.load(Ordering::SeqCst) {
        tracing::info!("[scene] App already running, skipping creation");
        return Ok(());
    }

    let config = SceneConfig::from_host_json(config_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid config: {e}")))?;

    let pixel_ratio = config
        .pixel_ratio
        .or_else(|| web_sys::window().map(|w| w.device_pixel_ratio() as f32));

    let state = global_state();

    tracing::info!(
        "[scene] creating Bevy app for canvas: #{} (pixel ratio {:?})",
        canvas_id,
        pixel_ratio
    );

    let mut resolution = WindowResolution::default();
    if let Some(ratio) = pixel_ratio {
        resolution = resolution.with_scale_factor_override(ratio);
    }

    let mut app = App::new();

    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    canvas: Some(format!("#{}", canvas_id)),
                    fit_canvas_to_parent: true,
                    prevent_default_event_handling: true,
                    resolution,
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

    app.add_plugins(SceneUnifiedPlugin::new(
        config,
        Arc::new(ParentWindowNotifier),
        state.command_queue,
        state.state_stores,
    ));

    SCENE_APP_STARTED.store(true, Ordering::SeqCst);

    tracing::info!("[scene] calling app.run()");
    app.run();
    tracing::info!("[scene] app.run() returned");

    Ok(())
}

// ============================================================================
// Commands
// ============================================================================

/// Check if the scene app is currently running.
#[wasm_bindgen]
pub fn is_scene_running() -> bool {
    SCENE_APP_STARTED.load(Ordering::SeqCst) && !SHOULD_EXIT.load(Ordering::SeqCst)
}

/// Sends a command to the running scene.
///
/// Example: `{"type": "focus_box", "index": 0}`.
#[wasm_bindgen]
pub fn send_scene_command(command_json: &str) -> Result<(), JsValue> {
    if is_shutdown_requested() {
        return Err(JsValue::from_str("Scene is shutting down"));
    }

    let command: SceneCommand = serde_json::from_str(command_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid command JSON: {}", e)))?;

    tracing::debug!("[scene] send_scene_command: {:?}", command);
    global_state().command_queue.push(command);
    Ok(())
}

// ============================================================================
// State queries
// ============================================================================

/// Current focus summary as a JS object.
#[wasm_bindgen]
pub fn get_focus_state() -> JsValue {
    let summary = global_state().state_stores.focus.get_summary();
    serde_wasm_bindgen::to_value(&summary).unwrap_or(JsValue::NULL)
}

/// Version counter of the focus summary; bumps on every change.
#[wasm_bindgen]
pub fn get_focus_version() -> u64 {
    global_state().state_stores.focus.get_version()
}
