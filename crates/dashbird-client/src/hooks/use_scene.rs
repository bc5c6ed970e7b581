//! Scene integration hooks for Yew.
//!
//! Starts the Bevy scene on a canvas and polls its focus store.

use gloo::events::EventListener;
use gloo::timers::callback::{Interval, Timeout};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use yew::prelude::*;

pub use dashbird_core::bevy::{
    FocusSummary, SceneCommand, get_focus_state, get_focus_version, is_scene_running, request_scene_exit,
    reset_scene_state, send_scene_command, start_scene,
};

/// Polling interval in milliseconds.
const POLL_INTERVAL_MS: u32 = 50;

/// Delay before starting the scene so the canvas is in the DOM.
const START_DELAY_MS: u32 = 100;

/// Command sent when the user presses Escape.
const CLEAR_FOCUS_COMMAND: &str = r#"{"type":"clear_focus"}"#;

fn is_clear_focus_key(key: &str) -> bool {
    key == "Escape"
}

/// Remembers the last store version seen by the poller.
#[derive(Debug, Default)]
struct VersionGate {
    last: u64,
}

impl VersionGate {
    /// True when `version` is new; the gate then remembers it.
    fn observe(&mut self, version: u64) -> bool {
        if version == self.last {
            return false;
        }
        self.last = version;
        true
    }
}

/// Starts the scene on `canvas_id` once the component is mounted.
///
/// Registers a `beforeunload` handler that stops the app and clears the
/// global scene state.
#[hook]
pub fn use_scene_start(canvas_id: String, config_json: String) {
    use_effect_with((), move |_| {
        let window = web_sys::window();

        let beforeunload = Closure::<dyn Fn()>::new(move || {
            tracing::info!("beforeunload: requesting scene exit and cleaning up state");
            request_scene_exit();
            reset_scene_state();
        });

        if let Some(window) = &window {
            if let Err(e) = window.add_event_listener_with_callback(
                "beforeunload",
                beforeunload.as_ref().unchecked_ref(),
            ) {
                tracing::warn!("Failed to add beforeunload listener: {:?}", e);
            }
        }

        let timeout = Timeout::new(START_DELAY_MS, move || {
            if is_scene_running() {
                return;
            }
            tracing::info!("Starting scene on #{}", canvas_id);
            if let Err(e) = start_scene(&canvas_id, &config_json) {
                tracing::error!("Failed to start scene: {:?}", e);
            }
        });

        move || {
            if let Some(window) = &window {
                let _ = window.remove_event_listener_with_callback(
                    "beforeunload",
                    beforeunload.as_ref().unchecked_ref(),
                );
            }
            drop(timeout);
        }
    });
}

/// Escape clears the focus, same as clicking the floor.
#[hook]
pub fn use_escape_clears_focus() {
    use_effect_with((), move |_| {
        let listener = web_sys::window().map(|window| {
            EventListener::new(&window, "keydown", move |event| {
                let Some(event) = event.dyn_ref::<web_sys::KeyboardEvent>() else {
                    return;
                };
                if !is_clear_focus_key(&event.key()) || !is_scene_running() {
                    return;
                }
                if let Err(e) = send_scene_command(CLEAR_FOCUS_COMMAND) {
                    tracing::warn!("Failed to clear focus: {:?}", e);
                }
            })
        });

        move || drop(listener)
    });
}

/// Hook to get the focus summary; re-renders only when its version moves.
#[hook]
pub fn use_scene_focus() -> FocusSummary {
    let summary = use_state(FocusSummary::default);
    let gate = use_mut_ref(VersionGate::default);

    {
        let summary = summary.clone();
        let gate = gate.clone();
        use_effect_with((), move |_| {
            let interval = Interval::new(POLL_INTERVAL_MS, move || {
                if !gate.borrow_mut().observe(get_focus_version()) {
                    return;
                }
                let js_value = get_focus_state();
                if let Ok(value) = serde_wasm_bindgen::from_value::<FocusSummary>(js_value) {
                    summary.set(value);
                }
            });

            move || drop(interval)
        });
    }

    (*summary).clone()
}
