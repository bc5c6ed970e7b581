//! ECS Resources for the focus scene.

use std::collections::VecDeque;
use std::sync::Arc;

use bevy::prelude::*;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::config::SceneConfig;
use crate::focus::FocusHolder;
use crate::notify::{SharedNotifier, TracingNotifier};
use crate::transition::CameraTransitionDriver;

/// Active scene configuration.
#[derive(Resource, Debug, Clone, Default, Deref)]
pub struct SceneConfigRes(pub SceneConfig);

/// Current focus state.
#[derive(Resource, Debug, Clone, Default, Deref, DerefMut)]
pub struct SceneFocus(pub FocusHolder);

/// Owner of the animated scalar and the camera transitions.
#[derive(Resource, Debug, Clone, Deref, DerefMut)]
pub struct CameraDriver(pub CameraTransitionDriver);

impl CameraDriver {
    pub fn from_config(config: &SceneConfig) -> Self {
        Self(CameraTransitionDriver::new(
            config.spring,
            config.camera.clone(),
        ))
    }
}

/// Where focus notifications go.
#[derive(Resource, Clone)]
pub struct FocusOutbox {
    notifier: SharedNotifier,
}

impl FocusOutbox {
    pub fn new(notifier: SharedNotifier) -> Self {
        Self { notifier }
    }

    pub fn notify(&self, message: &str) {
        self.notifier.notify(message);
    }
}

impl Default for FocusOutbox {
    fn default() -> Self {
        Self::new(Arc::new(TracingNotifier))
    }
}

/// Commands that can be sent from JavaScript to the Bevy app.
///
/// JSON form: `{"type": "focus_box", "index": 1}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SceneCommand {
    /// Focus the box with this index, as if it had been clicked.
    FocusBox { index: usize },
    /// Set the focus to an arbitrary position, or clear it with `None`.
    SetFocus { position: Option<[f32; 3]> },
    ClearFocus,
    /// Frame boundary marker - commands after this are processed in the next frame.
    Yield,
}

/// Thread-safe command queue for WASM interop.
///
/// This allows JavaScript to push commands that will be processed
/// by Bevy systems on the next frame.
#[derive(Resource, Clone, Default)]
pub struct SceneCommandQueue {
    inner: Arc<Mutex<VecDeque<SceneCommand>>>,
}

impl SceneCommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a command to be processed.
    pub fn push(&self, command: SceneCommand) {
        self.inner.lock().push_back(command);
    }

    /// Drain commands until Yield or empty.
    ///
    /// Yield itself is consumed but not returned; everything after it
    /// stays queued for the next frame.
    pub fn drain_until_yield(&self) -> Vec<SceneCommand> {
        let mut guard = self.inner.lock();
        let mut commands = Vec::new();

        while let Some(cmd) = guard.pop_front() {
            if cmd == SceneCommand::Yield {
                tracing::debug!("[command] Yield - deferring remaining commands to next frame");
                break;
            }
            commands.push(cmd);
        }

        commands
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Clear all pending commands.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }
}
