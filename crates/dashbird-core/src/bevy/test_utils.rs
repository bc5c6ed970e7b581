//! Test utilities for headless Bevy integration tests.
//!
//! Provides `TestApp`, a wrapper around `bevy::app::App` that uses
//! `MinimalPlugins` + `SceneHeadlessPlugin` for testing focus and camera
//! logic without a rendering or windowing backend.

use std::sync::Arc;
use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use crate::bevy::plugin::SceneHeadlessPlugin;
use crate::bevy::{
    BoxHoverEvent, CameraDriver, Floor, FocusBox, SceneCamera, SceneClickEvent, SceneCommand,
    SceneCommandQueue, SceneFocus, StateStores,
};
use crate::config::SceneConfig;
use crate::focus::FocusState;
use crate::notify::RecordingNotifier;

/// Frame length fed to the app on every update.
pub const FRAME: Duration = Duration::from_millis(16);

/// A headless Bevy app wrapper for testing.
///
/// Every update advances time by exactly [`FRAME`], and focus
/// notifications are captured by a [`RecordingNotifier`].
pub(crate) struct TestApp {
    pub app: App,
    notifier: RecordingNotifier,
}

impl TestApp {
    /// Create a new test app with the default configuration.
    pub fn new() -> Self {
        Self::with_config(SceneConfig::default())
    }

    pub fn with_config(config: SceneConfig) -> Self {
        let notifier = RecordingNotifier::new();
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(SceneHeadlessPlugin {
            config,
            notifier: Some(Arc::new(notifier.clone())),
            command_queue: None,
            state_stores: None,
        });
        app.insert_resource(TimeUpdateStrategy::ManualDuration(FRAME));
        // Run one update to spawn the layout and start the intro
        app.update();
        Self { app, notifier }
    }

    /// Run a single frame update.
    pub fn update(&mut self) {
        self.app.update();
    }

    pub fn run_frames(&mut self, n: usize) {
        for _ in 0..n {
            self.app.update();
        }
    }

    /// Run until no transition is in flight, or `max_frames` elapse.
    pub fn run_until_settled(&mut self, max_frames: usize) {
        for _ in 0..max_frames {
            if !self.driver().is_animating() {
                return;
            }
            self.app.update();
        }
    }

    /// Queue a click on `target`; delivered on the next update.
    pub fn click(&mut self, target: Entity) {
        self.app
            .world_mut()
            .write_message(SceneClickEvent { target });
    }

    pub fn hover(&mut self, target: Entity, hovered: bool) {
        self.app
            .world_mut()
            .write_message(BoxHoverEvent { target, hovered });
    }

    /// Push a command to the command queue.
    pub fn push_command(&mut self, cmd: SceneCommand) {
        self.app.world().resource::<SceneCommandQueue>().push(cmd);
    }

    pub fn box_entity(&mut self, index: usize) -> Entity {
        let world = self.app.world_mut();
        let mut query = world.query::<(Entity, &FocusBox)>();
        query
            .iter(world)
            .find(|(_, b)| b.index == index)
            .map(|(e, _)| e)
            .expect("box not spawned")
    }

    pub fn floor_entity(&mut self) -> Entity {
        let world = self.app.world_mut();
        let mut query = world.query_filtered::<Entity, With<Floor>>();
        query.single(world).expect("floor not spawned")
    }

    pub fn box_translation(&mut self, index: usize) -> Vec3 {
        let entity = self.box_entity(index);
        self.app
            .world()
            .get::<Transform>(entity)
            .expect("box has no transform")
            .translation
    }

    pub fn camera(&mut self) -> SceneCamera {
        let world = self.app.world_mut();
        let mut query = world.query::<&SceneCamera>();
        query.single(world).expect("camera not spawned").clone()
    }

    pub fn driver(&self) -> &CameraDriver {
        self.app.world().resource::<CameraDriver>()
    }

    pub fn focus(&self) -> FocusState {
        self.app.world().resource::<SceneFocus>().state()
    }

    pub fn stores(&self) -> &StateStores {
        self.app.world().resource::<StateStores>()
    }

    pub fn notifications(&self) -> Vec<String> {
        self.notifier.messages()
    }
}
