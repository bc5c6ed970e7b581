//! Bevy plugins for the focus scene.
//!
//! Provides:
//! - `SceneHeadlessPlugin`: Logic-only plugin (no rendering/window dependencies) for headless testing
//! - `SceneUnifiedPlugin`: Full plugin including `SceneHeadlessPlugin` + rendering and picking

use std::sync::Arc;

use bevy::picking::mesh_picking::MeshPickingPlugin;
use bevy::prelude::*;

use crate::bevy::events::*;
use crate::bevy::resources::*;
use crate::bevy::state_store::StateStores;
use crate::bevy::systems;
use crate::config::SceneConfig;
use crate::notify::{SharedNotifier, TracingNotifier};

// ============================================================================
// Headless Plugin (logic only, no rendering/window dependencies)
// ============================================================================

/// Headless plugin containing the focus and camera logic.
///
/// Use this plugin in tests with `MinimalPlugins` to run ECS systems
/// without requiring a windowing or rendering backend.
///
/// Excluded systems (rendering-dependent):
/// - Meshes, materials and lights (attach_scene_visuals, spawn_scene_lights)
/// - Picking observers, cursor icon and hover materials
/// - Engine camera binding and label placement (apply_scene_camera, position_scene_label)
#[derive(Default)]
pub struct SceneHeadlessPlugin {
    pub config: SceneConfig,
    pub notifier: Option<SharedNotifier>,
    pub command_queue: Option<SceneCommandQueue>,
    pub state_stores: Option<StateStores>,
}

impl Plugin for SceneHeadlessPlugin {
    fn build(&self, app: &mut App) {
        // ====================================================================
        // Resources
        // ====================================================================
        let notifier = self
            .notifier
            .clone()
            .unwrap_or_else(|| Arc::new(TracingNotifier));

        app.insert_resource(CameraDriver::from_config(&self.config))
            .insert_resource(SceneConfigRes(self.config.clone()))
            .insert_resource(SceneFocus::default())
            .insert_resource(FocusOutbox::new(notifier))
            .insert_resource(self.command_queue.clone().unwrap_or_default())
            .insert_resource(self.state_stores.clone().unwrap_or_default());

        // ====================================================================
        // Messages
        // ====================================================================
        app.add_message::<SceneClickEvent>()
            .add_message::<BoxHoverEvent>()
            .add_message::<FocusRequestEvent>()
            .add_message::<FocusChangedEvent>();

        // ====================================================================
        // Startup
        // ====================================================================
        app.add_systems(
            Startup,
            (systems::spawn_scene_layout, systems::announce_initial_focus).chain(),
        );

        // ====================================================================
        // Focus and camera transitions
        // ====================================================================
        app.add_systems(
            Update,
            (
                systems::process_scene_commands,
                systems::apply_box_hover,
                systems::resolve_scene_clicks,
                systems::apply_focus_requests,
                systems::start_intro_transition,
                systems::retarget_camera_on_focus_change,
                systems::tick_camera_transitions,
            )
                .chain(),
        );

        // WASM exit system
        #[cfg(target_arch = "wasm32")]
        app.add_systems(Update, crate::bevy::wasm_entry::check_exit_system);

        // State sync
        app.add_systems(PostUpdate, systems::sync_focus_to_store);
    }
}

// ============================================================================
// Unified Plugin (headless + rendering)
// ============================================================================

/// Unified plugin for the windowed scene.
///
/// Includes `SceneHeadlessPlugin` for all logic, plus rendering systems that
/// require meshes, materials, `Window`, `Projection` and `Camera3d`.
#[derive(Default)]
pub struct SceneUnifiedPlugin {
    pub config: SceneConfig,
    pub notifier: Option<SharedNotifier>,
    pub command_queue: Option<SceneCommandQueue>,
    pub state_stores: Option<StateStores>,
}

impl SceneUnifiedPlugin {
    pub fn new(
        config: SceneConfig,
        notifier: SharedNotifier,
        command_queue: SceneCommandQueue,
        state_stores: StateStores,
    ) -> Self {
        Self {
            config,
            notifier: Some(notifier),
            command_queue: Some(command_queue),
            state_stores: Some(state_stores),
        }
    }
}

impl Plugin for SceneUnifiedPlugin {
    fn build(&self, app: &mut App) {
        // ====================================================================
        // Headless logic
        // ====================================================================
        app.add_plugins(SceneHeadlessPlugin {
            config: self.config.clone(),
            notifier: self.notifier.clone(),
            command_queue: self.command_queue.clone(),
            state_stores: self.state_stores.clone(),
        });

        // ====================================================================
        // Picking and background
        // ====================================================================
        app.add_plugins(MeshPickingPlugin);
        app.insert_resource(ClearColor(Color::WHITE));

        // ====================================================================
        // Scene visuals
        // ====================================================================
        app.add_systems(
            Startup,
            (
                systems::attach_scene_visuals.after(systems::spawn_scene_layout),
                systems::spawn_scene_lights,
                systems::spawn_scene_label,
            ),
        );

        // ====================================================================
        // Hover feedback
        // ====================================================================
        app.add_systems(
            Update,
            (systems::update_box_materials, systems::update_cursor_icon)
                .after(systems::apply_box_hover),
        );

        // ====================================================================
        // Camera binding
        // ====================================================================
        app.add_systems(
            Update,
            (systems::apply_scene_camera, systems::position_scene_label)
                .chain()
                .after(systems::tick_camera_transitions),
        );
    }
}

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use crate::bevy::SceneCommand;
    use crate::bevy::test_utils::TestApp;
    use crate::focus::FocusState;
    use crate::transition::{FocusPhase, IntroPhase};

    const SETTLE_FRAMES: usize = 300;

    fn assert_vec3_eq(actual: Vec3, expected: Vec3) {
        assert!(
            (actual - expected).length() < 1e-5,
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn test_startup_announces_unfocused_once() {
        let mut app = TestApp::new();
        app.run_frames(5);
        assert_eq!(app.notifications(), vec!["false"]);
        assert_eq!(app.focus(), FocusState::Unfocused);
    }

    #[test]
    fn test_intro_zooms_from_start_to_default() {
        let mut app = TestApp::new();
        assert_eq!(app.driver().intro_phase(), IntroPhase::Running);
        let camera = app.camera();
        assert!(camera.zoom >= 1.0 && camera.zoom < 3.0);

        app.run_until_settled(SETTLE_FRAMES);

        assert_eq!(app.driver().intro_phase(), IntroPhase::Done);
        let camera = app.camera();
        assert_eq!(camera.zoom, 3.0);
        assert_eq!(camera.focal, 100_000_000.0);
        assert_vec3_eq(camera.position, Vec3::new(20.0, 20.0, 20.0));
        assert!(camera.fov() < camera.base_fov);
    }

    #[test]
    fn test_box_click_focuses_camera() {
        let mut app = TestApp::new();
        app.run_until_settled(SETTLE_FRAMES);

        let target = app.box_entity(0);
        app.click(target);
        app.update();

        assert_eq!(app.focus(), FocusState::Focused(Vec3::new(0.1, 0.0, 0.1)));
        assert_eq!(app.notifications(), vec!["false", "true"]);
        assert_eq!(
            app.driver().focus_phase(),
            FocusPhase::TransitioningToFocused
        );

        app.run_until_settled(SETTLE_FRAMES);

        assert_eq!(app.driver().focus_phase(), FocusPhase::AtFocused);
        let camera = app.camera();
        assert_eq!(camera.zoom, 20.0);
        assert_eq!(camera.focal, 10.0);
        assert_vec3_eq(camera.position, Vec3::new(30.0, 10.0, 20.0));
    }

    #[test]
    fn test_floor_click_returns_camera() {
        let mut app = TestApp::new();
        let target = app.box_entity(1);
        app.click(target);
        app.update();
        app.run_until_settled(SETTLE_FRAMES);

        let floor = app.floor_entity();
        app.click(floor);
        app.update();
        assert_eq!(app.focus(), FocusState::Unfocused);
        app.run_until_settled(SETTLE_FRAMES);

        assert_eq!(app.driver().focus_phase(), FocusPhase::AtUnfocused);
        let camera = app.camera();
        assert_eq!(camera.zoom, 3.0);
        assert_eq!(camera.focal, 100_000_000.0);
        assert_vec3_eq(camera.position, Vec3::new(20.0, 20.0, 20.0));
        assert_eq!(app.notifications(), vec!["false", "true", "false"]);
    }

    #[test]
    fn test_floor_click_while_unfocused_sends_nothing() {
        let mut app = TestApp::new();
        let floor = app.floor_entity();
        app.click(floor);
        app.update();
        app.click(floor);
        app.update();

        assert_eq!(app.notifications(), vec!["false"]);
        assert_eq!(app.driver().focus_phase(), FocusPhase::AtUnfocused);
    }

    #[test]
    fn test_hovered_box_reports_lifted_position() {
        let mut app = TestApp::new();
        let target = app.box_entity(0);
        app.hover(target, true);
        app.update();
        assert_vec3_eq(app.box_translation(0), Vec3::new(0.1, 0.1, 0.1));

        app.click(target);
        app.update();
        assert_eq!(app.focus(), FocusState::Focused(Vec3::new(0.1, 0.1, 0.1)));

        app.hover(target, false);
        app.update();
        assert_vec3_eq(app.box_translation(0), Vec3::new(0.1, 0.0, 0.1));
        // Hover never changes focus
        assert_eq!(app.focus(), FocusState::Focused(Vec3::new(0.1, 0.1, 0.1)));
    }

    #[test]
    fn test_second_box_replaces_focus() {
        let mut app = TestApp::new();
        let first = app.box_entity(0);
        let second = app.box_entity(1);

        app.click(first);
        app.update();
        app.click(second);
        app.update();

        assert_eq!(app.focus(), FocusState::Focused(Vec3::new(0.1, 0.0, 1.1)));
        assert_eq!(app.notifications(), vec!["false", "true", "true"]);
    }

    #[test]
    fn test_same_box_twice_notifies_again() {
        let mut app = TestApp::new();
        let target = app.box_entity(0);
        app.click(target);
        app.update();
        app.run_until_settled(SETTLE_FRAMES);

        app.click(target);
        app.update();
        assert_eq!(app.notifications(), vec!["false", "true", "true"]);
        assert_eq!(app.focus(), FocusState::Focused(Vec3::new(0.1, 0.0, 0.1)));
        assert_eq!(
            app.driver().focus_phase(),
            FocusPhase::TransitioningToFocused
        );

        // Restarted from the focused end, so the camera stays put
        app.run_until_settled(SETTLE_FRAMES);
        assert_eq!(app.driver().focus_phase(), FocusPhase::AtFocused);
        assert_eq!(app.camera().zoom, 20.0);
    }

    #[test]
    fn test_box_wins_over_floor_in_same_frame() {
        let mut app = TestApp::new();
        let target = app.box_entity(1);
        let floor = app.floor_entity();
        app.click(target);
        app.click(floor);
        app.update();

        assert_eq!(app.focus(), FocusState::Focused(Vec3::new(0.1, 0.0, 1.1)));
        assert_eq!(app.notifications(), vec!["false", "true"]);
    }

    #[test]
    fn test_focus_during_intro_ends_intro() {
        let mut app = TestApp::new();
        app.run_frames(3);
        let target = app.box_entity(0);
        app.click(target);
        app.update();

        assert_eq!(app.driver().intro_phase(), IntroPhase::Done);
        app.run_until_settled(SETTLE_FRAMES);
        assert_eq!(app.camera().zoom, 20.0);
    }

    #[test]
    fn test_commands_respect_yield() {
        let mut app = TestApp::new();
        app.push_command(SceneCommand::FocusBox { index: 1 });
        app.push_command(SceneCommand::Yield);
        app.push_command(SceneCommand::ClearFocus);

        app.update();
        assert_eq!(app.focus(), FocusState::Focused(Vec3::new(0.1, 0.0, 1.1)));

        app.update();
        assert_eq!(app.focus(), FocusState::Unfocused);
        assert_eq!(app.notifications(), vec!["false", "true", "false"]);
    }

    #[test]
    fn test_unknown_box_command_is_ignored() {
        let mut app = TestApp::new();
        app.push_command(SceneCommand::FocusBox { index: 7 });
        app.update();
        assert_eq!(app.focus(), FocusState::Unfocused);
        assert_eq!(app.notifications(), vec!["false"]);
    }

    #[test]
    fn test_set_focus_command_accepts_any_position() {
        let mut app = TestApp::new();
        app.push_command(SceneCommand::SetFocus {
            position: Some([5.0, -1.0, 2.0]),
        });
        app.update();
        assert_eq!(app.focus(), FocusState::Focused(Vec3::new(5.0, -1.0, 2.0)));
    }

    #[test]
    fn test_focus_summary_synced_to_store() {
        let mut app = TestApp::new();
        let before = app.stores().focus.get_version();

        let target = app.box_entity(0);
        app.click(target);
        app.update();

        let store = &app.stores().focus;
        assert!(store.get_version() > before);
        let summary = store.get_summary();
        assert!(summary.focused);
        assert_eq!(summary.focus_phase, "TransitioningToFocused");
        let position = summary.position.expect("focused summary has a position");
        assert_vec3_eq(Vec3::from_array(position), Vec3::new(0.1, 0.0, 0.1));

        app.run_until_settled(SETTLE_FRAMES);
        app.update();
        let summary = app.stores().focus.get_summary();
        assert_eq!(summary.focus_phase, "AtFocused");
        assert!(!summary.animating);
        assert_eq!(summary.scalar, 1.0);
    }
}
