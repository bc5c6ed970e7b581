//! Camera transition systems.
//!
//! The driver owns the animated scalar; these systems start the intro,
//! retarget on focus changes and tick the driver against the scene camera.

use bevy::prelude::*;

use crate::bevy::{CameraDriver, FocusChangedEvent, SceneCamera};
use crate::transition::IntroPhase;

/// Starts the intro zoom once a scene camera exists.
pub fn start_intro_transition(
    cameras: Query<(), With<SceneCamera>>,
    mut driver: ResMut<CameraDriver>,
) {
    if driver.intro_phase() != IntroPhase::NotStarted || cameras.is_empty() {
        return;
    }
    if driver.start_intro() {
        tracing::info!("[camera] intro transition started");
    }
}

/// Restarts the focus transition toward the new target.
pub fn retarget_camera_on_focus_change(
    mut changes: MessageReader<FocusChangedEvent>,
    mut driver: ResMut<CameraDriver>,
) {
    for change in changes.read() {
        tracing::debug!(
            "[camera] retarget from scalar {:.3} toward {:?}",
            driver.scalar().value(),
            change.current
        );
        driver.retarget_focus(change.current);
    }
}

/// Advances in-flight transitions by the frame delta.
pub fn tick_camera_transitions(
    time: Res<Time>,
    mut driver: ResMut<CameraDriver>,
    mut cameras: Query<&mut SceneCamera>,
) {
    if !driver.is_animating() {
        return;
    }
    let Ok(mut camera) = cameras.single_mut() else {
        return;
    };
    driver.tick(time.delta_secs(), camera.as_mut());
}
