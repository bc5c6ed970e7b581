//! State synchronization systems.
//!
//! Syncs Bevy ECS state to StateStores for Yew UI access.

use bevy::prelude::*;

use crate::bevy::{CameraDriver, FocusSummary, SceneFocus, StateStores};

/// System to sync the focus summary to the state store.
///
/// Only runs the comparison when focus or the driver changed this frame.
pub fn sync_focus_to_store(
    focus: Res<SceneFocus>,
    driver: Res<CameraDriver>,
    state_stores: Res<StateStores>,
) {
    if !focus.is_changed() && !driver.is_changed() {
        return;
    }

    let state = focus.state();
    let (intro_phase, focus_phase) =
        FocusSummary::phase_names(driver.intro_phase(), driver.focus_phase());
    state_stores.focus.update(FocusSummary {
        focused: state.is_focused(),
        position: state.position().map(|p| p.to_array()),
        intro_phase,
        focus_phase,
        scalar: driver.scalar().value(),
        animating: driver.is_animating(),
    });
}
