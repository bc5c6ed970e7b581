//! Pointer interaction.
//!
//! Picking observers attached to boxes and the floor. They only write
//! messages; focus and hover are applied by the systems in `focus`.

use bevy::prelude::*;
use bevy::window::{CursorIcon, PrimaryWindow, SystemCursorIcon};

use crate::bevy::{BoxHoverEvent, FocusBox, SceneClickEvent};

/// Materials for the two box colors.
#[derive(Resource, Debug, Clone)]
pub struct BoxMaterials {
    pub normal: Handle<StandardMaterial>,
    pub hovered: Handle<StandardMaterial>,
}

/// Click on a box or the floor.
///
/// Propagation stops here so a box click never reaches whatever lies
/// behind it.
pub fn on_scene_click(
    mut click: On<Pointer<Click>>,
    mut clicks: MessageWriter<SceneClickEvent>,
) {
    click.propagate(false);
    clicks.write(SceneClickEvent {
        target: click.entity,
    });
}

pub fn on_box_over(over: On<Pointer<Over>>, mut hovers: MessageWriter<BoxHoverEvent>) {
    hovers.write(BoxHoverEvent {
        target: over.entity,
        hovered: true,
    });
}

pub fn on_box_out(out: On<Pointer<Out>>, mut hovers: MessageWriter<BoxHoverEvent>) {
    hovers.write(BoxHoverEvent {
        target: out.entity,
        hovered: false,
    });
}

/// Pointer cursor while any box is hovered, default otherwise.
pub fn update_cursor_icon(
    mut commands: Commands,
    changed: Query<(), Changed<FocusBox>>,
    boxes: Query<&FocusBox>,
    windows: Query<Entity, With<PrimaryWindow>>,
) {
    if changed.is_empty() {
        return;
    }
    let icon = if boxes.iter().any(|b| b.hovered) {
        SystemCursorIcon::Pointer
    } else {
        SystemCursorIcon::Default
    };
    for window in &windows {
        commands.entity(window).insert(CursorIcon::from(icon));
    }
}

/// Swaps box materials on hover changes.
pub fn update_box_materials(
    materials: Option<Res<BoxMaterials>>,
    mut boxes: Query<(&FocusBox, &mut MeshMaterial3d<StandardMaterial>), Changed<FocusBox>>,
) {
    let Some(materials) = materials else {
        return;
    };
    for (focus_box, mut material) in &mut boxes {
        let handle = if focus_box.hovered {
            &materials.hovered
        } else {
            &materials.normal
        };
        if material.0 != *handle {
            material.0 = handle.clone();
        }
    }
}
