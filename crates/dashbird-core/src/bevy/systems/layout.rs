//! Scene layout spawning.
//!
//! Spawns the logical entities only; meshes, materials and pointer
//! observers are attached by the rendering systems.

use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;

use crate::bevy::{DotGrid, Floor, FocusBox, SceneCamera, SceneConfigRes};
use crate::config::DotGridConfig;

/// Spawns the camera, boxes, floor and dot-grid parent.
pub fn spawn_scene_layout(mut commands: Commands, config: Res<SceneConfigRes>) {
    let camera = SceneCamera::new(&config.camera);
    commands.spawn((
        Transform::from_translation(camera.position).looking_at(Vec3::ZERO, Vec3::Y),
        camera,
    ));

    for (index, position) in config.boxes.positions.iter().enumerate() {
        let focus_box = FocusBox::new(index, Vec3::from_array(*position), &config.boxes);
        commands.spawn((focus_box.transform(), focus_box));
    }

    commands.spawn((Floor, Transform::from_xyz(0.0, config.floor.height, 0.0)));

    commands.spawn((DotGrid, dot_grid_transform(&config.dots)));

    tracing::info!(
        "[scene] layout spawned: {} boxes, {} dots",
        config.boxes.positions.len(),
        config.dots.count
    );
}

/// Transform of the grid parent: lowered to the grid height and laid flat.
pub fn dot_grid_transform(config: &DotGridConfig) -> Transform {
    Transform::from_xyz(0.0, config.height, 0.0).with_rotation(Quat::from_rotation_x(-FRAC_PI_2))
}

/// Dot positions in the grid's local plane (z = 0).
pub fn dot_grid_positions(config: &DotGridConfig) -> Vec<Vec3> {
    (0..config.count)
        .map(|i| {
            let column = (i % config.columns) as f32;
            let row = (i / config.columns) as f32;
            Vec3::new(
                column - config.origin_offset + 0.5,
                row - config.origin_offset + 0.5,
                0.0,
            )
        })
        .collect()
}
