//! Rendering systems.
//!
//! Attaches meshes, materials and pointer observers to the logical layout,
//! spawns lights and the label, and binds `SceneCamera` to the engine camera.

use bevy::picking::Pickable;
use bevy::prelude::*;

use crate::bevy::systems::interaction::{
    BoxMaterials, on_box_out, on_box_over, on_scene_click,
};
use crate::bevy::systems::layout::dot_grid_positions;
use crate::bevy::{DotGrid, Floor, FocusBox, SceneCamera, SceneConfigRes, SceneLabel};
use crate::config::parse_color;

/// Gives the layout entities their visuals and pointer observers.
///
/// Must run after `spawn_scene_layout`.
#[allow(clippy::too_many_arguments)]
pub fn attach_scene_visuals(
    mut commands: Commands,
    config: Res<SceneConfigRes>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    cameras: Query<(Entity, &SceneCamera)>,
    boxes: Query<Entity, With<FocusBox>>,
    floors: Query<Entity, With<Floor>>,
    grids: Query<Entity, With<DotGrid>>,
) -> Result {
    for (entity, camera) in &cameras {
        commands.entity(entity).insert((
            Camera3d::default(),
            Projection::Perspective(PerspectiveProjection {
                fov: camera.fov(),
                near: config.camera.near,
                far: config.camera.far,
                ..default()
            }),
        ));
    }

    let box_materials = BoxMaterials {
        normal: materials.add(StandardMaterial::from(Color::from(parse_color(
            "boxes.color",
            &config.boxes.color,
        )?))),
        hovered: materials.add(StandardMaterial::from(Color::from(parse_color(
            "boxes.hover_color",
            &config.boxes.hover_color,
        )?))),
    };
    let box_mesh = meshes.add(Cuboid::new(1.0, 1.0, 1.0));
    for entity in &boxes {
        commands
            .entity(entity)
            .insert((
                Mesh3d(box_mesh.clone()),
                MeshMaterial3d(box_materials.normal.clone()),
            ))
            .observe(on_scene_click)
            .observe(on_box_over)
            .observe(on_box_out);
    }
    commands.insert_resource(box_materials);

    // Invisible but still hit by picking
    let floor_mesh = meshes.add(
        Plane3d::default()
            .mesh()
            .size(config.floor.size, config.floor.size),
    );
    let floor_material = materials.add(StandardMaterial {
        base_color: Color::WHITE.with_alpha(0.0),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });
    for entity in &floors {
        commands
            .entity(entity)
            .insert((Mesh3d(floor_mesh.clone()), MeshMaterial3d(floor_material.clone())))
            .observe(on_scene_click);
    }

    let dot_mesh = meshes.add(Circle::new(config.dots.radius));
    let dot_material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        unlit: true,
        ..default()
    });
    let positions = dot_grid_positions(&config.dots);
    for entity in &grids {
        commands
            .entity(entity)
            .insert(Visibility::default())
            .with_children(|parent| {
                for position in &positions {
                    parent.spawn((
                        Mesh3d(dot_mesh.clone()),
                        MeshMaterial3d(dot_material.clone()),
                        Transform::from_translation(*position),
                        Pickable::IGNORE,
                    ));
                }
            });
    }

    tracing::info!("[render] scene visuals attached");
    Ok(())
}

/// Ambient, spot and point lights.
pub fn spawn_scene_lights(mut commands: Commands, config: Res<SceneConfigRes>) {
    let lighting = &config.lighting;

    commands.insert_resource(GlobalAmbientLight {
        color: Color::WHITE,
        brightness: lighting.ambient_brightness,
        ..default()
    });

    commands.spawn((
        SpotLight {
            outer_angle: lighting.spot_angle,
            // Full penumbra
            inner_angle: 0.0,
            ..default()
        },
        Transform::from_translation(Vec3::from_array(lighting.spot_position))
            .looking_at(Vec3::ZERO, Vec3::Y),
        Name::new("Spot Light"),
    ));

    commands.spawn((
        PointLight::default(),
        Transform::from_translation(Vec3::from_array(lighting.point_position)),
        Name::new("Point Light"),
    ));
}

/// Text label overlay; placed each frame by `position_scene_label`.
///
/// Screen-space UI: only the anchor is projected. The text stays
/// screen-aligned and does not lie on the ground or shrink with distance.
pub fn spawn_scene_label(mut commands: Commands, config: Res<SceneConfigRes>) -> Result {
    let label = &config.label;
    let color = parse_color("label.color", &label.color)?;
    commands.spawn((
        SceneLabel {
            anchor: Vec3::from_array(label.anchor),
        },
        Text::new(label.text.clone()),
        TextFont {
            font_size: label.font_size,
            ..default()
        },
        TextColor(Color::from(color)),
        Node {
            position_type: PositionType::Absolute,
            ..default()
        },
    ));
    Ok(())
}

/// Copies the logical camera onto the engine camera.
///
/// The camera always looks at the origin.
pub fn apply_scene_camera(
    mut cameras: Query<(&SceneCamera, &mut Transform, &mut Projection), Changed<SceneCamera>>,
) {
    for (camera, mut transform, mut projection) in &mut cameras {
        *transform =
            Transform::from_translation(camera.position).looking_at(Vec3::ZERO, Vec3::Y);
        if let Projection::Perspective(perspective) = projection.as_mut() {
            perspective.fov = camera.fov();
        }
    }
}

/// Projects each label anchor into the viewport and moves the overlay there.
pub fn position_scene_label(
    cameras: Query<(&Camera, &Transform), With<SceneCamera>>,
    mut labels: Query<(&SceneLabel, &mut Node)>,
) {
    let Ok((camera, transform)) = cameras.single() else {
        return;
    };
    let camera_transform = GlobalTransform::from(*transform);
    for (label, mut node) in &mut labels {
        let Ok(viewport) = camera.world_to_viewport(&camera_transform, label.anchor) else {
            continue;
        };
        node.left = Val::Px(viewport.x);
        node.top = Val::Px(viewport.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_is_screen_space_overlay() {
        let mut app = App::new();
        app.insert_resource(SceneConfigRes::default())
            .add_systems(Startup, spawn_scene_label);
        app.update();

        let world = app.world_mut();
        let mut labels = world.query::<(&SceneLabel, &Node, &Text)>();
        let (label, node, text) = labels.single(world).unwrap();
        assert_eq!(label.anchor, Vec3::new(1.0, -0.5, 2.0));
        assert_eq!(node.position_type, PositionType::Absolute);
        assert_eq!(node.left, Val::Auto);
        assert_eq!(text.0, SceneConfigRes::default().label.text);
    }
}
