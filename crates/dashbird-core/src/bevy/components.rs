//! ECS Components for the focus scene.

use bevy::prelude::*;

use crate::config::{BoxConfig, CameraConfig};
use crate::transition::CameraHandle;

/// Logical camera of the scene.
///
/// The transition driver writes zoom, focal and position here; the render
/// binding copies them onto the engine camera's `Transform` and
/// `Projection`. Zoom narrows the field of view the way a lens zoom does:
/// `fov = 2 * atan(tan(base_fov / 2) / zoom)`.
#[derive(Component, Debug, Clone)]
pub struct SceneCamera {
    pub zoom: f32,
    /// Lens focal length. Carried for hosts that model depth of field; it
    /// does not change the perspective.
    pub focal: f32,
    pub position: Vec3,
    /// Vertical field of view at zoom 1, in radians.
    pub base_fov: f32,
    fov: f32,
    projection_revision: u64,
}

impl SceneCamera {
    pub fn new(config: &CameraConfig) -> Self {
        let base_fov = config.base_fov_degrees.to_radians();
        Self {
            zoom: config.starting_zoom,
            focal: config.default_focal,
            position: config.initial_position(),
            base_fov,
            fov: Self::effective_fov(base_fov, config.starting_zoom),
            projection_revision: 0,
        }
    }

    pub fn effective_fov(base_fov: f32, zoom: f32) -> f32 {
        2.0 * ((base_fov * 0.5).tan() / zoom.max(f32::EPSILON)).atan()
    }

    /// Field of view as of the last projection update.
    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// Number of projection updates so far.
    pub fn projection_revision(&self) -> u64 {
        self.projection_revision
    }
}

impl CameraHandle for SceneCamera {
    fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom;
    }

    fn set_focal(&mut self, focal: f32) {
        self.focal = focal;
    }

    fn set_position_x(&mut self, x: f32) {
        self.position.x = x;
    }

    fn set_position_y(&mut self, y: f32) {
        self.position.y = y;
    }

    fn update_projection(&mut self) {
        self.fov = Self::effective_fov(self.base_fov, self.zoom);
        self.projection_revision += 1;
    }
}

/// A clickable box. Clicking it focuses the camera on its position.
#[derive(Component, Debug, Clone)]
pub struct FocusBox {
    pub index: usize,
    /// Translation while not hovered.
    pub rest_translation: Vec3,
    pub hover_lift: f32,
    pub rest_scale: Vec3,
    pub hover_scale: Vec3,
    pub hovered: bool,
}

impl FocusBox {
    pub fn new(index: usize, position: Vec3, config: &BoxConfig) -> Self {
        Self {
            index,
            rest_translation: position + Vec3::from_array(config.offset),
            hover_lift: config.hover_lift,
            rest_scale: Vec3::from_array(config.scale),
            hover_scale: Vec3::from_array(config.hover_scale),
            hovered: false,
        }
    }

    pub fn translation(&self) -> Vec3 {
        if self.hovered {
            self.rest_translation + Vec3::Y * self.hover_lift
        } else {
            self.rest_translation
        }
    }

    pub fn scale(&self) -> Vec3 {
        if self.hovered { self.hover_scale } else { self.rest_scale }
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.translation()).with_scale(self.scale())
    }
}

/// Background plane; clicking it clears focus.
#[derive(Component, Debug, Clone, Default)]
pub struct Floor;

/// Parent of the dot-grid backdrop.
#[derive(Component, Debug, Clone, Default)]
pub struct DotGrid;

/// Text label pinned to a world position.
#[derive(Component, Debug, Clone)]
pub struct SceneLabel {
    pub anchor: Vec3,
}
