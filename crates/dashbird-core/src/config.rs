//! Scene configuration.
//!
//! Every field has a default matching the stock scene, so the embedding
//! page may pass `{}` or override only the parts it cares about.

use bevy::color::Srgba;
use bevy::math::Vec3;
use serde::{Deserialize, Serialize};

use crate::interpolate::Interpolation;
use crate::spring::SpringConfig;

/// Error type for scene configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Spring {0} is out of range")]
    InvalidSpring(&'static str),
    #[error("Camera {0} must be positive")]
    InvalidCamera(&'static str),
    #[error("Invalid color for {field}: {value}")]
    InvalidColor { field: &'static str, value: String },
    #[error("Dot grid {0} must be non-zero")]
    InvalidDotGrid(&'static str),
}

/// Camera constants and the ranges the transitions interpolate between.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Zoom at mount, before the intro animation.
    pub starting_zoom: f32,
    /// Zoom once the intro has finished and nothing is focused.
    pub default_zoom: f32,
    pub default_focal: f32,
    pub focused_zoom: f32,
    pub focused_focal: f32,
    /// Camera (x, y) when nothing is focused.
    pub unfocused_position: [f32; 2],
    /// Camera (x, y) when an object is focused.
    pub focused_position: [f32; 2],
    pub initial_position: [f32; 3],
    /// Vertical field of view at zoom 1.
    pub base_fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            starting_zoom: 1.0,
            default_zoom: 3.0,
            default_focal: 100_000_000.0,
            focused_zoom: 20.0,
            focused_focal: 10.0,
            unfocused_position: [20.0, 20.0],
            focused_position: [30.0, 10.0],
            initial_position: [20.0, 20.0, 20.0],
            base_fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl CameraConfig {
    /// Intro: scalar -1 → 0 maps starting zoom → default zoom.
    pub fn intro_zoom(&self) -> Interpolation {
        Interpolation::new([-1.0, 0.0], [self.starting_zoom, self.default_zoom])
    }

    pub fn focus_zoom(&self) -> Interpolation {
        Interpolation::new([0.0, 1.0], [self.default_zoom, self.focused_zoom])
    }

    pub fn focus_focal(&self) -> Interpolation {
        Interpolation::new([0.0, 1.0], [self.default_focal, self.focused_focal])
    }

    pub fn focus_x(&self) -> Interpolation {
        Interpolation::new(
            [0.0, 1.0],
            [self.unfocused_position[0], self.focused_position[0]],
        )
    }

    pub fn focus_y(&self) -> Interpolation {
        Interpolation::new(
            [0.0, 1.0],
            [self.unfocused_position[1], self.focused_position[1]],
        )
    }

    pub fn initial_position(&self) -> Vec3 {
        Vec3::from_array(self.initial_position)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("starting_zoom", self.starting_zoom),
            ("default_zoom", self.default_zoom),
            ("focused_zoom", self.focused_zoom),
            ("base_fov_degrees", self.base_fov_degrees),
            ("near", self.near),
            ("far", self.far),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::InvalidCamera(name));
            }
        }
        Ok(())
    }
}

/// Clickable boxes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxConfig {
    /// Logical positions; boxes are drawn at `position + offset`.
    pub positions: Vec<[f32; 3]>,
    pub offset: [f32; 3],
    /// Vertical lift while hovered.
    pub hover_lift: f32,
    pub scale: [f32; 3],
    pub hover_scale: [f32; 3],
    pub color: String,
    pub hover_color: String,
}

impl Default for BoxConfig {
    fn default() -> Self {
        Self {
            positions: vec![[0.0, 0.0, 0.0], [0.0, 0.0, 1.0]],
            offset: [0.1, 0.0, 0.1],
            hover_lift: 0.1,
            scale: [0.8, 0.8, 0.8],
            hover_scale: [0.8, 1.0, 0.8],
            color: "#FFA500".to_string(),
            hover_color: "#653EFF".to_string(),
        }
    }
}

/// Invisible pickable ground plane; clicking it clears focus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloorConfig {
    pub size: f32,
    pub height: f32,
}

impl Default for FloorConfig {
    fn default() -> Self {
        Self {
            size: 100.0,
            height: -0.501,
        }
    }
}

/// Backdrop of small dots laid on the ground.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DotGridConfig {
    pub count: usize,
    pub columns: usize,
    /// Subtracted from the column/row index before centring each dot.
    pub origin_offset: f32,
    pub radius: f32,
    pub height: f32,
}

impl Default for DotGridConfig {
    fn default() -> Self {
        Self {
            count: 5000,
            columns: 100,
            origin_offset: 25.0,
            radius: 0.05,
            height: -0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    pub text: String,
    pub anchor: [f32; 3],
    pub font_size: f32,
    pub color: String,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            text: "Dashbird".to_string(),
            anchor: [1.0, -0.5, 2.0],
            font_size: 48.0,
            color: "#000000".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    pub ambient_brightness: f32,
    pub spot_position: [f32; 3],
    /// Outer cone angle in radians.
    pub spot_angle: f32,
    pub point_position: [f32; 3],
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient_brightness: 800.0,
            spot_position: [10.0, 10.0, 10.0],
            spot_angle: 0.15,
            point_position: [-10.0, 4.0, -10.0],
        }
    }
}

/// Complete scene configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub camera: CameraConfig,
    pub spring: SpringConfig,
    pub boxes: BoxConfig,
    pub floor: FloorConfig,
    pub dots: DotGridConfig,
    pub label: LabelConfig,
    pub lighting: LightingConfig,
    /// Overrides the device pixel ratio reported by the host.
    pub pixel_ratio: Option<f32>,
}

impl SceneConfig {
    /// Parses a JSON config and validates it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Config handed over by the host page; an empty string selects the defaults.
    pub fn from_host_json(json: &str) -> Result<Self, ConfigError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        Self::from_json(json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let spring = &self.spring;
        if !(spring.stiffness > 0.0) {
            return Err(ConfigError::InvalidSpring("stiffness"));
        }
        if !(spring.mass > 0.0) {
            return Err(ConfigError::InvalidSpring("mass"));
        }
        if !(spring.damping >= 0.0) {
            return Err(ConfigError::InvalidSpring("damping"));
        }
        if !(spring.rest_delta > 0.0) {
            return Err(ConfigError::InvalidSpring("rest_delta"));
        }
        if !(spring.rest_speed > 0.0) {
            return Err(ConfigError::InvalidSpring("rest_speed"));
        }

        self.camera.validate()?;

        parse_color("boxes.color", &self.boxes.color)?;
        parse_color("boxes.hover_color", &self.boxes.hover_color)?;
        parse_color("label.color", &self.label.color)?;

        if self.dots.columns == 0 {
            return Err(ConfigError::InvalidDotGrid("columns"));
        }
        Ok(())
    }
}

/// Parses a `#RRGGBB`-style hex color.
pub fn parse_color(field: &'static str, value: &str) -> Result<Srgba, ConfigError> {
    Srgba::hex(value).map_err(|_| ConfigError::InvalidColor {
        field,
        value: value.to_string(),
    })
}
