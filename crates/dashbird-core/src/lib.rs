//! Dashbird Core Library
//!
//! Focus-and-zoom camera scene: two clickable boxes on an invisible floor,
//! a dot-grid backdrop and a label. Clicking a box springs the camera toward
//! a close-up; clicking the floor springs it back. Every focus change is
//! reported to the embedding page as `"true"` or `"false"`.
//!
//! The engine-independent pieces (interpolation, spring, focus state,
//! transition driver) live at the top level; `bevy` wires them into ECS.

#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::cast_precision_loss)]

pub mod config;
pub mod focus;
pub mod interpolate;
pub mod notify;
pub mod spring;
pub mod transition;

// Bevy integration
pub mod bevy;

pub use config::{ConfigError, SceneConfig};
pub use focus::{FocusChange, FocusHolder, FocusState};
pub use interpolate::{Interpolation, lerp};
pub use notify::{FocusNotifier, RecordingNotifier, SharedNotifier, TracingNotifier};
pub use spring::{Spring, SpringConfig, SpringSample};
pub use transition::{CameraHandle, CameraTransitionDriver, FocusPhase, IntroPhase};
