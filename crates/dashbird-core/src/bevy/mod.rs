//! Bevy integration for the focus scene.
//!
//! ECS components, resources, messages and systems for the headless logic,
//! plus rendering and picking for the windowed build.

pub mod components;
pub mod events;
pub mod plugin;
pub mod resources;
pub mod state_store;
pub mod systems;

#[cfg(test)]
pub(crate) mod test_utils;

#[cfg(target_arch = "wasm32")]
pub mod wasm_entry;

#[cfg(target_arch = "wasm32")]
pub use wasm_entry::*;

pub use components::*;
pub use events::*;
pub use plugin::{SceneHeadlessPlugin, SceneUnifiedPlugin};
pub use resources::*;
pub use state_store::{FocusStore, FocusSummary, StateStores};
