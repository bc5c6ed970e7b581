//! Systems for the focus scene.
//!
//! Organized by functionality:
//! - layout: Spawning the logical scene (camera, boxes, floor, grid, label)
//! - command: Command queue processing from WASM
//! - focus: Click resolution, hover and focus-state updates
//! - camera: Intro and focus transitions driving the scene camera
//! - interaction: Pointer observers, cursor and box materials
//! - rendering: Meshes, lights and engine camera binding
//! - state_sync: Sync ECS state to shared stores for UI

pub mod camera;
pub mod command;
pub mod focus;
pub mod interaction;
pub mod layout;
pub mod rendering;
pub mod state_sync;

pub use camera::*;
pub use command::*;
pub use focus::*;
pub use interaction::*;
pub use layout::*;
pub use rendering::*;
pub use state_sync::*;
