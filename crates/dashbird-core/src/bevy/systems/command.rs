//! Command processing system.
//!
//! Processes commands from the JavaScript/WASM interface.

use bevy::prelude::*;

use crate::bevy::{FocusBox, FocusRequestEvent, SceneCommand, SceneCommandQueue};
use crate::focus::FocusState;

/// System to process all commands from the external command queue.
///
/// Handles commands until a Yield is encountered.
/// Commands after Yield are processed in the next frame.
pub fn process_scene_commands(
    command_queue: Res<SceneCommandQueue>,
    boxes: Query<(&FocusBox, &Transform)>,
    mut requests: MessageWriter<FocusRequestEvent>,
) {
    for command in command_queue.drain_until_yield() {
        match command {
            SceneCommand::FocusBox { index } => {
                let Some((_, transform)) = boxes.iter().find(|(b, _)| b.index == index) else {
                    tracing::warn!("[command] FocusBox: no box with index {}", index);
                    continue;
                };
                tracing::info!("[command] FocusBox: {}", index);
                requests.write(FocusRequestEvent {
                    state: FocusState::Focused(transform.translation),
                });
            }
            SceneCommand::SetFocus { position } => {
                tracing::info!("[command] SetFocus: {:?}", position);
                requests.write(FocusRequestEvent {
                    state: position.map(Vec3::from_array).into(),
                });
            }
            SceneCommand::ClearFocus => {
                tracing::info!("[command] ClearFocus");
                requests.write(FocusRequestEvent {
                    state: FocusState::Unfocused,
                });
            }
            // Consumed by drain_until_yield()
            SceneCommand::Yield => {}
        }
    }
}
