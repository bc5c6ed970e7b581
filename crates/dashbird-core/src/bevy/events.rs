//! ECS Events (Messages) for the focus scene.
//!
//! Picking observers and host commands only emit messages; the systems in
//! `systems::focus` turn them into focus changes.

use bevy::prelude::*;

use crate::focus::FocusState;

/// A scene entity was clicked.
#[derive(Message, Debug, Clone, Copy)]
pub struct SceneClickEvent {
    pub target: Entity,
}

/// The pointer entered or left a box.
#[derive(Message, Debug, Clone, Copy)]
pub struct BoxHoverEvent {
    pub target: Entity,
    pub hovered: bool,
}

/// Request to replace the focus state.
#[derive(Message, Debug, Clone, Copy)]
pub struct FocusRequestEvent {
    pub state: FocusState,
}

/// Message fired when the focus state actually changed.
#[derive(Message, Debug, Clone, Copy)]
pub struct FocusChangedEvent {
    pub previous: FocusState,
    pub current: FocusState,
}
