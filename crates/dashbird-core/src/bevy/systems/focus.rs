//! Focus systems.
//!
//! Clicks and commands arrive as messages; this is the only place the
//! focus state is written and notifications are sent.

use bevy::prelude::*;

use crate::bevy::{
    BoxHoverEvent, Floor, FocusBox, FocusChangedEvent, FocusOutbox, FocusRequestEvent,
    SceneClickEvent, SceneFocus,
};
use crate::focus::FocusState;

/// Sends the notification for the state the scene starts in.
pub fn announce_initial_focus(focus: Res<SceneFocus>, outbox: Res<FocusOutbox>) {
    let state = focus.state();
    tracing::info!("[scene] initial focus: {:?}", state);
    outbox.notify(state.notification());
}

/// Applies pointer enter/leave to boxes.
pub fn apply_box_hover(
    mut hovers: MessageReader<BoxHoverEvent>,
    mut boxes: Query<(&mut FocusBox, &mut Transform)>,
) {
    for hover in hovers.read() {
        let Ok((mut focus_box, mut transform)) = boxes.get_mut(hover.target) else {
            continue;
        };
        if focus_box.hovered == hover.hovered {
            continue;
        }
        focus_box.hovered = hover.hovered;
        *transform = focus_box.transform();
    }
}

/// Turns clicks into focus requests.
///
/// A box click reports the box's current translation. When a box and the
/// floor are both clicked in one frame, the box wins.
pub fn resolve_scene_clicks(
    mut clicks: MessageReader<SceneClickEvent>,
    boxes: Query<&Transform, With<FocusBox>>,
    floors: Query<(), With<Floor>>,
    mut requests: MessageWriter<FocusRequestEvent>,
) {
    let mut box_position = None;
    let mut floor_clicked = false;

    for click in clicks.read() {
        if let Ok(transform) = boxes.get(click.target) {
            box_position = Some(transform.translation);
        } else if floors.contains(click.target) {
            floor_clicked = true;
        }
    }

    if let Some(position) = box_position {
        requests.write(FocusRequestEvent {
            state: FocusState::Focused(position),
        });
    } else if floor_clicked {
        requests.write(FocusRequestEvent {
            state: FocusState::Unfocused,
        });
    }
}

/// Replaces the focus state and notifies on every actual change.
pub fn apply_focus_requests(
    mut requests: MessageReader<FocusRequestEvent>,
    mut focus: ResMut<SceneFocus>,
    outbox: Res<FocusOutbox>,
    mut changes: MessageWriter<FocusChangedEvent>,
) {
    for request in requests.read() {
        let Some(change) = focus.set_focus(request.state) else {
            continue;
        };
        tracing::info!(
            "[scene] focus changed: {:?} -> {:?}",
            change.previous,
            change.current
        );
        outbox.notify(change.current.notification());
        changes.write(FocusChangedEvent {
            previous: change.previous,
            current: change.current,
        });
    }
}
