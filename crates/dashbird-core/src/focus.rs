//! Focus state of the scene.

use bevy::math::Vec3;

/// Which object, if any, the camera is focused on.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FocusState {
    #[default]
    Unfocused,
    /// Focused on the object at this world position.
    Focused(Vec3),
}

impl FocusState {
    pub fn is_focused(&self) -> bool {
        matches!(self, Self::Focused(_))
    }

    pub fn position(&self) -> Option<Vec3> {
        match self {
            Self::Focused(position) => Some(*position),
            Self::Unfocused => None,
        }
    }

    /// Text sent to the embedding page when this state becomes current.
    pub fn notification(&self) -> &'static str {
        if self.is_focused() { "true" } else { "false" }
    }

    /// Value the camera scalar animates toward for this state.
    pub fn transition_target(&self) -> f32 {
        if self.is_focused() { 1.0 } else { 0.0 }
    }
}

impl From<Option<Vec3>> for FocusState {
    fn from(position: Option<Vec3>) -> Self {
        position.map_or(Self::Unfocused, Self::Focused)
    }
}

/// A replaced focus state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusChange {
    pub previous: FocusState,
    pub current: FocusState,
}

/// Holds the focus state; created unfocused.
#[derive(Debug, Clone, Default)]
pub struct FocusHolder {
    state: FocusState,
}

impl FocusHolder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FocusState {
        self.state
    }

    /// Replaces the state. Any value is accepted.
    ///
    /// Every focused value counts as a change, including the one already
    /// held: focusing the same box again re-sends `"true"` and restarts the
    /// transition. Clearing an already unfocused holder is not a change.
    pub fn set_focus(&mut self, value: FocusState) -> Option<FocusChange> {
        if self.state == FocusState::Unfocused && value == FocusState::Unfocused {
            return None;
        }
        let previous = std::mem::replace(&mut self.state, value);
        Some(FocusChange {
            previous,
            current: value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_holder_starts_unfocused() {
        let holder = FocusHolder::new();
        assert_eq!(holder.state(), FocusState::Unfocused);
        assert_eq!(holder.state().notification(), "false");
    }

    #[test]
    fn test_set_focus_replaces() {
        let mut holder = FocusHolder::new();
        let a = Vec3::new(0.1, 0.0, 0.1);
        let b = Vec3::new(0.1, 0.1, 1.1);

        let change = holder.set_focus(FocusState::Focused(a)).unwrap();
        assert_eq!(change.previous, FocusState::Unfocused);
        assert_eq!(change.current, FocusState::Focused(a));

        let change = holder.set_focus(FocusState::Focused(b)).unwrap();
        assert_eq!(change.previous, FocusState::Focused(a));
        assert_eq!(holder.state().position(), Some(b));
    }

    #[test]
    fn test_clearing_unfocused_is_not_a_change() {
        let mut holder = FocusHolder::new();
        assert!(holder.set_focus(FocusState::Unfocused).is_none());
    }

    #[test]
    fn test_refocusing_same_position_is_a_change() {
        let mut holder = FocusHolder::new();
        let a = Vec3::ONE;
        assert!(holder.set_focus(FocusState::Focused(a)).is_some());

        let change = holder.set_focus(FocusState::Focused(a)).unwrap();
        assert_eq!(change.previous, FocusState::Focused(a));
        assert_eq!(change.current, FocusState::Focused(a));
        assert_eq!(change.current.notification(), "true");
    }

    #[test]
    fn test_transition_targets() {
        assert_eq!(FocusState::Unfocused.transition_target(), 0.0);
        assert_eq!(FocusState::Focused(Vec3::ZERO).transition_target(), 1.0);
        assert_eq!(FocusState::from(Some(Vec3::X)), FocusState::Focused(Vec3::X));
        assert_eq!(FocusState::from(None), FocusState::Unfocused);
    }
}
