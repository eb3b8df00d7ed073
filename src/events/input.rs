//! Input action events.
//!
//! This module defines [`InputEvent`] which is triggered when gameplay-relevant
//! input actions occur (press or release). The [`InputAction`] enum lists all
//! recognized actions.
//!
//! Observers can subscribe to these events to react to input without directly
//! reading the [`InputState`](crate::resources::input::InputState) resource.
//! The swing is started this way, so one press yields at most one attack.

use bevy_ecs::prelude::*;

/// Enumeration of logical input actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Primary direction: up (default: W key).
    MainDirectionUp,
    /// Primary direction: down (default: S key).
    MainDirectionDown,
    /// Primary direction: left (default: A key).
    MainDirectionLeft,
    /// Primary direction: right (default: D key).
    MainDirectionRight,
    /// Dodge roll (default: Space).
    Dodge,
    /// Weapon swing (default: left mouse button).
    Attack,
}

/// Event emitted when an input action is pressed or released.
///
/// The `action` field identifies which logical action occurred, and `pressed`
/// indicates whether it was a press (true) or release (false).
#[derive(Event, Debug, Clone, Copy)]
pub struct InputEvent {
    /// The input action that triggered this event.
    pub action: InputAction,
    /// Whether the action was pressed (true) or released (false).
    pub pressed: bool,
}
