//! Action timer expiry events.
//!
//! When a [`PendingTimer`](crate::components::timer::PendingTimer) on an
//! entity's [`ActionTimers`](crate::components::timer::ActionTimers) comes
//! due, [`update_action_timers`](crate::systems::timer::update_action_timers)
//! triggers an [`ActionTimerEvent`]. The
//! [`action_timer_observer`](crate::systems::timer::action_timer_observer)
//! resolves it against the live world and applies the action.
//!
//! # Related
//!
//! - [`crate::components::timer::TimerAction`] – what an expiry does
//! - [`crate::systems::timer`] – the countdown system and the observer

use bevy_ecs::prelude::*;

use crate::components::timer::TimerAction;

/// Event emitted when an action timer expires.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionTimerEvent {
    /// The entity the timer was scheduled on.
    pub entity: Entity,
    pub action: TimerAction,
}
