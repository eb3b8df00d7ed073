//! Animation progress events.
//!
//! Emitted by the [`animation`](crate::systems::animation::animation) system,
//! only for entities carrying an
//! [`AnimationWatch`](crate::components::animation::AnimationWatch). The
//! `owner` field is copied from the watch so observers can reach the actor
//! that started the animation.

use bevy_ecs::prelude::*;

/// A watched animation moved to a new frame.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct AnimationFrameEvent {
    /// The animated entity.
    pub entity: Entity,
    pub owner: Entity,
    pub key: String,
    pub frame_index: usize,
}

/// A watched non-looping animation showed its last frame.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct AnimationCompleteEvent {
    pub entity: Entity,
    pub owner: Entity,
    pub key: String,
}
