//! Time-to-live component for automatic entity despawning.
//!
//! The [`Ttl`] component counts down time each frame. When the remaining time
//! reaches zero, the entity is despawned by
//! [`ttl_system`](crate::systems::ttl::ttl_system). Projectiles carry one so
//! that a shot that never hits anything still goes away.

use bevy_ecs::prelude::Component;

/// Time-to-live component that automatically despawns entities after a duration.
#[derive(Component, Debug, Clone, Copy)]
pub struct Ttl {
    /// Remaining time in seconds before despawn.
    pub remaining: f32,
}

impl Ttl {
    /// Create a new Ttl with the given duration in seconds.
    pub fn new(seconds: f32) -> Self {
        Ttl { remaining: seconds }
    }
}
