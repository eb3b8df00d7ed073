//! Kinematic body component.
//!
//! The [`RigidBody`] stores the velocity an entity wants this frame. Input and
//! AI systems write it, the [`movement`](crate::systems::movement::movement)
//! system integrates it into [`MapPosition`](super::mapposition::MapPosition).
//!
//! The `frozen` flag skips integration, useful when an entity's position is
//! pinned in place (e.g. a shooter planted for its shot).

use bevy_ecs::prelude::Component;
use glam::Vec2;

#[derive(Component, Clone, Copy, Debug, Default)]
pub struct RigidBody {
    /// Current velocity in world units per second.
    pub velocity: Vec2,
    /// When true, the movement system leaves this entity alone.
    pub frozen: bool,
}

impl RigidBody {
    /// Create a RigidBody at rest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a RigidBody already moving at `velocity`.
    pub fn with_velocity(velocity: Vec2) -> Self {
        Self {
            velocity,
            frozen: false,
        }
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    /// Freeze the rigid body, preventing movement system from updating it.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_at_rest() {
        let rb = RigidBody::new();
        assert_eq!(rb.velocity, Vec2::ZERO);
        assert!(!rb.frozen);
    }

    #[test]
    fn test_with_velocity() {
        let rb = RigidBody::with_velocity(Vec2::new(3.0, -4.0));
        assert_eq!(rb.velocity, Vec2::new(3.0, -4.0));
    }

    #[test]
    fn test_freeze() {
        let mut rb = RigidBody::new();
        rb.freeze();
        assert!(rb.frozen);
    }
}
