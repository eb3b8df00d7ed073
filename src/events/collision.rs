//! Collision event type.
//!
//! The [`collision_detector`](crate::systems::collision::collision_detector)
//! system emits [`CollisionEvent`] whenever two entities with colliders
//! overlap. Combat observers subscribe to it to apply projectile and weapon
//! hits.
use bevy_ecs::prelude::*;

/// Event fired when two entities with BoxCollider overlap.
///
/// The two fields, [`CollisionEvent::a`] and [`CollisionEvent::b`], are the
/// entity IDs of the participants. No ordering guarantees are provided.
#[derive(Event, Debug, Clone, Copy)]
pub struct CollisionEvent {
    pub a: Entity,
    pub b: Entity,
}

impl CollisionEvent {
    /// The participant that is not `entity`, if `entity` took part.
    pub fn other(&self, entity: Entity) -> Option<Entity> {
        if self.a == entity {
            Some(self.b)
        } else if self.b == entity {
            Some(self.a)
        } else {
            None
        }
    }
}
