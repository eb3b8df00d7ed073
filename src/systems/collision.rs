//! Collision detection.
//!
//! [`collision_detector`] checks every pair of entities with a
//! [`BoxCollider`] and triggers a [`CollisionEvent`] for each overlapping
//! pair. What a contact means (damage, pass-through, nothing) is decided by
//! the observers in [`crate::systems::combat`] and
//! [`crate::systems::projectile`].
use bevy_ecs::prelude::*;

use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::events::collision::CollisionEvent;

pub fn collision_detector(
    query: Query<(Entity, &MapPosition, &BoxCollider)>,
    mut commands: Commands,
) {
    for [(entity_a, position_a, collider_a), (entity_b, position_b, collider_b)] in
        query.iter_combinations()
    {
        if collider_a.overlaps(position_a.pos, collider_b, position_b.pos) {
            commands.trigger(CollisionEvent {
                a: entity_a,
                b: entity_b,
            });
        }
    }
}
