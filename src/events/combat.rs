//! Combat events.

use bevy_ecs::prelude::*;

/// Apply `amount` damage to `target`.
///
/// Resolved by [`damage_observer`](crate::systems::combat::damage_observer),
/// which honours the post-hit invulnerability window.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageEvent {
    pub target: Entity,
    /// The projectile or weapon that dealt the hit.
    pub source: Entity,
    pub amount: i32,
}

/// A dodge cut a swing short; the actor's weapon must be stowed.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackCancelledEvent {
    pub actor: Entity,
}
