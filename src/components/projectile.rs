use bevy_ecs::prelude::{Component, Entity};

/// A shot in flight, e.g. a captain's poison ball.
#[derive(Component, Debug, Clone, Copy)]
pub struct Projectile {
    pub damage: i32,
    /// The firing actor; never hit by its own shot.
    pub originator: Entity,
    /// Cleared by the first hit so later overlaps in the same frame are ignored.
    pub active: bool,
}

impl Projectile {
    pub fn new(damage: i32, originator: Entity) -> Self {
        Self {
            damage,
            originator,
            active: true,
        }
    }
}
