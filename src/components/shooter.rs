use bevy_ecs::prelude::Component;

/// Ranged enemy behaviour: fire at the player when in range, then idle.
#[derive(Component, Debug, Clone, Copy)]
pub struct Shooter {
    /// Maximum distance to the target for firing.
    pub range: f32,
    /// Seconds between a shot and the next one.
    pub idle_after_attack: f32,
    /// False between a shot and the end of the idle period.
    pub ready: bool,
}

impl Shooter {
    pub fn new(range: f32, idle_after_attack: f32) -> Self {
        Self {
            range,
            idle_after_attack,
            ready: true,
        }
    }
}
