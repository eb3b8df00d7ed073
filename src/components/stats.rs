use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

/// Combat stats shared by the player and enemies.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub hp: i32,
    pub damage: i32,
    /// Set for a short window after taking a hit.
    pub recently_hit: bool,
}

impl Stats {
    pub fn new(hp: i32, damage: i32) -> Self {
        Self {
            hp,
            damage,
            recently_hit: false,
        }
    }

    /// Apply `amount` damage unless still invulnerable from the previous hit.
    ///
    /// Returns true when the hit landed.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if self.recently_hit || self.is_dead() {
            return false;
        }
        self.hp = (self.hp - amount).max(0);
        self.recently_hit = true;
        true
    }

    pub fn end_hit_invulnerability(&mut self) {
        self.recently_hit = false;
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_damage_once_per_window() {
        let mut stats = Stats::new(5, 1);
        assert!(stats.take_damage(2));
        assert_eq!(stats.hp, 3);
        assert!(!stats.take_damage(2));
        assert_eq!(stats.hp, 3);

        stats.end_hit_invulnerability();
        assert!(stats.take_damage(2));
        assert_eq!(stats.hp, 1);
    }

    #[test]
    fn test_hp_floors_at_zero() {
        let mut stats = Stats::new(1, 1);
        assert!(stats.take_damage(10));
        assert_eq!(stats.hp, 0);
        assert!(stats.is_dead());

        stats.end_hit_invulnerability();
        assert!(!stats.take_damage(1));
    }
}
