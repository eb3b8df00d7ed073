//! Held weapon and hand components.
//!
//! The player's axe and hands are separate entities following their owner.
//! [`Equipment`] on the owner points at them so the swing transitions can
//! reach them; [`Weapon`] and [`Hand`] point back at the owner.

use bevy_ecs::prelude::{Component, Entity};
use glam::Vec2;
use std::f32::consts::TAU;

/// Entities carried by an actor. Despawned together with it.
#[derive(Component, Debug, Clone, Copy)]
pub struct Equipment {
    pub weapon: Entity,
    pub left_hand: Entity,
    pub right_hand: Entity,
}

impl Equipment {
    pub fn entities(&self) -> [Entity; 3] {
        [self.weapon, self.left_hand, self.right_hand]
    }

    pub fn hands(&self) -> [Entity; 2] {
        [self.left_hand, self.right_hand]
    }
}

#[derive(Component, Debug, Clone, Copy)]
pub struct Weapon {
    pub owner: Entity,
    /// Offset from the owner at the start of the current swing.
    pub offset: Vec2,
    /// Sprite rotation in radians.
    pub rotation: f32,
}

impl Weapon {
    pub fn new(owner: Entity) -> Self {
        Self {
            owner,
            offset: Vec2::ZERO,
            rotation: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandSide {
    Left,
    Right,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct Hand {
    pub owner: Entity,
    pub side: HandSide,
}

/// Where the weapon hovers for a swing aimed along `aim`.
pub fn swing_offset(aim: Vec2, hover_distance: f32) -> Vec2 {
    aim.normalize_or_zero() * hover_distance
}

/// Sprite rotation for a swing whose weapon sits at `offset` from the owner.
///
/// The offset angle (in [0, 2π)) is scaled by `angle_scale`. Downward swings
/// get an extra `offset.y / downswing_divisor` twist, clockwise when swinging
/// to the right and counter-clockwise to the left, so the swoosh still lines
/// up with the cursor.
pub fn swing_rotation(offset: Vec2, angle_scale: f32, downswing_divisor: f32) -> f32 {
    let mut angle = offset.y.atan2(offset.x);
    if angle < 0.0 {
        angle += TAU;
    }
    let mut rotation = angle * angle_scale;

    if offset.y > 0.0 && downswing_divisor != 0.0 {
        let correction = offset.y / downswing_divisor;
        if offset.x > 0.0 {
            rotation -= correction;
        } else {
            rotation += correction;
        }
    }
    rotation
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    const EPSILON: f32 = 1e-4;

    #[test]
    fn test_swing_offset_has_hover_length() {
        let offset = swing_offset(Vec2::new(30.0, 40.0), 34.0);
        assert!((offset.length() - 34.0).abs() < EPSILON);
        assert!((offset.x - 20.4).abs() < EPSILON);
    }

    #[test]
    fn test_swing_offset_zero_aim() {
        assert_eq!(swing_offset(Vec2::ZERO, 34.0), Vec2::ZERO);
    }

    #[test]
    fn test_rotation_right_is_zero() {
        assert_eq!(swing_rotation(Vec2::new(34.0, 0.0), 2.0, 36.0), 0.0);
    }

    #[test]
    fn test_rotation_upward_has_no_correction() {
        // straight up: angle 3π/2
        let rotation = swing_rotation(Vec2::new(0.0, -34.0), 2.0, 36.0);
        assert!((rotation - 3.0 * std::f32::consts::PI).abs() < EPSILON);
    }

    #[test]
    fn test_downswing_right_twists_back() {
        let offset = swing_offset(Vec2::new(1.0, 1.0), 34.0);
        let uncorrected = FRAC_PI_4 * 2.0;
        let rotation = swing_rotation(offset, 2.0, 36.0);
        assert!(rotation < uncorrected);
        assert!((rotation - (uncorrected - offset.y / 36.0)).abs() < EPSILON);
    }

    #[test]
    fn test_downswing_left_twists_forward() {
        let offset = swing_offset(Vec2::new(-1.0, 1.0), 34.0);
        let uncorrected = 3.0 * FRAC_PI_4 * 2.0;
        let rotation = swing_rotation(offset, 2.0, 36.0);
        assert!(rotation > uncorrected);
        assert!((rotation - (uncorrected + offset.y / 36.0)).abs() < EPSILON);
    }

    #[test]
    fn test_straight_down_counts_as_left() {
        let rotation = swing_rotation(Vec2::new(0.0, 36.0), 1.0, 36.0);
        assert!((rotation - (FRAC_PI_2 + 1.0)).abs() < EPSILON);
    }
}
