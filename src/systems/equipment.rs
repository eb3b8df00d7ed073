//! Carried entities following their owner.
//!
//! - [`weapon_follow_system`] keeps the weapon on its owner: at the swing
//!   offset while attacking, on the owner's pivot otherwise.
//! - [`hand_follow_system`] keeps the hands on their owner, mirrors its flip,
//!   starts the hand cycle when the owner runs and stops it when the owner
//!   idles. A roll or a swing leaves the cycle as it was.

use bevy_ecs::prelude::*;

use crate::components::actorstate::ActorState;
use crate::components::animation::Animation;
use crate::components::mapposition::MapPosition;
use crate::components::sprite::Sprite;
use crate::components::weapon::{Hand, HandSide, Weapon};
use crate::systems::player::{ANIM_IDLE, ANIM_RUN};

pub const ANIM_LEFT_HAND: &str = "left-hand";
pub const ANIM_RIGHT_HAND: &str = "right-hand";

pub fn weapon_follow_system(
    owners: Query<(&MapPosition, &ActorState), Without<Weapon>>,
    mut weapons: Query<(&Weapon, &mut MapPosition)>,
) {
    for (weapon, mut position) in weapons.iter_mut() {
        let Ok((owner_position, state)) = owners.get(weapon.owner) else {
            continue;
        };
        position.pos = if state.attack().attacking {
            owner_position.pos + weapon.offset
        } else {
            owner_position.pos
        };
    }
}

pub fn hand_follow_system(
    owners: Query<(&MapPosition, &Sprite, &Animation), Without<Hand>>,
    mut hands: Query<(&Hand, &mut MapPosition, &mut Sprite, &mut Animation)>,
) {
    for (hand, mut position, mut sprite, mut anim) in hands.iter_mut() {
        let Ok((owner_position, owner_sprite, owner_anim)) = owners.get(hand.owner) else {
            continue;
        };
        position.pos = owner_position.pos;
        sprite.flip_x = owner_sprite.flip_x;

        if owner_anim.is_playing(ANIM_RUN) {
            anim.play(match hand.side {
                HandSide::Left => ANIM_LEFT_HAND,
                HandSide::Right => ANIM_RIGHT_HAND,
            });
        } else if owner_anim.is_playing(ANIM_IDLE) {
            anim.stop();
        }
    }
}
