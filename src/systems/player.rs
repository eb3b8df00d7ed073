//! Player action systems.
//!
//! - [`player_controller`] resolves movement and dodge for every
//!   [`InputControlled`] actor, picks the body animation and writes the
//!   velocity.
//! - [`player_attack_observer`] starts a swing on an attack press.
//! - [`weapon_frame_observer`] and [`weapon_complete_observer`] follow the
//!   swing animation of the weapon while an attack is in progress.
//! - [`attack_cancelled_observer`] stows the weapon when a dodge cuts the
//!   swing short.
//!
//! All state changes go through the transitions on [`ActorState`]; this
//! module only wires them to input, timers, animations and the carried
//! entities.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::actorstate::{ActorState, BodyAnimation};
use crate::components::animation::{Animation, AnimationWatch};
use crate::components::inputcontrolled::InputControlled;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::components::sprite::Sprite;
use crate::components::timer::{ActionTimers, TimerAction};
use crate::components::tween::{Easing, TweenSpeedBoost};
use crate::components::weapon::{Equipment, Hand, Weapon, swing_offset, swing_rotation};
use crate::events::animation::{AnimationCompleteEvent, AnimationFrameEvent};
use crate::events::combat::AttackCancelledEvent;
use crate::events::input::{InputAction, InputEvent};
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;

pub const ANIM_IDLE: &str = "dwarf-idle";
pub const ANIM_RUN: &str = "dwarf-run";
pub const ANIM_DODGE: &str = "dwarf-dodge";
pub const ANIM_ATTACK: &str = "dwarf-attack";
pub const ANIM_SWING: &str = "axe-attack";

/// Resolve movement and dodging for player-controlled actors.
///
/// Per frame: apply directional input (when allowed), try to start a dodge,
/// latch the dodge key release, choose the body animation, then set the
/// velocity to the normalised direction at base speed plus the dodge boost.
pub fn player_controller(
    input: Res<InputState>,
    config: Res<GameConfig>,
    mut query: Query<
        (
            Entity,
            &mut ActorState,
            &mut RigidBody,
            &mut Animation,
            &mut Sprite,
            &mut ActionTimers,
        ),
        With<InputControlled>,
    >,
    mut commands: Commands,
) {
    let tuning = &config.player;
    let dodge_held = input.action_dodge.active;

    for (entity, mut state, mut body, mut anim, mut sprite, mut timers) in query.iter_mut() {
        let mut direction = state.apply_movement_input(input.directions());

        if let Some(start) = state.start_dodge(dodge_held, tuning.dodge.speed_bonus) {
            // the roll tick itself moves along the roll direction at base speed
            direction = state.dodge().direction.as_vec2();

            // a roll started before the previous one's timers ran out replaces them
            for action in [
                TimerAction::DodgeCooldown,
                TimerAction::DodgeRoll,
                TimerAction::DodgeGrace,
            ] {
                timers.cancel(action);
            }
            timers.schedule(tuning.dodge.cooldown, TimerAction::DodgeCooldown);
            timers.schedule(tuning.dodge.duration, TimerAction::DodgeRoll);
            timers.schedule(tuning.dodge.grace, TimerAction::DodgeGrace);
            commands.entity(entity).try_insert(
                TweenSpeedBoost::new(state.speed_boost(), tuning.dodge.duration)
                    .with_easing(Easing::QuartOut),
            );
            if start.cancelled_attack {
                commands.trigger(AttackCancelledEvent { actor: entity });
            }
            debug!(
                "{:?} dodges toward {:?} (cancelled swing: {})",
                entity,
                state.dodge().direction,
                start.cancelled_attack
            );
        }

        state.observe_dodge_key(dodge_held);

        let running = input.directions().any();
        match state.resolve_body_animation(running) {
            Some(BodyAnimation::Dodge) => {
                anim.play(ANIM_DODGE);
            }
            Some(BodyAnimation::Run) => {
                anim.play(ANIM_RUN);
            }
            Some(BodyAnimation::Idle) => {
                anim.play(ANIM_IDLE);
            }
            None => {}
        }
        sprite.flip_x = state.facing_left();

        body.set_velocity(direction.normalize_or_zero() * tuning.speed + state.speed_boost());
    }
}

/// Start a swing on an attack press.
///
/// Aims at the pointer, faces that way, parks the weapon at the hover
/// distance with the swing rotation, hides the hands and subscribes the
/// weapon to its swing animation. A press that arrives while a swing or a
/// dodge is in progress is ignored.
#[allow(clippy::type_complexity)]
pub fn player_attack_observer(
    trigger: On<InputEvent>,
    input: Res<InputState>,
    config: Res<GameConfig>,
    mut actors: Query<
        (
            Entity,
            &mut ActorState,
            &MapPosition,
            &mut Animation,
            &mut Sprite,
            &mut ActionTimers,
            &Equipment,
        ),
        With<InputControlled>,
    >,
    mut weapons: Query<
        (&mut Weapon, &mut MapPosition, &mut Animation, &mut Sprite),
        Without<ActorState>,
    >,
    mut hands: Query<&mut Sprite, (With<Hand>, Without<ActorState>, Without<Weapon>)>,
    mut commands: Commands,
) {
    let event = trigger.event();
    if event.action != InputAction::Attack || !event.pressed {
        return;
    }
    let tuning = &config.player.attack;

    for (entity, mut state, position, mut anim, mut sprite, mut timers, equipment) in
        actors.iter_mut()
    {
        let aim = input.pointer - position.pos;
        if !state.start_attack(aim) {
            debug!("{:?} cannot attack now", entity);
            continue;
        }

        sprite.flip_x = state.facing_left();
        anim.restart(ANIM_ATTACK);
        timers.schedule(tuning.grace, TimerAction::AttackGrace);

        if let Ok((mut weapon, mut weapon_position, mut weapon_anim, mut weapon_sprite)) =
            weapons.get_mut(equipment.weapon)
        {
            weapon.offset = swing_offset(aim, tuning.hover_distance);
            weapon.rotation = swing_rotation(
                weapon.offset,
                tuning.swing_angle_scale,
                tuning.downswing_divisor,
            );
            weapon_position.pos = position.pos + weapon.offset;
            weapon_sprite.visible = true;
            weapon_sprite.flip_x = state.facing_left();
            weapon_anim.restart(ANIM_SWING);
            commands
                .entity(equipment.weapon)
                .try_insert(AnimationWatch { owner: entity });
        }

        for hand in equipment.hands() {
            if let Ok(mut hand_sprite) = hands.get_mut(hand) {
                hand_sprite.visible = false;
            }
        }

        debug!("{:?} swings toward {:?}", entity, aim);
    }
}

/// Hide and stop the weapon, show the hands, drop the swing subscription.
fn stow_weapon(
    equipment: &Equipment,
    weapons: &mut Query<(&mut Sprite, &mut Animation), (With<Weapon>, Without<ActorState>)>,
    hands: &mut Query<&mut Sprite, (With<Hand>, Without<ActorState>, Without<Weapon>)>,
    commands: &mut Commands,
) {
    if let Ok((mut sprite, mut anim)) = weapons.get_mut(equipment.weapon) {
        sprite.visible = false;
        anim.stop();
    }
    for hand in equipment.hands() {
        if let Ok(mut sprite) = hands.get_mut(hand) {
            sprite.visible = true;
        }
    }
    commands
        .entity(equipment.weapon)
        .try_remove::<AnimationWatch>();
}

/// Toggle the owner's damage flag as the swing moves from frame to frame.
pub fn weapon_frame_observer(
    trigger: On<AnimationFrameEvent>,
    config: Res<GameConfig>,
    weapons: Query<(), With<Weapon>>,
    mut actors: Query<&mut ActorState>,
) {
    let event = trigger.event();
    if !weapons.contains(event.entity) {
        return;
    }
    let Ok(mut state) = actors.get_mut(event.owner) else {
        debug!("Dropping swing frame for missing owner {:?}", event.owner);
        return;
    };
    state.set_damage_frame(config.player.attack.is_damage_frame(event.frame_index));
}

/// The swing finished: end the attack and stow the weapon.
pub fn weapon_complete_observer(
    trigger: On<AnimationCompleteEvent>,
    mut actors: Query<(&mut ActorState, &Equipment)>,
    mut weapons: Query<(&mut Sprite, &mut Animation), (With<Weapon>, Without<ActorState>)>,
    mut hands: Query<&mut Sprite, (With<Hand>, Without<ActorState>, Without<Weapon>)>,
    mut commands: Commands,
) {
    let event = trigger.event();
    let Ok((mut state, equipment)) = actors.get_mut(event.owner) else {
        debug!("Dropping swing completion for missing owner {:?}", event.owner);
        return;
    };
    if equipment.weapon != event.entity {
        return;
    }
    state.finish_attack();
    stow_weapon(equipment, &mut weapons, &mut hands, &mut commands);
    debug!("{:?} swing complete", event.owner);
}

pub fn attack_cancelled_observer(
    trigger: On<AttackCancelledEvent>,
    actors: Query<&Equipment>,
    mut weapons: Query<(&mut Sprite, &mut Animation), (With<Weapon>, Without<ActorState>)>,
    mut hands: Query<&mut Sprite, (With<Hand>, Without<ActorState>, Without<Weapon>)>,
    mut commands: Commands,
) {
    let actor = trigger.event().actor;
    if let Ok(equipment) = actors.get(actor) {
        stow_weapon(equipment, &mut weapons, &mut hands, &mut commands);
    }
}
