//! Damage resolution and melee hits.
//!
//! - [`weapon_hit_observer`] turns a swinging weapon touching an enemy into a
//!   [`DamageEvent`], but only while the swing is on a damage frame.
//! - [`damage_observer`] applies damage, opens the post-hit invulnerability
//!   window and removes actors that ran out of hit points together with the
//!   entities they carry.

use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::actorstate::ActorState;
use crate::components::group::Group;
use crate::components::stats::Stats;
use crate::components::timer::{ActionTimers, TimerAction};
use crate::components::weapon::{Equipment, Weapon};
use crate::events::collision::CollisionEvent;
use crate::events::combat::DamageEvent;
use crate::resources::gameconfig::GameConfig;

pub fn weapon_hit_observer(
    trigger: On<CollisionEvent>,
    weapons: Query<&Weapon>,
    owners: Query<(&ActorState, &Stats, Option<&Group>)>,
    targets: Query<(&Stats, Option<&Group>), Without<Weapon>>,
    mut commands: Commands,
) {
    let event = trigger.event();

    for (weapon_entity, target) in [(event.a, event.b), (event.b, event.a)] {
        let Ok(weapon) = weapons.get(weapon_entity) else {
            continue;
        };
        if target == weapon.owner {
            continue;
        }
        let Ok((state, owner_stats, owner_group)) = owners.get(weapon.owner) else {
            continue;
        };
        if !state.attack().damage_active {
            continue;
        }
        let Ok((target_stats, target_group)) = targets.get(target) else {
            continue;
        };
        let same_side = matches!((owner_group, target_group), (Some(a), Some(b)) if a == b);
        if same_side || target_stats.recently_hit {
            continue;
        }

        commands.trigger(DamageEvent {
            target,
            source: weapon_entity,
            amount: owner_stats.damage,
        });
    }
}

pub fn damage_observer(
    trigger: On<DamageEvent>,
    config: Res<GameConfig>,
    mut targets: Query<(&mut Stats, Option<&mut ActionTimers>, Option<&Equipment>)>,
    mut commands: Commands,
) {
    let event = trigger.event();
    let Ok((mut stats, timers, equipment)) = targets.get_mut(event.target) else {
        debug!("Dropping damage for missing entity {:?}", event.target);
        return;
    };

    if !stats.take_damage(event.amount) {
        return;
    }
    debug!(
        "{:?} took {} damage from {:?}, hp now {}",
        event.target, event.amount, event.source, stats.hp
    );

    if let Some(mut timers) = timers {
        timers.schedule(config.damage_invulnerability, TimerAction::DamageInvulnerability);
    }

    if stats.is_dead() {
        info!("{:?} died", event.target);
        if let Some(equipment) = equipment {
            for carried in equipment.entities() {
                commands.entity(carried).try_despawn();
            }
        }
        commands.entity(event.target).try_despawn();
    }
}
