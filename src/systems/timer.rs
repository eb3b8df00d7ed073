//! Action timer systems.
//!
//! - [`update_action_timers`] counts every entity's
//!   [`ActionTimers`](crate::components::timer::ActionTimers) down and emits an
//!   [`ActionTimerEvent`] for each one that comes due.
//! - [`action_timer_observer`] applies the expiry to the entity's state.
//!
//! # System Flow
//!
//! Each frame, before input and movement are resolved:
//!
//! 1. `update_action_timers` subtracts the frame delta from all pending timers
//! 2. Due timers are removed and an `ActionTimerEvent` is triggered for each
//! 3. `action_timer_observer` looks the entity up and flips the matching flag
//!
//! Timers due on the same frame fire in scheduling order; no transition
//! depends on that order. An event whose entity (or whose target component)
//! is gone is dropped.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::actorstate::ActorState;
use crate::components::shooter::Shooter;
use crate::components::stats::Stats;
use crate::components::timer::{ActionTimers, TimerAction};
use crate::events::timer::ActionTimerEvent;
use crate::resources::worldtime::WorldTime;

/// Advance all action timers and emit events for the ones that expired.
pub fn update_action_timers(
    world_time: Res<WorldTime>,
    mut query: Query<(Entity, &mut ActionTimers)>,
    mut commands: Commands,
) {
    for (entity, mut timers) in query.iter_mut() {
        if timers.is_empty() {
            continue;
        }
        for action in timers.advance(world_time.delta) {
            commands.trigger(ActionTimerEvent { entity, action });
        }
    }
}

/// Apply an expired timer to the entity it was scheduled on.
pub fn action_timer_observer(
    trigger: On<ActionTimerEvent>,
    mut actors: Query<&mut ActorState>,
    mut stats: Query<&mut Stats>,
    mut shooters: Query<&mut Shooter>,
) {
    let event = trigger.event();
    let entity = event.entity;

    let applied = match event.action {
        TimerAction::DodgeCooldown => actors
            .get_mut(entity)
            .map(|mut state| state.finish_dodge_cooldown())
            .is_ok(),
        TimerAction::DodgeRoll => actors
            .get_mut(entity)
            .map(|mut state| state.finish_dodge_roll())
            .is_ok(),
        TimerAction::DodgeGrace => actors
            .get_mut(entity)
            .map(|mut state| state.finish_dodge_grace())
            .is_ok(),
        TimerAction::AttackGrace => actors
            .get_mut(entity)
            .map(|mut state| state.finish_attack_grace())
            .is_ok(),
        TimerAction::DamageInvulnerability => stats
            .get_mut(entity)
            .map(|mut stats| stats.end_hit_invulnerability())
            .is_ok(),
        TimerAction::ShooterReady => shooters
            .get_mut(entity)
            .map(|mut shooter| shooter.ready = true)
            .is_ok(),
    };

    if applied {
        debug!("Timer {:?} fired on {:?}", event.action, entity);
    } else {
        debug!(
            "Dropping timer {:?}: entity {:?} no longer exists",
            event.action, entity
        );
    }
}
