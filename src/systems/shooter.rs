//! Ranged enemy behaviour.
//!
//! [`shooter_ai`] makes every ready [`Shooter`] fire at the nearest
//! player-controlled actor within range, then waits `idle_after_attack`
//! seconds (an [`ActionTimers`] entry) before it may fire again.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::animation::Animation;
use crate::components::inputcontrolled::InputControlled;
use crate::components::mapposition::MapPosition;
use crate::components::shooter::Shooter;
use crate::components::stats::Stats;
use crate::components::timer::{ActionTimers, TimerAction};
use crate::resources::gameconfig::GameConfig;
use crate::systems::projectile::fire_projectile;

pub const ANIM_CAPTAIN_IDLE: &str = "captain-idle";
pub const ANIM_CAPTAIN_ATTACK: &str = "captain-attack";

pub fn shooter_ai(
    config: Res<GameConfig>,
    targets: Query<&MapPosition, With<InputControlled>>,
    mut shooters: Query<
        (
            Entity,
            &MapPosition,
            &mut Shooter,
            &mut Animation,
            &mut ActionTimers,
            &Stats,
        ),
        Without<InputControlled>,
    >,
    mut commands: Commands,
) {
    for (entity, position, mut shooter, mut anim, mut timers, stats) in shooters.iter_mut() {
        if anim.finished {
            anim.play(ANIM_CAPTAIN_IDLE);
        }
        if !shooter.ready {
            continue;
        }

        let nearest = targets
            .iter()
            .map(|target| target.pos)
            .filter(|target| target.distance(position.pos) <= shooter.range)
            .min_by(|a, b| a.distance(position.pos).total_cmp(&b.distance(position.pos)));
        let Some(target) = nearest else {
            continue;
        };

        let projectile = fire_projectile(
            &mut commands,
            &config,
            entity,
            position.pos,
            target - position.pos,
            stats.damage,
        );
        shooter.ready = false;
        timers.schedule(shooter.idle_after_attack, TimerAction::ShooterReady);
        anim.restart(ANIM_CAPTAIN_ATTACK);
        debug!("{:?} fired {:?} at {:?}", entity, projectile, target);
    }
}
