//! Projectile firing, hits and cleanup.
//!
//! - [`fire_projectile`] spawns a poison ball from a shooter.
//! - [`projectile_hit_observer`] resolves a projectile touching a damageable
//!   actor: damage once, leave an explosion behind, destroy the projectile.
//! - [`projectile_bounds_system`] destroys projectiles that left the arena.
//!
//! Projectiles also carry a [`Ttl`], so one that never hits anything is
//! removed by [`ttl_system`](crate::systems::ttl::ttl_system).

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::debug;
use rustc_hash::FxHashSet;

use crate::components::actorstate::ActorState;
use crate::components::animation::{Animation, DespawnOnAnimationEnd};
use crate::components::boxcollider::BoxCollider;
use crate::components::group::Group;
use crate::components::mapposition::MapPosition;
use crate::components::projectile::Projectile;
use crate::components::rigidbody::RigidBody;
use crate::components::sprite::Sprite;
use crate::components::stats::Stats;
use crate::components::ttl::Ttl;
use crate::events::collision::CollisionEvent;
use crate::events::combat::DamageEvent;
use crate::resources::gameconfig::GameConfig;
use crate::resources::worldtime::WorldTime;

/// Hitbox side of a poison ball.
pub const PROJECTILE_SIZE: f32 = 48.0;

/// Spawn a projectile fired by `originator` from `origin` toward `direction`.
///
/// The shot leaves from the muzzle (`origin` plus the configured vertical
/// offset) and travels at the configured speed. A zero `direction` yields a
/// projectile at rest that simply expires.
pub fn fire_projectile(
    commands: &mut Commands,
    config: &GameConfig,
    originator: Entity,
    origin: Vec2,
    direction: Vec2,
    damage: i32,
) -> Entity {
    let tuning = &config.captain;
    let position = origin + Vec2::new(0.0, tuning.projectile.muzzle_offset_y);
    let velocity = direction.normalize_or_zero() * tuning.projectile_speed;

    commands
        .spawn((
            Group::new("projectile"),
            MapPosition::from_vec(position),
            RigidBody::with_velocity(velocity),
            BoxCollider::centered(PROJECTILE_SIZE, PROJECTILE_SIZE),
            Projectile::new(damage, originator),
            Animation::new("poison-ball"),
            Sprite::default(),
            Ttl::new(tuning.projectile.lifetime),
        ))
        .id()
}

/// Apply a projectile hit.
///
/// The defender must carry [`Stats`], must not be the shooter and must be
/// vulnerable (not mid-dodge and not inside its post-hit window). A projectile
/// that touches an invulnerable body passes through it.
///
/// A defender is struck by at most one projectile per frame; the damage of
/// the first hit is still queued when later overlaps are resolved.
pub fn projectile_hit_observer(
    trigger: On<CollisionEvent>,
    time: Res<WorldTime>,
    mut struck: Local<(u64, FxHashSet<Entity>)>,
    mut projectiles: Query<(&mut Projectile, &MapPosition)>,
    defenders: Query<(&Stats, Option<&ActorState>)>,
    mut commands: Commands,
) {
    let event = trigger.event();
    let (frame, struck) = &mut *struck;
    if *frame != time.frame_count {
        *frame = time.frame_count;
        struck.clear();
    }

    for (projectile_entity, defender) in [(event.a, event.b), (event.b, event.a)] {
        let Ok((mut projectile, position)) = projectiles.get_mut(projectile_entity) else {
            continue;
        };
        if !projectile.active || defender == projectile.originator {
            continue;
        }
        let Ok((stats, actor)) = defenders.get(defender) else {
            continue;
        };
        let vulnerable = actor.is_none_or(|state| state.vulnerable()) && !stats.recently_hit;
        if !vulnerable || !struck.insert(defender) {
            continue;
        }

        projectile.active = false;
        debug!("Projectile {:?} hit {:?}", projectile_entity, defender);

        commands.trigger(DamageEvent {
            target: defender,
            source: projectile_entity,
            amount: projectile.damage,
        });
        commands.spawn((
            MapPosition::from_vec(position.pos),
            Animation::new("poison-ball-explosion"),
            Sprite::default(),
            DespawnOnAnimationEnd,
        ));
        commands.entity(projectile_entity).try_despawn();
    }
}

/// Destroy projectiles that left the arena rectangle.
pub fn projectile_bounds_system(
    config: Res<GameConfig>,
    query: Query<(Entity, &MapPosition), With<Projectile>>,
    mut commands: Commands,
) {
    let max = Vec2::new(config.arena_width, config.arena_height);
    for (entity, position) in query.iter() {
        let p = position.pos;
        if p.x < 0.0 || p.y < 0.0 || p.x > max.x || p.y > max.y {
            debug!("Projectile {:?} left the arena", entity);
            commands.entity(entity).try_despawn();
        }
    }
}
