//! TTL (Time-to-live) system.
//!
//! This module provides the [`ttl_system`] that decrements TTL timers and
//! despawns entities when their time runs out.
//!
//! # Time Scaling
//!
//! The countdown respects [`WorldTime::time_scale`](crate::resources::worldtime::WorldTime),
//! so slow-motion effects affect TTL duration.

use bevy_ecs::prelude::*;

use crate::components::ttl::Ttl;
use crate::resources::worldtime::WorldTime;

/// Decrements TTL and despawns entities when it reaches zero.
pub fn ttl_system(
    world_time: Res<WorldTime>,
    mut query: Query<(Entity, &mut Ttl)>,
    mut commands: Commands,
) {
    let dt = world_time.delta; // delta is already scaled by time_scale
    for (entity, mut ttl) in query.iter_mut() {
        ttl.remaining -= dt;
        if ttl.remaining <= 0.0 {
            commands.entity(entity).try_despawn();
        }
    }
}
