//! Tween systems.
//!
//! [`tween_speed_boost_system`] decays the dodge speed boost of every actor
//! carrying a [`TweenSpeedBoost`]. The tween is removed once it reaches zero.

use bevy_ecs::prelude::*;

use crate::components::actorstate::ActorState;
use crate::components::tween::TweenSpeedBoost;
use crate::resources::worldtime::WorldTime;

pub fn tween_speed_boost_system(
    time: Res<WorldTime>,
    mut query: Query<(Entity, &mut ActorState, &mut TweenSpeedBoost)>,
    mut commands: Commands,
) {
    for (entity, mut state, mut tween) in query.iter_mut() {
        tween.time += time.delta;
        state.decay_speed_boost(tween.value());
        if tween.is_done() {
            commands.entity(entity).try_remove::<TweenSpeedBoost>();
        }
    }
}
