//! Animation systems.
//!
//! [`animation`] advances every playing [`Animation`] by the frame delta using
//! the definitions in [`AnimationStore`].
//!
//! # Animation Flow
//!
//! 1. Animation data is defined in [`AnimationStore`]
//! 2. Entities have an [`Animation`] component pointing to a key
//! 3. The `animation` system advances frames based on `fps`; a long delta may
//!    advance several frames at once
//! 4. Looping animations wrap to frame 0; the others stop on their last frame
//!    and are marked finished
//!
//! Entities with an [`AnimationWatch`] report each new frame as an
//! [`AnimationFrameEvent`] and the end of a non-looping animation as an
//! [`AnimationCompleteEvent`]. Entities with [`DespawnOnAnimationEnd`] are
//! despawned when their animation finishes.
//!
//! # Related
//!
//! - [`crate::components::animation::Animation`] – per-entity playback state
//! - [`crate::resources::animationstore::AnimationStore`] – animation definitions

use bevy_ecs::prelude::*;

use crate::components::animation::{Animation, AnimationWatch, DespawnOnAnimationEnd};
use crate::events::animation::{AnimationCompleteEvent, AnimationFrameEvent};
use crate::resources::animationstore::AnimationStore;
use crate::resources::worldtime::WorldTime;

/// Advance animation playback and emit progress events for watched entities.
pub fn animation(
    mut query: Query<(
        Entity,
        &mut Animation,
        Option<&AnimationWatch>,
        Has<DespawnOnAnimationEnd>,
    )>,
    animation_store: Res<AnimationStore>,
    time: Res<WorldTime>,
    mut commands: Commands,
) {
    for (entity, mut anim_comp, watch, despawn_on_end) in query.iter_mut() {
        if anim_comp.paused || anim_comp.finished {
            continue;
        }
        let Some(animation) = animation_store.get(&anim_comp.animation_key).copied() else {
            continue;
        };
        if animation.fps <= 0.0 || animation.frame_count == 0 {
            continue;
        }

        anim_comp.elapsed_time += time.delta;
        let frame_duration = 1.0 / animation.fps;

        while anim_comp.elapsed_time >= frame_duration {
            anim_comp.elapsed_time -= frame_duration;

            if anim_comp.frame_index + 1 >= animation.frame_count {
                if animation.looped {
                    anim_comp.frame_index = 0;
                } else {
                    // stay on last frame
                    anim_comp.finished = true;
                    anim_comp.elapsed_time = 0.0;
                    break;
                }
            } else {
                anim_comp.frame_index += 1;
            }

            if let Some(watch) = watch {
                commands.trigger(AnimationFrameEvent {
                    entity,
                    owner: watch.owner,
                    key: anim_comp.animation_key.clone(),
                    frame_index: anim_comp.frame_index,
                });
            }
        }

        if anim_comp.finished {
            if let Some(watch) = watch {
                commands.trigger(AnimationCompleteEvent {
                    entity,
                    owner: watch.owner,
                    key: anim_comp.animation_key.clone(),
                });
            }
            if despawn_on_end {
                commands.entity(entity).try_despawn();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::animationstore::AnimationResource;
    use std::sync::{Arc, Mutex};

    fn make_world(dt: f32) -> World {
        let mut world = World::new();
        let mut store = AnimationStore::new();
        store.insert("loop", AnimationResource::looped(3, 4.0));
        store.insert("once", AnimationResource::once(3, 4.0));
        world.insert_resource(store);
        world.insert_resource(WorldTime {
            delta: dt,
            ..Default::default()
        });
        world
    }

    fn tick(world: &mut World, schedule: &mut Schedule) {
        schedule.run(world);
        world.flush();
    }

    #[test]
    fn test_looped_animation_wraps() {
        let mut world = make_world(0.25);
        let e = world.spawn(Animation::new("loop")).id();
        let mut schedule = Schedule::default();
        schedule.add_systems(animation);

        for _ in 0..3 {
            tick(&mut world, &mut schedule);
        }
        let anim = world.get::<Animation>(e).unwrap();
        assert_eq!(anim.frame_index, 0);
        assert!(!anim.finished);
    }

    #[test]
    fn test_large_delta_advances_several_frames() {
        let mut world = make_world(0.5);
        let e = world.spawn(Animation::new("loop")).id();
        let mut schedule = Schedule::default();
        schedule.add_systems(animation);

        tick(&mut world, &mut schedule);
        assert_eq!(world.get::<Animation>(e).unwrap().frame_index, 2);
    }

    #[test]
    fn test_watched_animation_reports_frames_and_completion() {
        let mut world = make_world(0.25);
        let owner = world.spawn_empty().id();
        let e = world
            .spawn((Animation::new("once"), AnimationWatch { owner }))
            .id();

        let frames: Arc<Mutex<Vec<usize>>> = Arc::new(Mutex::new(Vec::new()));
        let completions: Arc<Mutex<u32>> = Arc::new(Mutex::new(0));
        let f = frames.clone();
        world.add_observer(move |trigger: On<AnimationFrameEvent>| {
            assert_eq!(trigger.event().owner, owner);
            f.lock().unwrap().push(trigger.event().frame_index);
        });
        let c = completions.clone();
        world.add_observer(move |_trigger: On<AnimationCompleteEvent>| {
            *c.lock().unwrap() += 1;
        });

        let mut schedule = Schedule::default();
        schedule.add_systems(animation);
        for _ in 0..6 {
            tick(&mut world, &mut schedule);
        }

        assert_eq!(frames.lock().unwrap().as_slice(), &[1, 2]);
        assert_eq!(*completions.lock().unwrap(), 1);
        let anim = world.get::<Animation>(e).unwrap();
        assert!(anim.finished);
        assert_eq!(anim.frame_index, 2);
    }

    #[test]
    fn test_unwatched_animation_is_silent() {
        let mut world = make_world(0.25);
        world.spawn(Animation::new("once"));

        let count: Arc<Mutex<u32>> = Arc::new(Mutex::new(0));
        let c = count.clone();
        world.add_observer(move |_trigger: On<AnimationFrameEvent>| {
            *c.lock().unwrap() += 1;
        });

        let mut schedule = Schedule::default();
        schedule.add_systems(animation);
        for _ in 0..4 {
            tick(&mut world, &mut schedule);
        }
        assert_eq!(*count.lock().unwrap(), 0);
    }

    #[test]
    fn test_despawn_on_animation_end() {
        let mut world = make_world(0.25);
        let e = world
            .spawn((Animation::new("once"), DespawnOnAnimationEnd))
            .id();
        let mut schedule = Schedule::default();
        schedule.add_systems(animation);

        tick(&mut world, &mut schedule);
        tick(&mut world, &mut schedule);
        assert!(world.get_entity(e).is_ok());
        tick(&mut world, &mut schedule);
        assert!(world.get_entity(e).is_err());
    }
}
