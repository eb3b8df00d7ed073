//! Scene setup and the frame schedule.
//!
//! - [`setup_world`] inserts every resource and observer the game needs.
//! - [`spawn_player`] and [`spawn_captain`] build the two actor archetypes.
//! - [`spawn_cell_scene`] lays out the starting room.
//! - [`build_schedule`] orders the per-frame systems.
//! - [`run_frame`] advances the world by one frame.

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use glam::Vec2;
use log::info;

use crate::components::actorstate::ActorState;
use crate::components::animation::Animation;
use crate::components::boxcollider::BoxCollider;
use crate::components::group::Group;
use crate::components::inputcontrolled::InputControlled;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::components::shooter::Shooter;
use crate::components::sprite::Sprite;
use crate::components::stats::Stats;
use crate::components::timer::ActionTimers;
use crate::components::weapon::{Equipment, Hand, HandSide, Weapon};
use crate::resources::animationstore::{AnimationResource, AnimationStore};
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::{InputState, RawInput};
use crate::resources::worldtime::WorldTime;
use crate::systems::animation::animation;
use crate::systems::collision::collision_detector;
use crate::systems::combat::{damage_observer, weapon_hit_observer};
use crate::systems::equipment::{
    ANIM_LEFT_HAND, ANIM_RIGHT_HAND, hand_follow_system, weapon_follow_system,
};
use crate::systems::input::update_input_state;
use crate::systems::movement::movement;
use crate::systems::player::{
    ANIM_ATTACK, ANIM_DODGE, ANIM_IDLE, ANIM_RUN, ANIM_SWING, attack_cancelled_observer,
    player_attack_observer, player_controller, weapon_complete_observer, weapon_frame_observer,
};
use crate::systems::projectile::{projectile_bounds_system, projectile_hit_observer};
use crate::systems::shooter::{ANIM_CAPTAIN_ATTACK, ANIM_CAPTAIN_IDLE, shooter_ai};
use crate::systems::time::update_world_time;
use crate::systems::timer::{action_timer_observer, update_action_timers};
use crate::systems::ttl::ttl_system;
use crate::systems::tween::tween_speed_boost_system;

/// Where the player starts in the cell.
pub const PLAYER_START: Vec2 = Vec2::new(250.0, 500.0);

/// Body hitbox shared by the dwarf and the captains.
const BODY_WIDTH: f32 = 45.0;
const BODY_HEIGHT: f32 = 84.0;
const BODY_OFFSET: Vec2 = Vec2::new(-24.0, -42.0);

/// Axe hitbox side.
const WEAPON_SIZE: f32 = 81.0;

/// Register every animation the game plays.
pub fn register_animations(store: &mut AnimationStore) {
    for key in [
        ANIM_IDLE,
        ANIM_RUN,
        ANIM_DODGE,
        ANIM_ATTACK,
        ANIM_LEFT_HAND,
        ANIM_RIGHT_HAND,
    ] {
        let frames = if key == ANIM_IDLE { 5 } else { 8 };
        store.insert(key, AnimationResource::looped(frames, 10.0));
    }
    store.insert(ANIM_SWING, AnimationResource::once(9, 15.0));
    store.insert("poison-ball", AnimationResource::looped(4, 10.0));
    store.insert("poison-ball-explosion", AnimationResource::once(6, 15.0));
    store.insert(ANIM_CAPTAIN_IDLE, AnimationResource::looped(4, 10.0));
    store.insert(ANIM_CAPTAIN_ATTACK, AnimationResource::once(6, 10.0));
}

/// Insert resources and register observers.
pub fn setup_world(world: &mut World, config: GameConfig) {
    let mut store = AnimationStore::new();
    register_animations(&mut store);

    world.insert_resource(WorldTime::default().with_time_scale(1.0));
    world.insert_resource(RawInput::default());
    world.insert_resource(InputState::default());
    world.insert_resource(store);
    world.insert_resource(config);

    world.spawn(Observer::new(action_timer_observer));
    world.spawn(Observer::new(player_attack_observer));
    world.spawn(Observer::new(weapon_frame_observer));
    world.spawn(Observer::new(weapon_complete_observer));
    world.spawn(Observer::new(attack_cancelled_observer));
    world.spawn(Observer::new(projectile_hit_observer));
    world.spawn(Observer::new(weapon_hit_observer));
    world.spawn(Observer::new(damage_observer));
    // Ensure the observers are registered before we run any systems that may trigger events.
    world.flush();
}

/// Spawn the dwarf with its axe and hands. Returns the dwarf entity.
pub fn spawn_player(world: &mut World, position: Vec2) -> Entity {
    let (hp, damage) = {
        let config = world.resource::<GameConfig>();
        (config.player.hp, config.player.damage)
    };

    let player = world
        .spawn((
            Group::new("player"),
            InputControlled,
            ActorState::new(),
            Stats::new(hp, damage),
            ActionTimers::new(),
            MapPosition::from_vec(position),
            RigidBody::new(),
            BoxCollider::new(BODY_WIDTH, BODY_HEIGHT).with_offset(BODY_OFFSET),
            Sprite::default(),
            Animation::new(ANIM_IDLE),
        ))
        .id();

    let mut swing = Animation::new(ANIM_SWING);
    swing.stop();
    let weapon = world
        .spawn((
            Group::new("player"),
            Weapon::new(player),
            MapPosition::from_vec(position),
            BoxCollider::centered(WEAPON_SIZE, WEAPON_SIZE),
            Sprite::hidden(),
            swing,
        ))
        .id();

    let mut spawn_hand = |side: HandSide, key: &str| {
        let mut anim = Animation::new(key);
        anim.stop();
        world
            .spawn((
                Hand {
                    owner: player,
                    side,
                },
                MapPosition::from_vec(position),
                Sprite::default(),
                anim,
            ))
            .id()
    };
    let left_hand = spawn_hand(HandSide::Left, ANIM_LEFT_HAND);
    let right_hand = spawn_hand(HandSide::Right, ANIM_RIGHT_HAND);

    world.entity_mut(player).insert(Equipment {
        weapon,
        left_hand,
        right_hand,
    });
    player
}

/// Spawn a ranged captain planted at `position`.
pub fn spawn_captain(world: &mut World, position: Vec2) -> Entity {
    let tuning = world.resource::<GameConfig>().captain.clone();

    let mut body = RigidBody::new();
    body.freeze();

    world
        .spawn((
            Group::new("captain"),
            Stats::new(tuning.hp, tuning.damage),
            Shooter::new(tuning.range, tuning.idle_after_attack),
            ActionTimers::new(),
            MapPosition::from_vec(position),
            body,
            BoxCollider::new(BODY_WIDTH, BODY_HEIGHT).with_offset(BODY_OFFSET),
            Sprite::default(),
            Animation::new(ANIM_CAPTAIN_IDLE),
        ))
        .id()
}

/// Entities making up the starting room.
#[derive(Debug, Clone)]
pub struct CellScene {
    pub player: Entity,
    pub captains: Vec<Entity>,
}

/// Lay out the cell: the player at its start and `captains` captains placed
/// with a seeded generator in the half of the arena away from the player.
pub fn spawn_cell_scene(world: &mut World, captains: usize, seed: u64) -> CellScene {
    let (width, height) = {
        let config = world.resource::<GameConfig>();
        (config.arena_width, config.arena_height)
    };
    let player = spawn_player(world, PLAYER_START);

    let mut rng = fastrand::Rng::with_seed(seed);
    let margin = BODY_HEIGHT;
    let captains = (0..captains)
        .map(|_| {
            let x = width * 0.5 + rng.f32() * (width * 0.5 - margin);
            let y = margin + rng.f32() * (height - 2.0 * margin);
            spawn_captain(world, Vec2::new(x, y))
        })
        .collect::<Vec<_>>();

    info!(
        "Cell scene ready: player {:?}, {} captain(s)",
        player,
        captains.len()
    );
    CellScene { player, captains }
}

/// Build the per-frame schedule.
///
/// Timer expiries are applied first, then input, then actor decisions,
/// integration, cleanup, carried entities, animation and finally collision.
/// Commands (and the events they trigger) are applied between steps.
pub fn build_schedule(world: &mut World) -> Result<Schedule, String> {
    let mut update = Schedule::default();
    update.add_systems(
        (
            update_action_timers,
            update_input_state,
            tween_speed_boost_system,
            player_controller,
            shooter_ai,
            movement,
            (projectile_bounds_system, ttl_system),
            (weapon_follow_system, hand_follow_system),
            animation,
            collision_detector,
        )
            .chain(),
    );
    update
        .initialize(world)
        .map_err(|e| format!("Failed to initialize schedule: {}", e))?;
    Ok(update)
}

/// Advance the world by one frame of `dt` seconds.
pub fn run_frame(world: &mut World, schedule: &mut Schedule, dt: f32) {
    update_world_time(world, dt);
    schedule.run(world);
    world.flush();
    world.clear_trackers(); // Clear changed components for next frame
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_world() -> World {
        let mut world = World::new();
        setup_world(&mut world, GameConfig::new());
        world
    }

    #[test]
    fn test_player_carries_weapon_and_hands() {
        let mut world = make_world();
        let player = spawn_player(&mut world, PLAYER_START);
        let equipment = *world.get::<Equipment>(player).unwrap();

        assert_eq!(world.get::<Weapon>(equipment.weapon).unwrap().owner, player);
        assert!(!world.get::<Sprite>(equipment.weapon).unwrap().visible);
        for hand in equipment.hands() {
            assert_eq!(world.get::<Hand>(hand).unwrap().owner, player);
        }
        assert_eq!(world.get::<Stats>(player).unwrap().hp, 40);
    }

    #[test]
    fn test_cell_scene_is_seeded() {
        let mut a = make_world();
        let mut b = make_world();
        let scene_a = spawn_cell_scene(&mut a, 3, 7);
        let scene_b = spawn_cell_scene(&mut b, 3, 7);

        for (ca, cb) in scene_a.captains.iter().zip(scene_b.captains.iter()) {
            let pa = a.get::<MapPosition>(*ca).unwrap().pos;
            let pb = b.get::<MapPosition>(*cb).unwrap().pos;
            assert_eq!(pa, pb);
            assert!(pa.x >= 640.0 && pa.x <= 1280.0);
        }
    }

    #[test]
    fn test_every_played_animation_is_registered() {
        let mut store = AnimationStore::new();
        register_animations(&mut store);
        for key in [
            ANIM_IDLE,
            ANIM_RUN,
            ANIM_DODGE,
            ANIM_ATTACK,
            ANIM_SWING,
            ANIM_LEFT_HAND,
            ANIM_RIGHT_HAND,
            ANIM_CAPTAIN_IDLE,
            ANIM_CAPTAIN_ATTACK,
            "poison-ball",
            "poison-ball-explosion",
        ] {
            assert!(store.get(key).is_some(), "missing animation {}", key);
        }
        assert!(!store.get(ANIM_SWING).unwrap().looped);
    }
}
