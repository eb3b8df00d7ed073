//! ECS components for entities.
//!
//! This module groups all component types that can be attached to entities in
//! the game world. Components hold data; the state they describe is advanced
//! by [`crate::systems`] and the observers in [`crate::events`].
//!
//! Submodules overview:
//! - [`actorstate`] – the movement / dodge / attack state machine of a controllable actor
//! - [`animation`] – playback state, per-action progress subscriptions
//! - [`boxcollider`] – axis-aligned hitbox for overlap detection
//! - [`group`] – faction tag
//! - [`inputcontrolled`] – marker for actors driven by the keyboard and pointer
//! - [`mapposition`] – world-space position (pivot) for an entity
//! - [`projectile`] – shots in flight
//! - [`rigidbody`] – kinematic body storing velocity
//! - [`shooter`] – ranged enemy behaviour
//! - [`sprite`] – visibility and horizontal flip
//! - [`stats`] – hit points, damage, post-hit invulnerability
//! - [`timer`] – entity-scoped one-shot action timers
//! - [`ttl`] – automatic despawn after a duration
//! - [`tween`] – eased decay of the dodge speed boost
//! - [`weapon`] – held weapon, hands, and swing geometry

pub mod actorstate;
pub mod animation;
pub mod boxcollider;
pub mod group;
pub mod inputcontrolled;
pub mod mapposition;
pub mod projectile;
pub mod rigidbody;
pub mod shooter;
pub mod sprite;
pub mod stats;
pub mod timer;
pub mod ttl;
pub mod tween;
pub mod weapon;
