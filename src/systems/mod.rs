//! Game systems and observers.
//!
//! This module groups all ECS systems that advance the simulation, plus the
//! observers that react to the events they trigger.
//!
//! Submodules overview
//! - [`animation`] – advance sprite animations, report watched progress
//! - [`collision`] – pairwise overlap checks and event emission
//! - [`combat`] – melee hits and damage resolution
//! - [`equipment`] – keep the weapon and hands on their owner
//! - [`input`] – sample raw input into [`crate::resources::input::InputState`]
//! - [`movement`] – integrate positions from rigid body velocities and time
//! - [`player`] – movement, dodge and attack of player-controlled actors
//! - [`projectile`] – firing, hits and out-of-bounds cleanup
//! - [`shooter`] – ranged enemy behaviour
//! - [`time`] – update simulation time and delta
//! - [`timer`] – count down action timers and apply their expiry
//! - [`ttl`] – despawn entities whose time ran out
//! - [`tween`] – decay the dodge speed boost

pub mod animation;
pub mod collision;
pub mod combat;
pub mod equipment;
pub mod input;
pub mod movement;
pub mod player;
pub mod projectile;
pub mod shooter;
pub mod time;
pub mod timer;
pub mod ttl;
pub mod tween;
