//! Event types exchanged across systems and observers.
//!
//! Events provide a decoupled way for systems to communicate. Observers
//! reacting to them live next to the systems that own the related state in
//! [`crate::systems`].
//!
//! Submodules:
//! - [`animation`] – frame and completion notifications for watched animations
//! - [`collision`] – overlap notifications emitted by the collision detector
//! - [`combat`] – damage requests and cancelled swings
//! - [`input`] – press/release of logical input actions
//! - [`timer`] – expiry of entity-scoped action timers
pub mod animation;
pub mod collision;
pub mod combat;
pub mod input;
pub mod timer;
