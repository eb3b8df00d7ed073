//! Tween components for eased interpolation.
//!
//! - [`Easing`] – curves mapping linear progress `t` in [0, 1] to eased progress
//! - [`TweenSpeedBoost`] – decays an actor's dodge boost to zero
//!
//! See [`crate::systems::tween`] for the update system.

use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Easing functions for smooth interpolation.
///
/// These functions transform a linear `t` value (0.0 to 1.0) to create
/// different acceleration/deceleration curves.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Easing {
    /// Constant speed (no easing).
    Linear,
    /// Starts very fast, decelerates hard (quartic).
    QuartOut,
}

impl Easing {
    /// Eased progress for linear progress `t`. Input is clamped to [0, 1].
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuartOut => 1.0 - (1.0 - t).powi(4),
        }
    }
}

/// Decays an [`ActorState`](super::actorstate::ActorState) speed boost from
/// `from` to zero over `duration` seconds.
#[derive(Component, Clone, Copy, Debug)]
pub struct TweenSpeedBoost {
    /// Boost at the start of the tween.
    pub from: Vec2,
    /// Duration in seconds.
    pub duration: f32,
    /// Easing function to use.
    pub easing: Easing,
    /// Current time within the tween.
    pub time: f32,
}

impl TweenSpeedBoost {
    pub fn new(from: Vec2, duration: f32) -> Self {
        Self {
            from,
            duration,
            easing: Easing::Linear,
            time: 0.0,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Linear progress in [0, 1].
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.time / self.duration).clamp(0.0, 1.0)
        }
    }

    /// Boost value at the current time.
    pub fn value(&self) -> Vec2 {
        self.from * (1.0 - self.easing.apply(self.progress()))
    }

    pub fn is_done(&self) -> bool {
        self.progress() >= 1.0
    }
}
