use bevy_ecs::prelude::{Component, Entity};
use serde::{Deserialize, Serialize};

/// Playback state of a sprite animation.
///
/// Definitions (frame count, fps, looping) live in
/// [`AnimationStore`](crate::resources::animationstore::AnimationStore); this
/// component only tracks which one is playing and where it is.
#[derive(Debug, Clone, Component, Serialize, Deserialize)]
pub struct Animation {
    pub animation_key: String,
    pub frame_index: usize,
    pub elapsed_time: f32,
    /// Set once a non-looping animation has shown its last frame.
    pub finished: bool,
    /// Stopped animations hold their current frame.
    pub paused: bool,
}

impl Animation {
    pub fn new(animation_key: impl Into<String>) -> Self {
        Self {
            animation_key: animation_key.into(),
            frame_index: 0,
            elapsed_time: 0.0,
            finished: false,
            paused: false,
        }
    }

    pub fn is_playing(&self, key: &str) -> bool {
        self.animation_key == key && !self.paused
    }

    /// Play `key` unless it is already the running animation.
    ///
    /// Returns true when playback (re)started.
    pub fn play(&mut self, key: &str) -> bool {
        if self.is_playing(key) {
            return false;
        }
        self.restart(key);
        true
    }

    /// Play `key` from its first frame, even if it is already running.
    pub fn restart(&mut self, key: &str) {
        if self.animation_key != key {
            self.animation_key = key.to_string();
        }
        self.frame_index = 0;
        self.elapsed_time = 0.0;
        self.finished = false;
        self.paused = false;
    }

    pub fn stop(&mut self) {
        self.paused = true;
    }
}

/// Subscribes `owner` to this entity's frame-update and completion events.
///
/// Inserted when an action starts an animation it needs to follow and removed
/// when that animation completes or is cancelled, so repeated actions never
/// stack subscriptions.
#[derive(Debug, Clone, Copy, Component)]
pub struct AnimationWatch {
    pub owner: Entity,
}

/// Despawn the entity once its (non-looping) animation completes.
#[derive(Debug, Clone, Copy, Default, Component)]
pub struct DespawnOnAnimationEnd;
