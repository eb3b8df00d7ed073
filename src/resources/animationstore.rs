//! Animation resource registry.
//!
//! This module provides a minimal store for animation definitions that can be
//! reused by multiple entities. Systems look up an animation by a string key
//! and drive playback based on the immutable parameters stored here.

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;

/// Central registry of reusable animation definitions keyed by string IDs.
#[derive(Resource, Debug, Default)]
pub struct AnimationStore {
    pub animations: FxHashMap<String, AnimationResource>,
}

/// Immutable data describing a sprite-sheet animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationResource {
    /// Number of frames in the animation.
    pub frame_count: usize,
    /// Frames per second playback speed.
    pub fps: f32,
    /// Whether the animation restarts after the last frame.
    pub looped: bool,
}

impl AnimationResource {
    pub fn looped(frame_count: usize, fps: f32) -> Self {
        Self {
            frame_count,
            fps,
            looped: true,
        }
    }

    pub fn once(frame_count: usize, fps: f32) -> Self {
        Self {
            frame_count,
            fps,
            looped: false,
        }
    }

    /// Seconds a non-looping run takes from first frame to completion.
    pub fn duration(&self) -> f32 {
        if self.fps <= 0.0 {
            0.0
        } else {
            self.frame_count as f32 / self.fps
        }
    }
}

impl AnimationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, animation: AnimationResource) {
        self.animations.insert(key.into(), animation);
    }

    pub fn get(&self, key: &str) -> Option<&AnimationResource> {
        self.animations.get(key)
    }
}
