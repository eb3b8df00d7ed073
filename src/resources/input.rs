//! Per-frame keyboard and pointer input resources.
//!
//! The host feeds raw device state into [`RawInput`] (which keys are held,
//! where the pointer is). Once per frame
//! [`update_input_state`](crate::systems::input::update_input_state) samples
//! it into [`InputState`], deriving press/release edges for each bound action.
//! Defaults use WASD for movement, Space to dodge and the left mouse button
//! to attack.
use bevy_ecs::prelude::*;
use glam::Vec2;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::components::actorstate::DirectionalInput;

/// Physical keys and buttons the game can bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Null,
    W,
    A,
    S,
    D,
    Space,
    MouseLeft,
}

/// Raw device state as last reported by the host.
#[derive(Resource, Debug, Clone, Default)]
pub struct RawInput {
    held: FxHashSet<Key>,
    /// Pointer position in world coordinates.
    pub pointer: Vec2,
}

impl RawInput {
    pub fn press(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn release_all(&mut self) {
        self.held.clear();
    }

    /// Replace the held set with exactly `keys`.
    pub fn set_held(&mut self, keys: impl IntoIterator<Item = Key>) {
        self.held.clear();
        self.held.extend(keys);
    }

    pub fn set_pointer(&mut self, pointer: Vec2) {
        self.pointer = pointer;
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.held.contains(&key)
    }
}

#[derive(Debug, Clone, Copy)]
/// Boolean key state with an associated binding.
pub struct BoolState {
    /// Whether the key is currently active/pressed this frame.
    pub active: bool,
    /// Whether the key was just pressed this frame.
    pub just_pressed: bool,
    /// Whether the key was just released this frame.
    pub just_released: bool,

    /// The key bound to this action.
    pub key_binding: Key,
}

impl Default for BoolState {
    fn default() -> Self {
        Self::bound(Key::Null)
    }
}

impl BoolState {
    pub fn bound(key_binding: Key) -> Self {
        Self {
            active: false,
            just_pressed: false,
            just_released: false,
            key_binding,
        }
    }

    /// Record this frame's held state and derive the edges from the previous one.
    pub fn sample(&mut self, down: bool) {
        self.just_pressed = down && !self.active;
        self.just_released = !down && self.active;
        self.active = down;
    }
}

/// Resource capturing the per-frame input state relevant to gameplay.
#[derive(Resource, Debug, Clone)]
pub struct InputState {
    pub maindirection_up: BoolState,
    pub maindirection_left: BoolState,
    pub maindirection_down: BoolState,
    pub maindirection_right: BoolState,
    pub action_dodge: BoolState,
    pub action_attack: BoolState,
    /// Pointer position in world coordinates.
    pub pointer: Vec2,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            maindirection_up: BoolState::bound(Key::W),
            maindirection_left: BoolState::bound(Key::A),
            maindirection_down: BoolState::bound(Key::S),
            maindirection_right: BoolState::bound(Key::D),
            action_dodge: BoolState::bound(Key::Space),
            action_attack: BoolState::bound(Key::MouseLeft),
            pointer: Vec2::ZERO,
        }
    }
}

impl InputState {
    pub fn directions(&self) -> DirectionalInput {
        DirectionalInput::new(
            self.maindirection_up.active,
            self.maindirection_down.active,
            self.maindirection_left.active,
            self.maindirection_right.active,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolstate_default() {
        let bs = BoolState::default();
        assert!(!bs.active);
        assert!(!bs.just_pressed);
        assert!(!bs.just_released);
        assert_eq!(bs.key_binding, Key::Null);
    }

    #[test]
    fn test_boolstate_edges() {
        let mut bs = BoolState::bound(Key::Space);
        bs.sample(true);
        assert!(bs.active && bs.just_pressed && !bs.just_released);
        bs.sample(true);
        assert!(bs.active && !bs.just_pressed);
        bs.sample(false);
        assert!(!bs.active && bs.just_released);
        bs.sample(false);
        assert!(!bs.just_released);
    }

    #[test]
    fn test_inputstate_default_key_bindings() {
        let input = InputState::default();
        assert_eq!(input.maindirection_up.key_binding, Key::W);
        assert_eq!(input.maindirection_left.key_binding, Key::A);
        assert_eq!(input.maindirection_down.key_binding, Key::S);
        assert_eq!(input.maindirection_right.key_binding, Key::D);
        assert_eq!(input.action_dodge.key_binding, Key::Space);
        assert_eq!(input.action_attack.key_binding, Key::MouseLeft);
    }

    #[test]
    fn test_raw_input_set_held() {
        let mut raw = RawInput::default();
        raw.press(Key::A);
        raw.set_held([Key::D, Key::Space]);
        assert!(!raw.is_down(Key::A));
        assert!(raw.is_down(Key::D));
        assert!(raw.is_down(Key::Space));
        raw.release_all();
        assert!(!raw.is_down(Key::D));
    }

    #[test]
    fn test_key_names_in_json() {
        let keys: Vec<Key> = serde_json::from_str(r#"["W", "Space", "MouseLeft"]"#).unwrap();
        assert_eq!(keys, vec![Key::W, Key::Space, Key::MouseLeft]);
    }
}
