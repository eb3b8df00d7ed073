//! Scripted input for headless runs.
//!
//! A script is a JSON array of steps; each step holds a set of keys (and
//! optionally moves the pointer) for a number of frames:
//!
//! ```json
//! [
//!   { "frames": 10, "keys": ["D"] },
//!   { "frames": 1, "keys": ["D", "Space"] },
//!   { "frames": 5, "keys": ["MouseLeft"], "pointer": [600.0, 500.0] }
//! ]
//! ```
//!
//! Frames past the end of the script have no keys held.

use bevy_ecs::prelude::*;
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::resources::input::{Key, RawInput};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    pub frames: u32,
    #[serde(default)]
    pub keys: Vec<Key>,
    #[serde(default)]
    pub pointer: Option<[f32; 2]>,
}

#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputScript {
    pub steps: Vec<ScriptStep>,
}

impl InputScript {
    pub fn from_json(text: &str) -> Result<Self, String> {
        serde_json::from_str(text).map_err(|e| format!("Failed to parse input script: {}", e))
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read input script {:?}: {}", path, e))?;
        Self::from_json(&text)
    }

    /// Step active on `frame` (0-based), if the script has not run out.
    pub fn step_at(&self, frame: u64) -> Option<&ScriptStep> {
        let mut start = 0u64;
        for step in &self.steps {
            let end = start + step.frames as u64;
            if frame < end {
                return Some(step);
            }
            start = end;
        }
        None
    }

    /// Total number of frames covered by the script.
    pub fn len_frames(&self) -> u64 {
        self.steps.iter().map(|s| s.frames as u64).sum()
    }

    /// Write the sample for `frame` into `raw`.
    ///
    /// The pointer keeps its last position unless the step moves it.
    pub fn apply(&self, frame: u64, raw: &mut RawInput) {
        match self.step_at(frame) {
            Some(step) => {
                raw.set_held(step.keys.iter().copied());
                if let Some([x, y]) = step.pointer {
                    raw.set_pointer(Vec2::new(x, y));
                }
            }
            None => raw.release_all(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = r#"[
        { "frames": 2, "keys": ["D"] },
        { "frames": 1, "keys": ["D", "Space"], "pointer": [10.0, 20.0] },
        { "frames": 3 }
    ]"#;

    #[test]
    fn test_step_lookup() {
        let script = InputScript::from_json(SCRIPT).unwrap();
        assert_eq!(script.len_frames(), 6);
        assert_eq!(script.step_at(0).unwrap().keys, vec![Key::D]);
        assert_eq!(script.step_at(2).unwrap().keys, vec![Key::D, Key::Space]);
        assert!(script.step_at(5).unwrap().keys.is_empty());
        assert!(script.step_at(6).is_none());
    }

    #[test]
    fn test_apply_updates_raw_input() {
        let script = InputScript::from_json(SCRIPT).unwrap();
        let mut raw = RawInput::default();

        script.apply(2, &mut raw);
        assert!(raw.is_down(Key::Space));
        assert_eq!(raw.pointer, Vec2::new(10.0, 20.0));

        script.apply(3, &mut raw);
        assert!(!raw.is_down(Key::D));
        assert_eq!(raw.pointer, Vec2::new(10.0, 20.0));

        raw.press(Key::A);
        script.apply(100, &mut raw);
        assert!(!raw.is_down(Key::A));
    }

    #[test]
    fn test_rejects_unknown_key() {
        assert!(InputScript::from_json(r#"[{ "frames": 1, "keys": ["Q"] }]"#).is_err());
    }
}
