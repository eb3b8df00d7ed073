use bevy_ecs::prelude::Component;

/// Render-facing sprite state.
///
/// Drawing itself belongs to the host; gameplay only decides whether the
/// sprite shows and which way it faces.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sprite {
    pub visible: bool,
    pub flip_x: bool,
}

impl Default for Sprite {
    fn default() -> Self {
        Self {
            visible: true,
            flip_x: false,
        }
    }
}

impl Sprite {
    pub fn hidden() -> Self {
        Self {
            visible: false,
            flip_x: false,
        }
    }
}
