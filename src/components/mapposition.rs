use bevy_ecs::prelude::Component;
use glam::Vec2;

/// World-space position of an entity's pivot (sprite centre).
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct MapPosition {
    pub pos: Vec2,
}

impl MapPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
        }
    }

    pub fn from_vec(pos: Vec2) -> Self {
        Self { pos }
    }
}
