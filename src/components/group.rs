use bevy_ecs::prelude::Component;

/// Faction tag for an entity: `"player"`, `"captain"`, ...
///
/// Weapon hits use it to skip actors on the wielder's own side.
#[derive(Component, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Group(String);

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}
