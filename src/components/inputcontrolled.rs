use bevy_ecs::prelude::Component;

/// Actor driven by the shared [`InputState`](crate::resources::input::InputState).
///
/// The player controller and the attack observer act on every entity that
/// carries this marker together with an
/// [`ActorState`](super::actorstate::ActorState).
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct InputControlled;
