//! Input systems.
//!
//! - [`update_input_state`] samples [`RawInput`] once per frame and writes the
//!   results into [`InputState`], deriving press/release edges.
//! - An [`InputEvent`] is triggered for every action that was just pressed or
//!   released.
use bevy_ecs::prelude::*;

use crate::events::input::{InputAction, InputEvent};
use crate::resources::input::{BoolState, InputState, RawInput};

fn sample_action(
    state: &mut BoolState,
    action: InputAction,
    raw: &RawInput,
    commands: &mut Commands,
) {
    state.sample(raw.is_down(state.key_binding));
    if state.just_pressed {
        commands.trigger(InputEvent {
            action,
            pressed: true,
        });
    }
    if state.just_released {
        commands.trigger(InputEvent {
            action,
            pressed: false,
        });
    }
}

/// Read the host's raw sample and update the `InputState` resource.
pub fn update_input_state(
    raw: Res<RawInput>,
    mut input: ResMut<InputState>,
    mut commands: Commands,
) {
    let input = &mut *input;
    input.pointer = raw.pointer;

    // WASD keys
    sample_action(
        &mut input.maindirection_up,
        InputAction::MainDirectionUp,
        &raw,
        &mut commands,
    );
    sample_action(
        &mut input.maindirection_down,
        InputAction::MainDirectionDown,
        &raw,
        &mut commands,
    );
    sample_action(
        &mut input.maindirection_left,
        InputAction::MainDirectionLeft,
        &raw,
        &mut commands,
    );
    sample_action(
        &mut input.maindirection_right,
        InputAction::MainDirectionRight,
        &raw,
        &mut commands,
    );
    // Actions
    sample_action(
        &mut input.action_dodge,
        InputAction::Dodge,
        &raw,
        &mut commands,
    );
    sample_action(
        &mut input.action_attack,
        InputAction::Attack,
        &raw,
        &mut commands,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::input::Key;
    use std::sync::{Arc, Mutex};

    fn run_once(world: &mut World, schedule: &mut Schedule) {
        schedule.run(world);
        world.flush();
    }

    #[test]
    fn test_attack_press_emits_single_event() {
        let mut world = World::new();
        world.insert_resource(RawInput::default());
        world.insert_resource(InputState::default());

        let seen: Arc<Mutex<Vec<(InputAction, bool)>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        world.add_observer(move |trigger: On<InputEvent>| {
            let ev = trigger.event();
            sink.lock().unwrap().push((ev.action, ev.pressed));
        });

        let mut schedule = Schedule::default();
        schedule.add_systems(update_input_state);

        world.resource_mut::<RawInput>().press(Key::MouseLeft);
        run_once(&mut world, &mut schedule);
        run_once(&mut world, &mut schedule);
        assert!(world.resource::<InputState>().action_attack.active);
        assert!(!world.resource::<InputState>().action_attack.just_pressed);

        world.resource_mut::<RawInput>().release(Key::MouseLeft);
        run_once(&mut world, &mut schedule);

        let seen = seen.lock().unwrap();
        assert_eq!(
            seen.as_slice(),
            &[(InputAction::Attack, true), (InputAction::Attack, false)]
        );
    }

    #[test]
    fn test_pointer_copied() {
        let mut world = World::new();
        world.insert_resource(RawInput::default());
        world.insert_resource(InputState::default());
        world
            .resource_mut::<RawInput>()
            .set_pointer(glam::Vec2::new(3.0, 4.0));

        let mut schedule = Schedule::default();
        schedule.add_systems(update_input_state);
        run_once(&mut world, &mut schedule);

        assert_eq!(world.resource::<InputState>().pointer, glam::Vec2::new(3.0, 4.0));
    }
}
