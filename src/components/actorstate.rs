//! Action state machine for player-controlled actors.
//!
//! [`ActorState`] decides, for one controllable actor, which of idle / run /
//! dodge / attack is active, which inputs are accepted this frame, and which
//! permission flags are waiting for a timer to flip them back on.
//!
//! The fields are private. Systems and observers mutate the state only through
//! the named transitions below, each guarded by its full precondition:
//!
//! | transition                 | precondition                                                        |
//! |----------------------------|---------------------------------------------------------------------|
//! | [`apply_movement_input`]   | `dodge.movement_allowed && attack.input_allowed`                    |
//! | [`start_dodge`]            | key down, `dodge.ready`, `dodge.key_released`, `attack.input_allowed` |
//! | [`start_attack`]           | `dodge.movement_allowed`, `attack.input_allowed`, not dodging, not attacking |
//!
//! Timer expiries come back through [`finish_dodge_cooldown`],
//! [`finish_dodge_roll`], [`finish_dodge_grace`] and [`finish_attack_grace`].
//!
//! [`apply_movement_input`]: ActorState::apply_movement_input
//! [`start_dodge`]: ActorState::start_dodge
//! [`start_attack`]: ActorState::start_attack
//! [`finish_dodge_cooldown`]: ActorState::finish_dodge_cooldown
//! [`finish_dodge_roll`]: ActorState::finish_dodge_roll
//! [`finish_dodge_grace`]: ActorState::finish_dodge_grace
//! [`finish_attack_grace`]: ActorState::finish_attack_grace

use bevy_ecs::prelude::Component;
use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

/// Held state of the four directional keys for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionalInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl DirectionalInput {
    pub fn new(up: bool, down: bool, left: bool, right: bool) -> Self {
        Self {
            up,
            down,
            left,
            right,
        }
    }

    /// True when any directional key is held.
    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

/// Dodge-roll bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DodgeState {
    /// False during the cooldown window that follows a dodge start.
    pub ready: bool,
    /// Latched true whenever the dodge key is seen up.
    pub key_released: bool,
    /// True while the roll itself is in progress.
    pub dodging: bool,
    /// False during the short window after a dodge start when directional input is ignored.
    pub movement_allowed: bool,
    /// Direction locked in when the current (or last) roll started.
    pub direction: IVec2,
}

impl Default for DodgeState {
    fn default() -> Self {
        Self {
            ready: true,
            key_released: true,
            dodging: false,
            movement_allowed: true,
            direction: IVec2::ZERO,
        }
    }
}

/// Weapon swing bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackState {
    /// True while the swing animation is playing.
    pub attacking: bool,
    /// False from swing start until the attack grace timer fires.
    pub input_allowed: bool,
    /// True only while the swing is on one of its damage frames.
    pub damage_active: bool,
}

impl Default for AttackState {
    fn default() -> Self {
        Self {
            attacking: false,
            input_allowed: true,
            damage_active: false,
        }
    }
}

/// Outcome of a successful [`ActorState::start_dodge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DodgeStart {
    /// A swing tail was still animating and got cancelled; the weapon must be stowed.
    pub cancelled_attack: bool,
}

/// Body animation chosen for the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyAnimation {
    Idle,
    Run,
    Dodge,
}

/// Per-actor action state. See the module docs for the transition table.
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorState {
    facing_left: bool,
    movement_intent: IVec2,
    dodge: DodgeState,
    attack: AttackState,
    speed_boost: Vec2,
    vulnerable: bool,
}

impl Default for ActorState {
    fn default() -> Self {
        Self::new()
    }
}

impl ActorState {
    pub fn new() -> Self {
        Self {
            facing_left: false,
            movement_intent: IVec2::ZERO,
            dodge: DodgeState::default(),
            attack: AttackState::default(),
            speed_boost: Vec2::ZERO,
            vulnerable: true,
        }
    }

    pub fn facing_left(&self) -> bool {
        self.facing_left
    }

    /// Last pressed direction per axis, kept while input is locked out.
    pub fn movement_intent(&self) -> IVec2 {
        self.movement_intent
    }

    pub fn dodge(&self) -> &DodgeState {
        &self.dodge
    }

    pub fn attack(&self) -> &AttackState {
        &self.attack
    }

    pub fn speed_boost(&self) -> Vec2 {
        self.speed_boost
    }

    pub fn vulnerable(&self) -> bool {
        self.vulnerable
    }

    /// Directional input is honoured only when neither a dodge nor a swing holds it.
    pub fn can_move(&self) -> bool {
        self.dodge.movement_allowed && self.attack.input_allowed
    }

    /// Resolve this frame's directional keys.
    ///
    /// Returns the raw per-axis direction (components in {-1, 0, 1}, not yet
    /// normalised). Left wins over right and up wins over down. When movement
    /// is locked out the result is zero and the persisted intent is untouched.
    pub fn apply_movement_input(&mut self, input: DirectionalInput) -> Vec2 {
        if !self.can_move() {
            return Vec2::ZERO;
        }

        let mut direction = Vec2::ZERO;
        if input.left {
            direction.x = -1.0;
            self.movement_intent.x = -1;
            self.facing_left = true;
        } else if input.right {
            direction.x = 1.0;
            self.movement_intent.x = 1;
            self.facing_left = false;
        }

        if input.up {
            direction.y = -1.0;
            self.movement_intent.y = -1;
        } else if input.down {
            direction.y = 1.0;
            self.movement_intent.y = 1;
        }

        // a pure horizontal or vertical press drops the other axis from the next dodge
        let horizontal = input.left || input.right;
        let vertical = input.up || input.down;
        if horizontal && !vertical {
            self.movement_intent.y = 0;
        }
        if vertical && !horizontal {
            self.movement_intent.x = 0;
        }

        direction
    }

    /// Latch the dodge key release. Must be sampled every frame.
    pub fn observe_dodge_key(&mut self, held: bool) {
        if !held {
            self.dodge.key_released = true;
        }
    }

    pub fn can_dodge(&self, dodge_held: bool) -> bool {
        dodge_held && self.dodge.ready && self.dodge.key_released && self.attack.input_allowed
    }

    /// Begin a dodge roll along the persisted movement intent.
    ///
    /// Returns `None` and changes nothing when the key is not down or a dodge
    /// is not allowed right now.
    pub fn start_dodge(&mut self, dodge_held: bool, speed_bonus: f32) -> Option<DodgeStart> {
        if !self.can_dodge(dodge_held) {
            return None;
        }

        self.dodge.dodging = true;
        self.dodge.ready = false;
        self.dodge.key_released = false;
        self.dodge.movement_allowed = false;
        self.dodge.direction = self.movement_intent;
        self.vulnerable = false;
        self.speed_boost = self.dodge.direction.as_vec2().normalize_or_zero() * speed_bonus;

        let cancelled_attack = self.attack.attacking;
        if cancelled_attack {
            self.attack.attacking = false;
            self.attack.damage_active = false;
        }
        Some(DodgeStart { cancelled_attack })
    }

    /// Cooldown timer expired: the next dodge may start.
    pub fn finish_dodge_cooldown(&mut self) {
        self.dodge.ready = true;
    }

    /// Duration timer expired: the roll is over and the actor can be hurt again.
    pub fn finish_dodge_roll(&mut self) {
        self.dodge.dodging = false;
        self.vulnerable = true;
    }

    /// Grace timer expired: directional input is accepted again.
    pub fn finish_dodge_grace(&mut self) {
        self.dodge.movement_allowed = true;
    }

    /// Set the decaying dodge boost for this frame.
    pub fn decay_speed_boost(&mut self, boost: Vec2) {
        self.speed_boost = boost;
    }

    pub fn can_attack(&self) -> bool {
        self.dodge.movement_allowed
            && self.attack.input_allowed
            && !self.dodge.dodging
            && !self.attack.attacking
    }

    /// Begin a swing aimed along `aim` (pointer minus actor position).
    ///
    /// Faces the aim, and points the horizontal movement intent the same way so
    /// a dodge in the facing direction can follow immediately. Returns `false`
    /// and changes nothing when a swing cannot start.
    pub fn start_attack(&mut self, aim: Vec2) -> bool {
        if !self.can_attack() {
            return false;
        }

        self.attack.attacking = true;
        self.attack.input_allowed = false;
        self.attack.damage_active = false;

        self.facing_left = aim.x < 0.0;
        self.movement_intent.x = if self.facing_left { -1 } else { 1 };
        true
    }

    /// Attack grace timer expired: movement and dodging may resume while the swing finishes.
    pub fn finish_attack_grace(&mut self) {
        self.attack.input_allowed = true;
    }

    /// Swing reached a new frame; `active` tells whether it is a damage frame.
    pub fn set_damage_frame(&mut self, active: bool) {
        self.attack.damage_active = self.attack.attacking && active;
    }

    /// Swing animation completed.
    pub fn finish_attack(&mut self) {
        self.attack.attacking = false;
        self.attack.damage_active = false;
    }

    /// Pick the body animation for this frame.
    ///
    /// A roll shows the dodge animation (facing the roll) unless a swing still
    /// holds input; otherwise run or idle, except mid-swing where the attack
    /// animation keeps playing and `None` is returned.
    pub fn resolve_body_animation(&mut self, running: bool) -> Option<BodyAnimation> {
        if self.dodge.dodging && self.attack.input_allowed {
            self.facing_left = self.dodge.direction.x < 0;
            Some(BodyAnimation::Dodge)
        } else if !self.attack.attacking {
            if running {
                Some(BodyAnimation::Run)
            } else {
                Some(BodyAnimation::Idle)
            }
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RIGHT: DirectionalInput = DirectionalInput {
        up: false,
        down: false,
        left: false,
        right: true,
    };

    #[test]
    fn test_new_state_accepts_everything() {
        let state = ActorState::new();
        assert!(state.can_move());
        assert!(state.can_attack());
        assert!(state.can_dodge(true));
        assert!(state.vulnerable());
        assert_eq!(state.speed_boost(), Vec2::ZERO);
    }

    #[test]
    fn test_right_faces_right_and_moves() {
        let mut state = ActorState::new();
        let dir = state.apply_movement_input(RIGHT);
        assert_eq!(dir, Vec2::new(1.0, 0.0));
        assert!(!state.facing_left());
        assert_eq!(state.movement_intent(), IVec2::new(1, 0));
    }

    #[test]
    fn test_left_wins_over_right() {
        let mut state = ActorState::new();
        let dir = state.apply_movement_input(DirectionalInput::new(false, false, true, true));
        assert_eq!(dir.x, -1.0);
        assert!(state.facing_left());
    }

    #[test]
    fn test_pure_vertical_clears_horizontal_intent() {
        let mut state = ActorState::new();
        state.apply_movement_input(RIGHT);
        state.apply_movement_input(DirectionalInput::new(true, false, false, false));
        assert_eq!(state.movement_intent(), IVec2::new(0, -1));
    }

    #[test]
    fn test_diagonal_keeps_both_axes() {
        let mut state = ActorState::new();
        let dir = state.apply_movement_input(DirectionalInput::new(false, true, true, false));
        assert_eq!(dir, Vec2::new(-1.0, 1.0));
        assert_eq!(state.movement_intent(), IVec2::new(-1, 1));
    }

    #[test]
    fn test_start_dodge_sets_flags_and_boost() {
        let mut state = ActorState::new();
        state.apply_movement_input(RIGHT);
        let start = state.start_dodge(true, 1500.0);
        assert_eq!(
            start,
            Some(DodgeStart {
                cancelled_attack: false
            })
        );

        assert!(state.dodge().dodging);
        assert!(!state.dodge().ready);
        assert!(!state.dodge().key_released);
        assert!(!state.dodge().movement_allowed);
        assert!(!state.vulnerable());
        assert_eq!(state.dodge().direction, IVec2::new(1, 0));
        assert_eq!(state.speed_boost(), Vec2::new(1500.0, 0.0));
    }

    #[test]
    fn test_dodge_boost_is_normalised_on_diagonals() {
        let mut state = ActorState::new();
        state.apply_movement_input(DirectionalInput::new(true, false, false, true));
        state.start_dodge(true, 100.0);
        assert!((state.speed_boost().length() - 100.0).abs() < 1e-4);
    }

    #[test]
    fn test_dodge_requires_key_release_between_rolls() {
        let mut state = ActorState::new();
        state.start_dodge(true, 1.0);
        state.finish_dodge_grace();
        state.finish_dodge_roll();
        state.finish_dodge_cooldown();

        // key still held since the first roll
        state.observe_dodge_key(true);
        assert!(!state.can_dodge(true));

        state.observe_dodge_key(false);
        assert!(state.can_dodge(true));
    }

    #[test]
    fn test_dodge_blocked_by_attack_grace() {
        let mut state = ActorState::new();
        assert!(state.start_attack(Vec2::new(10.0, 0.0)));
        assert!(!state.can_dodge(true));
        assert_eq!(state.start_dodge(true, 1.0), None);
        assert!(!state.dodge().dodging);
    }

    #[test]
    fn test_dodge_during_swing_tail_cancels_attack() {
        let mut state = ActorState::new();
        state.start_attack(Vec2::new(10.0, 0.0));
        state.finish_attack_grace();
        state.set_damage_frame(true);

        let start = state.start_dodge(true, 1.0).expect("dodge should start");
        assert!(start.cancelled_attack);
        assert!(state.dodge().dodging);
        assert!(!state.attack().attacking);
        assert!(!state.attack().damage_active);
    }

    #[test]
    fn test_movement_locked_during_dodge_grace() {
        let mut state = ActorState::new();
        state.apply_movement_input(RIGHT);
        state.start_dodge(true, 1.0);

        let dir = state.apply_movement_input(DirectionalInput::new(false, false, true, false));
        assert_eq!(dir, Vec2::ZERO);
        // intent is kept while locked out
        assert_eq!(state.movement_intent(), IVec2::new(1, 0));

        state.finish_dodge_grace();
        let dir = state.apply_movement_input(DirectionalInput::new(false, false, true, false));
        assert_eq!(dir.x, -1.0);
    }

    #[test]
    fn test_vulnerable_tracks_dodging() {
        let mut state = ActorState::new();
        state.start_dodge(true, 1.0);
        assert_eq!(state.vulnerable(), !state.dodge().dodging);
        state.finish_dodge_grace();
        assert_eq!(state.vulnerable(), !state.dodge().dodging);
        state.finish_dodge_roll();
        assert_eq!(state.vulnerable(), !state.dodge().dodging);
        assert!(state.vulnerable());
    }

    #[test]
    fn test_attack_sets_facing_from_aim() {
        let mut state = ActorState::new();
        assert!(state.start_attack(Vec2::new(-5.0, 3.0)));
        assert!(state.facing_left());
        assert_eq!(state.movement_intent().x, -1);
        assert!(state.attack().attacking);
        assert!(!state.attack().input_allowed);
        assert!(!state.can_move());
    }

    #[test]
    fn test_attack_while_attacking_is_ignored() {
        let mut state = ActorState::new();
        state.start_attack(Vec2::new(5.0, 0.0));
        state.finish_attack_grace();
        let before = state.clone();

        assert!(!state.start_attack(Vec2::new(-5.0, 0.0)));
        assert_eq!(state, before);
    }

    #[test]
    fn test_attack_blocked_while_dodging() {
        let mut state = ActorState::new();
        state.start_dodge(true, 1.0);
        state.finish_dodge_grace();
        assert!(!state.can_attack());
        assert!(!state.start_attack(Vec2::new(1.0, 0.0)));
        assert!(!state.attack().attacking);
    }

    #[test]
    fn test_damage_frame_only_while_attacking() {
        let mut state = ActorState::new();
        state.set_damage_frame(true);
        assert!(!state.attack().damage_active);

        state.start_attack(Vec2::X);
        state.set_damage_frame(true);
        assert!(state.attack().damage_active);
        state.set_damage_frame(false);
        assert!(!state.attack().damage_active);

        state.set_damage_frame(true);
        state.finish_attack();
        assert!(!state.attack().damage_active);
        assert!(!state.attack().attacking);
    }

    #[test]
    fn test_body_animation_selection() {
        let mut state = ActorState::new();
        assert_eq!(state.resolve_body_animation(false), Some(BodyAnimation::Idle));
        assert_eq!(state.resolve_body_animation(true), Some(BodyAnimation::Run));

        state.start_attack(Vec2::X);
        assert_eq!(state.resolve_body_animation(true), None);
        state.finish_attack_grace();
        state.finish_attack();

        state.apply_movement_input(DirectionalInput::new(false, false, true, false));
        state.start_dodge(true, 1.0);
        // facing follows the roll
        state.apply_movement_input(RIGHT);
        assert_eq!(state.resolve_body_animation(true), Some(BodyAnimation::Dodge));
        assert!(state.facing_left());
    }

    #[test]
    fn test_never_attacking_and_dodging_together() {
        // exhaustive walk over short transition sequences
        #[derive(Clone, Copy, Debug)]
        enum Step {
            Dodge,
            Attack,
            KeyUp,
            Cooldown,
            Roll,
            Grace,
            AttackGrace,
            AttackEnd,
        }
        const STEPS: [Step; 8] = [
            Step::Dodge,
            Step::Attack,
            Step::KeyUp,
            Step::Cooldown,
            Step::Roll,
            Step::Grace,
            Step::AttackGrace,
            Step::AttackEnd,
        ];

        fn apply(state: &mut ActorState, step: Step) {
            match step {
                Step::Dodge => {
                    state.start_dodge(true, 10.0);
                }
                Step::Attack => {
                    state.start_attack(Vec2::X);
                }
                Step::KeyUp => state.observe_dodge_key(false),
                Step::Cooldown => state.finish_dodge_cooldown(),
                Step::Roll => state.finish_dodge_roll(),
                Step::Grace => state.finish_dodge_grace(),
                Step::AttackGrace => state.finish_attack_grace(),
                Step::AttackEnd => state.finish_attack(),
            }
        }

        fn walk(state: ActorState, depth: usize) {
            assert!(!(state.attack().attacking && state.dodge().dodging));
            assert_eq!(state.vulnerable(), !state.dodge().dodging);
            if depth == 0 {
                return;
            }
            for step in STEPS {
                let mut next = state.clone();
                apply(&mut next, step);
                walk(next, depth - 1);
            }
        }

        walk(ActorState::new(), 5);
    }
}
