//! Entity-scoped one-shot timers.
//!
//! [`ActionTimers`] holds every delayed action pending for one entity. The
//! [`update_action_timers`](crate::systems::timer::update_action_timers)
//! system counts them down with the frame clock and emits an
//! [`ActionTimerEvent`](crate::events::timer::ActionTimerEvent) for each one
//! that comes due.
//!
//! Timers live on the entity they act upon: despawning the entity drops all of
//! its pending timers, so an expiry can never touch a destroyed actor.

use bevy_ecs::prelude::Component;
use smallvec::SmallVec;

/// What to do when a timer comes due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerAction {
    /// Dodge cooldown over: `dodge.ready` again.
    DodgeCooldown,
    /// Dodge roll over: stop dodging, become vulnerable.
    DodgeRoll,
    /// Post-dodge grace over: directional input accepted again.
    DodgeGrace,
    /// Post-swing grace over: movement and dodging accepted again.
    AttackGrace,
    /// Post-hit invulnerability over.
    DamageInvulnerability,
    /// A shooter may fire again.
    ShooterReady,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingTimer {
    /// Seconds left before the action fires.
    pub remaining: f32,
    pub action: TimerAction,
}

#[derive(Component, Debug, Clone, Default)]
pub struct ActionTimers {
    pending: SmallVec<[PendingTimer; 4]>,
}

impl ActionTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `action` to fire once, `delay` seconds from now.
    pub fn schedule(&mut self, delay: f32, action: TimerAction) {
        self.pending.push(PendingTimer {
            remaining: delay,
            action,
        });
    }

    /// Drop every pending `action` without firing it.
    pub fn cancel(&mut self, action: TimerAction) {
        self.pending.retain(|timer| timer.action != action);
    }

    /// Count every pending timer down by `dt` and return the actions that came due.
    ///
    /// Due timers are removed. Actions are returned in scheduling order.
    pub fn advance(&mut self, dt: f32) -> SmallVec<[TimerAction; 4]> {
        let mut due = SmallVec::new();
        self.pending.retain(|timer| {
            timer.remaining -= dt;
            if timer.remaining <= 0.0 {
                due.push(timer.action);
                false
            } else {
                true
            }
        });
        due
    }

    pub fn is_pending(&self, action: TimerAction) -> bool {
        self.pending.iter().any(|t| t.action == action)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_after_delay() {
        let mut timers = ActionTimers::new();
        timers.schedule(0.5, TimerAction::DodgeGrace);

        assert!(timers.advance(0.25).is_empty());
        assert!(timers.is_pending(TimerAction::DodgeGrace));

        let due = timers.advance(0.25);
        assert_eq!(due.as_slice(), &[TimerAction::DodgeGrace]);
        assert!(timers.is_empty());

        assert!(timers.advance(10.0).is_empty());
    }

    #[test]
    fn test_independent_timers() {
        let mut timers = ActionTimers::new();
        timers.schedule(1.0, TimerAction::DodgeCooldown);
        timers.schedule(0.75, TimerAction::DodgeRoll);
        timers.schedule(0.25, TimerAction::DodgeGrace);
        assert_eq!(timers.len(), 3);

        assert_eq!(timers.advance(0.25).as_slice(), &[TimerAction::DodgeGrace]);
        assert!(timers.advance(0.25).is_empty());
        assert_eq!(timers.advance(0.25).as_slice(), &[TimerAction::DodgeRoll]);
        assert_eq!(timers.advance(0.25).as_slice(), &[TimerAction::DodgeCooldown]);
        assert!(timers.is_empty());
    }

    #[test]
    fn test_cancel_drops_only_that_action() {
        let mut timers = ActionTimers::new();
        timers.schedule(0.75, TimerAction::DodgeRoll);
        timers.schedule(0.5, TimerAction::DamageInvulnerability);
        timers.schedule(1.0, TimerAction::DodgeRoll);

        timers.cancel(TimerAction::DodgeRoll);
        assert_eq!(timers.len(), 1);
        assert!(!timers.is_pending(TimerAction::DodgeRoll));
        assert_eq!(
            timers.advance(0.5).as_slice(),
            &[TimerAction::DamageInvulnerability]
        );
    }

    #[test]
    fn test_same_tick_expiries_all_fire() {
        let mut timers = ActionTimers::new();
        timers.schedule(0.1, TimerAction::AttackGrace);
        timers.schedule(0.2, TimerAction::ShooterReady);
        let due = timers.advance(0.5);
        assert_eq!(due.len(), 2);
        assert!(due.contains(&TimerAction::AttackGrace));
        assert!(due.contains(&TimerAction::ShooterReady));
    }
}
