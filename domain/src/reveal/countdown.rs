//! Countdown state machine driving the punchline reveal.
//!
//! Pure model of a reveal timer: it knows nothing about wall-clock time. A
//! runtime calls [`Countdown::tick`] once per interval and acts on the
//! returned [`TickOutcome`].
//!
//! # State Transitions
//!
//! ```text
//! Idle ──> Running ──> Expired
//!             └──────> Cancelled
//! ```

use serde::{Deserialize, Serialize};

/// Lifecycle state of a countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerState {
    Idle,
    Running,
    Expired,
    Cancelled,
}

/// What a single tick produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Report this value and schedule another tick.
    Continue(u32),
    /// Report this value (always 0) and then expire.
    Expire(u32),
    /// The countdown is not running; nothing to report.
    Inactive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
    state: TimerState,
}

impl Countdown {
    pub fn new() -> Self {
        Self {
            remaining: 0,
            state: TimerState::Idle,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Transition from Idle to Running.
    ///
    /// Returns false (and changes nothing) if the countdown was already started.
    pub fn start(&mut self, initial_seconds: u32) -> bool {
        if self.state != TimerState::Idle {
            return false;
        }
        self.remaining = initial_seconds;
        self.state = TimerState::Running;
        true
    }

    /// Advance by one tick.
    ///
    /// The reported value is the remaining count *before* decrementing, so a
    /// countdown started at `n` reports `n, n-1, ..., 0` and then expires.
    pub fn tick(&mut self) -> TickOutcome {
        if self.state != TimerState::Running {
            return TickOutcome::Inactive;
        }
        let current = self.remaining;
        if current == 0 {
            self.state = TimerState::Expired;
            TickOutcome::Expire(current)
        } else {
            self.remaining -= 1;
            TickOutcome::Continue(current)
        }
    }

    /// Transition from Running to Cancelled.
    ///
    /// Returns true only when this call performed the transition.
    pub fn cancel(&mut self) -> bool {
        if self.state != TimerState::Running {
            return false;
        }
        self.state = TimerState::Cancelled;
        true
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_from_five() {
        let mut countdown = Countdown::new();
        assert!(countdown.start(5));

        let outcomes: Vec<_> = (0..7).map(|_| countdown.tick()).collect();
        assert_eq!(
            outcomes,
            vec![
                TickOutcome::Continue(5),
                TickOutcome::Continue(4),
                TickOutcome::Continue(3),
                TickOutcome::Continue(2),
                TickOutcome::Continue(1),
                TickOutcome::Expire(0),
                TickOutcome::Inactive,
            ]
        );
        assert_eq!(countdown.state(), TimerState::Expired);
    }

    #[test]
    fn test_zero_expires_on_first_tick() {
        let mut countdown = Countdown::new();
        countdown.start(0);
        assert_eq!(countdown.tick(), TickOutcome::Expire(0));
    }

    #[test]
    fn test_idle_tick_is_inactive() {
        let mut countdown = Countdown::new();
        assert_eq!(countdown.tick(), TickOutcome::Inactive);
        assert_eq!(countdown.state(), TimerState::Idle);
    }

    #[test]
    fn test_cancel_only_from_running() {
        let mut countdown = Countdown::new();
        assert!(!countdown.cancel());

        countdown.start(3);
        countdown.tick();
        assert!(countdown.cancel());
        assert!(!countdown.cancel());
        assert_eq!(countdown.tick(), TickOutcome::Inactive);
        assert_eq!(countdown.state(), TimerState::Cancelled);
        assert_eq!(countdown.remaining(), 2);
    }

    #[test]
    fn test_start_twice_is_rejected() {
        let mut countdown = Countdown::new();
        assert!(countdown.start(5));
        assert!(!countdown.start(9));
        assert_eq!(countdown.remaining(), 5);
    }
}
