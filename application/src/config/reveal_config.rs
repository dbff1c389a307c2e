//! Reveal parameters: countdown length and tick pacing.
//!
//! [`RevealConfig`] groups the static parameters that control how a
//! [`JokeSession`](crate::use_cases::joke_session::JokeSession) counts down
//! before revealing the punchline.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Countdown seconds used when nothing else is configured.
pub const DEFAULT_COUNTDOWN_SECONDS: u32 = 5;

/// Interval between two countdown ticks when nothing else is configured.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Countdown control parameters.
///
/// A countdown of `n` seconds delivers `n + 1` ticks (`n, n-1, ..., 0`)
/// before the punchline is revealed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealConfig {
    /// Value of the first countdown tick.
    pub countdown_seconds: u32,
    /// Delay before each tick.
    pub tick_interval: Duration,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            countdown_seconds: DEFAULT_COUNTDOWN_SECONDS,
            tick_interval: DEFAULT_TICK_INTERVAL,
        }
    }
}

impl RevealConfig {
    // ==================== Builder Methods ====================

    pub fn with_countdown_seconds(mut self, seconds: u32) -> Self {
        self.countdown_seconds = seconds;
        self
    }

    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Time from question to punchline.
    pub fn reveal_delay(&self) -> Duration {
        self.tick_interval * self.countdown_seconds.saturating_add(1)
    }
}
