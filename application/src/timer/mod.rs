//! Runtime timers.

pub mod reveal_timer;

pub use reveal_timer::{RevealTimer, TimerError};
