//! Joke session lifecycle.
//!
//! # State Transitions
//!
//! ```text
//! Selecting ──> Revealing ──> Answered ──> Archived
//!     │             │
//!     └─────────────┴──> Superseded
//! ```

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// State of a joke session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Resolving a category and drawing a joke.
    #[default]
    Selecting,
    /// Question shown, countdown running.
    Revealing,
    /// Punchline shown, archive record pending.
    Answered,
    /// Archive record emitted.
    Archived,
    /// Cancelled by quit or by a newer request in the same slot.
    Superseded,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Selecting => "selecting",
            SessionState::Revealing => "revealing",
            SessionState::Answered => "answered",
            SessionState::Archived => "archived",
            SessionState::Superseded => "superseded",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Archived | SessionState::Superseded)
    }

    /// Whether `self -> to` is a legal transition.
    pub fn can_transition_to(&self, to: SessionState) -> bool {
        use SessionState::*;
        matches!(
            (self, to),
            (Selecting, Revealing)
                | (Revealing, Answered)
                | (Answered, Archived)
                | (Selecting, Superseded)
                | (Revealing, Superseded)
        )
    }

    /// Checked transition.
    pub fn transition(self, to: SessionState) -> Result<SessionState, DomainError> {
        if self.can_transition_to(to) {
            Ok(to)
        } else {
            Err(DomainError::InvalidTransition { from: self, to })
        }
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
