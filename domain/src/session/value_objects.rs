//! Session value objects

use crate::joke::category::Category;
use crate::joke::entities::{Joke, JokeId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for one "tell a joke" request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Summary of a completed session, emitted exactly once per session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveRecord {
    pub session_id: SessionId,
    pub joke_id: JokeId,
    pub question: String,
    pub answer: String,
    pub category: Category,
}

impl ArchiveRecord {
    pub fn new(session_id: SessionId, joke: &Joke) -> Self {
        Self {
            session_id,
            joke_id: joke.id(),
            question: joke.question().to_string(),
            answer: joke.answer().to_string(),
            category: joke.category(),
        }
    }
}
