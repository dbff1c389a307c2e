//! Joke entity

use super::category::Category;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque unique identifier for a joke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JokeId(Uuid);

impl JokeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for JokeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for JokeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A joke with a question, its punchline and a category (Entity)
///
/// Immutable once built; catalogs hand them out behind `Arc`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Joke {
    id: JokeId,
    question: String,
    answer: String,
    category: Category,
}

impl Joke {
    pub fn new(question: impl Into<String>, answer: impl Into<String>, category: Category) -> Self {
        Self {
            id: JokeId::new(),
            question: question.into(),
            answer: answer.into(),
            category,
        }
    }

    pub fn id(&self) -> JokeId {
        self.id
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn category(&self) -> Category {
        self.category
    }
}

impl std::fmt::Display for Joke {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.question, self.answer)
    }
}
