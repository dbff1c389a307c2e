//! Domain error types

use crate::joke::category::Category;
use crate::session::state::SessionState;
use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("No jokes available for category {0}")]
    EmptyCategory(Category),

    #[error("Unknown joke category: {0}")]
    UnknownCategory(String),

    #[error("Invalid session transition: {from} -> {to}")]
    InvalidTransition { from: SessionState, to: SessionState },
}

impl DomainError {
    /// Check if this error means a selection found nothing to draw from
    pub fn is_empty_category(&self) -> bool {
        matches!(self, DomainError::EmptyCategory(_))
    }
}
