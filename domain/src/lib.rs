//! Domain layer for jokebook
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Catalog
//!
//! A fixed, read-only set of [`Joke`]s tagged with a [`Category`]. Selection
//! is uniform within a category, or across the whole catalog for
//! [`Category::Default`].
//!
//! ## Reveal
//!
//! A told joke moves through [`SessionState`]: the question is shown, a
//! [`Countdown`] ticks down, the punchline is revealed and an
//! [`ArchiveRecord`] is emitted.

pub mod core;
pub mod joke;
pub mod reveal;
pub mod session;

// Re-export commonly used types
pub use crate::core::error::DomainError;
pub use joke::{
    catalog::JokeCatalog,
    category::Category,
    entities::{Joke, JokeId},
    resolver::CategoryResolver,
};
pub use reveal::countdown::{Countdown, TickOutcome, TimerState};
pub use session::{
    state::SessionState,
    value_objects::{ArchiveRecord, SessionId},
};
