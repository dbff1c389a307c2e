//! Use cases (application services)
//!
//! - [`joke_session`]: one told joke from question to archive
//! - [`tell_joke`]: the display slot holding at most one live session

pub mod joke_session;
pub mod tell_joke;
