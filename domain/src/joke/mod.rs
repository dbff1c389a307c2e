//! Joke subdomain: entities, categories, the catalog and hint resolution.

pub mod catalog;
pub mod category;
pub mod entities;
pub mod resolver;
