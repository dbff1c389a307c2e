//! Interactive joke-telling loop

mod joke_repl;

pub use joke_repl::{JokeRepl, ReplCommand};
