//! Reveal subdomain: the countdown that precedes the punchline.

pub mod countdown;
