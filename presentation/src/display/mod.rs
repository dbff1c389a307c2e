//! Display sinks for the terminal

pub mod console;
