//! Session subdomain: lifecycle of one told joke and its archive record.

pub mod state;
pub mod value_objects;
