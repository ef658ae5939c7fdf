//! User resource: registration, profile updates, and the admin flag.

pub mod entity;
pub mod error;

pub use error::*;
