//! Order resource: immutable checkout records plus the status lifecycle.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
