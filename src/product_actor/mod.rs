//! Product resource: catalog items with price and image metadata.

pub mod entity;
pub mod error;

pub use error::*;
