//! Category resource. The non-empty-category deletion guard lives in
//! [`crate::clients::CatalogClient`], which can see the product store.

pub mod entity;
pub mod error;

pub use error::*;
