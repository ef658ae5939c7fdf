//! Thin instrumented clients over the actor channels. Cross-resource rules
//! live here: checkout orchestration, deletion guards and cascades, the
//! admin capability checks, and notification triggering.

pub mod cart_client;
pub mod catalog_client;
pub mod order_client;
pub mod user_client;

pub use cart_client::CartClient;
pub use catalog_client::CatalogClient;
pub use order_client::{CancellationOutcome, CartLine, CartSummary, OrderClient, OrderStats, PlacedOrder, StatusUpdate};
pub use user_client::UserClient;
