use thiserror::Error;

use crate::access::AccessError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("cart item not found: {0}")]
    NotFound(String),
    #[error("product not found: {0}")]
    ProductNotFound(String),
    #[error("quantity must be at least 1")]
    InvalidQuantity,
    #[error(transparent)]
    AccessDenied(#[from] AccessError),
    #[error("actor communication error: {0}")]
    ActorCommunicationError(String),
}
