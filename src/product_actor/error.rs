use thiserror::Error;

use crate::access::AccessError;
use crate::actor_framework::FrameworkError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    #[error("product not found: {0}")]
    NotFound(String),
    #[error("price must not be negative: {0}")]
    NegativePrice(f64),
    #[error("product validation error: {0}")]
    ValidationError(String),
    #[error(transparent)]
    AccessDenied(#[from] AccessError),
    #[error("actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for ProductError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => ProductError::NotFound(id),
            other => ProductError::ActorCommunicationError(other.to_string()),
        }
    }
}
