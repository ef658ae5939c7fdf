use thiserror::Error;

use crate::access::AccessError;
use crate::actor_framework::FrameworkError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CategoryError {
    #[error("category not found: {0}")]
    NotFound(String),
    #[error("a category with this name already exists: {0}")]
    AlreadyExists(String),
    #[error("cannot delete category with existing products")]
    HasProducts,
    #[error("category validation error: {0}")]
    ValidationError(String),
    #[error(transparent)]
    AccessDenied(#[from] AccessError),
    #[error("actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for CategoryError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => CategoryError::NotFound(id),
            FrameworkError::Conflict(key) => CategoryError::AlreadyExists(key),
            other => CategoryError::ActorCommunicationError(other.to_string()),
        }
    }
}
