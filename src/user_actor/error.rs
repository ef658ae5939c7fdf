use thiserror::Error;

use crate::access::AccessError;
use crate::actor_framework::FrameworkError;

/// Errors that can occur during user operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UserError {
    #[error("user not found: {0}")]
    NotFound(String),
    #[error("an account with this email already exists: {0}")]
    AlreadyExists(String),
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("user validation error: {0}")]
    ValidationError(String),
    #[error("you cannot delete your own account")]
    SelfDeletion,
    #[error(transparent)]
    AccessDenied(#[from] AccessError),
    #[error("actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for UserError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => UserError::NotFound(id),
            FrameworkError::Conflict(key) => UserError::AlreadyExists(key),
            other => UserError::ActorCommunicationError(other.to_string()),
        }
    }
}
