use thiserror::Error;

use crate::access::AccessError;
use crate::actor_framework::FrameworkError;
use crate::domain::{InvalidStatus, OrderStatus, CANCELLATION_WINDOW_HOURS};

/// Errors that can occur during order operations. The two cancellation
/// refusals are distinct variants so callers can show the right message:
/// wrong status vs expired window.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("order not found: {0}")]
    NotFound(String),
    #[error("your cart is empty")]
    EmptyCart,
    #[error("order validation error: {0}")]
    ValidationError(String),
    #[error("invalid status: {0}")]
    InvalidStatus(String),
    #[error("order is already {0}; its status can no longer change")]
    TerminalStatus(OrderStatus),
    #[error("cannot cancel order with status \"{0}\"; only pending orders can be cancelled")]
    CancellationWrongStatus(OrderStatus),
    #[error("cannot cancel order; cancellation is only allowed within {CANCELLATION_WINDOW_HOURS} hours of placement")]
    CancellationWindowExpired,
    #[error(transparent)]
    AccessDenied(#[from] AccessError),
    #[error("actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for OrderError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl From<InvalidStatus> for OrderError {
    fn from(e: InvalidStatus) -> Self {
        OrderError::InvalidStatus(e.0)
    }
}
