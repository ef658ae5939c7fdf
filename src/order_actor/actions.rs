use chrono::{DateTime, Utc};

use crate::domain::{CancelledBy, OrderStatus};

/// Custom actions for Order entities. Status is the only mutable field of an
/// order, so these are the only write paths after creation.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Set a new status. A request equal to the current status is accepted
    /// and reported back so the caller can skip notification.
    UpdateStatus { new_status: OrderStatus },
    /// Cancel the order, subject to the pending-status and 24-hour-window
    /// guards. `requested_at` is supplied by the caller so the window check
    /// is deterministic.
    Cancel {
        cancelled_by: CancelledBy,
        requested_at: DateTime<Utc>,
    },
}

/// Results from OrderActions - variants match 1:1 with OrderAction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderActionResult {
    /// Result from UpdateStatus - carries both sides of the transition.
    StatusUpdated {
        old: OrderStatus,
        new: OrderStatus,
    },
    Cancelled {
        cancelled_by: CancelledBy,
    },
}
