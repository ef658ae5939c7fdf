use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

/// Customers may cancel a pending order up to this many hours after placing it.
pub const CANCELLATION_WINDOW_HOURS: i64 = 24;

/// Order lifecycle. `Delivered` and `Cancelled` are terminal; admins may move
/// an order freely among the other states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Pending,
    Processing,
    Packed,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Packed,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Customer-facing progress blurb used in status-update emails.
    pub fn progress_note(self) -> &'static str {
        match self {
            OrderStatus::Pending => "Your order has been received and is awaiting processing.",
            OrderStatus::Processing => "Your order is being processed and will be packed soon.",
            OrderStatus::Packed => "Your order has been packed and is ready for shipment.",
            OrderStatus::Shipped => "Great news! Your order is on its way to you.",
            OrderStatus::Delivered => {
                "Your order has been delivered. Thank you for shopping with us!"
            }
            OrderStatus::Cancelled => "Your order has been cancelled.",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Packed => "Packed",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        };
        f.write_str(name)
    }
}

/// Raised when a free-form status string does not name a known status.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid status: {0}")]
pub struct InvalidStatus(pub String);

impl FromStr for OrderStatus {
    type Err = InvalidStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(OrderStatus::Pending),
            "Processing" => Ok(OrderStatus::Processing),
            "Packed" => Ok(OrderStatus::Packed),
            "Shipped" => Ok(OrderStatus::Shipped),
            "Delivered" => Ok(OrderStatus::Delivered),
            "Cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(InvalidStatus(other.to_string())),
        }
    }
}

/// Who triggered a cancellation, for notification attribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelledBy {
    Customer,
    Admin,
}

impl fmt::Display for CancelledBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CancelledBy::Customer => f.write_str("Customer"),
            CancelledBy::Admin => f.write_str("Admin"),
        }
    }
}

/// Cash on delivery is the only supported method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentMethod {
    #[default]
    Cod,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Cod => f.write_str("COD"),
        }
    }
}

/// Contact and delivery details captured at checkout. Deliberately decoupled
/// from the live user row: later profile edits never touch placed orders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// Snapshot of one cart row at checkout time. `product_name` and `price` are
/// copied by value, not referenced, so catalog edits and deletions never
/// corrupt historical orders.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub product_name: String,
    pub quantity: u32,
    pub price: f64,
}

impl OrderItem {
    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// An immutable record of a checkout. Only `status` changes after creation.
/// `user_id` is nullable so orders survive account deletion.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: String,
    pub user_id: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub total_price: f64,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    pub order_date: DateTime<Utc>,
    pub items: Vec<OrderItem>,
}

/// Payload for creating an order. The total is computed from the items at
/// creation time and never recomputed afterwards.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub user_id: Option<String>,
    pub shipping: ShippingInfo,
    pub items: Vec<OrderItem>,
    pub placed_at: DateTime<Utc>,
}

impl Order {
    /// Cancellation is allowed only while the order is pending and strictly
    /// less than [`CANCELLATION_WINDOW_HOURS`] have elapsed since placement.
    pub fn can_be_cancelled_at(&self, now: DateTime<Utc>) -> bool {
        self.status == OrderStatus::Pending
            && now.signed_duration_since(self.order_date)
                < Duration::hours(CANCELLATION_WINDOW_HOURS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_display() {
        for status in OrderStatus::ALL {
            assert_eq!(status.to_string().parse::<OrderStatus>(), Ok(status));
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        let err = "Refunded".parse::<OrderStatus>().unwrap_err();
        assert_eq!(err, InvalidStatus("Refunded".into()));
    }

    #[test]
    fn only_delivered_and_cancelled_are_terminal() {
        let terminal: Vec<_> = OrderStatus::ALL
            .into_iter()
            .filter(|s| s.is_terminal())
            .collect();
        assert_eq!(terminal, vec![OrderStatus::Delivered, OrderStatus::Cancelled]);
    }

    #[test]
    fn item_subtotal_is_price_times_quantity() {
        let item = OrderItem {
            product_name: "Mug".into(),
            quantity: 3,
            price: 12.5,
        };
        assert_eq!(item.subtotal(), 37.5);
    }
}
