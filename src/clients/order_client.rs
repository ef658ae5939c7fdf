use std::collections::HashMap;

use chrono::Utc;
use tracing::{info, instrument, warn};

use crate::access::{require_admin, AccessError, Identity};
use crate::actor_framework::ResourceClient;
use crate::cart_actor::CartError;
use crate::clients::CartClient;
use crate::domain::{
    CancelledBy, CartRow, Order, OrderCreate, OrderItem, OrderStatus, Product, ShippingInfo,
};
use crate::notify::NotifierClient;
use crate::order_actor::OrderError;
use crate::product_actor::ProductError;

/// One cart row joined with its live product for display and totals.
#[derive(Debug, Clone)]
pub struct CartLine {
    pub row: CartRow,
    pub product_name: String,
    pub unit_price: f64,
}

impl CartLine {
    pub fn subtotal(&self) -> f64 {
        self.unit_price * f64::from(self.row.quantity)
    }
}

/// The checkout page payload. `removed_stale` counts rows that were dropped
/// because their product no longer exists.
#[derive(Debug, Clone)]
pub struct CartSummary {
    pub lines: Vec<CartLine>,
    pub total: f64,
    pub removed_stale: usize,
}

/// Outcome of a successful checkout. `notified` is false when the
/// confirmation email could not be delivered; the order stands regardless.
#[derive(Debug, Clone)]
pub struct PlacedOrder {
    pub order: Order,
    pub notified: bool,
}

/// Outcome of a status update. `notified` is `None` when the request was a
/// no-op and no email was sent.
#[derive(Debug, Clone)]
pub struct StatusUpdate {
    pub old: OrderStatus,
    pub new: OrderStatus,
    pub notified: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct CancellationOutcome {
    pub order: Order,
    pub cancelled_by: CancelledBy,
    pub notified: bool,
}

/// Back-office dashboard numbers. Revenue counts delivered orders only.
#[derive(Debug, Clone)]
pub struct OrderStats {
    pub total_orders: usize,
    pub total_revenue: f64,
    pub status_counts: HashMap<OrderStatus, usize>,
}

/// Checkout and order lifecycle orchestration: drains the cart, snapshots
/// products into order items, drives status transitions, and triggers
/// notifications.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    cart: CartClient,
    products: ResourceClient<Product>,
    notifier: NotifierClient,
}

impl OrderClient {
    pub fn new(
        inner: ResourceClient<Order>,
        cart: CartClient,
        products: ResourceClient<Product>,
        notifier: NotifierClient,
    ) -> Self {
        Self {
            inner,
            cart,
            products,
            notifier,
        }
    }

    /// Join the cart against the live catalog for the checkout page. Rows
    /// whose product has been deleted are removed from the cart on the spot.
    #[instrument(skip(self, identity), fields(user_id = %identity.user_id))]
    pub async fn checkout_summary(&self, identity: &Identity) -> Result<CartSummary, OrderError> {
        let rows = self.cart.cart_for(identity).await.map_err(cart_err)?;
        let mut lines = Vec::new();
        let mut removed_stale = 0;
        for row in rows {
            match self.lookup_product(&row.product_id).await? {
                Some(product) => lines.push(CartLine {
                    product_name: product.name,
                    unit_price: product.price,
                    row,
                }),
                None => {
                    if let Err(e) = self.cart.remove_item(identity, &row.id).await {
                        warn!(row_id = %row.id, error = %e, "Failed to drop stale cart row");
                    }
                    removed_stale += 1;
                }
            }
        }
        if lines.is_empty() {
            return Err(OrderError::EmptyCart);
        }
        let total = lines.iter().map(CartLine::subtotal).sum();
        Ok(CartSummary {
            lines,
            total,
            removed_stale,
        })
    }

    /// Place an order from the caller's cart. The cart is drained first so a
    /// concurrent checkout cannot double-spend the same rows; if order
    /// creation fails the rows are put back.
    #[instrument(skip(self, identity, shipping), fields(user_id = %identity.user_id))]
    pub async fn place_order(
        &self,
        identity: &Identity,
        shipping: ShippingInfo,
    ) -> Result<PlacedOrder, OrderError> {
        validate_shipping(&shipping)?;
        let rows = self
            .cart
            .take_for_user(&identity.user_id)
            .await
            .map_err(cart_err)?;
        if rows.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        // Snapshot name and price by value; stale rows are silently dropped.
        let mut items = Vec::with_capacity(rows.len());
        for row in &rows {
            if let Some(product) = self.lookup_product(&row.product_id).await? {
                items.push(OrderItem {
                    product_name: product.name,
                    quantity: row.quantity,
                    price: product.price,
                });
            }
        }
        if items.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        let params = OrderCreate {
            user_id: Some(identity.user_id.clone()),
            shipping,
            items,
            placed_at: Utc::now(),
        };
        let order_id = match self.inner.create(params).await {
            Ok(id) => id,
            Err(e) => {
                if let Err(restore_err) = self.cart.restore(rows).await {
                    warn!(error = %restore_err, "Failed to restore cart after rejected checkout");
                }
                return Err(e);
            }
        };
        let order = self.fetch(&order_id).await?;
        info!(order_id = %order.id, total = order.total_price, "Order placed");
        let notified = self.notifier.send_order_confirmation(&order).await;
        Ok(PlacedOrder { order, notified })
    }

    /// The caller's order history, newest first.
    pub async fn orders_for_user(&self, identity: &Identity) -> Result<Vec<Order>, OrderError> {
        let mut orders: Vec<_> = self
            .inner
            .list()
            .await?
            .into_iter()
            .filter(|o| o.user_id.as_deref() == Some(identity.user_id.as_str()))
            .collect();
        orders.sort_by(|a, b| b.order_date.cmp(&a.order_date));
        Ok(orders)
    }

    /// Fetch one order. Customers may only see their own; admins see all.
    pub async fn get_order(&self, identity: &Identity, order_id: &str) -> Result<Order, OrderError> {
        let order = self.fetch(order_id).await?;
        if !identity.is_admin && order.user_id.as_deref() != Some(identity.user_id.as_str()) {
            return Err(AccessError::Forbidden.into());
        }
        Ok(order)
    }

    /// Admin listing, optionally filtered by status, newest first.
    pub async fn list_orders(
        &self,
        identity: &Identity,
        status: Option<OrderStatus>,
    ) -> Result<Vec<Order>, OrderError> {
        require_admin(Some(identity))?;
        let mut orders: Vec<_> = self
            .inner
            .list()
            .await?
            .into_iter()
            .filter(|o| status.map_or(true, |s| o.status == s))
            .collect();
        orders.sort_by(|a, b| b.order_date.cmp(&a.order_date));
        Ok(orders)
    }

    pub async fn order_stats(&self, identity: &Identity) -> Result<OrderStats, OrderError> {
        require_admin(Some(identity))?;
        let orders = self.inner.list().await?;
        let mut status_counts: HashMap<OrderStatus, usize> =
            OrderStatus::ALL.iter().map(|s| (*s, 0)).collect();
        let mut total_revenue = 0.0;
        for order in &orders {
            *status_counts.entry(order.status).or_default() += 1;
            if order.status == OrderStatus::Delivered {
                total_revenue += order.total_price;
            }
        }
        Ok(OrderStats {
            total_orders: orders.len(),
            total_revenue,
            status_counts,
        })
    }

    /// Admin status transition. Terminal states are enforced by the order
    /// actor; a no-op request succeeds without sending an email.
    #[instrument(skip(self, identity))]
    pub async fn update_status(
        &self,
        identity: &Identity,
        order_id: &str,
        new_status: OrderStatus,
    ) -> Result<StatusUpdate, OrderError> {
        require_admin(Some(identity))?;
        let result = self
            .inner
            .perform_action(
                order_id.to_string(),
                crate::order_actor::OrderAction::UpdateStatus { new_status },
            )
            .await?;
        let (old, new) = match result {
            crate::order_actor::OrderActionResult::StatusUpdated { old, new } => (old, new),
            other => {
                return Err(OrderError::ActorCommunicationError(format!(
                    "unexpected action result: {other:?}"
                )))
            }
        };
        if old == new {
            return Ok(StatusUpdate {
                old,
                new,
                notified: None,
            });
        }
        info!(order_id = %order_id, %old, %new, "Order status updated");
        let order = self.fetch(order_id).await?;
        let notified = self.notifier.send_order_status_update(&order, old).await;
        Ok(StatusUpdate {
            old,
            new,
            notified: Some(notified),
        })
    }

    /// Cancel an order. Customers may cancel their own pending orders within
    /// the cancellation window; admins may cancel any pending order within
    /// the same window, attributed as an admin cancellation.
    #[instrument(skip(self, identity))]
    pub async fn cancel_order(
        &self,
        identity: &Identity,
        order_id: &str,
    ) -> Result<CancellationOutcome, OrderError> {
        let order = self.fetch(order_id).await?;
        let is_owner = order.user_id.as_deref() == Some(identity.user_id.as_str());
        if !identity.is_admin && !is_owner {
            return Err(AccessError::Forbidden.into());
        }
        let cancelled_by = if is_owner {
            CancelledBy::Customer
        } else {
            CancelledBy::Admin
        };
        let result = self
            .inner
            .perform_action(
                order_id.to_string(),
                crate::order_actor::OrderAction::Cancel {
                    cancelled_by,
                    requested_at: Utc::now(),
                },
            )
            .await?;
        match result {
            crate::order_actor::OrderActionResult::Cancelled { .. } => {}
            other => {
                return Err(OrderError::ActorCommunicationError(format!(
                    "unexpected action result: {other:?}"
                )))
            }
        }
        info!(order_id = %order_id, %cancelled_by, "Order cancelled");
        let order = self.fetch(order_id).await?;
        let notified = self.notifier.send_order_cancellation(&order, cancelled_by).await;
        Ok(CancellationOutcome {
            order,
            cancelled_by,
            notified,
        })
    }

    /// Admin-only hard delete, for purging records. No notification.
    pub async fn delete_order(&self, identity: &Identity, order_id: &str) -> Result<(), OrderError> {
        require_admin(Some(identity))?;
        self.inner.delete(order_id.to_string()).await
    }

    async fn fetch(&self, order_id: &str) -> Result<Order, OrderError> {
        self.inner
            .get(order_id.to_string())
            .await?
            .ok_or_else(|| OrderError::NotFound(order_id.to_string()))
    }

    async fn lookup_product(&self, product_id: &str) -> Result<Option<Product>, OrderError> {
        match self.products.get(product_id.to_string()).await {
            Ok(found) => Ok(found),
            Err(ProductError::NotFound(_)) => Ok(None),
            Err(e) => Err(OrderError::ActorCommunicationError(e.to_string())),
        }
    }
}

fn validate_shipping(shipping: &ShippingInfo) -> Result<(), OrderError> {
    let required = [
        ("name", &shipping.name),
        ("email", &shipping.email),
        ("phone", &shipping.phone),
        ("address", &shipping.address),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(OrderError::ValidationError(format!(
                "{field} is required"
            )));
        }
    }
    if !shipping.email.contains('@') {
        return Err(OrderError::ValidationError(
            "email address is not valid".to_string(),
        ));
    }
    Ok(())
}

fn cart_err(e: CartError) -> OrderError {
    match e {
        CartError::AccessDenied(a) => OrderError::AccessDenied(a),
        other => OrderError::ActorCommunicationError(other.to_string()),
    }
}
