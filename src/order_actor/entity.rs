use chrono::Duration;

use crate::actor_framework::Entity;
use crate::domain::{Order, OrderCreate, OrderStatus, CANCELLATION_WINDOW_HOURS};
use crate::order_actor::{OrderAction, OrderActionResult, OrderError};

impl Entity for Order {
    type Id = String;
    type CreateParams = OrderCreate;
    type Patch = (); // Orders are immutable except through actions.
    type Action = OrderAction;
    type ActionResult = OrderActionResult;
    type Error = OrderError;

    fn id(&self) -> &String {
        &self.id
    }

    /// The total is fixed here, as the sum of the item snapshots, and never
    /// recomputed afterwards.
    fn from_create_params(id: String, params: OrderCreate) -> Result<Self, OrderError> {
        if params.items.is_empty() {
            return Err(OrderError::ValidationError(
                "an order must contain at least one item".into(),
            ));
        }
        let total_price = params.items.iter().map(|item| item.subtotal()).sum();
        Ok(Self {
            id,
            user_id: params.user_id,
            name: params.shipping.name,
            email: params.shipping.email,
            phone: params.shipping.phone,
            address: params.shipping.address,
            total_price,
            payment_method: Default::default(),
            status: OrderStatus::Pending,
            order_date: params.placed_at,
            items: params.items,
        })
    }

    fn on_update(&mut self, _patch: ()) -> Result<(), OrderError> {
        Ok(())
    }

    fn handle_action(&mut self, action: OrderAction) -> Result<OrderActionResult, OrderError> {
        match action {
            OrderAction::UpdateStatus { new_status } => {
                let old = self.status;
                if old.is_terminal() && new_status != old {
                    return Err(OrderError::TerminalStatus(old));
                }
                self.status = new_status;
                Ok(OrderActionResult::StatusUpdated {
                    old,
                    new: new_status,
                })
            }
            OrderAction::Cancel {
                cancelled_by,
                requested_at,
            } => {
                if self.status != OrderStatus::Pending {
                    return Err(OrderError::CancellationWrongStatus(self.status));
                }
                let elapsed = requested_at.signed_duration_since(self.order_date);
                if elapsed >= Duration::hours(CANCELLATION_WINDOW_HOURS) {
                    return Err(OrderError::CancellationWindowExpired);
                }
                self.status = OrderStatus::Cancelled;
                Ok(OrderActionResult::Cancelled { cancelled_by })
            }
        }
    }
}
