//! Cart service: a bespoke actor owning all cart rows.
//!
//! Unlike the catalog resources this is not a `ResourceActor`: cart rows are
//! addressed by (user, product) for upserts and by row id for edits, and
//! checkout needs an atomic drain. Because every message is handled to
//! completion before the next, the "exists → increment else insert" upsert
//! cannot race with a concurrent add from the same user, and two concurrent
//! checkouts cannot both see the same rows.

pub mod error;

pub use error::*;

use std::collections::HashMap;

use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

use crate::access::AccessError;
use crate::actor_framework::Response;
use crate::domain::CartRow;

#[derive(Debug)]
pub enum CartRequest {
    /// Upsert: merge into an existing (user, product) row or insert a new one.
    AddItem {
        user_id: String,
        product_id: String,
        quantity: u32,
        respond_to: Response<CartRow, CartError>,
    },
    /// Set an exact quantity; zero removes the row. `user_id` must own it.
    SetQuantity {
        row_id: String,
        user_id: String,
        quantity: u32,
        respond_to: Response<Option<CartRow>, CartError>,
    },
    RemoveItem {
        row_id: String,
        user_id: String,
        respond_to: Response<(), CartError>,
    },
    ListForUser {
        user_id: String,
        respond_to: Response<Vec<CartRow>, CartError>,
    },
    /// Atomically remove and return all of a user's rows (checkout drain).
    TakeForUser {
        user_id: String,
        respond_to: Response<Vec<CartRow>, CartError>,
    },
    /// Put previously drained rows back (compensation after a failed checkout).
    Restore {
        rows: Vec<CartRow>,
        respond_to: Response<(), CartError>,
    },
    /// Cascade: drop every row referencing a deleted product.
    PurgeProduct {
        product_id: String,
        respond_to: Response<usize, CartError>,
    },
    /// Cascade: drop every row owned by a deleted user.
    PurgeUser {
        user_id: String,
        respond_to: Response<usize, CartError>,
    },
}

pub struct CartService {
    receiver: mpsc::Receiver<CartRequest>,
    rows: HashMap<String, CartRow>,
    next_id: u64,
}

impl CartService {
    pub fn new(buffer_size: usize) -> (Self, mpsc::Sender<CartRequest>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            rows: HashMap::new(),
            next_id: 1,
        };
        (service, sender)
    }

    #[instrument(name = "cart_service", skip(self))]
    pub async fn run(mut self) {
        info!("CartService starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CartRequest::AddItem {
                    user_id,
                    product_id,
                    quantity,
                    respond_to,
                } => {
                    let _ = respond_to.send(self.handle_add_item(user_id, product_id, quantity));
                }
                CartRequest::SetQuantity {
                    row_id,
                    user_id,
                    quantity,
                    respond_to,
                } => {
                    let _ = respond_to.send(self.handle_set_quantity(row_id, user_id, quantity));
                }
                CartRequest::RemoveItem {
                    row_id,
                    user_id,
                    respond_to,
                } => {
                    let _ = respond_to.send(self.handle_remove_item(row_id, user_id));
                }
                CartRequest::ListForUser {
                    user_id,
                    respond_to,
                } => {
                    let _ = respond_to.send(Ok(self.rows_for(&user_id)));
                }
                CartRequest::TakeForUser {
                    user_id,
                    respond_to,
                } => {
                    let taken = self.rows_for(&user_id);
                    self.rows.retain(|_, row| row.user_id != user_id);
                    debug!(user_id = %user_id, rows = taken.len(), "Cart drained");
                    let _ = respond_to.send(Ok(taken));
                }
                CartRequest::Restore { rows, respond_to } => {
                    info!(rows = rows.len(), "Restoring drained cart rows");
                    for row in rows {
                        self.rows.insert(row.id.clone(), row);
                    }
                    let _ = respond_to.send(Ok(()));
                }
                CartRequest::PurgeProduct {
                    product_id,
                    respond_to,
                } => {
                    let before = self.rows.len();
                    self.rows.retain(|_, row| row.product_id != product_id);
                    let purged = before - self.rows.len();
                    if purged > 0 {
                        info!(product_id = %product_id, purged, "Purged cart rows for deleted product");
                    }
                    let _ = respond_to.send(Ok(purged));
                }
                CartRequest::PurgeUser {
                    user_id,
                    respond_to,
                } => {
                    let before = self.rows.len();
                    self.rows.retain(|_, row| row.user_id != user_id);
                    let _ = respond_to.send(Ok(before - self.rows.len()));
                }
            }
        }
        info!("CartService stopped");
    }

    #[instrument(skip(self))]
    fn handle_add_item(
        &mut self,
        user_id: String,
        product_id: String,
        quantity: u32,
    ) -> Result<CartRow, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }
        let existing = self
            .rows
            .values_mut()
            .find(|row| row.user_id == user_id && row.product_id == product_id);
        if let Some(row) = existing {
            row.quantity += quantity;
            debug!(row_id = %row.id, quantity = row.quantity, "Merged into existing cart row");
            return Ok(row.clone());
        }
        let id = format!("cart_{}", self.next_id);
        self.next_id += 1;
        let row = CartRow {
            id: id.clone(),
            user_id,
            product_id,
            quantity,
        };
        self.rows.insert(id, row.clone());
        debug!(row_id = %row.id, "Inserted cart row");
        Ok(row)
    }

    #[instrument(skip(self))]
    fn handle_set_quantity(
        &mut self,
        row_id: String,
        user_id: String,
        quantity: u32,
    ) -> Result<Option<CartRow>, CartError> {
        let row = self
            .rows
            .get_mut(&row_id)
            .ok_or(CartError::NotFound(row_id.clone()))?;
        if row.user_id != user_id {
            return Err(AccessError::Forbidden.into());
        }
        if quantity == 0 {
            self.rows.remove(&row_id);
            return Ok(None);
        }
        row.quantity = quantity;
        Ok(Some(row.clone()))
    }

    #[instrument(skip(self))]
    fn handle_remove_item(&mut self, row_id: String, user_id: String) -> Result<(), CartError> {
        let row = self
            .rows
            .get(&row_id)
            .ok_or(CartError::NotFound(row_id.clone()))?;
        if row.user_id != user_id {
            return Err(AccessError::Forbidden.into());
        }
        self.rows.remove(&row_id);
        Ok(())
    }

    fn rows_for(&self, user_id: &str) -> Vec<CartRow> {
        let mut rows: Vec<_> = self
            .rows
            .values()
            .filter(|row| row.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.id.cmp(&b.id));
        rows
    }
}
