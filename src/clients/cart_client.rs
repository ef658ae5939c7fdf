use tokio::sync::{mpsc, oneshot};
use tracing::instrument;

use crate::access::Identity;
use crate::actor_framework::ResourceClient;
use crate::cart_actor::{CartError, CartRequest};
use crate::domain::{CartRow, Product};

/// Client handle for the cart service. Validates product references before
/// handing requests to the cart actor; everything else is serialized there.
#[derive(Clone)]
pub struct CartClient {
    sender: mpsc::Sender<CartRequest>,
    products: ResourceClient<Product>,
}

impl CartClient {
    pub fn new(sender: mpsc::Sender<CartRequest>, products: ResourceClient<Product>) -> Self {
        Self { sender, products }
    }

    #[instrument(skip(self, identity), fields(user_id = %identity.user_id))]
    pub async fn add_to_cart(
        &self,
        identity: &Identity,
        product_id: &str,
        quantity: u32,
    ) -> Result<CartRow, CartError> {
        let product = self
            .products
            .get(product_id.to_string())
            .await
            .map_err(|e| CartError::ActorCommunicationError(e.to_string()))?;
        if product.is_none() {
            return Err(CartError::ProductNotFound(product_id.to_string()));
        }
        let (respond_to, response) = oneshot::channel();
        self.send(CartRequest::AddItem {
            user_id: identity.user_id.clone(),
            product_id: product_id.to_string(),
            quantity,
            respond_to,
        })
        .await?;
        Self::recv(response).await
    }

    /// Set an exact quantity. Returns `None` when a zero quantity removed the row.
    #[instrument(skip(self, identity), fields(user_id = %identity.user_id))]
    pub async fn update_quantity(
        &self,
        identity: &Identity,
        row_id: &str,
        quantity: u32,
    ) -> Result<Option<CartRow>, CartError> {
        let (respond_to, response) = oneshot::channel();
        self.send(CartRequest::SetQuantity {
            row_id: row_id.to_string(),
            user_id: identity.user_id.clone(),
            quantity,
            respond_to,
        })
        .await?;
        Self::recv(response).await
    }

    #[instrument(skip(self, identity), fields(user_id = %identity.user_id))]
    pub async fn remove_item(&self, identity: &Identity, row_id: &str) -> Result<(), CartError> {
        let (respond_to, response) = oneshot::channel();
        self.send(CartRequest::RemoveItem {
            row_id: row_id.to_string(),
            user_id: identity.user_id.clone(),
            respond_to,
        })
        .await?;
        Self::recv(response).await
    }

    pub async fn cart_for(&self, identity: &Identity) -> Result<Vec<CartRow>, CartError> {
        let (respond_to, response) = oneshot::channel();
        self.send(CartRequest::ListForUser {
            user_id: identity.user_id.clone(),
            respond_to,
        })
        .await?;
        Self::recv(response).await
    }

    /// Drain for checkout. Callers must `restore` on failure.
    pub(crate) async fn take_for_user(&self, user_id: &str) -> Result<Vec<CartRow>, CartError> {
        let (respond_to, response) = oneshot::channel();
        self.send(CartRequest::TakeForUser {
            user_id: user_id.to_string(),
            respond_to,
        })
        .await?;
        Self::recv(response).await
    }

    pub(crate) async fn restore(&self, rows: Vec<CartRow>) -> Result<(), CartError> {
        let (respond_to, response) = oneshot::channel();
        self.send(CartRequest::Restore { rows, respond_to }).await?;
        Self::recv(response).await
    }

    pub(crate) async fn purge_product(&self, product_id: &str) -> Result<usize, CartError> {
        let (respond_to, response) = oneshot::channel();
        self.send(CartRequest::PurgeProduct {
            product_id: product_id.to_string(),
            respond_to,
        })
        .await?;
        Self::recv(response).await
    }

    pub(crate) async fn purge_user(&self, user_id: &str) -> Result<usize, CartError> {
        let (respond_to, response) = oneshot::channel();
        self.send(CartRequest::PurgeUser {
            user_id: user_id.to_string(),
            respond_to,
        })
        .await?;
        Self::recv(response).await
    }

    async fn send(&self, request: CartRequest) -> Result<(), CartError> {
        self.sender
            .send(request)
            .await
            .map_err(|_| CartError::ActorCommunicationError("cart service closed".to_string()))
    }

    async fn recv<T>(response: oneshot::Receiver<Result<T, CartError>>) -> Result<T, CartError> {
        response.await.map_err(|_| {
            CartError::ActorCommunicationError("cart service dropped the request".to_string())
        })?
    }
}
