use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{error, info};

use crate::actor_framework::ResourceActor;
use crate::cart_actor::CartService;
use crate::clients::{CartClient, CatalogClient, OrderClient, UserClient};
use crate::config::AppConfig;
use crate::domain::{Category, Order, Product, User};
use crate::notify::{DynMailClient, NotificationService};

const CHANNEL_BUFFER: usize = 32;

/// The assembled storefront: every actor spawned and every client wired.
///
/// Responsible for starting up actors, wiring them together, and handling
/// shutdown.
pub struct StoreSystem {
    pub user_client: UserClient,
    pub catalog_client: CatalogClient,
    pub cart_client: CartClient,
    pub order_client: OrderClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

fn sequential_ids(prefix: &'static str) -> impl Fn() -> String + Send + Sync + 'static {
    let counter = Arc::new(AtomicU64::new(1));
    move || {
        let id = counter.fetch_add(1, Ordering::SeqCst);
        format!("{prefix}_{id}")
    }
}

impl StoreSystem {
    pub fn new(config: &AppConfig, mailer: DynMailClient) -> Self {
        let (user_actor, user_resource) = ResourceActor::<User>::new(CHANNEL_BUFFER, sequential_ids("user"));
        let user_handle = tokio::spawn(user_actor.run());

        let (category_actor, categories) =
            ResourceActor::<Category>::new(CHANNEL_BUFFER, sequential_ids("category"));
        let category_handle = tokio::spawn(category_actor.run());

        let (product_actor, products) =
            ResourceActor::<Product>::new(CHANNEL_BUFFER, sequential_ids("product"));
        let product_handle = tokio::spawn(product_actor.run());

        let (order_actor, orders) = ResourceActor::<Order>::new(CHANNEL_BUFFER, sequential_ids("order"));
        let order_handle = tokio::spawn(order_actor.run());

        let (cart_service, cart_sender) = CartService::new(CHANNEL_BUFFER);
        let cart_handle = tokio::spawn(cart_service.run());

        let (notification_service, notifier) =
            NotificationService::new(CHANNEL_BUFFER, mailer, config.mail_settings());
        let notification_handle = tokio::spawn(notification_service.run());

        let cart_client = CartClient::new(cart_sender, products.clone());
        let user_client = UserClient::new(user_resource, cart_client.clone());
        let catalog_client = CatalogClient::new(
            categories,
            products.clone(),
            cart_client.clone(),
            PathBuf::from(&config.upload_dir),
        );
        let order_client = OrderClient::new(orders, cart_client.clone(), products, notifier);

        info!("Store system started");
        Self {
            user_client,
            catalog_client,
            cart_client,
            order_client,
            handles: vec![
                user_handle,
                category_handle,
                product_handle,
                order_handle,
                cart_handle,
                notification_handle,
            ],
        }
    }

    /// Drop every client, closing the actor channels, then wait for the
    /// actors to drain and exit.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down store system...");
        drop(self.order_client);
        drop(self.catalog_client);
        drop(self.cart_client);
        drop(self.user_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Store system shutdown complete.");
        Ok(())
    }
}
