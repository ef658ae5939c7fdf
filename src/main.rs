mod access;
mod actor_framework;
mod app_system;
mod cart_actor;
mod category_actor;
mod clients;
mod config;
mod domain;
mod media;
mod notify;
mod order_actor;
mod product_actor;
mod user_actor;

#[cfg(test)]
mod integration_tests;
#[cfg(test)]
mod mock_framework;

use std::sync::Arc;

use tracing::{error, info, warn, Instrument};

use crate::access::InsecureHasher;
use crate::app_system::{setup_tracing, StoreSystem};
use crate::config::AppConfig;
use crate::domain::{CategoryCreate, OrderStatus, ProductCreate, ShippingInfo};
use crate::notify::{DynMailClient, LogMailClient, SmtpMailClient};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = AppConfig::from_env();
    info!(store = %config.store_name, "Starting storefront system");

    // Real SMTP only when credentials are configured; otherwise log-only.
    let mailer: DynMailClient = if config.mail.password.is_some() {
        Arc::new(SmtpMailClient::new(&config.mail).map_err(|e| e.to_string())?)
    } else {
        warn!("No SMTP credentials configured; emails will be logged, not sent");
        Arc::new(LogMailClient {
            from_email: config.mail.sender.clone(),
        })
    };

    let system = StoreSystem::new(&config, mailer);
    let hasher = InsecureHasher;

    // Seed accounts
    let span = tracing::info_span!("account_seeding");
    let (admin, customer) = async {
        system
            .user_client
            .create_admin("Admin", &config.admin_email, "admin123", &hasher)
            .await
            .map_err(|e| e.to_string())?;
        system
            .user_client
            .register("Alice", "alice@example.com", "wonderland", &hasher)
            .await
            .map_err(|e| e.to_string())?;
        let admin = system
            .user_client
            .login(&config.admin_email, "admin123", &hasher)
            .await
            .map_err(|e| e.to_string())?;
        let customer = system
            .user_client
            .login("alice@example.com", "wonderland", &hasher)
            .await
            .map_err(|e| e.to_string())?;
        Ok::<_, String>((admin, customer))
    }
    .instrument(span)
    .await?;

    info!(admin = %admin.user_id, customer = %customer.user_id, "Accounts ready");

    // Seed the catalog
    let category_id = system
        .catalog_client
        .create_category(&admin, CategoryCreate { name: "Mugs".to_string() })
        .await
        .map_err(|e| e.to_string())?;
    let mug_id = system
        .catalog_client
        .create_product(
            &admin,
            ProductCreate {
                name: "Enamel Mug".to_string(),
                description: "A sturdy camping mug.".to_string(),
                price: 450.0,
                image_filename: None,
                category_id: category_id.clone(),
            },
        )
        .await
        .map_err(|e| e.to_string())?;
    let spoon_id = system
        .catalog_client
        .create_product(
            &admin,
            ProductCreate {
                name: "Wooden Spoon".to_string(),
                description: "Hand-carved serving spoon.".to_string(),
                price: 120.0,
                image_filename: None,
                category_id,
            },
        )
        .await
        .map_err(|e| e.to_string())?;

    // Shop and check out
    let span = tracing::info_span!("order_processing");
    let placed = async {
        system
            .cart_client
            .add_to_cart(&customer, &mug_id, 2)
            .await
            .map_err(|e| e.to_string())?;
        system
            .cart_client
            .add_to_cart(&customer, &spoon_id, 1)
            .await
            .map_err(|e| e.to_string())?;

        let summary = system
            .order_client
            .checkout_summary(&customer)
            .await
            .map_err(|e| e.to_string())?;
        info!(lines = summary.lines.len(), total = summary.total, "Checkout summary");

        system
            .order_client
            .place_order(
                &customer,
                ShippingInfo {
                    name: customer.name.clone(),
                    email: customer.email.clone(),
                    phone: "0771234567".to_string(),
                    address: "42 Lakeside Drive".to_string(),
                },
            )
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;

    info!(
        order_id = %placed.order.id,
        total = placed.order.total_price,
        notified = placed.notified,
        "Order placed successfully"
    );

    // Admin drives the lifecycle; status arrives as text from the back office.
    let shipped: OrderStatus = "Shipped".parse().map_err(|e: domain::InvalidStatus| e.to_string())?;
    let update = system
        .order_client
        .update_status(&admin, &placed.order.id, shipped)
        .await
        .map_err(|e| e.to_string())?;
    info!(old = %update.old, new = %update.new, "Status updated");

    // A shipped order is past cancellation
    match system.order_client.cancel_order(&customer, &placed.order.id).await {
        Ok(outcome) => info!(order_id = %outcome.order.id, "Order cancelled"),
        Err(e) => error!(error = %e, "Cancellation refused"),
    }

    let stats = system
        .order_client
        .order_stats(&admin)
        .await
        .map_err(|e| e.to_string())?;
    info!(orders = stats.total_orders, revenue = stats.total_revenue, "Store stats");

    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
