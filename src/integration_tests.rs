#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    use crate::access::{AccessError, Identity, InsecureHasher};
    use crate::app_system::StoreSystem;
    use crate::category_actor::CategoryError;
    use crate::config::{AppConfig, MailConfig};
    use crate::domain::{
        CategoryCreate, OrderStatus, ProductCreate, ProductPatch, ShippingInfo,
    };
    use crate::notify::{EmailMessage, MailClient, MailError};
    use crate::order_actor::OrderError;
    use crate::user_actor::UserError;

    /// Captures outgoing mail instead of sending it. Flipping `fail` makes
    /// every send attempt error, for exercising the delivery-failure path.
    struct RecordingMailClient {
        sent: Mutex<Vec<EmailMessage>>,
        fail: AtomicBool,
    }

    impl RecordingMailClient {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                sent: Mutex::new(Vec::new()),
                fail: AtomicBool::new(false),
            })
        }

        fn sent(&self) -> Vec<EmailMessage> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl MailClient for RecordingMailClient {
        async fn send(&self, message: EmailMessage) -> Result<(), MailError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(MailError::Transport("simulated outage".to_string()));
            }
            self.sent.lock().unwrap().push(message);
            Ok(())
        }

        fn from_email(&self) -> &str {
            "shop@test.local"
        }
    }

    fn test_config() -> AppConfig {
        AppConfig {
            secret_key: "test-secret".to_string(),
            database_url: "memory".to_string(),
            port: 0,
            base_url: "http://localhost:5000".to_string(),
            store_name: "Test Store".to_string(),
            upload_dir: "uploads".to_string(),
            admin_email: "admin@test.local".to_string(),
            mail: MailConfig {
                server: "localhost".to_string(),
                port: 25,
                use_tls: false,
                username: String::new(),
                password: None,
                sender: "shop@test.local".to_string(),
            },
        }
    }

    struct TestStore {
        system: StoreSystem,
        mailer: Arc<RecordingMailClient>,
        admin: Identity,
        customer: Identity,
        category_id: String,
        mug_id: String,
        spoon_id: String,
    }

    /// A store with one admin, one customer, and a two-product catalog:
    /// a mug at 100.00 and a spoon at 50.00.
    async fn seeded_store() -> TestStore {
        let mailer = RecordingMailClient::new();
        let system = StoreSystem::new(&test_config(), mailer.clone());
        let hasher = InsecureHasher;

        system
            .user_client
            .create_admin("Admin", "admin@test.local", "admin123", &hasher)
            .await
            .unwrap();
        system
            .user_client
            .register("Alice", "alice@test.local", "wonderland", &hasher)
            .await
            .unwrap();
        let admin = system
            .user_client
            .login("admin@test.local", "admin123", &hasher)
            .await
            .unwrap();
        let customer = system
            .user_client
            .login("alice@test.local", "wonderland", &hasher)
            .await
            .unwrap();

        let category_id = system
            .catalog_client
            .create_category(&admin, CategoryCreate { name: "Kitchen".to_string() })
            .await
            .unwrap();
        let mug_id = system
            .catalog_client
            .create_product(
                &admin,
                ProductCreate {
                    name: "Enamel Mug".to_string(),
                    description: "A sturdy camping mug.".to_string(),
                    price: 100.0,
                    image_filename: None,
                    category_id: category_id.clone(),
                },
            )
            .await
            .unwrap();
        let spoon_id = system
            .catalog_client
            .create_product(
                &admin,
                ProductCreate {
                    name: "Wooden Spoon".to_string(),
                    description: "Hand-carved serving spoon.".to_string(),
                    price: 50.0,
                    image_filename: None,
                    category_id: category_id.clone(),
                },
            )
            .await
            .unwrap();

        TestStore {
            system,
            mailer,
            admin,
            customer,
            category_id,
            mug_id,
            spoon_id,
        }
    }

    fn shipping_for(identity: &Identity) -> ShippingInfo {
        ShippingInfo {
            name: identity.name.clone(),
            email: identity.email.clone(),
            phone: "0771234567".to_string(),
            address: "42 Lakeside Drive".to_string(),
        }
    }

    #[tokio::test]
    async fn test_checkout_flow() {
        let store = seeded_store().await;
        let (system, customer) = (&store.system, &store.customer);

        system.cart_client.add_to_cart(customer, &store.mug_id, 2).await.unwrap();
        system.cart_client.add_to_cart(customer, &store.spoon_id, 1).await.unwrap();

        let summary = system.order_client.checkout_summary(customer).await.unwrap();
        assert_eq!(summary.lines.len(), 2);
        assert_eq!(summary.total, 250.0);
        assert_eq!(summary.removed_stale, 0);

        let placed = system
            .order_client
            .place_order(customer, shipping_for(customer))
            .await
            .unwrap();
        assert_eq!(placed.order.total_price, 250.0);
        assert_eq!(placed.order.status, OrderStatus::Pending);
        assert_eq!(placed.order.items.len(), 2);
        assert!(placed.notified);

        // Cart is emptied by checkout
        let cart = system.cart_client.cart_for(customer).await.unwrap();
        assert!(cart.is_empty());

        // Confirmation goes to both the back office and the customer
        let sent = store.mailer.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].to, "admin@test.local");
        assert_eq!(sent[1].to, customer.email);
        assert!(sent[1].subject.contains(&placed.order.id));
        assert!(sent[1].body.contains("Rs. 250.00"));
    }

    #[tokio::test]
    async fn test_empty_cart_cannot_checkout() {
        let store = seeded_store().await;
        let result = store
            .system
            .order_client
            .place_order(&store.customer, shipping_for(&store.customer))
            .await;
        assert_eq!(result.unwrap_err(), OrderError::EmptyCart);
        assert!(store.mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn test_order_items_survive_catalog_edits() {
        let store = seeded_store().await;
        let (system, customer, admin) = (&store.system, &store.customer, &store.admin);

        system.cart_client.add_to_cart(customer, &store.mug_id, 1).await.unwrap();
        let placed = system
            .order_client
            .place_order(customer, shipping_for(customer))
            .await
            .unwrap();

        // Rename and reprice the product, then delete it outright
        system
            .catalog_client
            .update_product(
                admin,
                &store.mug_id,
                ProductPatch {
                    name: Some("Renamed Mug".to_string()),
                    price: Some(999.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        system.catalog_client.delete_product(admin, &store.mug_id).await.unwrap();

        let order = system
            .order_client
            .get_order(customer, &placed.order.id)
            .await
            .unwrap();
        assert_eq!(order.items[0].product_name, "Enamel Mug");
        assert_eq!(order.items[0].price, 100.0);
        assert_eq!(order.total_price, 100.0);
    }

    #[tokio::test]
    async fn test_cancellation_refused_after_shipping() {
        let store = seeded_store().await;
        let (system, customer, admin) = (&store.system, &store.customer, &store.admin);

        system.cart_client.add_to_cart(customer, &store.mug_id, 1).await.unwrap();
        let placed = system
            .order_client
            .place_order(customer, shipping_for(customer))
            .await
            .unwrap();

        system
            .order_client
            .update_status(admin, &placed.order.id, OrderStatus::Shipped)
            .await
            .unwrap();

        let result = system.order_client.cancel_order(customer, &placed.order.id).await;
        assert_eq!(
            result.unwrap_err(),
            OrderError::CancellationWrongStatus(OrderStatus::Shipped)
        );
    }

    #[tokio::test]
    async fn test_customer_cancellation_within_window() {
        let store = seeded_store().await;
        let (system, customer) = (&store.system, &store.customer);

        system.cart_client.add_to_cart(customer, &store.mug_id, 1).await.unwrap();
        let placed = system
            .order_client
            .place_order(customer, shipping_for(customer))
            .await
            .unwrap();
        let before = store.mailer.sent().len();

        let outcome = system
            .order_client
            .cancel_order(customer, &placed.order.id)
            .await
            .unwrap();
        assert_eq!(outcome.order.status, OrderStatus::Cancelled);
        assert_eq!(outcome.cancelled_by, crate::domain::CancelledBy::Customer);
        assert!(outcome.notified);

        // Cancellation notices go to both parties
        let sent = store.mailer.sent();
        assert_eq!(sent.len(), before + 2);
        assert!(sent[before].subject.contains("Cancelled"));

        // Terminal: no further transitions
        let result = system
            .order_client
            .update_status(&store.admin, &placed.order.id, OrderStatus::Processing)
            .await;
        assert_eq!(
            result.unwrap_err(),
            OrderError::TerminalStatus(OrderStatus::Cancelled)
        );
    }

    #[tokio::test]
    async fn test_admin_cancellation_is_attributed_to_admin() {
        let store = seeded_store().await;
        let (system, customer) = (&store.system, &store.customer);

        system.cart_client.add_to_cart(customer, &store.mug_id, 1).await.unwrap();
        let placed = system
            .order_client
            .place_order(customer, shipping_for(customer))
            .await
            .unwrap();

        let outcome = system
            .order_client
            .cancel_order(&store.admin, &placed.order.id)
            .await
            .unwrap();
        assert_eq!(outcome.cancelled_by, crate::domain::CancelledBy::Admin);
        assert_eq!(outcome.order.status, OrderStatus::Cancelled);
    }

    #[tokio::test]
    async fn test_status_update_noop_sends_no_email() {
        let store = seeded_store().await;
        let (system, customer, admin) = (&store.system, &store.customer, &store.admin);

        system.cart_client.add_to_cart(customer, &store.mug_id, 1).await.unwrap();
        let placed = system
            .order_client
            .place_order(customer, shipping_for(customer))
            .await
            .unwrap();
        let before = store.mailer.sent().len();

        let noop = system
            .order_client
            .update_status(admin, &placed.order.id, OrderStatus::Pending)
            .await
            .unwrap();
        assert_eq!(noop.old, OrderStatus::Pending);
        assert_eq!(noop.new, OrderStatus::Pending);
        assert_eq!(noop.notified, None);
        assert_eq!(store.mailer.sent().len(), before);

        let update = system
            .order_client
            .update_status(admin, &placed.order.id, OrderStatus::Processing)
            .await
            .unwrap();
        assert_eq!(update.old, OrderStatus::Pending);
        assert_eq!(update.new, OrderStatus::Processing);
        assert_eq!(update.notified, Some(true));

        // Exactly one status email, to the customer, naming the old status
        let sent = store.mailer.sent();
        assert_eq!(sent.len(), before + 1);
        assert_eq!(sent[before].to, customer.email);
        assert!(sent[before].body.contains("Pending"));
        assert!(sent[before].body.contains("Processing"));
    }

    #[tokio::test]
    async fn test_status_update_requires_admin() {
        let store = seeded_store().await;
        let (system, customer) = (&store.system, &store.customer);

        system.cart_client.add_to_cart(customer, &store.mug_id, 1).await.unwrap();
        let placed = system
            .order_client
            .place_order(customer, shipping_for(customer))
            .await
            .unwrap();

        let result = system
            .order_client
            .update_status(customer, &placed.order.id, OrderStatus::Shipped)
            .await;
        assert_eq!(
            result.unwrap_err(),
            OrderError::AccessDenied(AccessError::Forbidden)
        );
    }

    #[tokio::test]
    async fn test_customers_cannot_read_others_orders() {
        let store = seeded_store().await;
        let (system, customer) = (&store.system, &store.customer);
        let hasher = InsecureHasher;

        system.cart_client.add_to_cart(customer, &store.mug_id, 1).await.unwrap();
        let placed = system
            .order_client
            .place_order(customer, shipping_for(customer))
            .await
            .unwrap();

        system
            .user_client
            .register("Mallory", "mallory@test.local", "hunter2", &hasher)
            .await
            .unwrap();
        let other = system
            .user_client
            .login("mallory@test.local", "hunter2", &hasher)
            .await
            .unwrap();

        let result = system.order_client.get_order(&other, &placed.order.id).await;
        assert_eq!(
            result.unwrap_err(),
            OrderError::AccessDenied(AccessError::Forbidden)
        );

        // The admin can read anything
        let order = system
            .order_client
            .get_order(&store.admin, &placed.order.id)
            .await
            .unwrap();
        assert_eq!(order.id, placed.order.id);
    }

    #[tokio::test]
    async fn test_category_delete_guarded_by_products() {
        let store = seeded_store().await;
        let (system, admin) = (&store.system, &store.admin);

        let result = system.catalog_client.delete_category(admin, &store.category_id).await;
        assert_eq!(result.unwrap_err(), CategoryError::HasProducts);

        system.catalog_client.delete_product(admin, &store.mug_id).await.unwrap();
        system.catalog_client.delete_product(admin, &store.spoon_id).await.unwrap();
        system
            .catalog_client
            .delete_category(admin, &store.category_id)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_image_files_follow_the_product_record() {
        let upload_dir = std::env::temp_dir().join("storefront-image-lifecycle-test");
        std::fs::create_dir_all(&upload_dir).unwrap();
        let mut config = test_config();
        config.upload_dir = upload_dir.to_string_lossy().into_owned();

        let mailer = RecordingMailClient::new();
        let system = StoreSystem::new(&config, mailer);
        let hasher = InsecureHasher;
        system
            .user_client
            .create_admin("Admin", "admin@test.local", "admin123", &hasher)
            .await
            .unwrap();
        let admin = system
            .user_client
            .login("admin@test.local", "admin123", &hasher)
            .await
            .unwrap();
        let category_id = system
            .catalog_client
            .create_category(&admin, CategoryCreate { name: "Mugs".to_string() })
            .await
            .unwrap();

        std::fs::write(upload_dir.join("mug_1.png"), b"png").unwrap();
        std::fs::write(upload_dir.join("mug_2.png"), b"png").unwrap();

        // Bad extensions never reach the catalog
        let rejected = system
            .catalog_client
            .create_product(
                &admin,
                ProductCreate {
                    name: "Mug".to_string(),
                    description: "".to_string(),
                    price: 10.0,
                    image_filename: Some("mug.exe".to_string()),
                    category_id: category_id.clone(),
                },
            )
            .await;
        assert!(matches!(
            rejected.unwrap_err(),
            crate::product_actor::ProductError::ValidationError(_)
        ));

        let product_id = system
            .catalog_client
            .create_product(
                &admin,
                ProductCreate {
                    name: "Mug".to_string(),
                    description: "".to_string(),
                    price: 10.0,
                    image_filename: Some("mug_1.png".to_string()),
                    category_id,
                },
            )
            .await
            .unwrap();

        // Replacing the image removes the old file
        system
            .catalog_client
            .update_product(
                &admin,
                &product_id,
                ProductPatch {
                    image_filename: Some(Some("mug_2.png".to_string())),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(!upload_dir.join("mug_1.png").exists());
        assert!(upload_dir.join("mug_2.png").exists());

        // Deleting the product removes the current file
        system
            .catalog_client
            .delete_product(&admin, &product_id)
            .await
            .unwrap();
        assert!(!upload_dir.join("mug_2.png").exists());
    }

    #[tokio::test]
    async fn test_category_rename_cannot_take_an_existing_name() {
        let store = seeded_store().await;
        let (system, admin) = (&store.system, &store.admin);

        let books = system
            .catalog_client
            .create_category(admin, CategoryCreate { name: "Books".to_string() })
            .await
            .unwrap();
        let games = system
            .catalog_client
            .create_category(admin, CategoryCreate { name: "Games".to_string() })
            .await
            .unwrap();

        let err = system
            .catalog_client
            .update_category(
                admin,
                &games,
                crate::domain::CategoryPatch {
                    name: Some("books".to_string()),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err, CategoryError::AlreadyExists("books".to_string()));

        // Both categories keep their original names
        let games_row = system.catalog_client.get_category(&games).await.unwrap().unwrap();
        assert_eq!(games_row.name, "Games");
        let books_row = system.catalog_client.get_category(&books).await.unwrap().unwrap();
        assert_eq!(books_row.name, "Books");
    }

    #[tokio::test]
    async fn test_product_delete_purges_carts() {
        let store = seeded_store().await;
        let (system, customer) = (&store.system, &store.customer);

        system.cart_client.add_to_cart(customer, &store.mug_id, 3).await.unwrap();
        system.cart_client.add_to_cart(customer, &store.spoon_id, 1).await.unwrap();

        system
            .catalog_client
            .delete_product(&store.admin, &store.mug_id)
            .await
            .unwrap();

        let cart = system.cart_client.cart_for(customer).await.unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart[0].product_id, store.spoon_id);
    }

    #[tokio::test]
    async fn test_deleted_user_keeps_order_history_reference() {
        let store = seeded_store().await;
        let (system, customer, admin) = (&store.system, &store.customer, &store.admin);

        system.cart_client.add_to_cart(customer, &store.mug_id, 1).await.unwrap();
        let placed = system
            .order_client
            .place_order(customer, shipping_for(customer))
            .await
            .unwrap();

        system.user_client.delete_user(admin, &customer.user_id).await.unwrap();

        // The order record survives with its original user reference
        let order = system.order_client.get_order(admin, &placed.order.id).await.unwrap();
        assert_eq!(order.user_id.as_deref(), Some(customer.user_id.as_str()));
    }

    #[tokio::test]
    async fn test_admin_cannot_delete_self() {
        let store = seeded_store().await;
        let result = store
            .system
            .user_client
            .delete_user(&store.admin, &store.admin.user_id)
            .await;
        assert_eq!(result.unwrap_err(), UserError::SelfDeletion);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = seeded_store().await;
        let hasher = InsecureHasher;
        let result = store
            .system
            .user_client
            .register("Alice Again", "ALICE@test.local", "other", &hasher)
            .await;
        assert!(matches!(result.unwrap_err(), UserError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn test_order_committed_even_when_mail_fails() {
        let store = seeded_store().await;
        let (system, customer) = (&store.system, &store.customer);

        store.mailer.fail.store(true, Ordering::SeqCst);
        system.cart_client.add_to_cart(customer, &store.mug_id, 1).await.unwrap();
        let placed = system
            .order_client
            .place_order(customer, shipping_for(customer))
            .await
            .unwrap();

        assert!(!placed.notified);
        let order = system
            .order_client
            .get_order(customer, &placed.order.id)
            .await
            .unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn test_search_matches_name_description_and_category() {
        let store = seeded_store().await;
        let catalog = &store.system.catalog_client;

        let by_name = catalog.search("enamel").await.unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].id, store.mug_id);

        let by_description = catalog.search("hand-carved").await.unwrap();
        assert_eq!(by_description.len(), 1);
        assert_eq!(by_description[0].id, store.spoon_id);

        let by_category = catalog.search("kitchen").await.unwrap();
        assert_eq!(by_category.len(), 2);

        assert!(catalog.search("   ").await.unwrap().is_empty());
        assert!(catalog.search("no such thing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_order_stats_count_delivered_revenue_only() {
        let store = seeded_store().await;
        let (system, customer, admin) = (&store.system, &store.customer, &store.admin);

        system.cart_client.add_to_cart(customer, &store.mug_id, 1).await.unwrap();
        let first = system
            .order_client
            .place_order(customer, shipping_for(customer))
            .await
            .unwrap();
        system.cart_client.add_to_cart(customer, &store.spoon_id, 2).await.unwrap();
        system
            .order_client
            .place_order(customer, shipping_for(customer))
            .await
            .unwrap();

        system
            .order_client
            .update_status(admin, &first.order.id, OrderStatus::Delivered)
            .await
            .unwrap();

        let stats = system.order_client.order_stats(admin).await.unwrap();
        assert_eq!(stats.total_orders, 2);
        assert_eq!(stats.total_revenue, 100.0);
        assert_eq!(stats.status_counts[&OrderStatus::Delivered], 1);
        assert_eq!(stats.status_counts[&OrderStatus::Pending], 1);
        assert_eq!(stats.status_counts[&OrderStatus::Cancelled], 0);
    }

    #[tokio::test]
    async fn test_checkout_summary_drops_stale_rows() {
        let store = seeded_store().await;
        let (system, customer) = (&store.system, &store.customer);

        system.cart_client.add_to_cart(customer, &store.mug_id, 1).await.unwrap();
        system.cart_client.add_to_cart(customer, &store.spoon_id, 2).await.unwrap();

        // Reinsert the drained rows after the mug is gone, leaving a cart row
        // that points at a deleted product.
        let rows = system.cart_client.take_for_user(&customer.user_id).await.unwrap();
        system.catalog_client.delete_product(&store.admin, &store.mug_id).await.unwrap();
        system.cart_client.restore(rows).await.unwrap();

        let summary = system.order_client.checkout_summary(customer).await.unwrap();
        assert_eq!(summary.removed_stale, 1);
        assert_eq!(summary.lines.len(), 1);
        assert_eq!(summary.lines[0].row.product_id, store.spoon_id);
        assert_eq!(summary.total, 100.0);

        // The stale row is gone from the cart itself
        let cart = system.cart_client.cart_for(customer).await.unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart[0].product_id, store.spoon_id);
    }

    #[tokio::test]
    async fn test_cart_quantity_updates_and_ownership() {
        let store = seeded_store().await;
        let (system, customer) = (&store.system, &store.customer);

        let row = system.cart_client.add_to_cart(customer, &store.mug_id, 1).await.unwrap();
        // Adding the same product merges rather than inserting a second row
        let merged = system.cart_client.add_to_cart(customer, &store.mug_id, 2).await.unwrap();
        assert_eq!(merged.id, row.id);
        assert_eq!(merged.quantity, 3);

        let updated = system
            .cart_client
            .update_quantity(customer, &row.id, 5)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.quantity, 5);

        // Another user cannot touch the row
        assert_eq!(
            system
                .cart_client
                .update_quantity(&store.admin, &row.id, 1)
                .await
                .unwrap_err(),
            crate::cart_actor::CartError::AccessDenied(AccessError::Forbidden)
        );

        // Zero removes
        let removed = system.cart_client.update_quantity(customer, &row.id, 0).await.unwrap();
        assert!(removed.is_none());
        assert!(system.cart_client.cart_for(customer).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_order_history_and_admin_listing() {
        let store = seeded_store().await;
        let (system, customer, admin) = (&store.system, &store.customer, &store.admin);

        system.cart_client.add_to_cart(customer, &store.mug_id, 1).await.unwrap();
        let first = system
            .order_client
            .place_order(customer, shipping_for(customer))
            .await
            .unwrap();
        system.cart_client.add_to_cart(customer, &store.spoon_id, 1).await.unwrap();
        let second = system
            .order_client
            .place_order(customer, shipping_for(customer))
            .await
            .unwrap();

        let history = system.order_client.orders_for_user(customer).await.unwrap();
        assert_eq!(history.len(), 2);
        // Newest first
        assert_eq!(history[0].id, second.order.id);
        assert_eq!(history[1].id, first.order.id);

        system
            .order_client
            .update_status(admin, &first.order.id, OrderStatus::Shipped)
            .await
            .unwrap();
        let shipped = system
            .order_client
            .list_orders(admin, Some(OrderStatus::Shipped))
            .await
            .unwrap();
        assert_eq!(shipped.len(), 1);
        assert_eq!(shipped[0].id, first.order.id);
        assert_eq!(system.order_client.list_orders(admin, None).await.unwrap().len(), 2);

        // Customers get no listing, and only admins may purge records
        assert_eq!(
            system.order_client.list_orders(customer, None).await.unwrap_err(),
            OrderError::AccessDenied(AccessError::Forbidden)
        );
        assert_eq!(
            system.order_client.delete_order(customer, &second.order.id).await.unwrap_err(),
            OrderError::AccessDenied(AccessError::Forbidden)
        );
        system.order_client.delete_order(admin, &second.order.id).await.unwrap();
        assert_eq!(system.order_client.list_orders(admin, None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_shutdown_drains_cleanly() {
        let store = seeded_store().await;
        store.system.shutdown().await.unwrap();
    }
}
