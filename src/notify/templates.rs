//! Plain-text bodies for every order notification.
//!
//! Formatting choices (item table, section headers, COD wording) follow the
//! store's established email copy; tests pin the load-bearing fields rather
//! than the full prose.

use chrono::{DateTime, Utc};

use crate::domain::{CancelledBy, Order, OrderItem, OrderStatus, PaymentMethod};
use crate::notify::{EmailMessage, MailSettings};

fn format_date(date: DateTime<Utc>) -> String {
    date.format("%B %d, %Y at %I:%M %p").to_string()
}

fn items_table(items: &[OrderItem]) -> String {
    items
        .iter()
        .map(|item| {
            format!(
                "  - {} x {} @ Rs. {:.2} = Rs. {:.2}",
                item.product_name,
                item.quantity,
                item.price,
                item.subtotal()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn refund_note(order: &Order) -> &'static str {
    match order.payment_method {
        PaymentMethod::Cod => {
            "Since this was a Cash on Delivery order, no refund processing is required."
        }
    }
}

pub fn order_confirmation_admin(order: &Order, settings: &MailSettings) -> EmailMessage {
    let body = format!(
        "New Order Received!\n\
         \n\
         ORDER DETAILS:\n\
         --------------\n\
         Order ID: #{id}\n\
         Order Date: {date}\n\
         Status: {status}\n\
         \n\
         CUSTOMER INFORMATION:\n\
         --------------------\n\
         Name: {name}\n\
         Email: {email}\n\
         Phone: {phone}\n\
         Delivery Address:\n\
         {address}\n\
         \n\
         ORDER ITEMS:\n\
         -----------\n\
         {items}\n\
         \n\
         PAYMENT:\n\
         --------\n\
         Total Amount: Rs. {total:.2}\n\
         Payment Method: {payment} (Cash on Delivery)\n\
         \n\
         ACTION REQUIRED:\n\
         ---------------\n\
         Please process this order and update the status accordingly.\n\
         Admin panel: {base_url}/admin/orders\n",
        id = order.id,
        date = format_date(order.order_date),
        status = order.status,
        name = order.name,
        email = order.email,
        phone = order.phone,
        address = order.address,
        items = items_table(&order.items),
        total = order.total_price,
        payment = order.payment_method,
        base_url = settings.base_url,
    );
    EmailMessage {
        to: settings.admin_email.clone(),
        subject: format!(
            "New Order #{} Received - {}",
            order.id, settings.store_name
        ),
        body,
    }
}

pub fn order_confirmation_customer(order: &Order, settings: &MailSettings) -> EmailMessage {
    let body = format!(
        "Dear {name},\n\
         \n\
         Thank you for shopping with {store}!\n\
         \n\
         Your order has been successfully placed and will be processed shortly.\n\
         \n\
         ORDER SUMMARY:\n\
         --------------\n\
         Order ID: #{id}\n\
         Order Date: {date}\n\
         Status: {status}\n\
         \n\
         ITEMS ORDERED:\n\
         -------------\n\
         {items}\n\
         \n\
         TOTAL AMOUNT: Rs. {total:.2}\n\
         Payment Method: {payment} (Cash on Delivery)\n\
         \n\
         DELIVERY DETAILS:\n\
         ----------------\n\
         Delivery Address:\n\
         {address}\n\
         \n\
         Contact Phone: {phone}\n\
         \n\
         PAYMENT:\n\
         --------\n\
         You will pay Rs. {total:.2} in cash when you receive your order.\n\
         \n\
         You can view your order status anytime at: {base_url}/my-orders\n\
         \n\
         Best Regards,\n\
         The {store} Team\n",
        name = order.name,
        store = settings.store_name,
        id = order.id,
        date = format_date(order.order_date),
        status = order.status,
        items = items_table(&order.items),
        total = order.total_price,
        payment = order.payment_method,
        address = order.address,
        phone = order.phone,
        base_url = settings.base_url,
    );
    EmailMessage {
        to: order.email.clone(),
        subject: format!("Order Confirmation #{} - {}", order.id, settings.store_name),
        body,
    }
}

pub fn status_update_customer(
    order: &Order,
    old_status: OrderStatus,
    settings: &MailSettings,
) -> EmailMessage {
    let payment_due = if order.status == OrderStatus::Delivered {
        format!(
            "PAYMENT DUE: Rs. {:.2} (Cash on Delivery)\n\n",
            order.total_price
        )
    } else {
        String::new()
    };
    let body = format!(
        "Dear {name},\n\
         \n\
         Your order status has been updated!\n\
         \n\
         ORDER DETAILS:\n\
         --------------\n\
         Order ID: #{id}\n\
         Previous Status: {old}\n\
         Current Status: {new}\n\
         \n\
         STATUS UPDATE:\n\
         -------------\n\
         {note}\n\
         \n\
         ORDER SUMMARY:\n\
         -------------\n\
         Total Amount: Rs. {total:.2}\n\
         Payment Method: {payment}\n\
         Order Date: {date}\n\
         \n\
         DELIVERY ADDRESS:\n\
         ----------------\n\
         {address}\n\
         \n\
         {payment_due}You can track your order anytime at: {base_url}/my-orders\n\
         \n\
         Best Regards,\n\
         The {store} Team\n",
        name = order.name,
        id = order.id,
        old = old_status,
        new = order.status,
        note = order.status.progress_note(),
        total = order.total_price,
        payment = order.payment_method,
        date = format_date(order.order_date),
        address = order.address,
        payment_due = payment_due,
        base_url = settings.base_url,
        store = settings.store_name,
    );
    EmailMessage {
        to: order.email.clone(),
        subject: format!(
            "Order #{} Status Update: {} - {}",
            order.id, order.status, settings.store_name
        ),
        body,
    }
}

pub fn cancellation_admin(
    order: &Order,
    cancelled_by: CancelledBy,
    settings: &MailSettings,
) -> EmailMessage {
    let items = order
        .items
        .iter()
        .map(|item| format!("  - {} x {}", item.product_name, item.quantity))
        .collect::<Vec<_>>()
        .join("\n");
    let body = format!(
        "Order Cancellation Notice\n\
         \n\
         ORDER DETAILS:\n\
         --------------\n\
         Order ID: #{id}\n\
         Order Date: {date}\n\
         Cancelled By: {by}\n\
         Status: {status}\n\
         \n\
         CUSTOMER INFORMATION:\n\
         --------------------\n\
         Name: {name}\n\
         Email: {email}\n\
         Phone: {phone}\n\
         \n\
         ORDER VALUE:\n\
         -----------\n\
         Total Amount: Rs. {total:.2}\n\
         Payment Method: {payment}\n\
         \n\
         ITEMS IN ORDER:\n\
         --------------\n\
         {items}\n",
        id = order.id,
        date = format_date(order.order_date),
        by = cancelled_by,
        status = order.status,
        name = order.name,
        email = order.email,
        phone = order.phone,
        total = order.total_price,
        payment = order.payment_method,
        items = items,
    );
    EmailMessage {
        to: settings.admin_email.clone(),
        subject: format!("Order #{} Cancelled - {}", order.id, settings.store_name),
        body,
    }
}

pub fn cancellation_customer(order: &Order, settings: &MailSettings) -> EmailMessage {
    let items = order
        .items
        .iter()
        .map(|item| {
            format!(
                "  - {} x {} - Rs. {:.2}",
                item.product_name,
                item.quantity,
                item.subtotal()
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    let body = format!(
        "Dear {name},\n\
         \n\
         Your order has been cancelled successfully.\n\
         \n\
         ORDER DETAILS:\n\
         --------------\n\
         Order ID: #{id}\n\
         Order Date: {date}\n\
         Status: Cancelled\n\
         Total Amount: Rs. {total:.2}\n\
         \n\
         CANCELLED ITEMS:\n\
         ---------------\n\
         {items}\n\
         \n\
         {refund}\n\
         \n\
         We're sorry to see you cancel this order. If you faced any issues,\n\
         please let us know so we can improve our service.\n\
         \n\
         Best Regards,\n\
         The {store} Team\n",
        name = order.name,
        id = order.id,
        date = format_date(order.order_date),
        total = order.total_price,
        items = items,
        refund = refund_note(order),
        store = settings.store_name,
    );
    EmailMessage {
        to: order.email.clone(),
        subject: format!(
            "Order #{} Cancellation Confirmation - {}",
            order.id, settings.store_name
        ),
        body,
    }
}
