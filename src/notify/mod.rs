//! Notification dispatcher: a worker actor that formats and sends order
//! emails off the caller's critical path.
//!
//! State changes are committed before anything is enqueued here, so a failed
//! send can never roll back an order. The worker owns the retry policy;
//! callers only ever see a boolean outcome.

mod smtp;
pub mod templates;

pub use smtp::SmtpMailClient;

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{error, info, instrument, warn};

use crate::domain::{CancelledBy, Order, OrderStatus};

/// A fully formatted outbound mail. Plain text only; order mails carry no
/// attachments or HTML.
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Clone, Error)]
pub enum MailError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),
    #[error("failed to build message: {0}")]
    Build(String),
    #[error("transport error: {0}")]
    Transport(String),
}

/// Outbound mail transport seam. The SMTP client is one implementation;
/// tests substitute a recording client.
#[async_trait::async_trait]
pub trait MailClient: Send + Sync {
    async fn send(&self, message: EmailMessage) -> Result<(), MailError>;
    fn from_email(&self) -> &str;
}

pub type DynMailClient = Arc<dyn MailClient>;

/// Dev transport: logs the mail instead of talking to an SMTP relay.
pub struct LogMailClient {
    pub from_email: String,
}

#[async_trait::async_trait]
impl MailClient for LogMailClient {
    async fn send(&self, message: EmailMessage) -> Result<(), MailError> {
        info!(to = %message.to, subject = %message.subject, "Email dispatch (log transport)");
        Ok(())
    }

    fn from_email(&self) -> &str {
        &self.from_email
    }
}

/// Store-level settings the templates need.
#[derive(Debug, Clone)]
pub struct MailSettings {
    pub store_name: String,
    pub sender: String,
    pub admin_email: String,
    pub base_url: String,
}

#[derive(Debug)]
pub enum NotificationRequest {
    /// Confirmation for a freshly placed order; notifies admin and customer.
    OrderPlaced {
        order: Order,
        respond_to: oneshot::Sender<bool>,
    },
    /// Status transition; notifies the customer only.
    StatusChanged {
        order: Order,
        old_status: OrderStatus,
        respond_to: oneshot::Sender<bool>,
    },
    /// Cancellation; notifies admin and customer with attribution.
    OrderCancelled {
        order: Order,
        cancelled_by: CancelledBy,
        respond_to: oneshot::Sender<bool>,
    },
}

pub struct NotificationService {
    receiver: mpsc::Receiver<NotificationRequest>,
    mailer: DynMailClient,
    settings: MailSettings,
    max_attempts: u32,
    retry_delay: Duration,
}

impl NotificationService {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
    pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(200);

    pub fn new(
        buffer_size: usize,
        mailer: DynMailClient,
        settings: MailSettings,
    ) -> (Self, NotifierClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            mailer,
            settings,
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            retry_delay: Self::DEFAULT_RETRY_DELAY,
        };
        (service, NotifierClient { sender })
    }

    #[cfg(test)]
    pub fn with_retry(mut self, max_attempts: u32, retry_delay: Duration) -> Self {
        self.max_attempts = max_attempts;
        self.retry_delay = retry_delay;
        self
    }

    #[instrument(name = "notification_service", skip(self))]
    pub async fn run(mut self) {
        info!("NotificationService starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                NotificationRequest::OrderPlaced { order, respond_to } => {
                    let messages = vec![
                        templates::order_confirmation_admin(&order, &self.settings),
                        templates::order_confirmation_customer(&order, &self.settings),
                    ];
                    let ok = self.deliver_all(messages).await;
                    let _ = respond_to.send(ok);
                }
                NotificationRequest::StatusChanged {
                    order,
                    old_status,
                    respond_to,
                } => {
                    let message =
                        templates::status_update_customer(&order, old_status, &self.settings);
                    let ok = self.deliver_all(vec![message]).await;
                    let _ = respond_to.send(ok);
                }
                NotificationRequest::OrderCancelled {
                    order,
                    cancelled_by,
                    respond_to,
                } => {
                    let messages = vec![
                        templates::cancellation_admin(&order, cancelled_by, &self.settings),
                        templates::cancellation_customer(&order, &self.settings),
                    ];
                    let ok = self.deliver_all(messages).await;
                    let _ = respond_to.send(ok);
                }
            }
        }
        info!("NotificationService stopped");
    }

    async fn deliver_all(&self, messages: Vec<EmailMessage>) -> bool {
        for message in messages {
            if !self.deliver(message).await {
                return false;
            }
        }
        true
    }

    /// Try a single message up to `max_attempts` times. Delivery problems are
    /// logged and reported as `false`; they never escape this worker.
    async fn deliver(&self, message: EmailMessage) -> bool {
        for attempt in 1..=self.max_attempts {
            match self.mailer.send(message.clone()).await {
                Ok(()) => return true,
                Err(e) => {
                    warn!(
                        attempt,
                        to = %message.to,
                        error = %e,
                        "Email delivery attempt failed"
                    );
                    if attempt < self.max_attempts {
                        tokio::time::sleep(self.retry_delay).await;
                    }
                }
            }
        }
        error!(
            to = %message.to,
            subject = %message.subject,
            "Giving up on email after {} attempts",
            self.max_attempts
        );
        false
    }
}

/// Client for the notification worker. Every method reports success as a
/// boolean and swallows channel failures: notification must never fail the
/// operation that triggered it.
#[derive(Clone)]
pub struct NotifierClient {
    sender: mpsc::Sender<NotificationRequest>,
}

impl NotifierClient {
    #[instrument(skip(self, order), fields(order_id = %order.id))]
    pub async fn send_order_confirmation(&self, order: &Order) -> bool {
        let (respond_to, response) = oneshot::channel();
        self.request(
            NotificationRequest::OrderPlaced {
                order: order.clone(),
                respond_to,
            },
            response,
        )
        .await
    }

    #[instrument(skip(self, order), fields(order_id = %order.id))]
    pub async fn send_order_status_update(&self, order: &Order, old_status: OrderStatus) -> bool {
        let (respond_to, response) = oneshot::channel();
        self.request(
            NotificationRequest::StatusChanged {
                order: order.clone(),
                old_status,
                respond_to,
            },
            response,
        )
        .await
    }

    #[instrument(skip(self, order), fields(order_id = %order.id))]
    pub async fn send_order_cancellation(&self, order: &Order, cancelled_by: CancelledBy) -> bool {
        let (respond_to, response) = oneshot::channel();
        self.request(
            NotificationRequest::OrderCancelled {
                order: order.clone(),
                cancelled_by,
                respond_to,
            },
            response,
        )
        .await
    }

    async fn request(&self, request: NotificationRequest, response: oneshot::Receiver<bool>) -> bool {
        if self.sender.send(request).await.is_err() {
            warn!("Notification worker is gone; dropping email");
            return false;
        }
        response.await.unwrap_or(false)
    }
}
