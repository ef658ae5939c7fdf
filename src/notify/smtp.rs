use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::MailConfig;
use crate::notify::{EmailMessage, MailClient, MailError};

/// Lettre-backed SMTP transport. STARTTLS when the config asks for it,
/// cleartext otherwise (local relays, mailhog).
pub struct SmtpMailClient {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_email: String,
}

impl SmtpMailClient {
    pub fn new(config: &MailConfig) -> Result<Self, MailError> {
        let builder = if config.use_tls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.server)
                .map_err(|e| MailError::Transport(e.to_string()))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.server)
        };

        let mut builder = builder.port(config.port);
        if let Some(password) = &config.password {
            builder = builder.credentials(Credentials::new(
                config.username.clone(),
                password.clone(),
            ));
        }

        Ok(Self {
            transport: builder.build(),
            from_email: config.sender.clone(),
        })
    }
}

#[async_trait::async_trait]
impl MailClient for SmtpMailClient {
    async fn send(&self, message: EmailMessage) -> Result<(), MailError> {
        let email = Message::builder()
            .from(
                self.from_email
                    .parse()
                    .map_err(|_| MailError::InvalidAddress(self.from_email.clone()))?,
            )
            .to(message
                .to
                .parse()
                .map_err(|_| MailError::InvalidAddress(message.to.clone()))?)
            .subject(&message.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(message.body)
            .map_err(|e| MailError::Build(e.to_string()))?;

        self.transport
            .send(email)
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;
        Ok(())
    }

    fn from_email(&self) -> &str {
        &self.from_email
    }
}
