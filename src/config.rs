//! Environment-driven configuration, loaded once at startup.
//!
//! Every setting has a development default so the demo binary runs without a
//! `.env` file; production deployments override via the environment.

use std::env;

use crate::notify::MailSettings;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub secret_key: String,
    pub database_url: String,
    pub port: u16,
    pub base_url: String,
    pub store_name: String,
    pub upload_dir: String,
    pub admin_email: String,
    pub mail: MailConfig,
}

#[derive(Debug, Clone)]
pub struct MailConfig {
    pub server: String,
    pub port: u16,
    pub use_tls: bool,
    pub username: String,
    /// When absent, the system falls back to the logging transport.
    pub password: Option<String>,
    pub sender: String,
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

impl AppConfig {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let username = var_or("MAIL_USERNAME", "");
        let sender = env::var("MAIL_DEFAULT_SENDER").unwrap_or_else(|_| username.clone());
        Self {
            secret_key: var_or("SECRET_KEY", "dev-secret-key-change-in-production"),
            database_url: var_or("DATABASE_URL", "sqlite://database.db"),
            port: var_or("PORT", "5000").parse().unwrap_or(5000),
            base_url: var_or("BASE_URL", "http://localhost:5000"),
            store_name: var_or("STORE_NAME", "Storefront"),
            upload_dir: var_or("UPLOAD_DIR", "static/uploads"),
            admin_email: var_or("ADMIN_EMAIL", "admin@localhost"),
            mail: MailConfig {
                server: var_or("MAIL_SERVER", "smtp.gmail.com"),
                port: var_or("MAIL_PORT", "587").parse().unwrap_or(587),
                use_tls: var_or("MAIL_USE_TLS", "true") == "true",
                username,
                password: env::var("MAIL_PASSWORD").ok(),
                sender,
            },
        }
    }

    pub fn mail_settings(&self) -> MailSettings {
        MailSettings {
            store_name: self.store_name.clone(),
            sender: self.mail.sender.clone(),
            admin_email: self.admin_email.clone(),
            base_url: self.base_url.clone(),
        }
    }
}
