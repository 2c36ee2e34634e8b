//! Error types for the notifications domain.

use core_config::ConfigError;
use thiserror::Error;

/// Result type for notification operations.
pub type NotificationResult<T> = Result<T, NotificationError>;

/// Errors that can occur while composing or delivering notifications.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// Mailer cannot be constructed (missing credentials, bad addresses).
    /// Nothing is sent.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The SMTP session could not be assembled (host, port, TLS setup).
    #[error("Transport configuration error: {0}")]
    TransportConfig(String),

    /// The session was built but the message was not handed off
    /// (authentication, TLS, network, rejected recipient, unreadable attachment).
    #[error("Email delivery failed: {0}")]
    Delivery(String),

    /// Template registration or rendering error.
    #[error("Template rendering error: {0}")]
    Template(String),
}

impl NotificationError {
    /// Whether the error is a setup problem rather than a per-send failure.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            NotificationError::Configuration(_) | NotificationError::TransportConfig(_)
        )
    }
}

impl From<ConfigError> for NotificationError {
    fn from(err: ConfigError) -> Self {
        NotificationError::Configuration(err.to_string())
    }
}

impl From<handlebars::RenderError> for NotificationError {
    fn from(err: handlebars::RenderError) -> Self {
        NotificationError::Template(err.to_string())
    }
}

impl From<handlebars::TemplateError> for NotificationError {
    fn from(err: handlebars::TemplateError) -> Self {
        NotificationError::Template(err.to_string())
    }
}
