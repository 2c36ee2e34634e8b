//! Email provider implementations.
//!
//! This module contains the `EmailProvider` trait, the SMTP provider used in
//! production and a capturing mock for tests and dry runs.

mod mock;
mod smtp;

pub use mock::MockProvider;
pub use smtp::SmtpProvider;

use crate::error::NotificationResult;
use crate::models::OutboundMessage;
use async_trait::async_trait;

/// Represents a sent email with provider-specific message ID.
#[derive(Debug, Clone)]
pub struct SentEmail {
    /// `Message-ID` header of the delivered message, when the provider sets one.
    pub message_id: Option<String>,
    /// Whether the email was accepted for delivery.
    pub accepted: bool,
}

/// Trait for email sending providers.
#[async_trait]
pub trait EmailProvider: Send + Sync {
    /// Send one message. Each call is a single attempt.
    async fn send(&self, message: &OutboundMessage) -> NotificationResult<SentEmail>;

    /// Get the provider name for logging.
    fn name(&self) -> &'static str;

    /// Check if the provider can reach its server.
    async fn health_check(&self) -> NotificationResult<bool>;
}
