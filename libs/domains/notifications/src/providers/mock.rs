//! Mock email provider for tests and dry runs.

use super::{EmailProvider, SentEmail};
use crate::error::{NotificationError, NotificationResult};
use crate::models::OutboundMessage;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Mock provider that captures sent messages instead of delivering them.
#[derive(Clone)]
pub struct MockProvider {
    sent: Arc<Mutex<Vec<OutboundMessage>>>,
    failure_message: Option<String>,
}

impl MockProvider {
    /// Create a new mock provider
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            failure_message: None,
        }
    }

    /// Create a mock provider whose every send fails with a delivery error
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            failure_message: Some(message.into()),
        }
    }

    /// Get all captured messages, oldest first
    pub async fn sent_messages(&self) -> Vec<OutboundMessage> {
        self.sent.lock().await.clone()
    }

    pub async fn sent_count(&self) -> usize {
        self.sent.lock().await.len()
    }

    /// Check if a message was sent to a specific address
    pub async fn was_sent_to(&self, address: &str) -> bool {
        self.sent.lock().await.iter().any(|m| m.to == address)
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmailProvider for MockProvider {
    async fn send(&self, message: &OutboundMessage) -> NotificationResult<SentEmail> {
        if let Some(failure) = &self.failure_message {
            return Err(NotificationError::Delivery(failure.clone()));
        }

        let mut sent = self.sent.lock().await;
        sent.push(message.clone());
        debug!(to = %message.to, subject = %message.subject, "Captured email");

        Ok(SentEmail {
            message_id: Some(format!("<mock-{}@localhost>", sent.len())),
            accepted: true,
        })
    }

    fn name(&self) -> &'static str {
        "mock"
    }

    async fn health_check(&self) -> NotificationResult<bool> {
        Ok(self.failure_message.is_none())
    }
}
