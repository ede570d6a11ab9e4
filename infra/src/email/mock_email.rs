//! Mock Email Service Implementation
//!
//! Logs messages instead of sending them. Used in development and tests.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};
use uuid::Uuid;

use cs_shared::utils::email::mask_email;

use super::email_service::{EmailMessage, EmailService};
use crate::InfrastructureError;

/// Mock email service for development and testing
///
/// This implementation:
/// - Logs each message at info level, codes included, so local
///   development works without an email account
/// - Generates mock message IDs
/// - Keeps the sent messages, and the ones it refused while simulating
///   failure, for inspection
#[derive(Clone, Default)]
pub struct MockEmailService {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Whether to simulate failures (for testing)
    simulate_failure: Arc<AtomicBool>,
    /// Messages sent so far
    sent: Arc<Mutex<Vec<EmailMessage>>>,
    /// Messages refused while simulating failure
    failed: Arc<Mutex<Vec<EmailMessage>>>,
}

impl MockEmailService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock service that fails every send
    pub fn failing() -> Self {
        let service = Self::new();
        service.set_simulate_failure(true);
        service
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }

    /// Copies of the messages sent so far
    pub fn sent_messages(&self) -> Vec<EmailMessage> {
        self.sent
            .lock()
            .map(|sent| sent.clone())
            .unwrap_or_default()
    }

    /// Copies of the messages refused while simulating failure
    pub fn failed_messages(&self) -> Vec<EmailMessage> {
        self.failed
            .lock()
            .map(|failed| failed.clone())
            .unwrap_or_default()
    }

    /// Most recent message sent to `email`
    pub fn last_message_to(&self, email: &str) -> Option<EmailMessage> {
        self.sent_messages()
            .into_iter()
            .rev()
            .find(|message| message.to_email == email)
    }
}

#[async_trait]
impl EmailService for MockEmailService {
    async fn send_email(&self, message: &EmailMessage) -> Result<String, InfrastructureError> {
        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!(
                provider = "mock",
                email = %mask_email(&message.to_email),
                "Mock email service simulating failure"
            );
            if let Ok(mut failed) = self.failed.lock() {
                failed.push(message.clone());
            }
            return Err(InfrastructureError::Email(
                "Simulated email sending failure".to_string(),
            ));
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        info!(
            target: "email_service",
            provider = "mock",
            count = count,
            kind = ?message.kind,
            email = %mask_email(&message.to_email),
            message_id = %message_id,
            params = ?message.params,
            "Email sent (mock)"
        );

        if let Ok(mut sent) = self.sent.lock() {
            sent.push(message.clone());
        }

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }

    async fn is_available(&self) -> bool {
        !self.simulate_failure.load(Ordering::SeqCst)
    }
}
