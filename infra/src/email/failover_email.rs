//! Failover Email Service Implementation
//!
//! Sends through a primary account. When a primary send fails the message is
//! attempted once on the alternate account before failure is reported, and
//! the primary is suspended for the failover timeout so that following sends
//! go straight to the alternate. The first send after the timeout tries the
//! primary again.

use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

use super::email_service::{EmailMessage, EmailService};
use crate::InfrastructureError;

/// Email service with an alternate account
pub struct FailoverEmailService {
    primary: Box<dyn EmailService>,
    alternate: Box<dyn EmailService>,
    /// Primary is skipped until this instant
    suspended_until: Mutex<Option<Instant>>,
    failover_timeout: Duration,
}

impl FailoverEmailService {
    pub fn new(
        primary: Box<dyn EmailService>,
        alternate: Box<dyn EmailService>,
        failover_timeout: Duration,
    ) -> Self {
        info!(
            primary = primary.provider_name(),
            alternate = alternate.provider_name(),
            "Initializing failover email service"
        );

        Self {
            primary,
            alternate,
            suspended_until: Mutex::new(None),
            failover_timeout,
        }
    }

    /// Whether sends currently bypass the primary
    pub fn is_primary_suspended(&self) -> bool {
        self.suspended_at(Instant::now())
    }

    fn suspended_at(&self, now: Instant) -> bool {
        matches!(*self.suspension(), Some(until) if now < until)
    }

    fn suspend_primary(&self) {
        let mut until = self.suspension();
        if until.is_none() {
            warn!(
                primary = self.primary.provider_name(),
                timeout_secs = self.failover_timeout.as_secs(),
                event = "email_failover",
                "Primary email account suspended, using alternate"
            );
        }
        *until = Some(Instant::now() + self.failover_timeout);
    }

    fn clear_suspension(&self) {
        if self.suspension().take().is_some() {
            info!(
                primary = self.primary.provider_name(),
                event = "email_primary_recovered",
                "Primary email account back in use"
            );
        }
    }

    fn suspension(&self) -> MutexGuard<'_, Option<Instant>> {
        self.suspended_until.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl EmailService for FailoverEmailService {
    async fn send_email(&self, message: &EmailMessage) -> Result<String, InfrastructureError> {
        if !self.is_primary_suspended() {
            match self.primary.send_email(message).await {
                Ok(message_id) => {
                    self.clear_suspension();
                    return Ok(message_id);
                }
                Err(e) => {
                    error!(
                        provider = self.primary.provider_name(),
                        error = %e,
                        "Primary email send failed"
                    );
                    self.suspend_primary();
                }
            }
        }

        self.alternate.send_email(message).await.map_err(|e| {
            error!(
                provider = self.alternate.provider_name(),
                error = %e,
                "Alternate email send failed"
            );
            InfrastructureError::Email(format!(
                "Both primary and backup email services failed. Primary: {}, Backup: {}",
                self.primary.provider_name(),
                self.alternate.provider_name()
            ))
        })
    }

    fn provider_name(&self) -> &str {
        "Failover"
    }

    async fn is_available(&self) -> bool {
        self.primary.is_available().await || self.alternate.is_available().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::email::mock_email::MockEmailService;

    fn message() -> EmailMessage {
        EmailMessage::verification_code("jane@example.com", "Jane", "123456", 15)
    }

    #[tokio::test]
    async fn test_alternate_used_when_primary_fails() {
        let alternate = MockEmailService::new();
        let service = FailoverEmailService::new(
            Box::new(MockEmailService::failing()),
            Box::new(alternate.clone()),
            Duration::from_secs(30),
        );

        assert!(service.send_email(&message()).await.is_ok());
        assert_eq!(alternate.get_message_count(), 1);
        assert!(service.is_primary_suspended());
    }

    #[tokio::test]
    async fn test_primary_skipped_while_suspended() {
        let primary = MockEmailService::failing();
        let alternate = MockEmailService::new();
        let service = FailoverEmailService::new(
            Box::new(primary.clone()),
            Box::new(alternate.clone()),
            Duration::from_secs(30),
        );

        service.send_email(&message()).await.unwrap();
        primary.set_simulate_failure(false);
        service.send_email(&message()).await.unwrap();

        assert_eq!(primary.get_message_count(), 0);
        assert_eq!(alternate.get_message_count(), 2);
    }

    #[tokio::test]
    async fn test_primary_retried_after_timeout() {
        let primary = MockEmailService::new();
        let service = FailoverEmailService::new(
            Box::new(primary.clone()),
            Box::new(MockEmailService::new()),
            Duration::from_millis(100),
        );

        *service.suspension() = Some(Instant::now() - Duration::from_secs(1));
        assert!(!service.is_primary_suspended());

        service.send_email(&message()).await.unwrap();
        assert_eq!(primary.get_message_count(), 1);
        assert!(service.suspension().is_none());
    }

    #[tokio::test]
    async fn test_both_services_fail() {
        let primary = MockEmailService::failing();
        let alternate = MockEmailService::failing();
        let service = FailoverEmailService::new(
            Box::new(primary.clone()),
            Box::new(alternate.clone()),
            Duration::from_secs(30),
        );

        let result = service.send_email(&message()).await;
        assert!(result.unwrap_err().to_string().contains("Both primary and backup"));
        assert!(!service.is_available().await);
    }

    #[tokio::test]
    async fn test_availability_has_no_side_effects() {
        let primary = MockEmailService::failing();
        let service = FailoverEmailService::new(
            Box::new(primary),
            Box::new(MockEmailService::new()),
            Duration::from_secs(30),
        );

        assert!(service.is_available().await);
        assert!(!service.is_primary_suspended());
    }
}
