//! Email Service Interface
//!
//! Defines the trait for email service implementations that deliver
//! verification codes and relay form submissions.

use async_trait::async_trait;
use std::collections::BTreeMap;

use cs_core::domain::entities::Enquiry;

use crate::InfrastructureError;

/// Which template a message is rendered with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailKind {
    /// One-time verification code sent to a visitor
    VerificationCode,
    /// Form submission relayed to the practice inbox
    Enquiry,
}

/// A templated email ready to hand to a provider
///
/// Content lives in provider-side templates; the message carries only the
/// recipient and the parameters the template substitutes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub kind: EmailKind,
    /// Recipient address
    pub to_email: String,
    /// Recipient display name
    pub to_name: String,
    /// Address replies should go to, when different from the sender
    pub reply_to: Option<String>,
    /// Template parameters
    pub params: BTreeMap<String, String>,
}

impl EmailMessage {
    pub fn new(kind: EmailKind, to_email: impl Into<String>, to_name: impl Into<String>) -> Self {
        let to_email = to_email.into();
        let to_name = to_name.into();

        let mut params = BTreeMap::new();
        params.insert("to_email".to_string(), to_email.clone());
        params.insert("to_name".to_string(), to_name.clone());

        Self {
            kind,
            to_email,
            to_name,
            reply_to: None,
            params,
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn with_reply_to(mut self, reply_to: impl Into<String>) -> Self {
        let reply_to = reply_to.into();
        self.params.insert("reply_to".to_string(), reply_to.clone());
        self.reply_to = Some(reply_to);
        self
    }

    /// Verification code message for `recipient`
    pub fn verification_code(recipient: &str, display_name: &str, code: &str, expiry_minutes: i64) -> Self {
        Self::new(EmailKind::VerificationCode, recipient, display_name)
            .with_param("passcode", code)
            .with_param("expiry_minutes", expiry_minutes.to_string())
    }

    /// Relay of `enquiry` to the practice inbox, replying to the visitor
    pub fn enquiry(enquiry: &Enquiry, inbox: &str, inbox_name: &str) -> Self {
        let mut message = Self::new(EmailKind::Enquiry, inbox, inbox_name).with_reply_to(&enquiry.email);
        for (key, value) in enquiry.template_params() {
            message.params.insert(key.to_string(), value);
        }
        message
    }
}

/// Email service trait for sending templated messages
///
/// Implementations include:
/// - Template-based email HTTP API
/// - Failover between two accounts
/// - Mock implementation for development
#[async_trait]
pub trait EmailService: Send + Sync {
    /// Send a templated email
    ///
    /// # Returns
    ///
    /// * `Ok(message_id)` - Identifier for the sent message
    /// * `Err(InfrastructureError)` - If sending fails
    async fn send_email(&self, message: &EmailMessage) -> Result<String, InfrastructureError>;

    /// Send a verification code to a visitor
    async fn send_verification_code(
        &self,
        recipient: &str,
        display_name: &str,
        code: &str,
        expiry_minutes: i64,
    ) -> Result<String, InfrastructureError> {
        let message = EmailMessage::verification_code(recipient, display_name, code, expiry_minutes);
        self.send_email(&message).await
    }

    /// Relay a form submission to the practice inbox
    async fn send_enquiry(
        &self,
        enquiry: &Enquiry,
        inbox: &str,
        inbox_name: &str,
    ) -> Result<String, InfrastructureError> {
        let message = EmailMessage::enquiry(enquiry, inbox, inbox_name);
        self.send_email(&message).await
    }

    /// Get the service provider name
    fn provider_name(&self) -> &str;

    /// Check if the service is available
    ///
    /// Default implementation always returns true.
    async fn is_available(&self) -> bool {
        true
    }
}
