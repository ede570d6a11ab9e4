//! Adapter from an [`EmailService`] to the core `EmailDeliveryTrait`

use async_trait::async_trait;
use std::sync::Arc;

use cs_core::domain::entities::Enquiry;
use cs_core::services::verification::EmailDeliveryTrait;

use super::email_service::EmailService;

/// Implements the core delivery trait over any email service
///
/// Enquiries are relayed to the configured practice inbox.
pub struct EmailDeliveryAdapter {
    inner: Arc<dyn EmailService>,
    enquiry_recipient: String,
    enquiry_recipient_name: String,
}

impl EmailDeliveryAdapter {
    pub fn new(
        inner: Arc<dyn EmailService>,
        enquiry_recipient: impl Into<String>,
        enquiry_recipient_name: impl Into<String>,
    ) -> Self {
        Self {
            inner,
            enquiry_recipient: enquiry_recipient.into(),
            enquiry_recipient_name: enquiry_recipient_name.into(),
        }
    }

    /// Name of the wrapped provider
    pub fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }

    pub async fn is_available(&self) -> bool {
        self.inner.is_available().await
    }
}

#[async_trait]
impl EmailDeliveryTrait for EmailDeliveryAdapter {
    async fn send_verification_code(
        &self,
        recipient: &str,
        display_name: &str,
        code: &str,
        expiry_minutes: i64,
    ) -> Result<String, String> {
        self.inner
            .send_verification_code(recipient, display_name, code, expiry_minutes)
            .await
            .map_err(|e| e.to_string())
    }

    async fn send_enquiry(&self, enquiry: &Enquiry) -> Result<String, String> {
        self.inner
            .send_enquiry(enquiry, &self.enquiry_recipient, &self.enquiry_recipient_name)
            .await
            .map_err(|e| e.to_string())
    }
}
