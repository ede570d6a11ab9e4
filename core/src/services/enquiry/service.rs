//! Enquiry service implementation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use cs_shared::utils::email::mask_email;
use cs_shared::EnquiryConfig;

use crate::domain::entities::{Enquiry, EnquiryKind};
use crate::errors::{DomainError, DomainResult, SendError};
use crate::services::verification::{Clock, EmailDeliveryTrait, OtpService, SystemClock};

/// Configuration for the enquiry service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnquiryServiceConfig {
    /// Only accept submissions from addresses that passed verification
    pub require_verified_email: bool,
}

impl Default for EnquiryServiceConfig {
    fn default() -> Self {
        Self {
            require_verified_email: true,
        }
    }
}

impl From<&EnquiryConfig> for EnquiryServiceConfig {
    fn from(config: &EnquiryConfig) -> Self {
        Self {
            require_verified_email: config.require_verified_email,
        }
    }
}

/// Acknowledgement returned to the visitor after a successful relay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnquiryReceipt {
    pub id: Uuid,
    pub kind: EnquiryKind,
    /// Provider message id of the relayed email
    pub message_id: String,
    pub submitted_at: DateTime<Utc>,
}

/// Relays verified form submissions to the practice inbox
pub struct EnquiryService<E: EmailDeliveryTrait, C: Clock = SystemClock> {
    /// Email service for relaying submissions
    email_service: Arc<E>,
    /// Verification state of submitting addresses
    otp_service: Arc<OtpService<E, C>>,
    config: EnquiryServiceConfig,
}

impl<E: EmailDeliveryTrait, C: Clock> EnquiryService<E, C> {
    pub fn new(
        email_service: Arc<E>,
        otp_service: Arc<OtpService<E, C>>,
        config: EnquiryServiceConfig,
    ) -> Self {
        Self {
            email_service,
            otp_service,
            config,
        }
    }

    /// Validate and relay a submission
    ///
    /// The address's verification is taken from the store before the relay,
    /// so each verified code authorises a single submission even when
    /// submissions race. A failed relay puts the verification back for a
    /// retry unless a newer code has been issued meanwhile.
    pub async fn submit(&self, enquiry: Enquiry) -> DomainResult<EnquiryReceipt> {
        enquiry.validate(enquiry.submitted_at.date_naive())?;

        let verification = self.otp_service.take_verified(&enquiry.email);
        if self.config.require_verified_email && verification.is_none() {
            tracing::warn!(
                email = %mask_email(&enquiry.email),
                kind = %enquiry.kind,
                event = "enquiry_unverified",
                "Rejected submission from unverified email address"
            );
            return Err(DomainError::EmailNotVerified {
                address: enquiry.email.clone(),
            });
        }

        let message_id = match self.email_service.send_enquiry(&enquiry).await {
            Ok(message_id) => message_id,
            Err(e) => {
                tracing::error!(
                    enquiry_id = %enquiry.id,
                    error = %e,
                    event = "enquiry_relay_failed",
                    "Failed to relay submission"
                );
                if let Some(record) = verification {
                    self.otp_service.restore(&enquiry.email, record);
                }
                return Err(SendError::delivery(e).into());
            }
        };

        tracing::info!(
            enquiry_id = %enquiry.id,
            kind = %enquiry.kind,
            email = %mask_email(&enquiry.email),
            event = "enquiry_relayed",
            "Submission relayed"
        );

        Ok(EnquiryReceipt {
            id: enquiry.id,
            kind: enquiry.kind,
            message_id,
            submitted_at: enquiry.submitted_at,
        })
    }
}
