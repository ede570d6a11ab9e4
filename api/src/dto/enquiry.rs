use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use cs_core::domain::entities::{Enquiry, EnquiryKind};
use cs_core::EnquiryReceipt;

/// Contact, enquiry or booking form body
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EnquiryRequest {
    pub kind: EnquiryKind,

    #[validate(length(min = 1, max = 100, message = "Please enter your name"))]
    pub name: String,

    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,

    #[validate(length(max = 30))]
    pub phone: Option<String>,

    #[serde(default)]
    #[validate(length(max = 5000))]
    pub message: String,

    /// Therapy or service the visitor is asking about
    #[validate(length(max = 100))]
    pub service: Option<String>,

    pub preferred_date: Option<NaiveDate>,

    #[validate(length(max = 100))]
    pub preferred_time: Option<String>,
}

impl EnquiryRequest {
    /// Build the domain submission, stamped with `submitted_at`
    pub fn into_enquiry(self, submitted_at: DateTime<Utc>) -> Enquiry {
        let blank_to_none = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        let mut enquiry = Enquiry::new(self.kind, self.name.trim(), self.email.trim(), self.message, submitted_at);
        enquiry.phone = blank_to_none(self.phone);
        enquiry.service = blank_to_none(self.service);
        enquiry.preferred_date = self.preferred_date;
        enquiry.preferred_time = blank_to_none(self.preferred_time);
        enquiry
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnquiryResponse {
    pub id: Uuid,
    pub kind: EnquiryKind,
    pub message_id: String,
    pub submitted_at: DateTime<Utc>,
    pub message: String,
}

impl From<EnquiryReceipt> for EnquiryResponse {
    fn from(receipt: EnquiryReceipt) -> Self {
        let message = match receipt.kind {
            EnquiryKind::Booking => "Thank you. We'll be in touch to confirm your booking",
            EnquiryKind::Contact | EnquiryKind::Enquiry => "Thank you. We'll get back to you soon",
        };
        Self {
            id: receipt.id,
            kind: receipt.kind,
            message_id: receipt.message_id,
            submitted_at: receipt.submitted_at,
            message: message.to_string(),
        }
    }
}
