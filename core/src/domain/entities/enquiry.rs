//! Contact, enquiry and booking form submissions.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ValidationError;
use cs_shared::utils::email::is_valid_email;

/// Which form the visitor filled in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnquiryKind {
    /// General contact form
    Contact,
    /// Question about a specific service
    Enquiry,
    /// Appointment request
    Booking,
}

impl EnquiryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnquiryKind::Contact => "contact",
            EnquiryKind::Enquiry => "enquiry",
            EnquiryKind::Booking => "booking",
        }
    }

    /// Subject line prefix used in the relayed email
    pub fn subject(&self) -> &'static str {
        match self {
            EnquiryKind::Contact => "New contact message",
            EnquiryKind::Enquiry => "New service enquiry",
            EnquiryKind::Booking => "New booking request",
        }
    }
}

impl std::fmt::Display for EnquiryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A form submission waiting to be relayed to the practice inbox
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enquiry {
    /// Unique identifier, also quoted back to the visitor
    pub id: Uuid,

    pub kind: EnquiryKind,

    /// Visitor's name
    pub name: String,

    /// Visitor's (verified) email address
    pub email: String,

    pub phone: Option<String>,

    /// Free-text message
    pub message: String,

    /// Therapy or service the visitor is interested in
    pub service: Option<String>,

    /// Requested appointment date (bookings)
    pub preferred_date: Option<NaiveDate>,

    /// Requested time of day, free text (e.g. "weekday evenings")
    pub preferred_time: Option<String>,

    pub submitted_at: DateTime<Utc>,
}

impl Enquiry {
    /// Creates a submission with a fresh id; optional fields start empty
    pub fn new(
        kind: EnquiryKind,
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            name: name.into(),
            email: email.into(),
            phone: None,
            message: message.into(),
            service: None,
            preferred_date: None,
            preferred_time: None,
            submitted_at,
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }

    pub fn with_preferred_slot(mut self, date: NaiveDate, time: Option<String>) -> Self {
        self.preferred_date = Some(date);
        self.preferred_time = time;
        self
    }

    /// Checks the per-kind required fields
    ///
    /// Name and a valid email are always required. Contact and enquiry
    /// forms need a message; bookings need a preferred date that is not
    /// before `today`.
    pub fn validate(&self, today: NaiveDate) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::RequiredField { field: "name".to_string() });
        }
        if self.email.trim().is_empty() {
            return Err(ValidationError::RequiredField { field: "email".to_string() });
        }
        if !is_valid_email(&self.email) {
            return Err(ValidationError::InvalidFormat { field: "email".to_string() });
        }

        match self.kind {
            EnquiryKind::Contact | EnquiryKind::Enquiry => {
                if self.message.trim().is_empty() {
                    return Err(ValidationError::RequiredField { field: "message".to_string() });
                }
            }
            EnquiryKind::Booking => match self.preferred_date {
                None => {
                    return Err(ValidationError::RequiredField {
                        field: "preferred_date".to_string(),
                    })
                }
                Some(date) if date < today => {
                    return Err(ValidationError::DateInPast {
                        field: "preferred_date".to_string(),
                    })
                }
                Some(_) => {}
            },
        }

        Ok(())
    }

    /// Template parameters describing this submission
    pub fn template_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("enquiry_id", self.id.to_string()),
            ("enquiry_kind", self.kind.to_string()),
            ("subject", self.kind.subject().to_string()),
            ("from_name", self.name.clone()),
            ("from_email", self.email.clone()),
            ("message", self.message.clone()),
            ("submitted_at", self.submitted_at.to_rfc3339()),
        ];
        if let Some(phone) = &self.phone {
            params.push(("phone", phone.clone()));
        }
        if let Some(service) = &self.service {
            params.push(("service", service.clone()));
        }
        if let Some(date) = self.preferred_date {
            params.push(("preferred_date", date.format("%Y-%m-%d").to_string()));
        }
        if let Some(time) = &self.preferred_time {
            params.push(("preferred_time", time.clone()));
        }
        params
    }
}
