//! Error types for verification, delivery and input validation

use thiserror::Error;

/// Why a submitted code was not accepted
///
/// Each variant carries a distinct, user-facing message so the visitor knows
/// whether to request a new code or retype the current one.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationError {
    #[error("No verification code has been requested for this email address")]
    NotFound,

    #[error("This verification code has expired. Please request a new one")]
    Expired,

    #[error("The verification code is incorrect")]
    Mismatch,
}

impl VerificationError {
    /// Machine-readable code for API clients
    pub fn code(&self) -> &'static str {
        match self {
            VerificationError::NotFound => "code_not_requested",
            VerificationError::Expired => "code_expired",
            VerificationError::Mismatch => "code_mismatch",
        }
    }
}

/// Email delivery failure reported by the delivery collaborator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SendError {
    #[error("Email delivery failed: {reason}")]
    Delivery { reason: String },
}

impl SendError {
    pub fn delivery(reason: impl Into<String>) -> Self {
        SendError::Delivery { reason: reason.into() }
    }

    /// Message safe to show to the visitor; provider details stay in the logs
    pub fn user_message(&self) -> &'static str {
        "We could not send the email right now. Please try again"
    }
}

/// Input validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },

    #[error("Date is in the past: {field}")]
    DateInPast { field: String },
}

impl ValidationError {
    /// Name of the offending field
    pub fn field(&self) -> &str {
        match self {
            ValidationError::RequiredField { field }
            | ValidationError::InvalidFormat { field }
            | ValidationError::DateInPast { field } => field,
        }
    }
}
