//! Domain-specific error types and error handling.

mod types;

pub use types::{SendError, ValidationError, VerificationError};

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Email address has not been verified: {address}")]
    EmailNotVerified { address: String },

    // Bridge to specific error types
    #[error(transparent)]
    Verification(#[from] VerificationError),

    #[error(transparent)]
    Delivery(#[from] SendError),

    #[error(transparent)]
    ValidationErr(#[from] ValidationError),
}

pub type DomainResult<T> = Result<T, DomainError>;
