//! Mapping from domain and request errors to HTTP responses

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::collections::HashMap;
use thiserror::Error;

use cs_core::errors::{DomainError, ValidationError, VerificationError};
use cs_shared::ErrorResponse;

/// Error returned by every API handler
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Invalid request data")]
    Validation(#[from] validator::ValidationErrors),

    /// Body or query string could not be parsed
    #[error("Malformed request: {0}")]
    Malformed(String),
}

impl From<VerificationError> for ApiError {
    fn from(error: VerificationError) -> Self {
        ApiError::Domain(error.into())
    }
}

impl From<cs_core::errors::SendError> for ApiError {
    fn from(error: cs_core::errors::SendError) -> Self {
        ApiError::Domain(error.into())
    }
}

impl ApiError {
    /// Machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Domain(DomainError::Verification(e)) => e.code(),
            ApiError::Domain(DomainError::Delivery(_)) => "email_delivery_failed",
            ApiError::Domain(DomainError::EmailNotVerified { .. }) => "email_not_verified",
            ApiError::Domain(DomainError::ValidationErr(_)) => "validation_error",
            ApiError::Validation(_) | ApiError::Malformed(_) => "validation_error",
        }
    }

    /// Message shown to the visitor
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Domain(DomainError::Verification(e)) => e.to_string(),
            ApiError::Domain(DomainError::Delivery(e)) => e.user_message().to_string(),
            ApiError::Domain(DomainError::EmailNotVerified { .. }) => {
                "Please verify your email address before submitting this form".to_string()
            }
            ApiError::Domain(DomainError::ValidationErr(e)) => validation_message(e),
            ApiError::Validation(_) => "Invalid request data. Please check the highlighted fields".to_string(),
            ApiError::Malformed(_) => "The request could not be read".to_string(),
        }
    }

    fn details(&self) -> Option<HashMap<String, Vec<String>>> {
        match self {
            ApiError::Validation(errors) => Some(
                errors
                    .field_errors()
                    .into_iter()
                    .map(|(field, errors)| {
                        let messages = errors
                            .iter()
                            .map(|e| {
                                e.message
                                    .as_ref()
                                    .map(|m| m.to_string())
                                    .unwrap_or_else(|| e.code.to_string())
                            })
                            .collect();
                        (field.to_string(), messages)
                    })
                    .collect(),
            ),
            ApiError::Domain(DomainError::ValidationErr(e)) => {
                Some(HashMap::from([(e.field().to_string(), vec![validation_message(e)])]))
            }
            _ => None,
        }
    }
}

fn validation_message(error: &ValidationError) -> String {
    match error {
        ValidationError::RequiredField { field } => format!("{} is required", field),
        ValidationError::InvalidFormat { field } => format!("{} is not valid", field),
        ValidationError::DateInPast { field } => format!("{} cannot be in the past", field),
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Domain(DomainError::Verification(VerificationError::NotFound)) => StatusCode::NOT_FOUND,
            ApiError::Domain(DomainError::Verification(VerificationError::Expired)) => StatusCode::GONE,
            ApiError::Domain(DomainError::Verification(VerificationError::Mismatch)) => StatusCode::BAD_REQUEST,
            ApiError::Domain(DomainError::Delivery(_)) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Domain(DomainError::EmailNotVerified { .. }) => StatusCode::FORBIDDEN,
            ApiError::Domain(DomainError::ValidationErr(_)) => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) | ApiError::Malformed(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("API Error: {:?}", self);
        } else {
            log::warn!("API Error: {}", self);
        }

        let mut body = ErrorResponse::new(self.code(), self.user_message());
        if let Some(details) = self.details() {
            body = body.add_detail("fields", details);
        }

        HttpResponse::build(status).json(body)
    }
}
