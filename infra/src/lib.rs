//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the CalmSpace backend.
//! It provides the concrete email delivery services behind the core
//! `EmailDeliveryTrait`.
//!
//! ## Architecture
//!
//! - **Email**: template-based email HTTP API client, a mock for development,
//!   a failover wrapper and the adapter to the core trait

/// Email service module - external email providers
pub mod email;

pub use email::{
    create_email_service, EmailDeliveryAdapter, EmailKind, EmailMessage, EmailService,
    FailoverEmailService, MockEmailService, TemplateApiEmailService,
};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Email service error
    #[error("Email service error: {0}")]
    Email(String),
}
