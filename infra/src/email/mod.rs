//! Email Service Module
//!
//! This module provides email service implementations for delivering
//! verification codes and relaying form submissions.
//!
//! ## Features
//!
//! - **Email Service Trait**: Common interface for all providers
//! - **Mock Implementation**: Log output for development
//! - **Template API Support**: Production delivery via a hosted template email API
//! - **Failover**: Alternate account used when the primary fails
//! - **Security**: Address masking in logs

use std::time::Duration;

use cs_shared::{EmailConfig, EmailProvider};

pub mod adapter;
pub mod email_service;
pub mod failover_email;
pub mod mock_email;
pub mod template_api;

// Re-export commonly used types
pub use adapter::EmailDeliveryAdapter;
pub use email_service::{EmailKind, EmailMessage, EmailService};
pub use failover_email::FailoverEmailService;
pub use mock_email::MockEmailService;
pub use template_api::TemplateApiEmailService;

#[cfg(test)]
mod tests;

/// Create an email service based on configuration
///
/// Returns the implementation selected by `config.provider`. A provider
/// that cannot be built is replaced by the mock service, with an error log.
pub fn create_email_service(config: &EmailConfig) -> Box<dyn EmailService> {
    match config.provider {
        EmailProvider::Mock => Box::new(MockEmailService::new()),
        EmailProvider::Template => {
            match TemplateApiEmailService::new(config.primary.clone(), "TemplateApi") {
                Ok(service) => Box::new(service),
                Err(e) => {
                    tracing::error!("Failed to initialize template email service: {}", e);
                    tracing::warn!("Falling back to mock email service");
                    Box::new(MockEmailService::new())
                }
            }
        }
        EmailProvider::Failover => create_failover_email_service(config),
    }
}

/// Create a failover email service with the primary and fallback accounts
///
/// With only one usable account the failover wrapper is skipped.
pub fn create_failover_email_service(config: &EmailConfig) -> Box<dyn EmailService> {
    let primary = match TemplateApiEmailService::new(config.primary.clone(), "TemplateApi (primary)") {
        Ok(service) => Some(Box::new(service) as Box<dyn EmailService>),
        Err(e) => {
            tracing::warn!("Failed to initialize primary email service: {}", e);
            None
        }
    };

    let backup = match &config.fallback {
        Some(fallback) => match TemplateApiEmailService::new(fallback.clone(), "TemplateApi (fallback)") {
            Ok(service) => Some(Box::new(service) as Box<dyn EmailService>),
            Err(e) => {
                tracing::warn!("Failed to initialize fallback email service: {}", e);
                None
            }
        },
        None => {
            tracing::warn!("No fallback email account configured");
            None
        }
    };

    match (primary, backup) {
        (Some(primary), Some(backup)) => {
            tracing::info!("Created failover email service with primary and fallback accounts");
            Box::new(FailoverEmailService::new(
                primary,
                backup,
                Duration::from_secs(config.failover_timeout_secs),
            ))
        }
        (Some(service), None) | (None, Some(service)) => {
            tracing::warn!("Only one email account available, failover disabled");
            service
        }
        (None, None) => {
            tracing::error!("No email services available, using mock implementation");
            Box::new(MockEmailService::new())
        }
    }
}
