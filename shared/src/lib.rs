//! Shared utilities and common types for the CalmSpace server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types and layered loading
//! - API response envelope and error body
//! - Email address utilities (validation, normalisation, log masking)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, ConfigError, CorsConfig, EmailConfig, EmailProvider, EnquiryConfig, Environment,
    LoggingConfig, OtpConfig, ServerConfig, TemplateApiConfig,
};
pub use types::{ApiResponse, ErrorResponse, HealthResponse, HealthStatus};
pub use utils::email;
