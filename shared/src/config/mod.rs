//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical business areas:
//! - `email` - Email delivery provider and template API credentials
//! - `environment` - Environment detection and logging configuration
//! - `otp` - One-time code length, lifetime and sweeping
//! - `server` - HTTP server and CORS configuration
//!
//! Values are layered: built-in defaults, then an optional
//! `config/<environment>.toml` file, then `CALMSPACE__*` environment variables
//! (`__` separates nested keys, e.g. `CALMSPACE__OTP__TTL_MINUTES=10`).

pub mod email;
pub mod environment;
pub mod otp;
pub mod server;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use email::{EmailConfig, EmailProvider, TemplateApiConfig};
pub use environment::{Environment, LoggingConfig};
pub use otp::{EnquiryConfig, OtpConfig};
pub use server::{CorsConfig, ServerConfig};

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "CALMSPACE";

/// Configuration loading and validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// CORS configuration
    pub cors: CorsConfig,

    /// One-time code configuration
    pub otp: OtpConfig,

    /// Email delivery configuration
    pub email: EmailConfig,

    /// Enquiry relay configuration
    pub enquiry: EnquiryConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig::new("127.0.0.1", 8080),
            cors: CorsConfig::development(),
            logging: LoggingConfig::for_environment(Environment::Development),
            ..Default::default()
        }
    }

    /// Create configuration for production environment
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig::new("0.0.0.0", 8080),
            cors: CorsConfig::default(),
            email: EmailConfig {
                provider: EmailProvider::Template,
                ..Default::default()
            },
            logging: LoggingConfig::for_environment(Environment::Production),
            ..Default::default()
        }
    }

    /// Baseline configuration for an environment, before any file or
    /// environment variable overrides
    pub fn for_environment(environment: Environment) -> Self {
        match environment {
            Environment::Development => Self::development(),
            Environment::Production => Self::production(),
            Environment::Staging => Self {
                environment: Environment::Staging,
                logging: LoggingConfig::for_environment(Environment::Staging),
                ..Self::production()
            },
        }
    }

    /// Load configuration for the environment named by `ENVIRONMENT`
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_for(Environment::from_env())
    }

    /// Load configuration for a specific environment
    ///
    /// The environment baseline is serialized into the lowest layer so that
    /// a partial file or a single environment variable only overrides the
    /// keys it names.
    pub fn load_for(environment: Environment) -> Result<Self, ConfigError> {
        let baseline = Self::for_environment(environment);
        let defaults = config::Config::try_from(&baseline)?;

        let settings = config::Config::builder()
            .add_source(defaults)
            .add_source(config::File::with_name(environment.config_file()).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
                    .try_parsing(true),
            )
            .build()?;

        let mut loaded: AppConfig = settings.try_deserialize()?;
        loaded.environment = environment;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Check cross-field constraints that serde defaults cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.otp.validate().map_err(ConfigError::Invalid)?;
        self.email.validate().map_err(ConfigError::Invalid)?;
        Ok(())
    }

    /// Check if running in development
    pub fn is_development(&self) -> bool {
        self.environment.is_development()
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment.is_production()
    }
}
