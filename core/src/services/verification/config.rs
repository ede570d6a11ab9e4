//! Configuration for the verification service

use chrono::Duration;
use std::time::Duration as StdDuration;

use cs_shared::config::otp::{MAX_CODE_LENGTH, MAX_TTL_MINUTES};
use cs_shared::OtpConfig;

use crate::domain::entities::otp_record::{CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES};

/// Configuration for the verification service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationServiceConfig {
    /// Number of digits in each generated code
    pub code_length: usize,
    /// Number of minutes before a verification code expires
    pub code_expiration_minutes: i64,
    /// Whether the background sweep of expired records runs
    pub sweep_enabled: bool,
    /// Interval between background sweeps
    pub sweep_interval: StdDuration,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            code_length: CODE_LENGTH,
            code_expiration_minutes: DEFAULT_EXPIRATION_MINUTES,
            sweep_enabled: true,
            sweep_interval: StdDuration::from_secs(300),
        }
    }
}

impl VerificationServiceConfig {
    /// Code length actually used, kept within 1..=MAX_CODE_LENGTH
    pub fn effective_code_length(&self) -> usize {
        self.code_length.clamp(1, MAX_CODE_LENGTH)
    }

    /// Code lifetime in minutes actually used, kept within 1..=MAX_TTL_MINUTES
    pub fn effective_expiration_minutes(&self) -> i64 {
        self.code_expiration_minutes.clamp(1, MAX_TTL_MINUTES)
    }

    /// Code lifetime as a duration
    pub fn code_ttl(&self) -> Duration {
        Duration::try_minutes(self.effective_expiration_minutes())
            .unwrap_or_else(|| Duration::minutes(DEFAULT_EXPIRATION_MINUTES))
    }
}

impl From<&OtpConfig> for VerificationServiceConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            code_length: config.code_length,
            code_expiration_minutes: config.ttl_minutes,
            sweep_enabled: config.sweep_enabled,
            sweep_interval: StdDuration::from_secs(config.sweep_interval_seconds),
        }
    }
}
