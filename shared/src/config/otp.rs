//! One-time code and enquiry relay configuration

use serde::{Deserialize, Serialize};

/// Longest code the service will generate or accept
pub const MAX_CODE_LENGTH: usize = 12;

/// Longest code lifetime, one day
pub const MAX_TTL_MINUTES: i64 = 24 * 60;

/// One-time code configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct OtpConfig {
    /// Number of digits in a generated code
    pub code_length: usize,

    /// Minutes a code stays valid after it is issued
    pub ttl_minutes: i64,

    /// Run the background sweep of expired records
    pub sweep_enabled: bool,

    /// Seconds between background sweeps
    pub sweep_interval_seconds: u64,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            code_length: 6,
            ttl_minutes: 15,
            sweep_enabled: true,
            sweep_interval_seconds: 300,
        }
    }
}

impl OtpConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.code_length == 0 || self.code_length > MAX_CODE_LENGTH {
            return Err(format!("otp.code_length must be between 1 and {}", MAX_CODE_LENGTH));
        }
        if self.ttl_minutes <= 0 || self.ttl_minutes > MAX_TTL_MINUTES {
            return Err(format!("otp.ttl_minutes must be between 1 and {}", MAX_TTL_MINUTES));
        }
        if self.sweep_enabled && self.sweep_interval_seconds == 0 {
            return Err("otp.sweep_interval_seconds must be positive when sweeping".to_string());
        }
        Ok(())
    }
}

/// Enquiry relay configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct EnquiryConfig {
    /// Reject submissions whose email address has not passed verification
    pub require_verified_email: bool,
}

impl Default for EnquiryConfig {
    fn default() -> Self {
        Self {
            require_verified_email: true,
        }
    }
}
