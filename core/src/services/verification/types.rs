//! Types for verification service results

use chrono::{DateTime, Utc};

/// Result of sending a verification code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendCodeResult {
    /// Normalised address the code was issued for
    pub recipient: String,
    /// The email message ID from the provider
    pub message_id: String,
    /// When the issued code stops being accepted
    pub expires_at: DateTime<Utc>,
    /// Code lifetime in minutes, as quoted in the email
    pub expires_in_minutes: i64,
}

/// Result of a successful code verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyCodeResult {
    /// Normalised address that is now verified
    pub recipient: String,
    /// When the verification lapses along with the record
    pub expires_at: DateTime<Utc>,
}
