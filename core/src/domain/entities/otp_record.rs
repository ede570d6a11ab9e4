//! One-time code record for email address verification.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng};
use serde::{Deserialize, Serialize};

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Default lifetime of a verification code (15 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 15;

/// Generates a numeric code of exactly `length` digits
///
/// Each digit is drawn independently and uniformly from 0-9 using the OS
/// CSPRNG, so leading zeros are as likely as any other digit.
pub fn generate_code(length: usize) -> String {
    let mut rng = OsRng;
    (0..length)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

/// Stored state for one recipient address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRecord {
    /// The numeric code that was sent
    pub code: String,

    /// Timestamp when the code was issued
    pub created_at: DateTime<Utc>,

    /// Timestamp when the code stops being accepted
    pub expires_at: DateTime<Utc>,

    /// Set once the code has been successfully verified
    pub verified: bool,
}

impl OtpRecord {
    /// Creates an unverified record issued at `now`
    ///
    /// An expiry past the representable range saturates at the latest
    /// representable instant.
    pub fn issue(code: String, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            code,
            created_at: now,
            expires_at: now.checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC),
            verified: false,
        }
    }

    /// A record is expired from the instant its lifetime has fully elapsed
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Compares the submitted code without leaking the mismatch position
    pub fn matches(&self, submitted: &str) -> bool {
        self.code.len() == submitted.len()
            && constant_time_eq(self.code.as_bytes(), submitted.as_bytes())
    }

    /// Marks the record verified
    pub fn mark_verified(&mut self) {
        self.verified = true;
    }

    /// Time left before expiry, zero once expired
    pub fn time_until_expiration(&self, now: DateTime<Utc>) -> Duration {
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }
}
