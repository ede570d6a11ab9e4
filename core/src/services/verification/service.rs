//! Main verification service implementation

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use cs_shared::utils::email::{mask_email, normalize_email};

use crate::domain::entities::otp_record::{self, OtpRecord};
use crate::errors::{SendError, VerificationError};

use super::config::VerificationServiceConfig;
use super::traits::{Clock, EmailDeliveryTrait, SystemClock};
use super::types::{SendCodeResult, VerifyCodeResult};

/// One-time code lifecycle manager for email address verification
///
/// Owns the per-address record store. Every operation on an address is a
/// single read-modify-write under the store lock; the lock is released before
/// any email is sent.
pub struct OtpService<E: EmailDeliveryTrait, C: Clock = SystemClock> {
    /// Email service for delivering codes
    email_service: Arc<E>,
    /// Time source for issuing and expiring codes
    clock: Arc<C>,
    /// Service configuration
    config: VerificationServiceConfig,
    /// Records keyed by normalised address
    records: Mutex<HashMap<String, OtpRecord>>,
}

impl<E: EmailDeliveryTrait> OtpService<E, SystemClock> {
    /// Create a new verification service using the wall clock
    pub fn new(email_service: Arc<E>, config: VerificationServiceConfig) -> Self {
        Self::with_clock(email_service, Arc::new(SystemClock), config)
    }
}

impl<E: EmailDeliveryTrait, C: Clock> OtpService<E, C> {
    /// Create a new verification service with an explicit time source
    pub fn with_clock(
        email_service: Arc<E>,
        clock: Arc<C>,
        config: VerificationServiceConfig,
    ) -> Self {
        Self {
            email_service,
            clock,
            config,
            records: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &VerificationServiceConfig {
        &self.config
    }

    /// Generate a code of the configured length
    pub fn generate_code(&self) -> String {
        otp_record::generate_code(self.config.effective_code_length())
    }

    /// Issue a fresh code for `address`, replacing any previous record
    ///
    /// Returns the code; nothing is sent.
    pub fn create_and_store(&self, address: &str) -> String {
        self.issue(address).code
    }

    /// Issue a fresh code and email it to `address`
    ///
    /// The record is stored before delivery is attempted and is kept when
    /// delivery fails, so a code that did reach the visitor still verifies.
    /// No retries happen here.
    pub async fn request_verification(
        &self,
        address: &str,
        display_name: &str,
    ) -> Result<SendCodeResult, SendError> {
        let key = normalize_email(address);
        let record = self.issue(&key);

        let message_id = self
            .email_service
            .send_verification_code(
                &key,
                display_name,
                &record.code,
                self.config.effective_expiration_minutes(),
            )
            .await
            .map_err(|e| {
                tracing::error!(
                    email = %mask_email(&key),
                    error = %e,
                    event = "otp_delivery_failed",
                    "Failed to send verification code email"
                );
                SendError::delivery(e)
            })?;

        tracing::info!(
            email = %mask_email(&key),
            message_id = %message_id,
            event = "otp_sent",
            "Verification code email sent"
        );

        Ok(SendCodeResult {
            recipient: key,
            message_id,
            expires_at: record.expires_at,
            expires_in_minutes: self.config.effective_expiration_minutes(),
        })
    }

    /// Check a submitted code against the stored record
    ///
    /// The code is compared exactly; callers strip any transport whitespace.
    /// An expired record is removed and reported as [`VerificationError::Expired`];
    /// a mismatch leaves the record in place so the visitor can retry.
    /// Verifying again with the correct code succeeds until expiry.
    pub fn verify(&self, address: &str, code: &str) -> Result<VerifyCodeResult, VerificationError> {
        let key = normalize_email(address);
        let now = self.clock.now();
        let mut records = self.records();

        let mut entry = match records.entry(key.clone()) {
            Entry::Occupied(entry) => entry,
            Entry::Vacant(_) => {
                tracing::warn!(
                    email = %mask_email(&key),
                    event = "otp_not_found",
                    "Verification attempted without a requested code"
                );
                return Err(VerificationError::NotFound);
            }
        };

        if entry.get().is_expired_at(now) {
            entry.remove();
            tracing::warn!(
                email = %mask_email(&key),
                event = "otp_expired",
                "Expired verification code submitted"
            );
            return Err(VerificationError::Expired);
        }

        if !entry.get().matches(code) {
            tracing::warn!(
                email = %mask_email(&key),
                event = "otp_verification_failed",
                "Incorrect verification code submitted"
            );
            return Err(VerificationError::Mismatch);
        }

        let record = entry.get_mut();
        record.mark_verified();
        let expires_at = record.expires_at;
        drop(records);

        tracing::info!(
            email = %mask_email(&key),
            event = "otp_verified_success",
            "Email address verified"
        );

        Ok(VerifyCodeResult {
            recipient: key,
            expires_at,
        })
    }

    /// Whether `address` holds an unexpired, verified record
    ///
    /// An expired record is pruned and reported as unverified.
    pub fn is_verified(&self, address: &str) -> bool {
        let key = normalize_email(address);
        let now = self.clock.now();
        let mut records = self.records();

        let (expired, verified) = match records.get(&key) {
            Some(record) => (record.is_expired_at(now), record.verified),
            None => return false,
        };

        if expired {
            records.remove(&key);
            return false;
        }
        verified
    }

    /// Remove and return the record for `address` if it is verified and
    /// unexpired
    ///
    /// The check and the removal happen under one lock, so a verification
    /// can be consumed at most once. An expired record is pruned.
    pub fn take_verified(&self, address: &str) -> Option<OtpRecord> {
        let key = normalize_email(address);
        let now = self.clock.now();
        let mut records = self.records();

        let entry = match records.entry(key) {
            Entry::Occupied(entry) => entry,
            Entry::Vacant(_) => return None,
        };

        if entry.get().is_expired_at(now) {
            entry.remove();
            return None;
        }
        if !entry.get().verified {
            return None;
        }

        let (key, record) = entry.remove_entry();
        tracing::info!(
            email = %mask_email(&key),
            event = "otp_consumed",
            "Verification consumed"
        );
        Some(record)
    }

    /// Put back a record previously taken with [`Self::take_verified`]
    ///
    /// Nothing is restored when a newer code has been issued for the address
    /// in the meantime or the record has since expired. Returns whether the
    /// record was restored.
    pub fn restore(&self, address: &str, record: OtpRecord) -> bool {
        let key = normalize_email(address);
        if record.is_expired_at(self.clock.now()) {
            return false;
        }

        match self.records().entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(record);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Forget any record for `address`; absent records are fine
    pub fn reset(&self, address: &str) {
        let key = normalize_email(address);
        if self.records().remove(&key).is_some() {
            tracing::info!(
                email = %mask_email(&key),
                event = "otp_reset",
                "Cleared verification record"
            );
        }
    }

    /// Remove every expired record, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut records = self.records();
        let before = records.len();
        records.retain(|_, record| !record.is_expired_at(now));
        before - records.len()
    }

    /// Number of records currently held
    pub fn pending_count(&self) -> usize {
        self.records().len()
    }

    fn issue(&self, address: &str) -> OtpRecord {
        let key = normalize_email(address);
        let record = OtpRecord::issue(self.generate_code(), self.clock.now(), self.config.code_ttl());

        // Replaces any previous code for this address
        self.records().insert(key.clone(), record.clone());

        tracing::info!(
            email = %mask_email(&key),
            event = "otp_generated",
            expires_at = %record.expires_at,
            "Generated new verification code"
        );

        record
    }

    fn records(&self) -> MutexGuard<'_, HashMap<String, OtpRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
