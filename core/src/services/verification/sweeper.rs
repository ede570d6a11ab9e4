//! Periodic removal of expired verification records
//!
//! Expiry is enforced lazily by the service itself; the sweep only keeps the
//! store from growing in a long-running process.

use std::sync::Arc;
use tracing::{debug, info, warn};

use super::service::OtpService;
use super::traits::{Clock, EmailDeliveryTrait};

/// Background sweeper for an [`OtpService`]
pub struct OtpSweeper<E: EmailDeliveryTrait + 'static, C: Clock + 'static> {
    service: Arc<OtpService<E, C>>,
}

impl<E: EmailDeliveryTrait + 'static, C: Clock + 'static> OtpSweeper<E, C> {
    pub fn new(service: Arc<OtpService<E, C>>) -> Self {
        Self { service }
    }

    /// Run a single sweep
    pub fn run_sweep(&self) -> SweepResult {
        let purged = self.service.purge_expired();
        let remaining = self.service.pending_count();

        if purged > 0 {
            info!(
                purged = purged,
                remaining = remaining,
                event = "otp_sweep",
                "Removed expired verification records"
            );
        } else {
            debug!(remaining = remaining, event = "otp_sweep", "No expired verification records");
        }

        SweepResult { purged, remaining }
    }

    /// Start the sweeper as a background task
    ///
    /// Returns `None` when sweeping is disabled in the service configuration.
    pub fn start_background_task(self: Arc<Self>) -> Option<tokio::task::JoinHandle<()>> {
        let config = self.service.config();
        if !config.sweep_enabled {
            warn!("Verification record sweep is disabled");
            return None;
        }

        let interval = config.sweep_interval;

        Some(tokio::spawn(async move {
            info!(
                "Verification record sweep started - will run every {} seconds",
                interval.as_secs()
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;
                self.run_sweep();
            }
        }))
    }
}

/// Result of a sweep
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepResult {
    /// Number of expired records removed
    pub purged: usize,
    /// Number of records left in the store
    pub remaining: usize,
}
