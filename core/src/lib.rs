//! # CalmSpace Core
//!
//! Core business logic for the CalmSpace backend: the one-time code lifecycle
//! that proves a visitor controls an email address, the enquiry relay that
//! depends on it, the collaborator traits they call out through, and the
//! domain error types.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::{
    Clock, EmailDeliveryTrait, EnquiryReceipt, EnquiryService, EnquiryServiceConfig,
    ManualClock, OtpService, OtpSweeper, SendCodeResult, SweepResult, SystemClock,
    VerificationServiceConfig, VerifyCodeResult,
};
