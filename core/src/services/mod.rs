//! Business services containing domain logic and use cases.

pub mod enquiry;
pub mod verification;

// Re-export commonly used types
pub use enquiry::{EnquiryReceipt, EnquiryService, EnquiryServiceConfig};
pub use verification::{
    Clock, EmailDeliveryTrait, ManualClock, OtpService, OtpSweeper, SendCodeResult,
    SweepResult, SystemClock, VerificationServiceConfig, VerifyCodeResult,
};
