//! Domain entities representing core business objects.

pub mod enquiry;
pub mod otp_record;

// Re-export commonly used types
pub use enquiry::{Enquiry, EnquiryKind};
pub use otp_record::{generate_code, OtpRecord, CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES};
