//! Request and response bodies

pub mod enquiry;
pub mod verification;

pub use enquiry::{EnquiryRequest, EnquiryResponse};
pub use verification::{
    ResetRequest, ResetResponse, SendCodeRequest, SendCodeResponse, StatusQuery, StatusResponse,
    VerifyCodeRequest, VerifyCodeResponse,
};
