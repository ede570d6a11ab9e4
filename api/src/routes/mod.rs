//! Route handlers
//!
//! - `verification` - sending, checking and clearing email verification codes
//! - `enquiry` - contact, enquiry and booking form relay

pub mod enquiry;
pub mod verification;

use actix_web::HttpRequest;
use std::sync::Arc;
use uuid::Uuid;

use cs_core::{Clock, EmailDeliveryTrait, EnquiryService, OtpService, SystemClock};

/// Header carrying a caller-supplied request id
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Application state that holds shared services
pub struct AppState<E, C = SystemClock>
where
    E: EmailDeliveryTrait,
    C: Clock,
{
    pub otp_service: Arc<OtpService<E, C>>,
    pub enquiry_service: Arc<EnquiryService<E, C>>,
    /// Name of the active email provider, reported by the health check
    pub email_provider: String,
}

/// Request id from the `X-Request-Id` header, or a fresh one
pub fn request_id(req: &HttpRequest) -> String {
    req.headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.trim().is_empty())
        .map(|value| value.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}
