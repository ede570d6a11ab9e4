use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use cs_core::{Clock, EmailDeliveryTrait};
use cs_shared::utils::email::mask_email;
use cs_shared::ApiResponse;

use crate::dto::verification::{SendCodeRequest, SendCodeResponse};
use crate::handlers::ApiError;
use crate::routes::{request_id, AppState};

/// Handler for POST /api/v1/verification/send-code
///
/// Issues a fresh code for the address, replacing any earlier one, and
/// emails it.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "jane@example.com",
///     "name": "Jane"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "data": {
///         "message": "Verification code sent. Please check your inbox",
///         "expires_in_minutes": 15
///     },
///     "timestamp": "2026-01-14T10:00:00Z",
///     "request_id": "550e8400-e29b-41d4-a716-446655440000"
/// }
/// ```
///
/// ## Errors
/// - 400 invalid email or missing name
/// - 503 the email could not be sent
pub async fn send_code<E, C>(
    req: HttpRequest,
    state: web::Data<AppState<E, C>>,
    request: web::Json<SendCodeRequest>,
) -> Result<HttpResponse, ApiError>
where
    E: EmailDeliveryTrait + 'static,
    C: Clock + 'static,
{
    let request_id = request_id(&req);
    let request = request.into_inner();

    log::info!(
        "[{}] Processing send_code request for email: {}",
        request_id,
        mask_email(&request.email)
    );

    request.validate()?;

    let result = state
        .otp_service
        .request_verification(&request.email, request.name.trim())
        .await?;

    log::info!(
        "[{}] Verification code sent to: {}, message_id: {}",
        request_id,
        mask_email(&result.recipient),
        result.message_id
    );

    let response = SendCodeResponse {
        message: "Verification code sent. Please check your inbox".to_string(),
        expires_in_minutes: result.expires_in_minutes,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response).with_request_id(request_id)))
}
