use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use cs_core::{Clock, EmailDeliveryTrait};
use cs_shared::utils::email::mask_email;
use cs_shared::ApiResponse;

use crate::dto::verification::{VerifyCodeRequest, VerifyCodeResponse};
use crate::handlers::ApiError;
use crate::routes::{request_id, AppState};

/// Handler for POST /api/v1/verification/verify-code
///
/// # Request Body
///
/// ```json
/// {
///     "email": "jane@example.com",
///     "code": "042917"
/// }
/// ```
///
/// ## Errors
/// - 404 no code was requested for the address
/// - 410 the code has expired and was discarded
/// - 400 the code is wrong or malformed
pub async fn verify_code<E, C>(
    req: HttpRequest,
    state: web::Data<AppState<E, C>>,
    request: web::Json<VerifyCodeRequest>,
) -> Result<HttpResponse, ApiError>
where
    E: EmailDeliveryTrait + 'static,
    C: Clock + 'static,
{
    let request_id = request_id(&req);
    let request = request.into_inner();

    log::info!(
        "[{}] Processing verify_code request for email: {}",
        request_id,
        mask_email(&request.email)
    );

    request.validate()?;

    let result = state.otp_service.verify(&request.email, request.submitted_code())?;

    log::info!(
        "[{}] Email verified: {}",
        request_id,
        mask_email(&result.recipient)
    );

    Ok(HttpResponse::Ok().json(
        ApiResponse::success(VerifyCodeResponse { verified: true }).with_request_id(request_id),
    ))
}
