use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use cs_core::{Clock, EmailDeliveryTrait};
use cs_shared::utils::email::mask_email;
use cs_shared::ApiResponse;

use crate::dto::verification::{ResetRequest, ResetResponse};
use crate::handlers::ApiError;
use crate::routes::{request_id, AppState};

/// Handler for POST /api/v1/verification/reset
///
/// Forgets any code or verification held for the address. Succeeds whether
/// or not a record existed.
pub async fn reset<E, C>(
    req: HttpRequest,
    state: web::Data<AppState<E, C>>,
    request: web::Json<ResetRequest>,
) -> Result<HttpResponse, ApiError>
where
    E: EmailDeliveryTrait + 'static,
    C: Clock + 'static,
{
    let request_id = request_id(&req);
    let request = request.into_inner();
    request.validate()?;

    state.otp_service.reset(&request.email);

    log::info!(
        "[{}] Verification reset for email: {}",
        request_id,
        mask_email(&request.email)
    );

    let response = ResetResponse {
        message: "Verification state cleared".to_string(),
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(response).with_request_id(request_id)))
}
