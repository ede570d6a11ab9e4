use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use cs_core::{Clock, EmailDeliveryTrait};
use cs_shared::ApiResponse;

use crate::dto::verification::{StatusQuery, StatusResponse};
use crate::handlers::ApiError;
use crate::routes::{request_id, AppState};

/// Handler for GET /api/v1/verification/status?email=...
pub async fn status<E, C>(
    req: HttpRequest,
    state: web::Data<AppState<E, C>>,
    query: web::Query<StatusQuery>,
) -> Result<HttpResponse, ApiError>
where
    E: EmailDeliveryTrait + 'static,
    C: Clock + 'static,
{
    let request_id = request_id(&req);
    let query = query.into_inner();
    query.validate()?;

    let verified = state.otp_service.is_verified(&query.email);

    Ok(HttpResponse::Ok().json(
        ApiResponse::success(StatusResponse { verified }).with_request_id(request_id),
    ))
}
