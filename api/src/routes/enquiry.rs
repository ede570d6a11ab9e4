//! Contact, enquiry and booking form relay

use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Utc;
use validator::Validate;

use cs_core::{Clock, EmailDeliveryTrait};
use cs_shared::utils::email::mask_email;
use cs_shared::ApiResponse;

use crate::dto::enquiry::{EnquiryRequest, EnquiryResponse};
use crate::handlers::ApiError;
use crate::routes::{request_id, AppState};

/// Handler for POST /api/v1/enquiries
///
/// # Request Body
///
/// ```json
/// {
///     "kind": "booking",
///     "name": "Jane",
///     "email": "jane@example.com",
///     "phone": "+44 7700 900123",
///     "message": "First session please",
///     "service": "Counselling",
///     "preferred_date": "2026-03-02",
///     "preferred_time": "Morning"
/// }
/// ```
///
/// ## Errors
/// - 400 missing or invalid fields, or a preferred date in the past
/// - 403 the email address has not been verified
/// - 503 the submission could not be relayed
pub async fn submit_enquiry<E, C>(
    req: HttpRequest,
    state: web::Data<AppState<E, C>>,
    request: web::Json<EnquiryRequest>,
) -> Result<HttpResponse, ApiError>
where
    E: EmailDeliveryTrait + 'static,
    C: Clock + 'static,
{
    let request_id = request_id(&req);
    let request = request.into_inner();

    log::info!(
        "[{}] Processing {} submission from email: {}",
        request_id,
        request.kind,
        mask_email(&request.email)
    );

    request.validate()?;

    let receipt = state
        .enquiry_service
        .submit(request.into_enquiry(Utc::now()))
        .await?;

    log::info!(
        "[{}] {} {} relayed, message_id: {}",
        request_id,
        receipt.kind,
        receipt.id,
        receipt.message_id
    );

    Ok(HttpResponse::Ok().json(
        ApiResponse::success(EnquiryResponse::from(receipt)).with_request_id(request_id),
    ))
}
