//! Application factory
//!
//! Builds the Actix-web application from shared state so that the server
//! binary and the integration tests wire routes the same way.

use actix_web::{middleware::Logger, web, App, HttpResponse};

use cs_core::{Clock, EmailDeliveryTrait};
use cs_shared::{CorsConfig, HealthResponse, HealthStatus};

use crate::handlers::ApiError;
use crate::middleware::cors::create_cors;
use crate::routes::enquiry::submit_enquiry;
use crate::routes::verification::{reset, send_code, status, verify_code};
use crate::routes::AppState;

/// Create and configure the application with all dependencies
pub fn create_app<E, C>(
    app_state: web::Data<AppState<E, C>>,
    cors_config: &CorsConfig,
    max_payload_size: usize,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    E: EmailDeliveryTrait + 'static,
    C: Clock + 'static,
{
    // Unreadable bodies and query strings get the same error body as
    // every other failure
    let json_config = web::JsonConfig::default()
        .limit(max_payload_size)
        .error_handler(|err, _req| ApiError::Malformed(err.to_string()).into());
    let query_config = web::QueryConfig::default()
        .error_handler(|err, _req| ApiError::Malformed(err.to_string()).into());

    App::new()
        .app_data(app_state)
        .app_data(json_config)
        .app_data(query_config)
        .wrap(create_cors(cors_config))
        .wrap(Logger::default())
        .route("/health", web::get().to(health_check::<E, C>))
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/verification")
                        .route("/send-code", web::post().to(send_code::<E, C>))
                        .route("/verify-code", web::post().to(verify_code::<E, C>))
                        .route("/status", web::get().to(status::<E, C>))
                        .route("/reset", web::post().to(reset::<E, C>)),
                )
                .route("/enquiries", web::post().to(submit_enquiry::<E, C>))
                .route("/", web::get().to(api_documentation)),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check<E, C>(state: web::Data<AppState<E, C>>) -> HttpResponse
where
    E: EmailDeliveryTrait + 'static,
    C: Clock + 'static,
{
    HttpResponse::Ok().json(HealthResponse {
        status: HealthStatus::Healthy,
        service: "calmspace-api".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        email_provider: state.email_provider.clone(),
        timestamp: chrono::Utc::now(),
    })
}

/// API documentation endpoint
async fn api_documentation() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "CalmSpace API v1",
        "endpoints": {
            "health": "/health",
            "verification": {
                "send_code": {
                    "path": "/api/v1/verification/send-code",
                    "method": "POST",
                    "description": "Email a one-time verification code",
                    "request_body": {
                        "email": "string (email address)",
                        "name": "string (1-100 chars)"
                    },
                    "responses": {
                        "200": "Code sent",
                        "400": "Invalid email or name",
                        "503": "Email could not be sent"
                    }
                },
                "verify_code": {
                    "path": "/api/v1/verification/verify-code",
                    "method": "POST",
                    "description": "Check a verification code",
                    "request_body": {
                        "email": "string (email address)",
                        "code": "string (digits)"
                    },
                    "responses": {
                        "200": "Email verified",
                        "400": "Incorrect or malformed code",
                        "404": "No code requested",
                        "410": "Code expired"
                    }
                },
                "status": {
                    "path": "/api/v1/verification/status?email=",
                    "method": "GET",
                    "description": "Whether an email address is currently verified"
                },
                "reset": {
                    "path": "/api/v1/verification/reset",
                    "method": "POST",
                    "description": "Clear verification state for an email address",
                    "request_body": {
                        "email": "string (email address)"
                    }
                }
            },
            "enquiries": {
                "path": "/api/v1/enquiries",
                "method": "POST",
                "description": "Relay a contact, enquiry or booking form to the practice",
                "request_body": {
                    "kind": "string ('contact', 'enquiry' or 'booking')",
                    "name": "string (1-100 chars)",
                    "email": "string (verified email address)",
                    "phone": "string (optional)",
                    "message": "string (required for contact and enquiry)",
                    "service": "string (optional)",
                    "preferred_date": "string YYYY-MM-DD (required for booking)",
                    "preferred_time": "string (optional)"
                },
                "responses": {
                    "200": "Submission relayed",
                    "400": "Missing or invalid fields",
                    "403": "Email address not verified",
                    "503": "Submission could not be relayed"
                }
            }
        }
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(cs_shared::ErrorResponse::new(
        "not_found",
        "The requested resource was not found",
    ))
}
