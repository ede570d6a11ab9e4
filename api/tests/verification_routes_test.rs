//! Integration tests for the verification and enquiry endpoints
//!
//! The full application is wired over the mock email service and a manual
//! clock, so codes are read back from the sent messages and expiry is driven
//! by advancing the clock.

use actix_web::{http::StatusCode, test, web};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use std::sync::Arc;

use cs_api::app::create_app;
use cs_api::routes::AppState;
use cs_core::{
    EnquiryService, EnquiryServiceConfig, ManualClock, OtpService, VerificationServiceConfig,
};
use cs_infra::{EmailDeliveryAdapter, EmailService, MockEmailService};
use cs_shared::CorsConfig;

const INBOX: &str = "hello@calmspace.example";

struct Harness {
    state: web::Data<AppState<EmailDeliveryAdapter, ManualClock>>,
    mock: MockEmailService,
    clock: Arc<ManualClock>,
}

fn harness() -> Harness {
    let mock = MockEmailService::new();
    let inner: Arc<dyn EmailService> = Arc::new(mock.clone());
    let email = Arc::new(EmailDeliveryAdapter::new(inner, INBOX, "CalmSpace"));
    let clock = Arc::new(ManualClock::new(Utc::now()));

    let otp_service = Arc::new(OtpService::with_clock(
        email.clone(),
        clock.clone(),
        VerificationServiceConfig::default(),
    ));
    let enquiry_service = Arc::new(EnquiryService::new(
        email,
        otp_service.clone(),
        EnquiryServiceConfig::default(),
    ));

    Harness {
        state: web::Data::new(AppState {
            otp_service,
            enquiry_service,
            email_provider: "Mock".to_string(),
        }),
        mock,
        clock,
    }
}

macro_rules! app {
    ($harness:expr) => {
        test::init_service(create_app(
            $harness.state.clone(),
            &CorsConfig::development(),
            64 * 1024,
        ))
        .await
    };
}

fn sent_code(mock: &MockEmailService, email: &str) -> String {
    mock.last_message_to(email)
        .and_then(|message| message.params.get("passcode").cloned())
        .expect("a code should have been emailed")
}

fn booking(email: &str) -> Value {
    json!({
        "kind": "booking",
        "name": "Jane",
        "email": email,
        "message": "First session please",
        "service": "Counselling",
        "preferred_date": (Utc::now() + Duration::days(7)).date_naive().to_string(),
        "preferred_time": "Morning"
    })
}

#[actix_web::test]
async fn test_health_reports_email_provider() {
    let h = harness();
    let app = app!(h);

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "healthy");
    assert_eq!(body["email_provider"], "Mock");
}

#[actix_web::test]
async fn test_send_and_verify_code() {
    let h = harness();
    let app = app!(h);

    let req = test::TestRequest::post()
        .uri("/api/v1/verification/send-code")
        .insert_header(("X-Request-Id", "req-1"))
        .set_json(json!({ "email": "Jane@Example.com", "name": "Jane" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["request_id"], "req-1");
    assert_eq!(body["data"]["expires_in_minutes"], 15);

    let code = sent_code(&h.mock, "jane@example.com");

    let req = test::TestRequest::post()
        .uri("/api/v1/verification/verify-code")
        .set_json(json!({ "email": "jane@example.com", "code": code }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["verified"], true);

    let req = test::TestRequest::get()
        .uri("/api/v1/verification/status?email=JANE%40example.com")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["verified"], true);
}

#[actix_web::test]
async fn test_verify_without_request_is_not_found() {
    let h = harness();
    let app = app!(h);

    let req = test::TestRequest::post()
        .uri("/api/v1/verification/verify-code")
        .set_json(json!({ "email": "nobody@example.com", "code": "123456" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "code_not_requested");
}

#[actix_web::test]
async fn test_expired_code_is_gone_then_not_found() {
    let h = harness();
    let app = app!(h);

    h.state
        .otp_service
        .request_verification("jane@example.com", "Jane")
        .await
        .unwrap();
    let code = sent_code(&h.mock, "jane@example.com");
    h.clock.advance(Duration::minutes(16));

    let verify = || {
        test::TestRequest::post()
            .uri("/api/v1/verification/verify-code")
            .set_json(json!({ "email": "jane@example.com", "code": code }))
            .to_request()
    };

    let resp = test::call_service(&app, verify()).await;
    assert_eq!(resp.status(), StatusCode::GONE);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "code_expired");

    // The expired record was discarded
    let resp = test::call_service(&app, verify()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_wrong_code_is_rejected_and_retry_succeeds() {
    let h = harness();
    let app = app!(h);

    h.state
        .otp_service
        .request_verification("jane@example.com", "Jane")
        .await
        .unwrap();
    let code = sent_code(&h.mock, "jane@example.com");
    let wrong = if code == "000000" { "111111" } else { "000000" };

    let req = test::TestRequest::post()
        .uri("/api/v1/verification/verify-code")
        .set_json(json!({ "email": "jane@example.com", "code": wrong }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "code_mismatch");

    let req = test::TestRequest::post()
        .uri("/api/v1/verification/verify-code")
        .set_json(json!({ "email": "jane@example.com", "code": code }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_invalid_request_bodies() {
    let h = harness();
    let app = app!(h);

    let req = test::TestRequest::post()
        .uri("/api/v1/verification/send-code")
        .set_json(json!({ "email": "not-an-email", "name": "Jane" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "validation_error");
    assert!(body["details"]["fields"]["email"].is_array());

    let req = test::TestRequest::post()
        .uri("/api/v1/verification/verify-code")
        .set_json(json!({ "email": "jane@example.com", "code": "12ab" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/v1/verification/send-code")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{\"email\":")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "validation_error");
    assert_eq!(h.mock.get_message_count(), 0);
}

#[actix_web::test]
async fn test_delivery_failure_is_service_unavailable() {
    let h = harness();
    let app = app!(h);
    h.mock.set_simulate_failure(true);

    let req = test::TestRequest::post()
        .uri("/api/v1/verification/send-code")
        .set_json(json!({ "email": "jane@example.com", "name": "Jane" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "email_delivery_failed");

    // The code handed to the provider still verifies should the email arrive
    let code = h
        .mock
        .failed_messages()
        .last()
        .and_then(|message| message.params.get("passcode").cloned())
        .expect("the failed email should carry the code");
    h.mock.set_simulate_failure(false);

    let req = test::TestRequest::post()
        .uri("/api/v1/verification/verify-code")
        .set_json(json!({ "email": "jane@example.com", "code": code }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_padded_code_and_blank_name() {
    let h = harness();
    let app = app!(h);

    let req = test::TestRequest::post()
        .uri("/api/v1/verification/send-code")
        .set_json(json!({ "email": "jane@example.com", "name": "   " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(h.mock.get_message_count(), 0);

    let code = h.state.otp_service.create_and_store("jane@example.com");
    let req = test::TestRequest::post()
        .uri("/api/v1/verification/verify-code")
        .set_json(json!({ "email": "jane@example.com", "code": format!(" {}\n", code) }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_reset_clears_verification() {
    let h = harness();
    let app = app!(h);

    let code = h.state.otp_service.create_and_store("jane@example.com");
    h.state.otp_service.verify("jane@example.com", &code).unwrap();

    let req = test::TestRequest::post()
        .uri("/api/v1/verification/reset")
        .set_json(json!({ "email": "jane@example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/v1/verification/status?email=jane%40example.com")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["verified"], false);
}

#[actix_web::test]
async fn test_enquiry_requires_verified_email() {
    let h = harness();
    let app = app!(h);

    let req = test::TestRequest::post()
        .uri("/api/v1/enquiries")
        .set_json(booking("jane@example.com"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "email_not_verified");
    assert!(h.mock.last_message_to(INBOX).is_none());
}

#[actix_web::test]
async fn test_verified_enquiry_is_relayed_once() {
    let h = harness();
    let app = app!(h);

    let code = h.state.otp_service.create_and_store("jane@example.com");
    h.state.otp_service.verify("jane@example.com", &code).unwrap();

    let req = test::TestRequest::post()
        .uri("/api/v1/enquiries")
        .set_json(booking("jane@example.com"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["kind"], "booking");

    let relayed = h.mock.last_message_to(INBOX).expect("enquiry should be relayed");
    assert_eq!(relayed.reply_to.as_deref(), Some("jane@example.com"));
    assert_eq!(relayed.params["service"], "Counselling");

    // The verification was consumed by the submission
    let req = test::TestRequest::post()
        .uri("/api/v1/enquiries")
        .set_json(booking("jane@example.com"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_booking_in_the_past_is_rejected() {
    let h = harness();
    let app = app!(h);

    let code = h.state.otp_service.create_and_store("jane@example.com");
    h.state.otp_service.verify("jane@example.com", &code).unwrap();

    let mut body = booking("jane@example.com");
    body["preferred_date"] = json!((Utc::now() - Duration::days(3)).date_naive().to_string());

    let req = test::TestRequest::post()
        .uri("/api/v1/enquiries")
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["details"]["fields"]["preferred_date"].is_array());
}

#[actix_web::test]
async fn test_unknown_route_is_not_found() {
    let h = harness();
    let app = app!(h);

    let req = test::TestRequest::get().uri("/api/v2/anything").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
