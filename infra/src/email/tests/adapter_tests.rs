//! Unit tests for the core delivery adapter

use chrono::Utc;
use std::sync::Arc;

use cs_core::domain::entities::{Enquiry, EnquiryKind};
use cs_core::services::verification::EmailDeliveryTrait;

use crate::email::{EmailDeliveryAdapter, EmailKind, MockEmailService};

fn adapter(mock: &MockEmailService) -> EmailDeliveryAdapter {
    EmailDeliveryAdapter::new(Arc::new(mock.clone()), "hello@calmspace.example", "CalmSpace")
}

#[tokio::test]
async fn test_adapter_sends_verification_code() {
    let mock = MockEmailService::new();
    let adapter = adapter(&mock);

    let message_id = adapter
        .send_verification_code("jane@example.com", "Jane", "123456", 15)
        .await
        .unwrap();
    assert!(message_id.starts_with("mock_"));

    let sent = mock.last_message_to("jane@example.com").unwrap();
    assert_eq!(sent.kind, EmailKind::VerificationCode);
    assert_eq!(sent.params["passcode"], "123456");
}

#[tokio::test]
async fn test_adapter_relays_enquiry_to_inbox() {
    let mock = MockEmailService::new();
    let adapter = adapter(&mock);
    let enquiry = Enquiry::new(EnquiryKind::Contact, "Jane", "jane@example.com", "Hello", Utc::now());

    adapter.send_enquiry(&enquiry).await.unwrap();

    let sent = mock.last_message_to("hello@calmspace.example").unwrap();
    assert_eq!(sent.kind, EmailKind::Enquiry);
    assert_eq!(sent.to_name, "CalmSpace");
    assert_eq!(sent.params["message"], "Hello");
}

#[tokio::test]
async fn test_adapter_maps_failure_to_message() {
    let mock = MockEmailService::failing();
    let adapter = adapter(&mock);

    let err = adapter
        .send_verification_code("jane@example.com", "Jane", "123456", 15)
        .await
        .unwrap_err();
    assert!(err.contains("Simulated email sending failure"));
    assert!(!adapter.is_available().await);
}
