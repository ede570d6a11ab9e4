//! Unit tests for email service creation

use cs_shared::{EmailConfig, EmailProvider, TemplateApiConfig};

use crate::email::create_email_service;

fn account(service_id: &str) -> TemplateApiConfig {
    TemplateApiConfig {
        service_id: service_id.to_string(),
        public_key: "pk_test".to_string(),
        otp_template_id: "template_otp".to_string(),
        enquiry_template_id: "template_enquiry".to_string(),
        ..Default::default()
    }
}

#[test]
fn test_create_mock_service() {
    let service = create_email_service(&EmailConfig::default());
    assert_eq!(service.provider_name(), "Mock");
}

#[test]
fn test_create_template_service() {
    let config = EmailConfig {
        provider: EmailProvider::Template,
        primary: account("service_primary"),
        ..Default::default()
    };

    let service = create_email_service(&config);
    assert_eq!(service.provider_name(), "TemplateApi");
}

#[test]
fn test_incomplete_template_config_falls_back_to_mock() {
    let config = EmailConfig {
        provider: EmailProvider::Template,
        ..Default::default()
    };

    let service = create_email_service(&config);
    assert_eq!(service.provider_name(), "Mock");
}

#[test]
fn test_create_failover_service() {
    let config = EmailConfig {
        provider: EmailProvider::Failover,
        primary: account("service_primary"),
        fallback: Some(account("service_fallback")),
        ..Default::default()
    };

    let service = create_email_service(&config);
    assert_eq!(service.provider_name(), "Failover");
}

#[test]
fn test_failover_without_fallback_uses_primary_only() {
    let config = EmailConfig {
        provider: EmailProvider::Failover,
        primary: account("service_primary"),
        fallback: None,
        ..Default::default()
    };

    let service = create_email_service(&config);
    assert_eq!(service.provider_name(), "TemplateApi (primary)");
}
