//! Template Email API Service Implementation
//!
//! Sends email through a hosted template-based email API (EmailJS-compatible
//! REST endpoint). Message bodies live in provider-side templates; the
//! service posts the template id and the parameters to substitute.
//!
//! ## Features
//!
//! - Per-kind template selection (verification code vs. enquiry)
//! - Automatic retry with exponential backoff on transport errors, 429 and 5xx
//! - No retry on other client errors
//! - Recipient masking in logs

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use cs_shared::utils::email::mask_email;
use cs_shared::TemplateApiConfig;

use super::email_service::{EmailKind, EmailMessage, EmailService};
use crate::InfrastructureError;

/// Path of the send endpoint relative to the configured base URL
const SEND_PATH: &str = "/api/v1.0/email/send";

/// Request body accepted by the send endpoint
#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    access_token: Option<&'a str>,
    template_params: &'a BTreeMap<String, String>,
}

/// What to do after a non-success response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RetryDecision {
    Retry,
    Fail,
}

/// 429 and server errors are transient; any other client error is final
pub(crate) fn classify_status(status: StatusCode) -> RetryDecision {
    if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
        RetryDecision::Retry
    } else {
        RetryDecision::Fail
    }
}

/// Template email API service implementation
pub struct TemplateApiEmailService {
    client: reqwest::Client,
    config: TemplateApiConfig,
    endpoint: String,
    name: String,
}

impl TemplateApiEmailService {
    /// Create a new template API email service
    ///
    /// `name` identifies this account in logs and failover messages.
    pub fn new(config: TemplateApiConfig, name: impl Into<String>) -> Result<Self, InfrastructureError> {
        for (field, value) in [
            ("service_id", &config.service_id),
            ("public_key", &config.public_key),
            ("otp_template_id", &config.otp_template_id),
            ("enquiry_template_id", &config.enquiry_template_id),
        ] {
            if value.trim().is_empty() {
                return Err(InfrastructureError::Config(format!(
                    "Template email API {} not set",
                    field
                )));
            }
        }
        if config.max_retries == 0 {
            return Err(InfrastructureError::Config(
                "Template email API max_retries must be at least 1".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        let endpoint = format!("{}{}", config.base_url.trim_end_matches('/'), SEND_PATH);
        let name = name.into();

        info!(
            "Template email service '{}' initialized for service {} at {}",
            name, config.service_id, endpoint
        );

        Ok(Self {
            client,
            config,
            endpoint,
            name,
        })
    }

    /// Template used for messages of `kind`
    fn template_id(&self, kind: EmailKind) -> &str {
        match kind {
            EmailKind::VerificationCode => &self.config.otp_template_id,
            EmailKind::Enquiry => &self.config.enquiry_template_id,
        }
    }

    fn build_request<'a>(&'a self, message: &'a EmailMessage) -> SendRequest<'a> {
        SendRequest {
            service_id: &self.config.service_id,
            template_id: self.template_id(message.kind),
            user_id: &self.config.public_key,
            access_token: self.config.private_key.as_deref(),
            template_params: &message.params,
        }
    }

    /// Send with retry logic
    async fn send_with_retry(&self, message: &EmailMessage) -> Result<String, InfrastructureError> {
        let request = self.build_request(message);
        let masked = mask_email(&message.to_email);
        let mut attempts = 0;
        let mut delay = Duration::from_millis(self.config.retry_delay_ms);

        loop {
            attempts += 1;

            debug!(
                "Sending email attempt {}/{} to {} via {}",
                attempts, self.config.max_retries, masked, self.name
            );

            let failure = match self.client.post(&self.endpoint).json(&request).send().await {
                Ok(response) => {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();

                    if status.is_success() {
                        let message_id = match body.trim() {
                            "" | "OK" => Uuid::new_v4().to_string(),
                            text => text.to_string(),
                        };
                        info!(
                            "Email sent successfully to {} via {} with id: {}",
                            masked, self.name, message_id
                        );
                        return Ok(message_id);
                    }

                    if classify_status(status) == RetryDecision::Fail {
                        error!(
                            "Email API rejected request for {} ({}): {}",
                            masked, status, body
                        );
                        return Err(InfrastructureError::Email(format!(
                            "Invalid request ({}): {}",
                            status, body
                        )));
                    }

                    format!("{}: {}", status, body)
                }
                Err(e) => e.to_string(),
            };

            error!(
                "Failed to send email (attempt {}/{}): {}",
                attempts, self.config.max_retries, failure
            );

            if attempts >= self.config.max_retries {
                return Err(InfrastructureError::Email(format!(
                    "Failed to send email after {} attempts: {}",
                    self.config.max_retries, failure
                )));
            }

            warn!("Retrying email delivery after {:?}", delay);

            // Wait before retrying with exponential backoff
            tokio::time::sleep(delay).await;
            delay *= 2;
        }
    }
}

#[async_trait]
impl EmailService for TemplateApiEmailService {
    async fn send_email(&self, message: &EmailMessage) -> Result<String, InfrastructureError> {
        info!(
            "Sending {:?} email to {} via {}",
            message.kind,
            mask_email(&message.to_email),
            self.name
        );

        self.send_with_retry(message).await
    }

    fn provider_name(&self) -> &str {
        &self.name
    }
}
