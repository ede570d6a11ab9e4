//! Email delivery configuration module

use serde::{Deserialize, Serialize};

/// Email delivery provider selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    /// Log messages instead of sending them
    #[default]
    Mock,
    /// Template-based email HTTP API
    Template,
    /// Template API with a second, independently configured account as fallback
    Failover,
}

/// Email delivery configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EmailConfig {
    /// Which delivery provider to build
    pub provider: EmailProvider,

    /// Primary template API account
    pub primary: TemplateApiConfig,

    /// Alternate template API account used when the primary fails
    pub fallback: Option<TemplateApiConfig>,

    /// Seconds to keep using the fallback before trying the primary again
    pub failover_timeout_secs: u64,

    /// Inbox that receives relayed enquiries and bookings
    pub enquiry_recipient: String,

    /// Display name for the enquiry inbox
    pub enquiry_recipient_name: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: EmailProvider::Mock,
            primary: TemplateApiConfig::default(),
            fallback: None,
            failover_timeout_secs: 30,
            enquiry_recipient: String::from("hello@calmspace.example"),
            enquiry_recipient_name: String::from("CalmSpace"),
        }
    }
}

impl EmailConfig {
    pub fn validate(&self) -> Result<(), String> {
        match self.provider {
            EmailProvider::Mock => Ok(()),
            EmailProvider::Template => self.primary.validate("email.primary"),
            EmailProvider::Failover => {
                self.primary.validate("email.primary")?;
                match &self.fallback {
                    Some(fallback) => fallback.validate("email.fallback"),
                    None => Err("email.fallback is required for the failover provider".to_string()),
                }
            }
        }
    }
}

/// Credentials and tuning for a template-based email HTTP API account
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TemplateApiConfig {
    /// API base URL
    pub base_url: String,

    /// Email service (sending account) identifier
    pub service_id: String,

    /// Public key sent as `user_id`
    pub public_key: String,

    /// Private access token, when the account enforces it
    pub private_key: Option<String>,

    /// Template used for verification codes
    pub otp_template_id: String,

    /// Template used for relayed enquiries
    pub enquiry_template_id: String,

    /// Maximum attempts per message
    pub max_retries: u32,

    /// Initial retry delay in milliseconds (doubled after each attempt)
    pub retry_delay_ms: u64,

    /// Timeout for a single API request in seconds
    pub request_timeout_secs: u64,
}

impl Default for TemplateApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("https://api.emailjs.com"),
            service_id: String::new(),
            public_key: String::new(),
            private_key: None,
            otp_template_id: String::new(),
            enquiry_template_id: String::new(),
            max_retries: 3,
            retry_delay_ms: 500,
            request_timeout_secs: 15,
        }
    }
}

impl TemplateApiConfig {
    fn validate(&self, section: &str) -> Result<(), String> {
        let required = [
            ("service_id", &self.service_id),
            ("public_key", &self.public_key),
            ("otp_template_id", &self.otp_template_id),
            ("enquiry_template_id", &self.enquiry_template_id),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(format!("{}.{} must be set", section, name));
            }
        }
        if self.max_retries == 0 {
            return Err(format!("{}.max_retries must be at least 1", section));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_account() -> TemplateApiConfig {
        TemplateApiConfig {
            service_id: "service_calm".to_string(),
            public_key: "pk_test".to_string(),
            otp_template_id: "template_otp".to_string(),
            enquiry_template_id: "template_enquiry".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_mock_provider_needs_no_credentials() {
        assert!(EmailConfig::default().validate().is_ok());
    }

    #[test]
    fn test_template_provider_requires_credentials() {
        let mut config = EmailConfig {
            provider: EmailProvider::Template,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        config.primary = complete_account();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_failover_provider_requires_fallback() {
        let mut config = EmailConfig {
            provider: EmailProvider::Failover,
            primary: complete_account(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.contains("email.fallback"));

        config.fallback = Some(complete_account());
        assert!(config.validate().is_ok());
    }
}
