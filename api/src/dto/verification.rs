use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use cs_shared::config::otp::MAX_CODE_LENGTH;

/// Longest display name accepted for the greeting
const MAX_NAME_LENGTH: usize = 100;

fn validate_name(name: &str) -> Result<(), ValidationError> {
    let length = name.trim().chars().count();
    if length == 0 || length > MAX_NAME_LENGTH {
        let mut error = ValidationError::new("length");
        error.message = Some("Please enter your name".into());
        return Err(error);
    }
    Ok(())
}

fn validate_code(code: &str) -> Result<(), ValidationError> {
    let code = code.trim();
    if code.is_empty() || code.len() > MAX_CODE_LENGTH || !code.chars().all(|c| c.is_ascii_digit()) {
        let mut error = ValidationError::new("code_format");
        error.message = Some("The verification code must contain only digits".into());
        return Err(error);
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendCodeRequest {
    /// Address to verify
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,

    /// Name used to greet the visitor in the email
    #[validate(custom = "validate_name")]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendCodeResponse {
    pub message: String,
    pub expires_in_minutes: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyCodeRequest {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,

    /// Code from the email
    #[validate(custom = "validate_code")]
    pub code: String,
}

impl VerifyCodeRequest {
    /// The code with surrounding whitespace from copy and paste removed
    pub fn submitted_code(&self) -> &str {
        self.code.trim()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyCodeResponse {
    pub verified: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StatusQuery {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub verified: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResetRequest {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_code_request_validation() {
        let valid = SendCodeRequest {
            email: "jane@example.com".to_string(),
            name: "Jane".to_string(),
        };
        assert!(valid.validate().is_ok());

        let bad_email = SendCodeRequest {
            email: "jane".to_string(),
            name: "Jane".to_string(),
        };
        assert!(bad_email.validate().is_err());

        let no_name = SendCodeRequest {
            email: "jane@example.com".to_string(),
            name: String::new(),
        };
        assert!(no_name.validate().is_err());

        let blank_name = SendCodeRequest {
            email: "jane@example.com".to_string(),
            name: "   ".to_string(),
        };
        assert!(blank_name.validate().is_err());
    }

    #[test]
    fn test_verify_code_request_validation() {
        let request = |code: &str| VerifyCodeRequest {
            email: "jane@example.com".to_string(),
            code: code.to_string(),
        };

        assert!(request("012345").validate().is_ok());
        assert!(request("12a456").validate().is_err());
        assert!(request("").validate().is_err());
        assert!(request("1234567890123").validate().is_err());

        let padded = request(" 012345\n");
        assert!(padded.validate().is_ok());
        assert_eq!(padded.submitted_code(), "012345");
    }
}
