//! Email configuration

use serde::Deserialize;

use super::error::ValidationError;
use super::payment::non_empty;

/// Email configuration (Resend)
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// Resend API key; email is skipped when absent
    pub resend_api_key: Option<String>,

    /// From email address
    #[serde(default = "default_from_email")]
    pub from_email: String,

    /// From name
    #[serde(default = "default_from_name")]
    pub from_name: String,

    /// Address that receives admin notifications
    pub admin_email: Option<String>,

    /// Resend audience used for newsletter contacts
    pub audience_id: Option<String>,
}

impl EmailConfig {
    pub fn resend_api_key(&self) -> Option<&str> {
        non_empty(&self.resend_api_key)
    }

    pub fn audience_id(&self) -> Option<&str> {
        non_empty(&self.audience_id)
    }

    /// Get formatted "From" header value
    pub fn from_header(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_email)
    }

    /// Validate email configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(key) = self.resend_api_key() {
            if !key.starts_with("re_") {
                return Err(ValidationError::InvalidResendKey);
            }
        }
        if !self.from_email.contains('@') {
            return Err(ValidationError::InvalidFromEmail);
        }
        Ok(())
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            resend_api_key: None,
            from_email: default_from_email(),
            from_name: default_from_name(),
            admin_email: None,
            audience_id: None,
        }
    }
}

fn default_from_email() -> String {
    "noreply@example.com".to_string()
}

fn default_from_name() -> String {
    "Directory".to_string()
}
