//! Authentication configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Minimum length of the session signing secret.
pub const MIN_SESSION_SECRET_LEN: usize = 32;

/// Authentication configuration (session signing + OAuth clients)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    /// Key used to sign the `auth-token` session cookie
    pub session_secret: String,

    /// Google OAuth client ID
    pub google_client_id: Option<String>,

    /// Google OAuth client secret
    pub google_client_secret: Option<String>,

    /// GitHub OAuth client ID
    pub github_client_id: Option<String>,

    /// GitHub OAuth client secret
    pub github_client_secret: Option<String>,
}

impl AuthConfig {
    /// Google credentials when both halves are present.
    pub fn google_credentials(&self) -> Option<(&str, &str)> {
        pair(&self.google_client_id, &self.google_client_secret)
    }

    /// GitHub credentials when both halves are present.
    pub fn github_credentials(&self) -> Option<(&str, &str)> {
        pair(&self.github_client_id, &self.github_client_secret)
    }

    /// Validate authentication configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.session_secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__SESSION_SECRET"));
        }
        if self.session_secret.len() < MIN_SESSION_SECRET_LEN {
            return Err(ValidationError::SessionSecretTooShort(MIN_SESSION_SECRET_LEN));
        }
        if non_empty(&self.google_client_id).is_some()
            && non_empty(&self.google_client_secret).is_none()
        {
            return Err(ValidationError::IncompleteOAuthClient("google"));
        }
        if non_empty(&self.github_client_id).is_some()
            && non_empty(&self.github_client_secret).is_none()
        {
            return Err(ValidationError::IncompleteOAuthClient("github"));
        }
        Ok(())
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn pair<'a>(id: &'a Option<String>, secret: &'a Option<String>) -> Option<(&'a str, &'a str)> {
    Some((non_empty(id)?, non_empty(secret)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> AuthConfig {
        AuthConfig {
            session_secret: "x".repeat(MIN_SESSION_SECRET_LEN),
            ..Default::default()
        }
    }

    #[test]
    fn test_validation_missing_secret() {
        assert!(matches!(
            AuthConfig::default().validate(),
            Err(ValidationError::MissingRequired(_))
        ));
    }

    #[test]
    fn test_validation_short_secret() {
        let config = AuthConfig {
            session_secret: "short".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::SessionSecretTooShort(_))
        ));
    }

    #[test]
    fn test_validation_client_id_without_secret() {
        let config = AuthConfig {
            github_client_id: Some("gh-id".to_string()),
            ..valid()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::IncompleteOAuthClient("github"))
        ));
    }

    #[test]
    fn test_credentials_require_both_halves() {
        let config = AuthConfig {
            google_client_id: Some("g-id".to_string()),
            google_client_secret: Some(String::new()),
            github_client_id: Some("gh-id".to_string()),
            github_client_secret: Some("gh-secret".to_string()),
            ..valid()
        };
        assert!(config.google_credentials().is_none());
        assert_eq!(config.github_credentials(), Some(("gh-id", "gh-secret")));
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(valid().validate().is_ok());
    }
}
