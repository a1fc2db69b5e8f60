//! OAuth provider adapters.
//!
//! Implementations of the `OAuthProvider` port:
//!
//! - `google` - Google OAuth 2.0 (OpenID scopes)
//! - `github` - GitHub OAuth apps
//! - `mock` - Test implementation keyed by authorization code

mod github;
mod google;
mod mock;

pub use github::{select_github_email, GitHubEmail, GitHubOAuthAdapter};
pub use google::GoogleOAuthAdapter;
pub use mock::MockOAuthProvider;

use serde::Deserialize;

use crate::domain::auth::{OAuthError, OAuthProviderKind};

/// Registered OAuth client for one provider.
#[derive(Debug, Clone)]
pub struct OAuthClientConfig {
    pub client_id: String,
    pub client_secret: String,
    /// `{app_url}/api/auth/callback/{provider}`
    pub redirect_uri: String,
}

impl OAuthClientConfig {
    pub fn new(
        kind: OAuthProviderKind,
        (client_id, client_secret): (&str, &str),
        app_url: &str,
    ) -> Self {
        Self {
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            redirect_uri: redirect_uri(app_url, kind),
        }
    }
}

pub fn redirect_uri(app_url: &str, kind: OAuthProviderKind) -> String {
    format!("{}/api/auth/callback/{}", app_url.trim_end_matches('/'), kind)
}

/// Token endpoint response shared by both providers.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

impl TokenResponse {
    fn into_access_token(self) -> Result<String, OAuthError> {
        if let Some(error) = self.error {
            let detail = self.error_description.unwrap_or_default();
            tracing::warn!(error = %error, detail = %detail, "OAuth token exchange returned an error");
            return Err(OAuthError::TokenExchangeFailed(error));
        }
        self.access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| OAuthError::TokenExchangeFailed("no access token".to_string()))
    }
}
