//! OAuth provider port.

use async_trait::async_trait;

use crate::domain::auth::{OAuthError, OAuthProfile, OAuthProviderKind};

/// An OAuth 2.0 authorization-code provider.
#[async_trait]
pub trait OAuthProvider: Send + Sync {
    fn kind(&self) -> OAuthProviderKind;

    /// URL the browser is sent to, carrying `state`.
    fn authorization_url(&self, state: &str) -> Result<String, OAuthError>;

    /// Exchanges an authorization code for an access token.
    async fn exchange_code(&self, code: &str) -> Result<String, OAuthError>;

    /// Fetches the signed-in user's profile.
    async fn fetch_profile(&self, access_token: &str) -> Result<OAuthProfile, OAuthError>;
}
