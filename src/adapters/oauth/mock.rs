//! Mock OAuth provider for testing.
//!
//! # Example
//!
//! ```ignore
//! let github = MockOAuthProvider::new(OAuthProviderKind::GitHub)
//!     .with_code("good-code", profile);
//!
//! let token = github.exchange_code("good-code").await?;
//! let profile = github.fetch_profile(&token).await?;
//! ```

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::domain::auth::{OAuthError, OAuthProfile, OAuthProviderKind};
use crate::ports::OAuthProvider;

/// Mock provider mapping authorization codes to profiles.
///
/// Unknown codes fail the exchange with `TokenExchangeFailed`.
#[derive(Debug)]
pub struct MockOAuthProvider {
    kind: OAuthProviderKind,
    /// access token -> profile, where the token is `token-<code>`
    profiles: RwLock<HashMap<String, OAuthProfile>>,
    profile_error: RwLock<Option<OAuthError>>,
    exchange_calls: AtomicUsize,
}

impl MockOAuthProvider {
    pub fn new(kind: OAuthProviderKind) -> Self {
        Self {
            kind,
            profiles: RwLock::new(HashMap::new()),
            profile_error: RwLock::new(None),
            exchange_calls: AtomicUsize::new(0),
        }
    }

    /// Accepts `code` and signs in as `profile`.
    pub fn with_code(self, code: &str, profile: OAuthProfile) -> Self {
        self.profiles
            .write()
            .unwrap()
            .insert(format!("token-{}", code), profile);
        self
    }

    /// Fails every profile fetch with the given error.
    pub fn with_profile_error(self, error: OAuthError) -> Self {
        *self.profile_error.write().unwrap() = Some(error);
        self
    }

    /// Number of token exchanges attempted.
    pub fn exchange_calls(&self) -> usize {
        self.exchange_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OAuthProvider for MockOAuthProvider {
    fn kind(&self) -> OAuthProviderKind {
        self.kind
    }

    fn authorization_url(&self, state: &str) -> Result<String, OAuthError> {
        Ok(format!(
            "https://auth.{}.test/authorize?state={}",
            self.kind, state
        ))
    }

    async fn exchange_code(&self, code: &str) -> Result<String, OAuthError> {
        self.exchange_calls.fetch_add(1, Ordering::SeqCst);
        let token = format!("token-{}", code);
        if self.profiles.read().unwrap().contains_key(&token) {
            Ok(token)
        } else {
            Err(OAuthError::TokenExchangeFailed("bad_verification_code".to_string()))
        }
    }

    async fn fetch_profile(&self, access_token: &str) -> Result<OAuthProfile, OAuthError> {
        if let Some(error) = self.profile_error.read().unwrap().clone() {
            return Err(error);
        }
        self.profiles
            .read()
            .unwrap()
            .get(access_token)
            .cloned()
            .ok_or_else(|| OAuthError::failed(self.kind, "unknown access token"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> OAuthProfile {
        OAuthProfile {
            provider: OAuthProviderKind::GitHub,
            provider_id: "42".to_string(),
            email: "octo@example.com".to_string(),
            name: "octocat".to_string(),
            avatar_url: None,
        }
    }

    #[tokio::test]
    async fn known_code_yields_profile() {
        let provider = MockOAuthProvider::new(OAuthProviderKind::GitHub).with_code("c1", profile());
        let token = provider.exchange_code("c1").await.unwrap();
        assert_eq!(provider.fetch_profile(&token).await.unwrap(), profile());
        assert_eq!(provider.exchange_calls(), 1);
    }

    #[tokio::test]
    async fn unknown_code_fails_exchange() {
        let provider = MockOAuthProvider::new(OAuthProviderKind::Google);
        assert!(matches!(
            provider.exchange_code("nope").await,
            Err(OAuthError::TokenExchangeFailed(_))
        ));
    }
}
