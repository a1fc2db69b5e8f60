//! Google OAuth 2.0 adapter.

use async_trait::async_trait;
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::{OAuthClientConfig, TokenResponse};
use crate::domain::auth::{OAuthError, OAuthProfile, OAuthProviderKind};
use crate::ports::OAuthProvider;

const AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v3/userinfo";
const SCOPE: &str = "openid email profile";

#[derive(Debug, Deserialize)]
struct GoogleUserInfo {
    sub: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    picture: Option<String>,
}

impl GoogleUserInfo {
    fn into_profile(self) -> Result<OAuthProfile, OAuthError> {
        let email = self
            .email
            .filter(|e| !e.is_empty())
            .ok_or(OAuthError::NoEmailAvailable(OAuthProviderKind::Google))?;
        Ok(OAuthProfile {
            provider: OAuthProviderKind::Google,
            provider_id: self.sub,
            name: self.name.unwrap_or_default(),
            email,
            avatar_url: self.picture,
        })
    }
}

/// Google sign-in via the authorization code flow.
pub struct GoogleOAuthAdapter {
    client_id: String,
    client_secret: SecretString,
    redirect_uri: String,
    http: Client,
}

impl GoogleOAuthAdapter {
    pub fn new(config: OAuthClientConfig) -> Self {
        Self {
            client_id: config.client_id,
            client_secret: SecretString::new(config.client_secret),
            redirect_uri: config.redirect_uri,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl OAuthProvider for GoogleOAuthAdapter {
    fn kind(&self) -> OAuthProviderKind {
        OAuthProviderKind::Google
    }

    fn authorization_url(&self, state: &str) -> Result<String, OAuthError> {
        Url::parse_with_params(
            AUTHORIZE_URL,
            &[
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("response_type", "code"),
                ("scope", SCOPE),
                ("state", state),
                ("access_type", "offline"),
                ("prompt", "consent"),
            ],
        )
        .map(String::from)
        .map_err(|e| OAuthError::failed(OAuthProviderKind::Google, e.to_string()))
    }

    async fn exchange_code(&self, code: &str) -> Result<String, OAuthError> {
        let response = self
            .http
            .post(TOKEN_URL)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.expose_secret().as_str()),
                ("code", code),
                ("grant_type", "authorization_code"),
                ("redirect_uri", self.redirect_uri.as_str()),
            ])
            .send()
            .await
            .map_err(|e| OAuthError::failed(OAuthProviderKind::Google, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), body = %body, "Google token exchange rejected");
            return Err(OAuthError::TokenExchangeFailed(format!(
                "Google returned {}",
                status.as_u16()
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| OAuthError::TokenExchangeFailed(e.to_string()))?;
        token.into_access_token()
    }

    async fn fetch_profile(&self, access_token: &str) -> Result<OAuthProfile, OAuthError> {
        let response = self
            .http
            .get(USERINFO_URL)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| OAuthError::failed(OAuthProviderKind::Google, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(OAuthError::failed(
                OAuthProviderKind::Google,
                format!("userinfo returned {}", status.as_u16()),
            ));
        }

        let info: GoogleUserInfo = response
            .json()
            .await
            .map_err(|e| OAuthError::failed(OAuthProviderKind::Google, e.to_string()))?;
        info.into_profile()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adapter() -> GoogleOAuthAdapter {
        GoogleOAuthAdapter::new(OAuthClientConfig {
            client_id: "google-client".to_string(),
            client_secret: "secret".to_string(),
            redirect_uri: "https://dir.example/api/auth/callback/google".to_string(),
        })
    }

    #[test]
    fn authorization_url_carries_offline_consent() {
        let url = Url::parse(&adapter().authorization_url("state-1").unwrap()).unwrap();
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        let get = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(url.host_str(), Some("accounts.google.com"));
        assert_eq!(get("client_id"), Some("google-client"));
        assert_eq!(
            get("redirect_uri"),
            Some("https://dir.example/api/auth/callback/google")
        );
        assert_eq!(get("response_type"), Some("code"));
        assert_eq!(get("scope"), Some("openid email profile"));
        assert_eq!(get("state"), Some("state-1"));
        assert_eq!(get("access_type"), Some("offline"));
        assert_eq!(get("prompt"), Some("consent"));
    }

    #[test]
    fn userinfo_maps_to_profile() {
        let info: GoogleUserInfo = serde_json::from_value(serde_json::json!({
            "sub": "1234",
            "email": "ada@example.com",
            "email_verified": true,
            "name": "Ada Lovelace",
            "picture": "https://lh3.googleusercontent.com/a"
        }))
        .unwrap();
        let profile = info.into_profile().unwrap();
        assert_eq!(profile.provider_id, "1234");
        assert_eq!(profile.name, "Ada Lovelace");
        assert_eq!(profile.avatar_url.as_deref(), Some("https://lh3.googleusercontent.com/a"));
    }

    #[test]
    fn userinfo_without_email_is_rejected() {
        let info: GoogleUserInfo =
            serde_json::from_value(serde_json::json!({ "sub": "1234" })).unwrap();
        assert_eq!(
            info.into_profile(),
            Err(OAuthError::NoEmailAvailable(OAuthProviderKind::Google))
        );
    }
}
