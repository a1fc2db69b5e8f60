//! GitHub OAuth adapter.
//!
//! GitHub answers the token exchange with HTTP 200 even on failure, so the
//! body is inspected for an `error` field. Users with a private email need a
//! second call to `/user/emails`.

use async_trait::async_trait;
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::{OAuthClientConfig, TokenResponse};
use crate::domain::auth::{OAuthError, OAuthProfile, OAuthProviderKind};
use crate::ports::OAuthProvider;

const AUTHORIZE_URL: &str = "https://github.com/login/oauth/authorize";
const TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
const API_BASE: &str = "https://api.github.com";
const SCOPE: &str = "read:user user:email";
const USER_AGENT: &str = "directory-site";

#[derive(Debug, Serialize)]
struct TokenRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    code: &'a str,
}

#[derive(Debug, Deserialize)]
struct GitHubUser {
    id: u64,
    login: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    avatar_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubEmail {
    pub email: String,
    #[serde(default)]
    pub primary: bool,
    #[serde(default)]
    pub verified: bool,
}

/// Picks the primary verified address, else the first one listed.
pub fn select_github_email(emails: &[GitHubEmail]) -> Option<&str> {
    emails
        .iter()
        .find(|e| e.primary && e.verified)
        .or_else(|| emails.first())
        .map(|e| e.email.as_str())
}

fn failed(message: impl Into<String>) -> OAuthError {
    OAuthError::failed(OAuthProviderKind::GitHub, message)
}

/// GitHub sign-in via the web application flow.
pub struct GitHubOAuthAdapter {
    client_id: String,
    client_secret: SecretString,
    redirect_uri: String,
    http: Client,
}

impl GitHubOAuthAdapter {
    pub fn new(config: OAuthClientConfig) -> Self {
        Self {
            client_id: config.client_id,
            client_secret: SecretString::new(config.client_secret),
            redirect_uri: config.redirect_uri,
            http: Client::new(),
        }
    }

    async fn api_get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        access_token: &str,
    ) -> Result<T, OAuthError> {
        let response = self
            .http
            .get(format!("{}{}", API_BASE, path))
            .bearer_auth(access_token)
            .header(reqwest::header::ACCEPT, "application/vnd.github.v3+json")
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await
            .map_err(|e| failed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(failed(format!("{} returned {}", path, status.as_u16())));
        }
        response.json().await.map_err(|e| failed(e.to_string()))
    }
}

#[async_trait]
impl OAuthProvider for GitHubOAuthAdapter {
    fn kind(&self) -> OAuthProviderKind {
        OAuthProviderKind::GitHub
    }

    fn authorization_url(&self, state: &str) -> Result<String, OAuthError> {
        Url::parse_with_params(
            AUTHORIZE_URL,
            &[
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("scope", SCOPE),
                ("state", state),
            ],
        )
        .map(String::from)
        .map_err(|e| failed(e.to_string()))
    }

    async fn exchange_code(&self, code: &str) -> Result<String, OAuthError> {
        let response = self
            .http
            .post(TOKEN_URL)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&TokenRequest {
                client_id: &self.client_id,
                client_secret: self.client_secret.expose_secret(),
                code,
            })
            .send()
            .await
            .map_err(|e| failed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(OAuthError::TokenExchangeFailed(format!(
                "GitHub returned {}",
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
        let user: GitHubUser = self.api_get("/user", access_token).await?;

        let email = match user.email.filter(|e| !e.is_empty()) {
            Some(email) => email,
            None => {
                let emails: Vec<GitHubEmail> = self.api_get("/user/emails", access_token).await?;
                select_github_email(&emails)
                    .map(String::from)
                    .ok_or(OAuthError::NoEmailAvailable(OAuthProviderKind::GitHub))?
            }
        };

        Ok(OAuthProfile {
            provider: OAuthProviderKind::GitHub,
            provider_id: user.id.to_string(),
            name: user.name.filter(|n| !n.is_empty()).unwrap_or(user.login),
            email,
            avatar_url: user.avatar_url,
        })
    }
}
