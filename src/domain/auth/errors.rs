//! OAuth sign-in errors.

use thiserror::Error;

use super::OAuthProviderKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OAuthError {
    #[error("Unknown OAuth provider: {0}")]
    UnknownProvider(String),

    #[error("{} OAuth is not configured", .0.display_name())]
    ProviderNotConfigured(OAuthProviderKind),

    #[error("Invalid state parameter")]
    StateMismatch,

    #[error("No authorization code provided")]
    MissingAuthorizationCode,

    #[error("Token exchange failed: {0}")]
    TokenExchangeFailed(String),

    #[error("Could not get email from {}", .0.display_name())]
    NoEmailAvailable(OAuthProviderKind),

    /// Upstream or storage failure after the callback checks passed.
    #[error("Failed to authenticate with {}: {message}", .provider.display_name())]
    Failed {
        provider: OAuthProviderKind,
        message: String,
    },
}

impl OAuthError {
    pub fn failed(provider: OAuthProviderKind, message: impl Into<String>) -> Self {
        OAuthError::Failed {
            provider,
            message: message.into(),
        }
    }
}
