//! Auth domain - OAuth providers, the profile they return, and the
//! checks applied to a callback before any upstream call is made.

mod errors;

pub use errors::OAuthError;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported OAuth identity providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OAuthProviderKind {
    Google,
    #[serde(rename = "github")]
    GitHub,
}

impl OAuthProviderKind {
    /// Path segment and stored `provider` value.
    pub fn as_str(&self) -> &'static str {
        match self {
            OAuthProviderKind::Google => "google",
            OAuthProviderKind::GitHub => "github",
        }
    }

    /// Human-facing name for error messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            OAuthProviderKind::Google => "Google",
            OAuthProviderKind::GitHub => "GitHub",
        }
    }
}

impl fmt::Display for OAuthProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OAuthProviderKind {
    type Err = OAuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "google" => Ok(OAuthProviderKind::Google),
            "github" => Ok(OAuthProviderKind::GitHub),
            other => Err(OAuthError::UnknownProvider(other.to_string())),
        }
    }
}

/// Normalized identity returned by a provider after sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthProfile {
    pub provider: OAuthProviderKind,
    /// Provider-side user id, as a string.
    pub provider_id: String,
    pub email: String,
    pub name: String,
    pub avatar_url: Option<String>,
}

/// Outcome of comparing the returned `state` with the stored cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateCheck {
    Verified,
    /// The state cookie was lost; sign-in continues unverified.
    CookieMissing,
}

/// Compares stored and returned state. A present-but-different stored
/// state is rejected; an absent one is tolerated.
pub fn check_state(stored: Option<&str>, returned: Option<&str>) -> Result<StateCheck, OAuthError> {
    match stored.filter(|s| !s.is_empty()) {
        None => Ok(StateCheck::CookieMissing),
        Some(stored) if Some(stored) == returned => Ok(StateCheck::Verified),
        Some(_) => Err(OAuthError::StateMismatch),
    }
}

/// Post-login destination. Only same-site paths are honoured; anything
/// else falls back to `/`.
pub fn sanitize_callback_url(url: Option<&str>) -> String {
    match url.map(str::trim) {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path.to_string()
        }
        _ => "/".to_string(),
    }
}
