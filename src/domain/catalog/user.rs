//! User accounts, keyed by email.

use serde::{Deserialize, Serialize};

use crate::domain::auth::{OAuthProfile, OAuthProviderKind};
use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::session::{Role, Session};

/// A stored user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: UserId,
    #[serde(default)]
    pub name: Option<String>,
    pub email: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
}

impl User {
    /// Session payload for this user; missing role reads as `USER`.
    pub fn to_session(&self) -> Session {
        Session {
            id: self.id.clone(),
            name: self.name.clone().unwrap_or_default(),
            email: self.email.clone(),
            image: self.image.clone(),
            role: self.role.unwrap_or_default(),
        }
    }

    /// True when the stored user has no avatar yet but the provider offered one.
    pub fn needs_image(&self, avatar: Option<&str>) -> bool {
        self.image.as_deref().map_or(true, str::is_empty)
            && avatar.map_or(false, |a| !a.is_empty())
    }
}

/// A user created on first sign-in.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub email_verified: Timestamp,
    pub image: Option<String>,
    pub role: Role,
    pub provider: OAuthProviderKind,
    pub provider_id: String,
}

impl NewUser {
    pub fn from_profile(profile: &OAuthProfile, now: Timestamp) -> Self {
        Self {
            name: profile.name.clone(),
            email: profile.email.clone(),
            email_verified: now,
            image: profile.avatar_url.clone(),
            role: Role::User,
            provider: profile.provider,
            provider_id: profile.provider_id.clone(),
        }
    }
}
