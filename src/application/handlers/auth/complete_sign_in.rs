//! CompleteSignInHandler - finishes an OAuth callback and resolves the user.

use std::sync::Arc;

use crate::domain::auth::{check_state, OAuthError, StateCheck};
use crate::domain::catalog::{NewUser, User};
use crate::domain::foundation::Timestamp;
use crate::domain::session::Session;
use crate::ports::{OAuthProvider, StoreError, UserRepository};

/// Callback parameters plus the state cookie set at sign-in.
#[derive(Debug, Clone, Default)]
pub struct CompleteSignInCommand {
    pub stored_state: Option<String>,
    pub returned_state: Option<String>,
    pub code: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CompleteSignInResult {
    pub session: Session,
    pub user_created: bool,
    pub state_check: StateCheck,
}

/// Exchanges the code, fetches the profile and upserts the user by email.
///
/// State and code are checked before any upstream call.
pub struct CompleteSignInHandler {
    provider: Arc<dyn OAuthProvider>,
    users: Arc<dyn UserRepository>,
}

impl CompleteSignInHandler {
    pub fn new(provider: Arc<dyn OAuthProvider>, users: Arc<dyn UserRepository>) -> Self {
        Self { provider, users }
    }

    pub async fn handle(
        &self,
        cmd: CompleteSignInCommand,
    ) -> Result<CompleteSignInResult, OAuthError> {
        let kind = self.provider.kind();

        // 1. State
        let state_check = check_state(cmd.stored_state.as_deref(), cmd.returned_state.as_deref())?;
        if state_check == StateCheck::CookieMissing {
            tracing::warn!(provider = %kind, "OAuth state cookie missing; continuing unverified");
        }

        // 2. Code
        let code = cmd
            .code
            .filter(|c| !c.is_empty())
            .ok_or(OAuthError::MissingAuthorizationCode)?;

        // 3. Token and profile
        let access_token = self.provider.exchange_code(&code).await?;
        let profile = self.provider.fetch_profile(&access_token).await?;

        // 4. Upsert by email
        let store_failed = |e: StoreError| OAuthError::failed(kind, e.to_string());
        let (user, user_created) = match self
            .users
            .find_by_email(&profile.email)
            .await
            .map_err(store_failed)?
        {
            Some(mut user) => {
                if user.needs_image(profile.avatar_url.as_deref()) {
                    if let Some(avatar) = profile.avatar_url.as_deref() {
                        self.users
                            .set_image(&user.id, avatar)
                            .await
                            .map_err(store_failed)?;
                        user.image = Some(avatar.to_string());
                    }
                }
                (user, false)
            }
            None => {
                let user: User = self
                    .users
                    .create(NewUser::from_profile(&profile, Timestamp::now()))
                    .await
                    .map_err(store_failed)?;
                (user, true)
            }
        };

        tracing::info!(
            provider = %kind,
            user_id = %user.id,
            user_created,
            "Sign-in completed"
        );

        Ok(CompleteSignInResult {
            session: user.to_session(),
            user_created,
            state_check,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::adapters::oauth::MockOAuthProvider;
    use crate::domain::auth::{OAuthProfile, OAuthProviderKind};
    use crate::domain::foundation::UserId;
    use crate::domain::session::Role;

    fn profile(avatar: Option<&str>) -> OAuthProfile {
        OAuthProfile {
            provider: OAuthProviderKind::GitHub,
            provider_id: "42".to_string(),
            email: "octo@example.com".to_string(),
            name: "octocat".to_string(),
            avatar_url: avatar.map(String::from),
        }
    }

    fn setup(avatar: Option<&str>) -> (CompleteSignInHandler, Arc<MockOAuthProvider>, Arc<InMemoryStore>) {
        let provider = Arc::new(
            MockOAuthProvider::new(OAuthProviderKind::GitHub).with_code("good", profile(avatar)),
        );
        let store = Arc::new(InMemoryStore::new());
        let handler = CompleteSignInHandler::new(provider.clone(), store.clone());
        (handler, provider, store)
    }

    fn command(stored: Option<&str>, returned: Option<&str>, code: Option<&str>) -> CompleteSignInCommand {
        CompleteSignInCommand {
            stored_state: stored.map(String::from),
            returned_state: returned.map(String::from),
            code: code.map(String::from),
        }
    }

    #[tokio::test]
    async fn first_sign_in_creates_user() {
        let (handler, _, store) = setup(Some("https://avatars.example/42"));

        let result = handler
            .handle(command(Some("s1"), Some("s1"), Some("good")))
            .await
            .unwrap();

        assert!(result.user_created);
        assert_eq!(result.state_check, StateCheck::Verified);
        assert_eq!(result.session.email, "octo@example.com");
        assert_eq!(result.session.role, Role::User);
        let users = store.users();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].image.as_deref(), Some("https://avatars.example/42"));
    }

    #[tokio::test]
    async fn returning_user_is_reused_and_image_filled() {
        let (handler, _, store) = setup(Some("https://avatars.example/42"));
        store.insert_user(User {
            id: UserId::new("user-existing").unwrap(),
            name: Some("Octo".to_string()),
            email: "octo@example.com".to_string(),
            image: None,
            role: Some(Role::Admin),
        });

        let result = handler
            .handle(command(Some("s1"), Some("s1"), Some("good")))
            .await
            .unwrap();

        assert!(!result.user_created);
        assert_eq!(result.session.id.as_str(), "user-existing");
        assert_eq!(result.session.role, Role::Admin);
        assert_eq!(result.session.image.as_deref(), Some("https://avatars.example/42"));
        assert_eq!(store.users().len(), 1);
        assert_eq!(
            store.users()[0].image.as_deref(),
            Some("https://avatars.example/42")
        );
    }

    #[tokio::test]
    async fn state_mismatch_rejected_before_exchange() {
        let (handler, provider, _) = setup(None);
        let result = handler
            .handle(command(Some("s1"), Some("other"), Some("good")))
            .await;
        assert_eq!(result.unwrap_err(), OAuthError::StateMismatch);
        assert_eq!(provider.exchange_calls(), 0);
    }

    #[tokio::test]
    async fn missing_code_rejected_before_exchange() {
        let (handler, provider, _) = setup(None);
        let result = handler.handle(command(Some("s1"), Some("s1"), None)).await;
        assert_eq!(result.unwrap_err(), OAuthError::MissingAuthorizationCode);
        assert_eq!(provider.exchange_calls(), 0);
    }

    #[tokio::test]
    async fn missing_state_cookie_is_tolerated() {
        let (handler, _, _) = setup(None);
        let result = handler
            .handle(command(None, Some("s1"), Some("good")))
            .await
            .unwrap();
        assert_eq!(result.state_check, StateCheck::CookieMissing);
    }

    #[tokio::test]
    async fn bad_code_fails_exchange() {
        let (handler, _, store) = setup(None);
        let result = handler.handle(command(None, None, Some("bad"))).await;
        assert!(matches!(result, Err(OAuthError::TokenExchangeFailed(_))));
        assert!(store.users().is_empty());
    }

    #[tokio::test]
    async fn store_failure_surfaces_as_failed() {
        let (handler, _, store) = setup(None);
        store.fail_next(StoreError::Request("down".to_string()));
        let result = handler.handle(command(None, None, Some("good"))).await;
        assert!(matches!(
            result,
            Err(OAuthError::Failed {
                provider: OAuthProviderKind::GitHub,
                ..
            })
        ));
    }
}
