//! BeginSignInHandler - starts an OAuth authorization code flow.

use std::sync::Arc;

use crate::domain::auth::{sanitize_callback_url, OAuthError};
use crate::ports::OAuthProvider;

#[derive(Debug, Clone, Default)]
pub struct BeginSignInCommand {
    /// Where to land after sign-in; only local paths are kept.
    pub callback_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeginSignInResult {
    /// Random value echoed back by the provider.
    pub state: String,
    pub callback_url: String,
    pub authorization_url: String,
}

pub struct BeginSignInHandler {
    provider: Arc<dyn OAuthProvider>,
}

impl BeginSignInHandler {
    pub fn new(provider: Arc<dyn OAuthProvider>) -> Self {
        Self { provider }
    }

    pub fn handle(&self, cmd: BeginSignInCommand) -> Result<BeginSignInResult, OAuthError> {
        let state = uuid::Uuid::new_v4().to_string();
        let authorization_url = self.provider.authorization_url(&state)?;
        Ok(BeginSignInResult {
            state,
            callback_url: sanitize_callback_url(cmd.callback_url.as_deref()),
            authorization_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::oauth::MockOAuthProvider;
    use crate::domain::auth::OAuthProviderKind;

    fn handler() -> BeginSignInHandler {
        BeginSignInHandler::new(Arc::new(MockOAuthProvider::new(OAuthProviderKind::Google)))
    }

    #[test]
    fn state_is_fresh_and_in_url() {
        let first = handler().handle(BeginSignInCommand::default()).unwrap();
        let second = handler().handle(BeginSignInCommand::default()).unwrap();
        assert_ne!(first.state, second.state);
        assert!(first.authorization_url.contains(&first.state));
        assert_eq!(first.callback_url, "/");
    }

    #[test]
    fn offsite_callback_is_replaced() {
        let result = handler()
            .handle(BeginSignInCommand {
                callback_url: Some("https://evil.example".to_string()),
            })
            .unwrap();
        assert_eq!(result.callback_url, "/");
    }
}
