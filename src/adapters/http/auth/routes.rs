//! Axum router for sign-in endpoints.

use axum::{routing::get, Router};

use super::handlers::{callback, sign_in};
use crate::adapters::http::state::AppState;

/// Mounted at `/api/auth`.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signin/:provider", get(sign_in))
        .route("/callback/:provider", get(callback))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    use crate::adapters::memory::InMemoryStore;
    use crate::adapters::oauth::MockOAuthProvider;
    use crate::domain::auth::{OAuthProfile, OAuthProviderKind};
    use crate::domain::session::SessionCodec;

    const SECRET: &[u8] = b"an-adequately-long-test-session-secret";

    fn app() -> (Router, Arc<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::new());
        let provider = MockOAuthProvider::new(OAuthProviderKind::GitHub).with_code(
            "good",
            OAuthProfile {
                provider: OAuthProviderKind::GitHub,
                provider_id: "42".to_string(),
                email: "octo@example.com".to_string(),
                name: "octocat".to_string(),
                avatar_url: None,
            },
        );
        let state = AppState::new("https://dir.example", SessionCodec::new(SECRET), store.clone())
            .with_oauth(Arc::new(provider));
        (Router::new().nest("/api/auth", auth_routes()).with_state(state), store)
    }

    fn set_cookies(response: &axum::response::Response) -> Vec<String> {
        response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok().map(String::from))
            .collect()
    }

    #[tokio::test]
    async fn sign_in_redirects_and_sets_state_cookies() {
        let (app, _) = app();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/auth/signin/github?callbackUrl=/dashboard")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.status().is_redirection());
        let cookies = set_cookies(&response);
        assert!(cookies.iter().any(|c| c.starts_with("auth-state=")));
        assert!(cookies.iter().any(|c| c.starts_with("auth-callback-url=")));
    }

    #[tokio::test]
    async fn unconfigured_provider_is_server_error() {
        let (app, _) = app();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/auth/signin/google")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn callback_sets_session_and_redirects_to_stored_destination() {
        let (app, store) = app();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/auth/callback/github?code=good&state=s1")
                    .header(header::COOKIE, "auth-state=s1; auth-callback-url=/dashboard")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.status().is_redirection());
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/dashboard"
        );
        let cookies = set_cookies(&response);
        assert!(cookies.iter().any(|c| c.starts_with("auth-token=")));
        assert!(cookies.iter().any(|c| c.starts_with("auth-state=;")));
        assert_eq!(store.users().len(), 1);
    }

    #[tokio::test]
    async fn state_mismatch_is_rejected_and_cookies_cleared() {
        let (app, store) = app();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/auth/callback/github?code=good&state=forged")
                    .header(header::COOKIE, "auth-state=s1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let cookies = set_cookies(&response);
        assert!(cookies.iter().any(|c| c.starts_with("auth-state=;")));
        assert!(!cookies.iter().any(|c| c.starts_with("auth-token=")));
        assert!(store.users().is_empty());
    }
}
