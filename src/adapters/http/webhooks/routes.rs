//! Axum router for payment webhooks.
//!
//! No session is required; deliveries are authenticated by signature.

use axum::{routing::post, Router};

use super::handlers::handle_creem_webhook;
use crate::adapters::http::state::AppState;

/// Mounted at `/api/webhooks`.
pub fn webhook_routes() -> Router<AppState> {
    Router::new().route("/creem", post(handle_creem_webhook))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::adapters::memory::InMemoryStore;
    use crate::domain::payment::sign_payload;
    use crate::domain::session::SessionCodec;

    const SECRET: &str = "whsec_test";

    fn app(with_secret: bool) -> Router {
        let mut state = AppState::new(
            "https://dir.example",
            SessionCodec::new(b"an-adequately-long-test-session-secret"),
            Arc::new(InMemoryStore::new()),
        );
        if with_secret {
            state = state.with_webhook_secret(SECRET);
        }
        Router::new()
            .nest("/api/webhooks", webhook_routes())
            .with_state(state)
    }

    fn delivery(body: &[u8], signature: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("POST").uri("/api/webhooks/creem");
        if let Some(signature) = signature {
            builder = builder.header("creem-signature", signature);
        }
        builder.body(Body::from(body.to_vec())).unwrap()
    }

    const EVENT: &[u8] = br#"{"id":"evt_9","eventType":"refund.created","object":{"id":"ref_1"}}"#;

    #[tokio::test]
    async fn signed_delivery_is_acknowledged() {
        let signature = sign_payload(SECRET, EVENT);
        let response = app(true)
            .oneshot(delivery(EVENT, Some(&signature)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_and_invalid_signatures_are_bad_requests() {
        let response = app(true).oneshot(delivery(EVENT, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let signature = sign_payload("whsec_other", EVENT);
        let response = app(true)
            .oneshot(delivery(EVENT, Some(&signature)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unconfigured_secret_is_server_error() {
        let signature = sign_payload(SECRET, EVENT);
        let response = app(false)
            .oneshot(delivery(EVENT, Some(&signature)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
