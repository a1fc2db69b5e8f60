//! Axum routers for item endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{get_item, list_items, submit_item};
use crate::adapters::http::state::AppState;

/// Mounted at `/api/items`.
pub fn item_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_items))
        .route("/:slug", get(get_item))
}

/// Mounted at `/api/submit`.
pub fn submit_routes() -> Router<AppState> {
    Router::new().route("/", post(submit_item))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    use crate::adapters::memory::{InMemoryStore, ItemRecord};
    use crate::domain::foundation::UserId;
    use crate::domain::session::{Role, Session, SessionCodec};

    const SECRET: &[u8] = b"an-adequately-long-test-session-secret";

    fn app(store: Arc<InMemoryStore>) -> Router {
        let state = AppState::new("https://dir.example", SessionCodec::new(SECRET), store);
        Router::new()
            .nest("/api/items", item_routes())
            .nest("/api/submit", submit_routes())
            .with_state(state)
    }

    async fn json(response: axum::response::Response) -> serde_json::Value {
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn listing_reports_pagination() {
        let store = Arc::new(InMemoryStore::new());
        store.insert_item(ItemRecord::published("a", "Alpha", "2024-01-01"));
        store.insert_item(ItemRecord::published("b", "Beta", "2024-01-02"));
        let mut hidden = ItemRecord::published("c", "Gamma", "2024-01-03");
        hidden.force_hidden = true;
        store.insert_item(hidden);

        let response = app(store).oneshot(get("/api/items?limit=1")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json(response).await;
        assert_eq!(body["pagination"]["total"], 2);
        assert_eq!(body["pagination"]["totalPages"], 2);
        assert_eq!(body["items"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn item_by_slug_or_404() {
        let store = Arc::new(InMemoryStore::new());
        store.insert_item(ItemRecord::published("a", "Alpha", "2024-01-01"));

        let response = app(store.clone()).oneshot(get("/api/items/alpha")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json(response).await["_id"], "a");

        let response = app(store).oneshot(get("/api/items/missing")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn submit_requires_session_and_valid_body() {
        let store = Arc::new(InMemoryStore::new());
        let body = serde_json::json!({
            "link": "https://tool.dev",
            "name": "Tool",
            "description": "A tool",
            "categories": ["cat-dev"]
        });
        let request = |cookie: Option<String>, body: &serde_json::Value| {
            let mut builder = Request::builder()
                .method("POST")
                .uri("/api/submit")
                .header(header::CONTENT_TYPE, "application/json");
            if let Some(cookie) = cookie {
                builder = builder.header(header::COOKIE, cookie);
            }
            builder.body(Body::from(body.to_string())).unwrap()
        };
        let token = SessionCodec::new(SECRET)
            .encode(&Session {
                id: UserId::new("user-1").unwrap(),
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                image: None,
                role: Role::User,
            })
            .unwrap();
        let cookie = format!("auth-token={}", token);

        let response = app(store.clone()).oneshot(request(None, &body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app(store.clone())
            .oneshot(request(Some(cookie.clone()), &serde_json::json!({"name": "x"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app(store.clone())
            .oneshot(request(Some(cookie), &body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Submission received! We will review it shortly.");
        assert_eq!(store.items().len(), 1);
    }
}
