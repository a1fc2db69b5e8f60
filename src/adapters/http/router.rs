//! Top-level router: every API module nested under `/api`.

use axum::http::{header, HeaderValue, Method};
use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::auth::auth_routes;
use super::checkout::checkout_routes;
use super::items::{item_routes, submit_routes};
use super::newsletter::newsletter_routes;
use super::state::AppState;
use super::webhooks::webhook_routes;

/// GET /health
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Builds the application router.
///
/// CORS is only applied when at least one valid origin is given; the
/// layer allows credentials so the session cookie travels cross-origin.
pub fn app_router(state: AppState, cors_origins: &[String]) -> Router {
    let api = Router::new()
        .nest("/auth", auth_routes())
        .nest("/checkout", checkout_routes())
        .nest("/webhooks", webhook_routes())
        .nest("/newsletter", newsletter_routes())
        .nest("/items", item_routes())
        .nest("/submit", submit_routes());

    let router = Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    match cors_layer(cors_origins) {
        Some(cors) => router.layer(cors),
        None => router,
    }
}

fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter(|o| !o.is_empty())
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE])
            .allow_credentials(true),
    )
}
