//! Axum router for newsletter endpoints.

use axum::{routing::post, Router};

use super::handlers::{subscribe, unsubscribe};
use crate::adapters::http::state::AppState;

/// Mounted at `/api/newsletter`.
pub fn newsletter_routes() -> Router<AppState> {
    Router::new()
        .route("/subscribe", post(subscribe))
        .route("/unsubscribe", post(unsubscribe))
}
