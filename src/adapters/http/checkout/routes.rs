//! Axum router for checkout endpoints.

use axum::{routing::post, Router};

use super::handlers::{create_checkout, create_creem_checkout};
use crate::adapters::http::state::AppState;

/// Mounted at `/api/checkout`.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_checkout))
        .route("/creem", post(create_creem_checkout))
}
