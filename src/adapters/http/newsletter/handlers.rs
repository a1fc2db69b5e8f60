//! HTTP handlers for newsletter endpoints.

use axum::extract::{Json, State};
use axum::response::IntoResponse;

use super::dto::{NewsletterRequest, NewsletterResponse};
use crate::adapters::http::body::JsonBody;
use crate::adapters::http::error::ApiError;
use crate::adapters::http::state::AppState;
use crate::application::handlers::newsletter::{
    SubscribeCommand, UnsubscribeCommand, UNSUBSCRIBED,
};

/// POST /api/newsletter/subscribe
pub async fn subscribe(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<NewsletterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = state
        .subscribe_handler()
        .handle(SubscribeCommand {
            email: request.email,
        })
        .await?;
    Ok(Json(NewsletterResponse::ok(outcome.message())))
}

/// POST /api/newsletter/unsubscribe
pub async fn unsubscribe(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<NewsletterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .unsubscribe_handler()
        .handle(UnsubscribeCommand {
            email: request.email,
        })
        .await?;
    Ok(Json(NewsletterResponse::ok(UNSUBSCRIBED)))
}
