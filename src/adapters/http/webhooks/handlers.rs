//! HTTP handlers for payment webhooks.

use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::state::AppState;
use crate::application::handlers::payment::HandleCreemWebhookCommand;

pub const CREEM_SIGNATURE_HEADER: &str = "creem-signature";

#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub received: bool,
}

/// POST /api/webhooks/creem
///
/// The signature covers the raw body, so the body is taken as bytes.
pub async fn handle_creem_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let signature = headers
        .get(CREEM_SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    let cmd = HandleCreemWebhookCommand {
        payload: body.to_vec(),
        signature,
    };
    state.creem_webhook_handler().handle(cmd).await?;

    Ok(Json(WebhookAck { received: true }))
}
