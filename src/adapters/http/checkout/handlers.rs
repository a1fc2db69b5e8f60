//! HTTP handlers for checkout endpoints.

use axum::extract::{Json, State};
use axum::response::IntoResponse;

use super::dto::{CheckoutRequest, CheckoutResponse, CreemCheckoutRequest, CreemCheckoutResponse};
use crate::adapters::http::body::JsonBody;
use crate::adapters::http::error::ApiError;
use crate::adapters::http::session::CurrentSession;
use crate::adapters::http::state::AppState;
use crate::application::handlers::checkout::{CreateCheckoutCommand, CreateCreemCheckoutCommand};

/// POST /api/checkout
pub async fn create_checkout(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    JsonBody(request): JsonBody<CheckoutRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = CreateCheckoutCommand {
        user_id: session.id,
        customer_email: Some(session.email),
        item_id: request.item_id,
        price_plan: request.price_plan,
        provider: request.provider,
    };

    let result = state.create_checkout_handler().handle(cmd).await?;
    Ok(Json(CheckoutResponse::from(result)))
}

/// POST /api/checkout/creem
pub async fn create_creem_checkout(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreemCheckoutRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = CreateCreemCheckoutCommand {
        product_id: request.product_id,
        user_id: request.user_id,
        item_id: request.item_id,
        price_plan: request.price_plan,
        customer_email: request.customer_email,
    };

    let result = state.create_creem_checkout_handler().handle(cmd).await?;
    Ok(Json(CreemCheckoutResponse::from(result)))
}
