//! HTTP handlers for item endpoints.

use axum::extract::{Json, Path, Query, State};
use axum::response::IntoResponse;

use super::dto::{ItemListResponse, ListItemsQuery, SubmitItemRequest, SubmitItemResponse};
use crate::adapters::http::body::JsonBody;
use crate::adapters::http::error::ApiError;
use crate::adapters::http::session::CurrentSession;
use crate::adapters::http::state::AppState;
use crate::application::handlers::items::{GetItemCommand, SubmitItemCommand, SUBMISSION_RECEIVED};

/// GET /api/items
pub async fn list_items(
    State(state): State<AppState>,
    Query(query): Query<ListItemsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state.list_items_handler().handle(query.into()).await?;
    Ok(Json(ItemListResponse::from(result)))
}

/// GET /api/items/{slug}
pub async fn get_item(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let item = state.get_item_handler().handle(GetItemCommand { slug }).await?;
    Ok(Json(item))
}

/// POST /api/submit
pub async fn submit_item(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    JsonBody(request): JsonBody<SubmitItemRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = SubmitItemCommand {
        submitter: session.id,
        link: request.link,
        name: request.name,
        description: request.description,
        introduction: request.introduction,
        categories: request.categories,
        tags: request.tags,
        icon: request.icon,
        image: request.image,
        price_plan: request.price_plan,
    };

    let result = state.submit_item_handler().handle(cmd).await?;

    let message = result
        .checkout_url
        .is_none()
        .then(|| SUBMISSION_RECEIVED.to_string());
    Ok(Json(SubmitItemResponse {
        success: true,
        item: result.item,
        checkout_url: result.checkout_url,
        message,
    }))
}
