//! API error type shared by every route.
//!
//! Domain errors convert into `ApiError`, which renders as
//! `{ "error_code", "message" }` with the matching status code. Upstream
//! detail is logged here and kept out of 5xx bodies.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::domain::auth::OAuthError;
use crate::domain::catalog::{CatalogError, NewsletterError};
use crate::domain::payment::{CheckoutError, WebhookError};
use crate::domain::session::SessionError;

/// Standard error response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional details (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(
        error_code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            details: Some(details),
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    /// No valid session cookie.
    Unauthorized,
    /// Request body missing, not JSON, or the wrong shape.
    InvalidBody(String),
    OAuth(OAuthError),
    Checkout(CheckoutError),
    Webhook(WebhookError),
    Newsletter(NewsletterError),
    Catalog(CatalogError),
    Session(SessionError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl From<OAuthError> for ApiError {
    fn from(err: OAuthError) -> Self {
        ApiError::OAuth(err)
    }
}

impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        ApiError::Checkout(err)
    }
}

impl From<WebhookError> for ApiError {
    fn from(err: WebhookError) -> Self {
        ApiError::Webhook(err)
    }
}

impl From<NewsletterError> for ApiError {
    fn from(err: NewsletterError) -> Self {
        ApiError::Newsletter(err)
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        ApiError::Catalog(err)
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        ApiError::Session(err)
    }
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        use StatusCode as S;
        match self {
            ApiError::Unauthorized => (S::UNAUTHORIZED, "UNAUTHORIZED", "Unauthorized".to_string()),
            ApiError::InvalidBody(detail) => (S::BAD_REQUEST, "VALIDATION_FAILED", detail.clone()),

            ApiError::OAuth(e) => match e {
                OAuthError::UnknownProvider(_) => (S::NOT_FOUND, "UNKNOWN_PROVIDER", e.to_string()),
                OAuthError::ProviderNotConfigured(_) => {
                    (S::INTERNAL_SERVER_ERROR, "PROVIDER_NOT_CONFIGURED", e.to_string())
                }
                OAuthError::StateMismatch => (S::BAD_REQUEST, "INVALID_STATE", e.to_string()),
                OAuthError::MissingAuthorizationCode => {
                    (S::BAD_REQUEST, "MISSING_AUTHORIZATION_CODE", e.to_string())
                }
                OAuthError::NoEmailAvailable(_) => (S::BAD_REQUEST, "NO_EMAIL_AVAILABLE", e.to_string()),
                OAuthError::TokenExchangeFailed(_) | OAuthError::Failed { .. } => {
                    (S::INTERNAL_SERVER_ERROR, "OAUTH_FAILED", e.to_string())
                }
            },

            ApiError::Checkout(e) => match e {
                CheckoutError::MissingField(_) => (S::BAD_REQUEST, "VALIDATION_FAILED", e.to_string()),
                CheckoutError::UnknownPricePlan(_) => {
                    (S::BAD_REQUEST, "UNKNOWN_PRICE_PLAN", e.to_string())
                }
                CheckoutError::ProviderNotConfigured(_) => {
                    (S::INTERNAL_SERVER_ERROR, "PROVIDER_NOT_CONFIGURED", e.to_string())
                }
                CheckoutError::CreationFailed(_) => (
                    S::INTERNAL_SERVER_ERROR,
                    "CHECKOUT_CREATION_FAILED",
                    "Failed to create checkout session".to_string(),
                ),
            },

            ApiError::Webhook(e) => match e {
                WebhookError::MissingSignature => (S::BAD_REQUEST, "MISSING_SIGNATURE", e.to_string()),
                WebhookError::InvalidSignature => (S::BAD_REQUEST, "INVALID_SIGNATURE", e.to_string()),
                WebhookError::NotConfigured => {
                    (S::INTERNAL_SERVER_ERROR, "PROVIDER_NOT_CONFIGURED", e.to_string())
                }
                WebhookError::ParseError(_) | WebhookError::Processing(_) => (
                    S::BAD_REQUEST,
                    "WEBHOOK_PROCESSING_FAILED",
                    "Webhook processing failed".to_string(),
                ),
            },

            ApiError::Newsletter(e) => match e {
                NewsletterError::Validation(v) => (S::BAD_REQUEST, "VALIDATION_FAILED", v.to_string()),
                NewsletterError::Upstream(_) => (
                    S::INTERNAL_SERVER_ERROR,
                    "NEWSLETTER_FAILED",
                    "Failed to update newsletter subscription".to_string(),
                ),
            },

            ApiError::Catalog(e) => match e {
                CatalogError::Validation(v) => (S::BAD_REQUEST, "VALIDATION_FAILED", v.to_string()),
                CatalogError::ItemNotFound(_) => (S::NOT_FOUND, "ITEM_NOT_FOUND", "Item not found".to_string()),
                CatalogError::Storage(_) | CatalogError::Checkout(_) => (
                    S::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Failed to process request".to_string(),
                ),
            },

            ApiError::Session(_) => (
                S::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "Failed to create session".to_string(),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = self.parts();
        if status.is_server_error() {
            tracing::error!(error_code, error = ?self, "Request failed");
        } else {
            tracing::debug!(error_code, error = ?self, "Request rejected");
        }
        (status, Json(ErrorResponse::new(error_code, message))).into_response()
    }
}
