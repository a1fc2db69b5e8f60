//! JSON body extractor that rejects with [`ApiError`].

use axum::async_trait;
use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// Like [`Json`], but a missing content type, malformed JSON or a
/// wrong-typed field becomes a 400 `VALIDATION_FAILED` error body.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, StatusCode};
    use axum::response::IntoResponse;
    use serde::Deserialize;

    use crate::adapters::http::error::ErrorResponse;

    #[derive(Debug, Deserialize)]
    struct Payload {
        name: String,
    }

    async fn extract(content_type: Option<&str>, body: &str) -> Result<JsonBody<Payload>, ApiError> {
        let mut builder = Request::builder().method("POST").uri("/");
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        let req = builder.body(Body::from(body.to_string())).unwrap();
        JsonBody::<Payload>::from_request(req, &()).await
    }

    async fn rejection_body(err: ApiError) -> (StatusCode, ErrorResponse) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn well_formed_body_is_extracted() {
        let JsonBody(payload) = extract(Some("application/json"), r#"{"name":"Ada"}"#)
            .await
            .unwrap();
        assert_eq!(payload.name, "Ada");
    }

    #[tokio::test]
    async fn bad_bodies_are_validation_errors() {
        for (content_type, body) in [
            (Some("application/json"), r#"{"name":5}"#),
            (Some("application/json"), "{not json"),
            (None, r#"{"name":"Ada"}"#),
        ] {
            let err = extract(content_type, body).await.unwrap_err();
            let (status, body) = rejection_body(err).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body.error_code, "VALIDATION_FAILED");
        }
    }
}
