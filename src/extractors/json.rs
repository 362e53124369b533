//! JSON body guard: every body rejection becomes a JSON error before a handler runs.
//! A request without a JSON body is read as `{}`, so field validation still names what is missing.

use crate::error::{AppError, FieldError};
use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header, HeaderMap, StatusCode},
};
use serde::de::DeserializeOwned;
use serde_json::error::Category;

const EMPTY_OBJECT: &[u8] = b"{}";

/// Deserialized JSON body with rejections mapped onto [`AppError`].
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = has_json_content_type(req.headers());
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                AppError::PayloadTooLarge(e.body_text())
            } else {
                AppError::MalformedRequest(e.body_text())
            }
        })?;
        let source: &[u8] = if is_json && !bytes.iter().all(u8::is_ascii_whitespace) {
            &bytes
        } else {
            EMPTY_OBJECT
        };
        parse(source).map(JsonBody)
    }
}

fn parse<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, AppError> {
    serde_json::from_slice(bytes).map_err(|e| match e.classify() {
        // Valid JSON, wrong shape: unknown field or wrong type.
        Category::Data => AppError::Validation(vec![FieldError::new("body", e.to_string())]),
        Category::Syntax | Category::Eof | Category::Io => AppError::MalformedRequest(e.to_string()),
    })
}

/// `application/json` or any `+json` media type, parameters ignored.
fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let essence = value.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
    essence == "application/json" || (essence.starts_with("application/") && essence.ends_with("+json"))
}
