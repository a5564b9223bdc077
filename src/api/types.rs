use axum::extract::{FromRequest, FromRequestParts};
use serde::{Deserialize, Serialize};

use super::ApiError;

/// Body of every non-2xx response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub uptime_seconds: u64,
}

/// Body of `POST /movies/favorites` and `POST /history`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieRefRequest {
    pub movie_id: Option<i32>,
}

/// `Json` extractor whose rejections render as `{"error": ...}` with 400.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

/// `Path` extractor with the same error body; unparsable segments are 400.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct PathParam<T>(pub T);
