use crate::types::ApiError;
use axum::response::{IntoResponse, Response};

/// Fallback handler for 404 Not Found
pub async fn not_found() -> Response {
    ApiError::NotFound.into_response()
}
