use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Failures reported by an object store backend
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Network, auth or service error, including a missing bucket
    #[error("object store unavailable: {0}")]
    StoreUnavailable(String),
    /// The store has no content for the requested key
    #[error("object not found: {0}")]
    ObjectNotFound(String),
}

/// Errors returned to HTTP clients as `{"error": "..."}`
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound,
    Internal(String),
    Unavailable(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    /// Log the store failure in full and keep only the generic message for
    /// the client.
    pub fn from_store(message: &str, err: StoreError) -> Self {
        tracing::error!(error = %err, "{}", message);
        ApiError::Internal(message.to_string())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn message(self) -> String {
        match self {
            ApiError::BadRequest(msg) | ApiError::Internal(msg) | ApiError::Unavailable(msg) => msg,
            ApiError::NotFound => "Not found".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.message(),
        };

        (status, Json(body)).into_response()
    }
}
