use crate::{app_state::AppState, types::ApiError};
use axum::{
    body::Body,
    extract::{Query, State, rejection::QueryRejection},
    http::{StatusCode, header},
    response::Response,
};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct GetFileQuery {
    key: Option<String>,
}

/// GET /api/file/get?key= - Stream a PDF for inline display
pub async fn get_file(
    query: Result<Query<GetFileQuery>, QueryRejection>,
    State(app_state): State<AppState>,
) -> Result<Response, ApiError> {
    let key = match query {
        Ok(Query(GetFileQuery { key: Some(key) })) if !key.is_empty() => key,
        Ok(_) => return Err(ApiError::BadRequest("File key is required".to_string())),
        Err(rejection) => {
            tracing::warn!("Rejected GET file query: {}", rejection.body_text());
            return Err(ApiError::BadRequest("File key is required".to_string()));
        }
    };
    let bucket = &app_state.bucket_name;
    tracing::info!("GET file: bucket={}, key={}", bucket, key);

    let file = app_state
        .catalog
        .open_file_stream(bucket, &key)
        .await
        .map_err(|e| ApiError::from_store("Failed to get PDF file", e))?;

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, file.content_type)
        .header(header::CONTENT_DISPOSITION, file.content_disposition())
        .header(header::CACHE_CONTROL, file.cache_control());

    if let Some(len) = file.content_length {
        builder = builder.header(header::CONTENT_LENGTH, len);
    }

    builder.body(Body::from_stream(file.body)).map_err(|e| {
        tracing::error!("Failed to build response for {}: {}", key, e);
        ApiError::Internal("Failed to get PDF file".to_string())
    })
}
