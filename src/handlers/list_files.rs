use crate::{
    app_state::AppState,
    types::{ApiError, FileListResponse},
};
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct ListFilesQuery {
    #[serde(default)]
    prefix: String,
}

/// GET /api/file/list?prefix= - List PDF files, newest first
pub async fn list_files(
    query: Result<Query<ListFilesQuery>, QueryRejection>,
    State(app_state): State<AppState>,
) -> Result<Json<FileListResponse>, ApiError> {
    let Query(params) = query.map_err(|rejection| {
        tracing::warn!("Rejected LIST files query: {}", rejection.body_text());
        ApiError::BadRequest("Invalid prefix parameter".to_string())
    })?;
    let bucket = &app_state.bucket_name;
    tracing::info!("LIST files: bucket={}, prefix={:?}", bucket, params.prefix);

    let files = app_state
        .catalog
        .list_files(bucket, &params.prefix)
        .await
        .map_err(|e| ApiError::from_store("Failed to list PDF files", e))?;

    Ok(Json(FileListResponse::from(files)))
}
