use crate::{app_state::AppState, storage::ObjectStore, types::ApiError};
use axum::{Json, extract::State};
use serde_json::{Value, json};

/// GET /api/health - Check that the configured bucket is reachable
pub async fn health(State(app_state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let bucket = &app_state.bucket_name;
    tracing::debug!("HEALTH: bucket={}", bucket);

    match app_state.catalog.store().head_bucket(bucket).await {
        Ok(()) => Ok(Json(json!({ "status": "ok", "bucket": bucket }))),
        Err(err) => {
            tracing::warn!("Health check failed for {}: {}", bucket, err);
            Err(ApiError::Unavailable("Object store unavailable".to_string()))
        }
    }
}
