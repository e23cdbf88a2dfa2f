use crate::{app_state::AppState, handlers};
use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

/// Create the application router with all routes and middleware
///
/// This function is used by both main.rs and integration tests to ensure
/// the same server configuration is used in both production and tests.
pub fn create_app(app_state: AppState) -> Router {
    use handlers::{get_file, health, index, list_files, not_found};

    Router::new()
        .route("/", get(index))
        .route("/api/file/list", get(list_files))
        .route("/api/file/get", get(get_file))
        .route("/api/health", get(health))
        .fallback(not_found)
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}
