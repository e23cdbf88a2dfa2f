use axum::{Router, body::Body, http::Request, response::Response};
use bytes::Bytes;
use http_body_util::BodyExt;
use pdfshelf::{AppState, FileCatalog, InMemoryStorage, ObjectMetadata, create_app};
use std::sync::Arc;
use tower::ServiceExt;

/// Router built by the production `create_app` over an in-memory store
///
/// Requests go straight through the router with `oneshot`, no socket needed.
/// The storage handle stays shared with the router so tests can seed objects.
pub struct TestApp {
    pub storage: InMemoryStorage,
    pub bucket_name: String,
    app: Router,
}

impl TestApp {
    pub async fn start(bucket_name: &str) -> Self {
        let storage = InMemoryStorage::new();
        storage.create_bucket(bucket_name).await;
        Self::with_storage(storage, bucket_name)
    }

    /// App pointing at `bucket_name` without creating it in the store
    pub fn with_storage(storage: InMemoryStorage, bucket_name: &str) -> Self {
        let catalog = FileCatalog::new(Arc::new(storage.clone()), vec!["pdf".to_string()], 3600);
        let app = create_app(AppState::new(catalog, bucket_name.to_string()));

        TestApp {
            storage,
            bucket_name: bucket_name.to_string(),
            app,
        }
    }

    pub async fn put(&self, key: &str, data: &[u8]) -> String {
        self.storage
            .put_object(&self.bucket_name, key, Bytes::copy_from_slice(data))
            .await
    }

    pub async fn put_with_metadata(&self, data: &[u8], metadata: ObjectMetadata) {
        self.storage
            .put_object_with_metadata(&self.bucket_name, Bytes::copy_from_slice(data), metadata)
            .await
    }

    pub async fn get(&self, uri: &str) -> Response {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.app.clone().oneshot(request).await.unwrap()
    }

    pub async fn get_json(&self, uri: &str) -> (axum::http::StatusCode, serde_json::Value) {
        let response = self.get(uri).await;
        let status = response.status();
        let body = body_bytes(response).await;
        (status, serde_json::from_slice(&body).unwrap())
    }
}

pub async fn body_bytes(response: Response) -> Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}
