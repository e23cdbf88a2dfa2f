// Library exports for integration tests
pub mod app_state;
pub mod catalog;
pub mod config;
pub mod handlers;
pub mod server;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use app_state::AppState;
pub use catalog::FileCatalog;
pub use config::{BackendConfig, Config, S3BackendConfig};
pub use storage::{InMemoryStorage, ObjectStore, S3Backend};
pub use types::{ObjectMetadata, StoreError, StoredFile};

// Re-export server creation function
pub use server::create_app;
