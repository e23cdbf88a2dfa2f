pub mod error;
mod models;

pub use error::{ApiError, StoreError};
pub use models::{FileListResponse, FileStream, ObjectMetadata, StoredFile};
