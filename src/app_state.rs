use crate::catalog::FileCatalog;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub catalog: FileCatalog,
    pub bucket_name: String,
}

impl AppState {
    pub fn new(catalog: FileCatalog, bucket_name: String) -> Self {
        Self {
            catalog,
            bucket_name,
        }
    }
}
