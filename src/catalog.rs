//! Listing and retrieval of browsable files on top of an [`ObjectStore`].
//!
//! The store reports raw metadata; this layer keeps only keys with a
//! recognized extension, fills in fields the store left out, and orders the
//! result newest first.

use crate::storage::ObjectStore;
use crate::types::{FileStream, ObjectMetadata, StoreError, StoredFile};
use std::sync::Arc;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

#[derive(Clone)]
pub struct FileCatalog {
    store: Arc<dyn ObjectStore>,
    extensions: Vec<String>,
    cache_max_age: u64,
}

impl FileCatalog {
    /// `extensions` are expected lowercase and without the leading dot
    pub fn new(store: Arc<dyn ObjectStore>, extensions: Vec<String>, cache_max_age: u64) -> Self {
        Self {
            store,
            extensions,
            cache_max_age,
        }
    }

    pub fn store(&self) -> &Arc<dyn ObjectStore> {
        &self.store
    }

    /// Case-insensitive match of the key's extension against the configured set
    pub fn is_recognized(&self, key: &str) -> bool {
        let Some((_, ext)) = key.rsplit_once('.') else {
            return false;
        };
        if ext.contains('/') {
            return false;
        }
        self.extensions
            .iter()
            .any(|known| known.eq_ignore_ascii_case(ext))
    }

    pub async fn list_files(
        &self,
        bucket: &str,
        prefix: &str,
    ) -> Result<Vec<StoredFile>, StoreError> {
        let prefix = (!prefix.is_empty()).then_some(prefix);
        let objects = self.store.list_objects(bucket, prefix).await?;

        let now = chrono::Utc::now();
        let mut files: Vec<StoredFile> = objects
            .into_iter()
            .filter(|obj| self.is_recognized(&obj.key))
            .map(|obj| to_stored_file(obj, now))
            .collect();

        files.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));

        tracing::debug!("Listed {} files in {} (prefix={:?})", files.len(), bucket, prefix);
        Ok(files)
    }

    pub async fn open_file_stream(&self, bucket: &str, key: &str) -> Result<FileStream, StoreError> {
        let (body, metadata) = self.store.get_object(bucket, key).await?;

        Ok(FileStream {
            body,
            content_type: PDF_CONTENT_TYPE,
            content_length: metadata.size,
            file_name: file_name_from_key(key).to_string(),
            cache_max_age: self.cache_max_age,
        })
    }
}

fn to_stored_file(obj: ObjectMetadata, now: chrono::DateTime<chrono::Utc>) -> StoredFile {
    StoredFile {
        etag: obj.etag.as_deref().map(strip_quotes).unwrap_or_default().to_string(),
        last_modified: obj.last_modified.unwrap_or(now),
        size: obj.size.unwrap_or(0),
        key: obj.key,
    }
}

/// S3 reports ETags wrapped in double quotes
pub fn strip_quotes(etag: &str) -> &str {
    etag.trim_matches('"')
}

/// Last `/`-delimited segment of a key
pub fn file_name_from_key(key: &str) -> &str {
    key.rsplit('/').next().unwrap_or(key)
}
