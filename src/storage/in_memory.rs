use super::backend::{ObjectStore, ObjectStream};
use crate::types::{ObjectMetadata, StoreError};
use bytes::Bytes;
use futures::stream;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Largest page a single listing returns, same as S3's default
const MAX_KEYS: usize = 1000;

/// Chunk size used when streaming an object back
const CHUNK_SIZE: usize = 64 * 1024;

type Bucket = HashMap<String, StoredObject>;

/// In-memory object store for testing/development
#[derive(Clone, Default)]
pub struct InMemoryStorage {
    buckets: Arc<RwLock<HashMap<String, Bucket>>>,
}

#[derive(Clone)]
struct StoredObject {
    data: Bytes,
    metadata: ObjectMetadata,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn calculate_etag(data: &[u8]) -> String {
        use sha2::{Digest, Sha256};
        let hash = Sha256::digest(data);
        format!("\"{}\"", hex::encode(hash))
    }

    pub async fn create_bucket(&self, bucket: &str) {
        let mut buckets = self.buckets.write().await;
        buckets.entry(bucket.to_string()).or_default();
    }

    /// Store an object the way S3 reports it: quoted ETag, current time.
    /// Creates the bucket if needed and returns the ETag.
    pub async fn put_object(&self, bucket: &str, key: &str, data: Bytes) -> String {
        let etag = Self::calculate_etag(&data);
        let metadata = ObjectMetadata {
            key: key.to_string(),
            size: Some(data.len() as u64),
            etag: Some(etag.clone()),
            last_modified: Some(chrono::Utc::now()),
        };

        self.put_object_with_metadata(bucket, data, metadata).await;
        etag
    }

    /// Store an object with caller-supplied metadata, including missing fields.
    /// A reported size always matches the stored data.
    pub async fn put_object_with_metadata(
        &self,
        bucket: &str,
        data: Bytes,
        mut metadata: ObjectMetadata,
    ) {
        if metadata.size.is_some() {
            metadata.size = Some(data.len() as u64);
        }

        let mut buckets = self.buckets.write().await;
        buckets
            .entry(bucket.to_string())
            .or_default()
            .insert(metadata.key.clone(), StoredObject { data, metadata });
    }

    fn no_such_bucket(bucket: &str) -> StoreError {
        StoreError::StoreUnavailable(format!("NoSuchBucket: {}", bucket))
    }
}

#[async_trait::async_trait]
impl ObjectStore for InMemoryStorage {
    async fn head_bucket(&self, bucket: &str) -> Result<(), StoreError> {
        let buckets = self.buckets.read().await;
        if buckets.contains_key(bucket) {
            Ok(())
        } else {
            Err(Self::no_such_bucket(bucket))
        }
    }

    async fn list_objects(
        &self,
        bucket: &str,
        prefix: Option<&str>,
    ) -> Result<Vec<ObjectMetadata>, StoreError> {
        let buckets = self.buckets.read().await;
        let objects = buckets
            .get(bucket)
            .ok_or_else(|| Self::no_such_bucket(bucket))?;

        let mut results: Vec<ObjectMetadata> = objects
            .iter()
            .filter_map(|(key, obj)| {
                if let Some(prefix_str) = prefix
                    && !key.starts_with(prefix_str)
                {
                    return None;
                }

                Some(obj.metadata.clone())
            })
            .collect();

        // S3 lists in key order
        results.sort_by(|a, b| a.key.cmp(&b.key));
        results.truncate(MAX_KEYS);

        Ok(results)
    }

    async fn get_object(
        &self,
        bucket: &str,
        key: &str,
    ) -> Result<(ObjectStream, ObjectMetadata), StoreError> {
        let buckets = self.buckets.read().await;
        let obj = buckets
            .get(bucket)
            .ok_or_else(|| Self::no_such_bucket(bucket))?
            .get(key)
            .ok_or_else(|| StoreError::ObjectNotFound(key.to_string()))?;

        let data = obj.data.clone();
        let chunks: Vec<Result<Bytes, StoreError>> = (0..data.len())
            .step_by(CHUNK_SIZE)
            .map(|start| Ok(data.slice(start..(start + CHUNK_SIZE).min(data.len()))))
            .collect();

        Ok((Box::pin(stream::iter(chunks)), obj.metadata.clone()))
    }
}
