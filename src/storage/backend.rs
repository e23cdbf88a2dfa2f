use crate::types::{ObjectMetadata, StoreError};
use bytes::Bytes;
use futures::stream::Stream;
use std::pin::Pin;

/// Object body as a stream of chunks
pub type ObjectStream = Pin<Box<dyn Stream<Item = Result<Bytes, StoreError>> + Send>>;

/// Object store backend trait - implement this for different stores
#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    /// Check that the bucket exists and is reachable
    async fn head_bucket(&self, bucket: &str) -> Result<(), StoreError>;

    /// One page of objects whose key starts with `prefix` (all objects when `None`)
    async fn list_objects(
        &self,
        bucket: &str,
        prefix: Option<&str>,
    ) -> Result<Vec<ObjectMetadata>, StoreError>;

    async fn get_object(
        &self,
        bucket: &str,
        key: &str,
    ) -> Result<(ObjectStream, ObjectMetadata), StoreError>;
}
