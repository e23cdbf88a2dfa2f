use crate::config::S3BackendConfig;
use crate::storage::backend::{ObjectStore, ObjectStream};
use crate::types::{ObjectMetadata, StoreError};
use aws_sdk_s3::Client as S3Client;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use futures::stream::{self, StreamExt};

pub struct S3Backend {
    client: S3Client,
    name: String,
}

impl S3Backend {
    fn to_chrono(dt: Option<&aws_sdk_s3::primitives::DateTime>) -> Option<chrono::DateTime<chrono::Utc>> {
        dt.and_then(|dt| chrono::DateTime::from_timestamp(dt.secs(), dt.subsec_nanos()))
    }

    fn to_size(content_length: Option<i64>) -> Option<u64> {
        content_length.and_then(|len| u64::try_from(len).ok())
    }

    pub async fn new(name: String, config: S3BackendConfig) -> Self {
        let mut config_loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region));

        if config.anonymous {
            // Public buckets: send unsigned requests
            config_loader = config_loader.no_credentials();
        } else if let (Some(key_id), Some(secret_key)) =
            (config.access_key_id, config.secret_access_key)
        {
            config_loader = config_loader.credentials_provider(
                aws_sdk_s3::config::Credentials::new(key_id, secret_key, None, None, "static"),
            );
        }

        let sdk_config = config_loader.load().await;

        let mut s3_config_builder = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.force_path_style);

        if let Some(endpoint_url) = config.endpoint {
            s3_config_builder = s3_config_builder.endpoint_url(endpoint_url);
        }

        let client = S3Client::from_conf(s3_config_builder.build());

        Self { client, name }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Forward the SDK body chunk by chunk
    fn object_stream(&self, body: ByteStream, key: &str) -> ObjectStream {
        let name = self.name.clone();
        let key = key.to_string();
        let chunks = stream::unfold(body, |mut body| async move {
            body.next().await.map(|chunk| (chunk, body))
        });

        Box::pin(chunks.map(move |result| {
            result.map_err(|e| {
                tracing::error!("[{}] Failed to read chunk of {}: {}", name, key, e);
                StoreError::StoreUnavailable(format!("Failed to read object {}: {}", key, e))
            })
        }))
    }
}

#[async_trait::async_trait]
impl ObjectStore for S3Backend {
    async fn head_bucket(&self, bucket: &str) -> Result<(), StoreError> {
        tracing::debug!("[{}] Checking bucket: {}", self.name, bucket);

        match self.client.head_bucket().bucket(bucket).send().await {
            Ok(_) => Ok(()),
            Err(err) => {
                tracing::warn!(
                    "[{}] Bucket {} not accessible: {}",
                    self.name,
                    bucket,
                    DisplayErrorContext(&err)
                );
                Err(StoreError::StoreUnavailable(format!(
                    "Bucket {} not accessible: {}",
                    bucket, err
                )))
            }
        }
    }

    async fn list_objects(
        &self,
        bucket: &str,
        prefix: Option<&str>,
    ) -> Result<Vec<ObjectMetadata>, StoreError> {
        tracing::debug!("[{}] Listing {} with prefix: {:?}", self.name, bucket, prefix);

        let result = self
            .client
            .list_objects_v2()
            .bucket(bucket)
            .set_prefix(prefix.map(str::to_string))
            .send()
            .await;

        match result {
            Ok(output) => {
                let objects: Vec<ObjectMetadata> = output
                    .contents()
                    .iter()
                    .filter_map(|obj| {
                        Some(ObjectMetadata {
                            key: obj.key()?.to_string(),
                            size: Self::to_size(obj.size()),
                            etag: obj.e_tag().map(str::to_string),
                            last_modified: Self::to_chrono(obj.last_modified()),
                        })
                    })
                    .collect();

                tracing::debug!("[{}] Found {} objects", self.name, objects.len());
                Ok(objects)
            }
            Err(err) => {
                tracing::error!(
                    "[{}] Failed to list objects: {}",
                    self.name,
                    DisplayErrorContext(&err)
                );
                Err(StoreError::StoreUnavailable(format!(
                    "Failed to list objects in {}: {}",
                    bucket, err
                )))
            }
        }
    }

    async fn get_object(
        &self,
        bucket: &str,
        key: &str,
    ) -> Result<(ObjectStream, ObjectMetadata), StoreError> {
        tracing::debug!("[{}] Getting object: {}/{}", self.name, bucket, key);

        let result = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await;

        match result {
            Ok(output) => {
                let metadata = ObjectMetadata {
                    key: key.to_string(),
                    size: Self::to_size(output.content_length()),
                    etag: output.e_tag().map(str::to_string),
                    last_modified: Self::to_chrono(output.last_modified()),
                };

                Ok((self.object_stream(output.body, key), metadata))
            }
            Err(err) => {
                let not_found = err
                    .as_service_error()
                    .is_some_and(|e| e.is_no_such_key());

                if not_found {
                    tracing::warn!("[{}] Object not found: {}", self.name, key);
                    Err(StoreError::ObjectNotFound(key.to_string()))
                } else {
                    tracing::error!(
                        "[{}] Failed to get object {}: {}",
                        self.name,
                        key,
                        DisplayErrorContext(&err)
                    );
                    Err(StoreError::StoreUnavailable(format!(
                        "Failed to get object {}: {}",
                        key, err
                    )))
                }
            }
        }
    }
}
