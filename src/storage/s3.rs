use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_types::region::Region;
use aws_sdk_s3::{Client, primitives::ByteStream, types::ObjectCannedAcl};
use bytes::Bytes;
use async_trait::async_trait;
use tracing::info;

use crate::{config::Config, storage::{ObjectStore, PutFile, StorageError}};

// AWS S3 storage backend
#[derive(Clone)]
pub struct S3Storage {
    client: Client, // AWS S3 client
}

impl S3Storage {
    /// Build an S3 client from the configured region and static credentials.
    pub async fn new(config: &Config) -> Self {
        info!(region = %config.aws_region, bucket = %config.aws_bucket_name, "Initializing S3 storage");

        let credentials = Credentials::new(
            config.aws_access_key.clone(),
            config.aws_secret.clone(),
            None,
            None,
            "environment",
        );

        let aws_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.aws_region.clone()))
            .credentials_provider(credentials)
            .load()
            .await;

        Self {
            client: Client::new(&aws_config),
        }
    }
}

#[async_trait]
impl ObjectStore for S3Storage {
    /// Reads the local file and puts it into the bucket
    async fn put_file(&self, request: PutFile) -> Result<(), StorageError> {
        let content = tokio::fs::read(&request.source).await?;
        let body = ByteStream::from(Bytes::from(content));

        let mut put = self
            .client
            .put_object()
            .bucket(&request.bucket)
            .key(&request.key)
            .content_type(&request.content_type)
            .body(body);

        if request.public_read {
            put = put.acl(ObjectCannedAcl::PublicRead);
        }

        put.send()
            .await
            .map_err(|e| StorageError::UploadError(e.to_string()))?;

        Ok(())
    }
}
