// Submodules for the S3 backend and an in-memory test double
mod s3;
#[cfg(test)]
pub(crate) mod fake;

use std::{path::{Path, PathBuf}, sync::Arc};

use async_trait::async_trait;
use thiserror::Error;
use tracing::{error, info};

use crate::error::AppError;

pub use s3::S3Storage;

/// Message returned to clients for every upload failure.
pub const UPLOAD_UNAVAILABLE: &str = "s3 is not available";

// Storage error types
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Io Error: {0}")]
    IoError(#[from] std::io::Error), // Reading the local source file

    #[error("Upload Error: {0}")]
    UploadError(String), // Errors reported by the storage service
}

/// A local file to be stored under `key` in `bucket`.
#[derive(Debug, Clone)]
pub struct PutFile {
    pub bucket: String,
    pub key: String,
    pub source: PathBuf,
    pub content_type: String,
    pub public_read: bool,
}

// Async object storage trait
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Transmit the file at `request.source` to the storage backend.
    async fn put_file(&self, request: PutFile) -> Result<(), StorageError>;
}

/// Public, virtual-hosted-style URL of an object.
pub fn public_url(bucket: &str, region: &str, key: &str) -> String {
    format!("http://{}.s3.{}.amazonaws.com/{}", bucket, region, key)
}

/// Uploads local images to a fixed bucket and hands back their public URL.
#[derive(Clone)]
pub struct S3Service {
    store: Arc<dyn ObjectStore>,
    bucket: String,
    region: String,
}

impl S3Service {
    pub fn new(store: Arc<dyn ObjectStore>, bucket: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            store,
            bucket: bucket.into(),
            region: region.into(),
        }
    }

    /// Upload the file at `path` as a publicly readable `image/<extension>` object.
    ///
    /// `key` and `extension` are used verbatim. Every backend failure is logged
    /// and reported as `AppError::ServiceUnavailable`.
    pub async fn upload(
        &self,
        path: impl AsRef<Path>,
        key: &str,
        extension: &str,
    ) -> Result<String, AppError> {
        let request = PutFile {
            bucket: self.bucket.clone(),
            key: key.to_string(),
            source: path.as_ref().to_path_buf(),
            content_type: format!("image/{}", extension),
            public_read: true,
        };

        match self.store.put_file(request).await {
            Ok(()) => {
                info!(bucket = %self.bucket, key, "Uploaded object");
                Ok(public_url(&self.bucket, &self.region, key))
            }
            Err(e) => {
                error!(bucket = %self.bucket, key, error = %e, "Error uploading object");
                Err(AppError::ServiceUnavailable(UPLOAD_UNAVAILABLE.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::ErrorKind;

    use axum::http::StatusCode;

    use super::{fake::RecordingStore, *};

    fn service(store: Arc<RecordingStore>) -> S3Service {
        S3Service::new(store, "complaints-media", "us-east-1")
    }

    #[tokio::test]
    async fn test_upload_returns_public_url() {
        let store = Arc::new(RecordingStore::default());
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), b"jpeg bytes").unwrap();

        let url = service(store.clone())
            .upload(file.path(), "photo123.jpg", "jpg")
            .await
            .unwrap();

        assert_eq!(url, "http://complaints-media.s3.us-east-1.amazonaws.com/photo123.jpg");

        let puts = store.puts();
        assert_eq!(puts.len(), 1);
        assert_eq!(puts[0].bucket, "complaints-media");
        assert_eq!(puts[0].key, "photo123.jpg");
        assert_eq!(puts[0].content_type, "image/jpg");
        assert!(puts[0].public_read);
        assert_eq!(puts[0].body, b"jpeg bytes");
    }

    #[tokio::test]
    async fn test_extension_is_not_validated() {
        let store = Arc::new(RecordingStore::default());
        let file = tempfile::NamedTempFile::new().unwrap();

        service(store.clone())
            .upload(file.path(), "notes", "txt")
            .await
            .unwrap();

        assert_eq!(store.puts()[0].content_type, "image/txt");
    }

    #[tokio::test]
    async fn test_key_used_verbatim() {
        let store = Arc::new(RecordingStore::default());
        let file = tempfile::NamedTempFile::new().unwrap();

        let url = service(store)
            .upload(file.path(), "complaints/42/front door.png", "png")
            .await
            .unwrap();

        assert_eq!(
            url,
            "http://complaints-media.s3.us-east-1.amazonaws.com/complaints/42/front door.png"
        );
    }

    #[tokio::test]
    async fn test_missing_source_file_is_unavailable() {
        let store = Arc::new(RecordingStore::default());
        let dir = tempfile::tempdir().unwrap();

        let err = service(store.clone())
            .upload(dir.path().join("gone.jpg"), "gone.jpg", "jpg")
            .await
            .unwrap_err();

        assert!(matches!(&err, AppError::ServiceUnavailable(msg) if msg == UPLOAD_UNAVAILABLE));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(store.puts().is_empty());
    }

    #[tokio::test]
    async fn test_every_backend_failure_collapses() {
        let failures = [
            StorageError::IoError(std::io::Error::new(ErrorKind::PermissionDenied, "denied")),
            StorageError::IoError(std::io::Error::new(ErrorKind::TimedOut, "timed out")),
            StorageError::UploadError("NoSuchBucket".into()),
        ];

        for failure in failures {
            let store = Arc::new(RecordingStore::failing(failure));
            let file = tempfile::NamedTempFile::new().unwrap();

            let err = service(store)
                .upload(file.path(), "photo.jpg", "jpg")
                .await
                .unwrap_err();

            assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(err.to_string(), UPLOAD_UNAVAILABLE);
        }
    }
}
