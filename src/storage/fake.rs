use std::sync::Mutex;

use async_trait::async_trait;

use super::{ObjectStore, PutFile, StorageError};

/// What a `RecordingStore` received for one successful put.
#[derive(Debug, Clone)]
pub struct RecordedPut {
    pub bucket: String,
    pub key: String,
    pub content_type: String,
    pub public_read: bool,
    pub body: Vec<u8>,
}

/// In-memory `ObjectStore` that reads the source file like the S3 backend
/// does and records what would have been sent.
#[derive(Default)]
pub struct RecordingStore {
    puts: Mutex<Vec<RecordedPut>>,
    failure: Mutex<Option<StorageError>>,
}

impl RecordingStore {
    /// A store whose next put fails with `error`.
    pub fn failing(error: StorageError) -> Self {
        Self {
            puts: Mutex::default(),
            failure: Mutex::new(Some(error)),
        }
    }

    pub fn puts(&self) -> Vec<RecordedPut> {
        self.puts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStore for RecordingStore {
    async fn put_file(&self, request: PutFile) -> Result<(), StorageError> {
        let failure = self.failure.lock().unwrap().take();
        if let Some(error) = failure {
            return Err(error);
        }

        let body = tokio::fs::read(&request.source).await?;
        self.puts.lock().unwrap().push(RecordedPut {
            bucket: request.bucket,
            key: request.key,
            content_type: request.content_type,
            public_read: request.public_read,
            body,
        });
        Ok(())
    }
}
