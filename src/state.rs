use crate::config::Config;
use crate::database::Database;
use crate::storage::S3Service;

/// Central application state shared across all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL pool, connected for the lifetime of the server.
    pub db: Database,

    /// Image uploads to the configured bucket.
    pub s3: S3Service,

    /// Application configuration loaded from environment variables or `.env`.
    pub config: Config,
}
