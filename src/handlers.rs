use std::io::Write;

use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartError},
    http::StatusCode,
};
use bytes::Bytes;
use tempfile::NamedTempFile;
use tracing::{error, info};
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{HealthResponse, UploadResponse},
    state::AppState,
    utils::get_file_extension,
};

/// Report whether the database is reachable.
pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, AppError> {
    state.db.ping().await?;
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
    }))
}

/// Upload an image using multipart/form-data and return its public URL.
pub async fn upload_photo(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut file_data: Option<Bytes> = None;
    let mut original_filename: Option<String> = None;

    let max_size = state.config.max_upload_size;

    // Parse multipart fields
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        error!("Error parsing multipart: {}", e);
        multipart_error(e, max_size, "Failed to parse multipart form")
    })? {
        if field.name() != Some("file") {
            continue;
        }
        original_filename = field.file_name().map(|s| s.to_string());
        let data = field.bytes().await.map_err(|e| {
            error!("Error reading file bytes: {}", e);
            multipart_error(e, max_size, "Failed to read the file")
        })?;
        file_data = Some(data);
    }

    let file_data = file_data.ok_or_else(|| AppError::BadRequest("No file provided".into()))?;

    // Enforce maximum file size
    if file_data.len() > max_size {
        error!("File size {} exceeds maximum limit of {} bytes", file_data.len(), max_size);
        return Err(too_large(max_size));
    }

    let extension = original_filename
        .as_deref()
        .and_then(get_file_extension)
        .ok_or_else(|| AppError::BadRequest("Invalid file extension".into()))?;

    let key = format!("{}.{}", Uuid::new_v4(), extension);
    let temp_file = write_temp_file(file_data).await?;

    // The temp file is removed when `temp_file` drops, whatever the outcome.
    let url = state.s3.upload(temp_file.path(), &key, &extension).await?;

    info!(key = %key, "Photo uploaded");
    Ok(Json(UploadResponse { key, url }))
}

/// Map a multipart failure, reporting an exceeded body limit as 413.
fn multipart_error(err: MultipartError, max_size: usize, context: &str) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        too_large(max_size)
    } else {
        AppError::MultipartError(format!("{}: {}", context, err))
    }
}

fn too_large(max_size: usize) -> AppError {
    AppError::PayloadTooLarge(format!("File exceeds maximum limit of {} bytes", max_size))
}

/// Spill the uploaded bytes to a temporary file off the async executor.
async fn write_temp_file(data: Bytes) -> Result<NamedTempFile, AppError> {
    tokio::task::spawn_blocking(move || {
        let mut file = NamedTempFile::new()?;
        file.write_all(&data)?;
        file.flush()?;
        Ok::<_, std::io::Error>(file)
    })
    .await
    .map_err(|e| AppError::InternalServerError(format!("Temp file task failed: {}", e)))?
    .map_err(|e| {
        error!("Error writing temp file: {}", e);
        AppError::InternalServerError("Failed to store upload".into())
    })
}
