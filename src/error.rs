use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    InternalServerError(String),

    #[error("Multipart error: {0}")]
    MultipartError(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// Storage backend failure. The cause is logged where it happens; only
    /// the fixed message reaches the client.
    #[error("{0}")]
    ServiceUnavailable(String),

    #[error(transparent)]
    DatabaseError(#[from] sqlx::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::MultipartError(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::InternalServerError(_)
            | AppError::ServiceUnavailable(_)
            | AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Convert `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let error_message = match self {
            AppError::BadRequest(msg)
            | AppError::InternalServerError(msg)
            | AppError::MultipartError(msg)
            | AppError::PayloadTooLarge(msg)
            | AppError::ServiceUnavailable(msg) => msg,
            AppError::DatabaseError(err) => {
                tracing::error!("Database Error: {:}", err);
                "Database error".to_string()
            }
        };

        // Return standardized JSON error response
        let body = Json(json!({"error": error_message}));
        (status, body).into_response()
    }
}
