//! Router assembly: routes, body limit, CORS and request tracing.

use axum::{Router, extract::DefaultBodyLimit, routing::{get, post}};
use tower_http::trace::TraceLayer;

use crate::{
    cors::build_cors_layer,
    handlers::{health_check, upload_photo},
    state::AppState,
};

/// Room for multipart boundaries and part headers on top of the file itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.cors_origins);

    Router::new()
        .route("/health", get(health_check))
        .route("/uploads", post(upload_photo))
        .layer(DefaultBodyLimit::max(state.config.max_upload_size + MULTIPART_OVERHEAD))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
