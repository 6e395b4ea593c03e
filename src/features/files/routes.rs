use axum::{extract::DefaultBodyLimit, routing::post, Router};
use std::sync::Arc;

use crate::features::files::dtos::MAX_FILE_SIZE;
use crate::features::files::handlers::upload_photo;
use crate::features::files::services::FileService;

/// Create routes for the files feature.
///
/// Upload is public: report photos come from anonymous reporters.
pub fn routes(file_service: Arc<FileService>) -> Router {
    Router::new()
        .route(
            "/api/files/upload",
            // Allow body size up to MAX_FILE_SIZE + buffer for multipart overhead
            post(upload_photo).layer(DefaultBodyLimit::max(MAX_FILE_SIZE + 1024 * 1024)),
        )
        .with_state(file_service)
}
