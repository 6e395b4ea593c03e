use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::changelog::handlers;
use crate::features::changelog::services::ChangeLogService;

/// Create routes for the changelog feature
///
/// Note: Requires authentication; the handler additionally requires the
/// admin role.
pub fn routes(service: Arc<ChangeLogService>) -> Router {
    Router::new()
        .route("/api/changelog", get(handlers::list_changelog))
        .with_state(service)
}
