use std::sync::Arc;

use axum::{
    routing::{post, put},
    Router,
};

use crate::features::needs::handlers;
use crate::features::needs::services::NeedService;

/// Protected need routes (require JWT authentication).
///
/// Per-need authorization against the parent point's owner happens in the
/// service.
pub fn protected_routes(service: Arc<NeedService>) -> Router {
    Router::new()
        .route("/api/points/{id}/needs", post(handlers::create_need))
        .route("/api/needs/{id}/toggle", post(handlers::toggle_need))
        .route(
            "/api/needs/{id}",
            put(handlers::update_need).delete(handlers::delete_need),
        )
        .with_state(service)
}
