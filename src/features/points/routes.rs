use std::sync::Arc;

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::features::points::handlers;
use crate::features::points::services::PointService;

/// Public point routes (no authentication required)
pub fn public_routes(service: Arc<PointService>) -> Router {
    Router::new()
        .route("/api/points", get(handlers::list_points))
        .route("/api/points/nearby", get(handlers::nearby_points))
        .route("/api/points/{id}", get(handlers::get_point))
        .with_state(service)
}

/// Protected point routes (require JWT authentication)
pub fn protected_routes(service: Arc<PointService>) -> Router {
    Router::new()
        .route("/api/points", post(handlers::create_point))
        .route("/api/points/mine", get(handlers::my_points))
        .route(
            "/api/points/{id}",
            put(handlers::update_point).delete(handlers::delete_point),
        )
        .route(
            "/api/points/{id}/status",
            patch(handlers::update_point_status),
        )
        .with_state(service)
}
