use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::rate_limits::RateLimitService;
use crate::features::reports::handlers::{self, ReportsState};
use crate::features::reports::services::ReportService;

/// Create routes for the reports feature.
///
/// All report routes are public: submissions are anonymous (throttled per
/// IP) and the listing and live feed back the public incident panel.
pub fn routes(
    report_service: Arc<ReportService>,
    rate_limit_service: Arc<RateLimitService>,
) -> Router {
    let state = ReportsState {
        report_service,
        rate_limit_service,
    };

    Router::new()
        .route(
            "/api/reports",
            post(handlers::create_report).get(handlers::list_reports),
        )
        .route("/api/reports/feed", get(handlers::report_feed))
        .with_state(state)
}
