use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use crate::core::error::Result;
use crate::features::auth::guards::RequireAdmin;
use crate::features::changelog::dtos::ChangeLogResponseDto;
use crate::features::changelog::services::ChangeLogService;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// List audit trail entries (admin only)
#[utoipa::path(
    get,
    path = "/api/changelog",
    params(
        ("page" = Option<i64>, Query, description = "Page number (1-based)"),
        ("page_size" = Option<i64>, Query, description = "Items per page")
    ),
    responses(
        (status = 200, description = "Audit entries, newest first", body = ApiResponse<Vec<ChangeLogResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required")
    ),
    security(("bearer_auth" = [])),
    tag = "changelog"
)]
pub async fn list_changelog(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<ChangeLogService>>,
    Query(params): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<ChangeLogResponseDto>>>> {
    let (entries, total) = service.list(&params).await?;
    Ok(Json(ApiResponse::success(
        Some(entries),
        None,
        Some(Meta { total }),
    )))
}
