use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::needs::dtos::{CreateNeedDto, NeedResponseDto, UpdateNeedDto};
use crate::features::needs::services::NeedService;
use crate::shared::types::ApiResponse;

/// Add a need to a collection point (owner or admin)
///
/// New needs start at low urgency and active.
#[utoipa::path(
    post,
    path = "/api/points/{id}/needs",
    params(
        ("id" = Uuid, Path, description = "Collection point ID")
    ),
    request_body = CreateNeedDto,
    responses(
        (status = 201, description = "Need created", body = ApiResponse<NeedResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Not the point's manager"),
        (status = 404, description = "Collection point not found")
    ),
    tag = "needs",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_need(
    user: AuthenticatedUser,
    State(service): State<Arc<NeedService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<CreateNeedDto>,
) -> Result<(StatusCode, Json<ApiResponse<NeedResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let need = service.create(&user, id, dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(need), None, None)),
    ))
}

/// Advance a need's urgency one step (owner or admin)
///
/// The cycle is low -> urgent -> excess -> low; the response carries the
/// new urgency.
#[utoipa::path(
    post,
    path = "/api/needs/{id}/toggle",
    params(
        ("id" = Uuid, Path, description = "Need ID")
    ),
    responses(
        (status = 200, description = "Urgency advanced", body = ApiResponse<NeedResponseDto>),
        (status = 403, description = "Not the point's manager"),
        (status = 404, description = "Need not found")
    ),
    tag = "needs",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn toggle_need(
    user: AuthenticatedUser,
    State(service): State<Arc<NeedService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<NeedResponseDto>>> {
    let need = service.toggle(&user, id).await?;
    Ok(Json(ApiResponse::success(Some(need), None, None)))
}

/// Update a need's category, label or active flag (owner or admin)
#[utoipa::path(
    put,
    path = "/api/needs/{id}",
    params(
        ("id" = Uuid, Path, description = "Need ID")
    ),
    request_body = UpdateNeedDto,
    responses(
        (status = 200, description = "Need updated", body = ApiResponse<NeedResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Not the point's manager"),
        (status = 404, description = "Need not found")
    ),
    tag = "needs",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_need(
    user: AuthenticatedUser,
    State(service): State<Arc<NeedService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateNeedDto>,
) -> Result<Json<ApiResponse<NeedResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let need = service.update(&user, id, dto).await?;
    Ok(Json(ApiResponse::success(Some(need), None, None)))
}

/// Remove a need (owner or admin)
#[utoipa::path(
    delete,
    path = "/api/needs/{id}",
    params(
        ("id" = Uuid, Path, description = "Need ID")
    ),
    responses(
        (status = 200, description = "Need removed"),
        (status = 403, description = "Not the point's manager"),
        (status = 404, description = "Need not found")
    ),
    tag = "needs",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_need(
    user: AuthenticatedUser,
    State(service): State<Arc<NeedService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(&user, id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Necessidade removida.".to_string()),
        None,
    )))
}
