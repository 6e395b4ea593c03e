use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::points::dtos::{
    CreatePointDto, NearbyPointDto, NearbyQuery, PointResponseDto, PointSearchQuery,
    UpdatePointDto, UpdatePointStatusDto,
};
use crate::features::points::services::PointService;
use crate::shared::geo::Coordinate;
use crate::shared::types::{ApiResponse, Meta};

/// Register a new collection point
///
/// The point is owned by the authenticated caller. A failed address lookup
/// still creates the point and surfaces a notice in the response message.
#[utoipa::path(
    post,
    path = "/api/points",
    request_body = CreatePointDto,
    responses(
        (status = 201, description = "Collection point created", body = ApiResponse<PointResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "points",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_point(
    user: AuthenticatedUser,
    State(service): State<Arc<PointService>>,
    AppJson(dto): AppJson<CreatePointDto>,
) -> Result<(StatusCode, Json<ApiResponse<PointResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let (point, notice) = service.create(&user, dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(point), notice, None)),
    ))
}

/// List all collection points with their needs
#[utoipa::path(
    get,
    path = "/api/points",
    params(PointSearchQuery),
    responses(
        (status = 200, description = "Collection points retrieved", body = ApiResponse<Vec<PointResponseDto>>)
    ),
    tag = "points"
)]
pub async fn list_points(
    State(service): State<Arc<PointService>>,
    Query(params): Query<PointSearchQuery>,
) -> Result<Json<ApiResponse<Vec<PointResponseDto>>>> {
    let points = service.list(params.search.as_deref()).await?;
    let total = points.len() as i64;

    Ok(Json(ApiResponse::success(
        Some(points),
        None,
        Some(Meta { total }),
    )))
}

/// List collection points sorted by distance to the caller
///
/// Points whose address cannot be resolved are returned after the resolved
/// ones, without a distance.
#[utoipa::path(
    get,
    path = "/api/points/nearby",
    params(NearbyQuery),
    responses(
        (status = 200, description = "Collection points sorted by distance", body = ApiResponse<Vec<NearbyPointDto>>),
        (status = 400, description = "Invalid coordinates")
    ),
    tag = "points"
)]
pub async fn nearby_points(
    State(service): State<Arc<PointService>>,
    Query(params): Query<NearbyQuery>,
) -> Result<Json<ApiResponse<Vec<NearbyPointDto>>>> {
    if !(-90.0..=90.0).contains(&params.lat) || !(-180.0..=180.0).contains(&params.lng) {
        return Err(AppError::Validation("Coordenadas inválidas.".to_string()));
    }

    let points = service
        .nearby(Coordinate::new(params.lat, params.lng))
        .await?;
    let total = points.len() as i64;

    Ok(Json(ApiResponse::success(
        Some(points),
        None,
        Some(Meta { total }),
    )))
}

/// List the collection points owned by the caller
#[utoipa::path(
    get,
    path = "/api/points/mine",
    responses(
        (status = 200, description = "Caller's collection points", body = ApiResponse<Vec<PointResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "points",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn my_points(
    user: AuthenticatedUser,
    State(service): State<Arc<PointService>>,
) -> Result<Json<ApiResponse<Vec<PointResponseDto>>>> {
    let points = service.list_mine(&user.sub).await?;
    let total = points.len() as i64;

    Ok(Json(ApiResponse::success(
        Some(points),
        None,
        Some(Meta { total }),
    )))
}

/// Get a collection point by ID
#[utoipa::path(
    get,
    path = "/api/points/{id}",
    params(
        ("id" = Uuid, Path, description = "Collection point ID")
    ),
    responses(
        (status = 200, description = "Collection point retrieved", body = ApiResponse<PointResponseDto>),
        (status = 404, description = "Collection point not found")
    ),
    tag = "points"
)]
pub async fn get_point(
    State(service): State<Arc<PointService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<PointResponseDto>>> {
    let point = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(point), None, None)))
}

/// Update a collection point (owner or admin)
#[utoipa::path(
    put,
    path = "/api/points/{id}",
    params(
        ("id" = Uuid, Path, description = "Collection point ID")
    ),
    request_body = UpdatePointDto,
    responses(
        (status = 200, description = "Collection point updated", body = ApiResponse<PointResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Not the point's manager"),
        (status = 404, description = "Collection point not found")
    ),
    tag = "points",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_point(
    user: AuthenticatedUser,
    State(service): State<Arc<PointService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdatePointDto>,
) -> Result<Json<ApiResponse<PointResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let point = service.update(&user, id, dto).await?;
    Ok(Json(ApiResponse::success(Some(point), None, None)))
}

/// Switch a collection point's lifecycle status (owner or admin)
#[utoipa::path(
    patch,
    path = "/api/points/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Collection point ID")
    ),
    request_body = UpdatePointStatusDto,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<PointResponseDto>),
        (status = 403, description = "Not the point's manager"),
        (status = 404, description = "Collection point not found")
    ),
    tag = "points",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_point_status(
    user: AuthenticatedUser,
    State(service): State<Arc<PointService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdatePointStatusDto>,
) -> Result<Json<ApiResponse<PointResponseDto>>> {
    let point = service.update_status(&user, id, dto.status).await?;
    Ok(Json(ApiResponse::success(Some(point), None, None)))
}

/// Delete a collection point and its needs (owner or admin)
#[utoipa::path(
    delete,
    path = "/api/points/{id}",
    params(
        ("id" = Uuid, Path, description = "Collection point ID")
    ),
    responses(
        (status = 200, description = "Collection point deleted"),
        (status = 403, description = "Not the point's manager"),
        (status = 404, description = "Collection point not found")
    ),
    tag = "points",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_point(
    user: AuthenticatedUser,
    State(service): State<Arc<PointService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(&user, id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Ponto de coleta removido.".to_string()),
        None,
    )))
}
