use std::collections::HashMap;
use std::sync::Arc;

use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{handle_db_error, AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::changelog::ChangeLogService;
use crate::features::geocoding::GeocodingService;
use crate::features::needs::models::Need;
use crate::features::points::dtos::{
    CreatePointDto, NearbyPointDto, PointResponseDto, UpdatePointDto,
};
use crate::features::points::models::{CollectionPoint, PointStatus};
use crate::features::points::services::enrichment::{self, EnrichedPoint};
use crate::shared::constants::{
    MSG_LOCATION_NOT_FOUND, MSG_NOT_POINT_MANAGER, MSG_POINT_NOT_FOUND,
};
use crate::shared::geo::Coordinate;

/// Service for collection point operations
pub struct PointService {
    pool: PgPool,
    geocoding: Arc<GeocodingService>,
    changelog: Arc<ChangeLogService>,
}

impl PointService {
    pub fn new(
        pool: PgPool,
        geocoding: Arc<GeocodingService>,
        changelog: Arc<ChangeLogService>,
    ) -> Self {
        Self {
            pool,
            geocoding,
            changelog,
        }
    }

    /// Register a collection point owned by the caller.
    ///
    /// The address is geocoded once; a miss saves the record without a
    /// coordinate and surfaces a notice instead of failing.
    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        dto: CreatePointDto,
    ) -> Result<(PointResponseDto, Option<String>)> {
        let coordinate = self
            .geocoding
            .geocode_address(&dto.address, Some(&dto.neighborhood))
            .await;

        let point: CollectionPoint = sqlx::query_as(
            r#"
            INSERT INTO collection_points
                (name, address, neighborhood, phone, hours, responsible, description,
                 latitude, longitude, user_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, name, address, neighborhood, phone, hours, responsible,
                      status, description, latitude, longitude, user_id,
                      created_at, updated_at
            "#,
        )
        .bind(&dto.name)
        .bind(&dto.address)
        .bind(&dto.neighborhood)
        .bind(&dto.phone)
        .bind(&dto.hours)
        .bind(&dto.responsible)
        .bind(&dto.description)
        .bind(coordinate.map(|c| c.lat))
        .bind(coordinate.map(|c| c.lng))
        .bind(&user.sub)
        .fetch_one(&self.pool)
        .await
        .map_err(handle_db_error)?;

        self.changelog
            .record(
                &user.sub,
                Some(point.id),
                "create_point",
                Some(json!({ "name": point.name })),
            )
            .await;

        let notice = coordinate
            .is_none()
            .then(|| MSG_LOCATION_NOT_FOUND.to_string());

        Ok((PointResponseDto::from_point(point, Vec::new()), notice))
    }

    /// All points with their needs embedded, ordered by name.
    ///
    /// `search` filters case-insensitively over name, neighborhood and
    /// address.
    pub async fn list(&self, search: Option<&str>) -> Result<Vec<PointResponseDto>> {
        let points: Vec<CollectionPoint> = match search.map(str::trim) {
            Some(term) if !term.is_empty() => {
                sqlx::query_as(
                    r#"
                    SELECT id, name, address, neighborhood, phone, hours, responsible,
                           status, description, latitude, longitude, user_id,
                           created_at, updated_at
                    FROM collection_points
                    WHERE name ILIKE $1 OR neighborhood ILIKE $1 OR address ILIKE $1
                    ORDER BY name
                    "#,
                )
                .bind(format!("%{}%", term))
                .fetch_all(&self.pool)
                .await
            }
            _ => {
                sqlx::query_as(
                    r#"
                    SELECT id, name, address, neighborhood, phone, hours, responsible,
                           status, description, latitude, longitude, user_id,
                           created_at, updated_at
                    FROM collection_points
                    ORDER BY name
                    "#,
                )
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(AppError::Database)?;

        self.with_needs(points).await
    }

    /// Points owned by the caller, ordered by name
    pub async fn list_mine(&self, user_id: &str) -> Result<Vec<PointResponseDto>> {
        let points: Vec<CollectionPoint> = sqlx::query_as(
            r#"
            SELECT id, name, address, neighborhood, phone, hours, responsible,
                   status, description, latitude, longitude, user_id,
                   created_at, updated_at
            FROM collection_points
            WHERE user_id = $1
            ORDER BY name
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        self.with_needs(points).await
    }

    /// Single point with its needs
    pub async fn get(&self, id: Uuid) -> Result<PointResponseDto> {
        let point = self.find_point(id).await?;
        let mut by_point = self.needs_by_point(&[id]).await?;
        let needs = by_point.remove(&id).unwrap_or_default();

        Ok(PointResponseDto::from_point(point, needs))
    }

    /// Points sorted by distance to the caller's location.
    ///
    /// Uncached points are geocoded concurrently; fresh hits are written
    /// back to the record so the next listing skips the lookup. Points
    /// that resolve nowhere stay in the response, after the resolved ones.
    pub async fn nearby(&self, location: Coordinate) -> Result<Vec<NearbyPointDto>> {
        let points: Vec<CollectionPoint> = sqlx::query_as(
            r#"
            SELECT id, name, address, neighborhood, phone, hours, responsible,
                   status, description, latitude, longitude, user_id,
                   created_at, updated_at
            FROM collection_points
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        let mut enriched =
            enrichment::enrich(points, self.geocoding.as_ref(), Some(location)).await;

        self.persist_fresh_coordinates(&enriched).await;

        enrichment::sort_nearest(&mut enriched);

        let ids: Vec<Uuid> = enriched.iter().map(|e| e.point.id).collect();
        let mut by_point = self.needs_by_point(&ids).await?;

        Ok(enriched
            .into_iter()
            .map(|entry| {
                let needs = by_point.remove(&entry.point.id).unwrap_or_default();
                NearbyPointDto {
                    resolution: entry.resolution,
                    point: PointResponseDto::from_point(entry.point, needs),
                }
            })
            .collect())
    }

    /// Update a point's fields (owner or admin).
    ///
    /// The address is re-geocoded only when the address or neighborhood
    /// actually changed; a miss clears the stale cached coordinate.
    pub async fn update(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        dto: UpdatePointDto,
    ) -> Result<PointResponseDto> {
        let existing = self.find_point(id).await?;
        if !existing.managed_by(user) {
            return Err(AppError::Forbidden(MSG_NOT_POINT_MANAGER.to_string()));
        }

        let details = serde_json::to_value(&dto).ok();

        let address_changed = dto
            .address
            .as_deref()
            .is_some_and(|a| a != existing.address);
        let neighborhood_changed = dto
            .neighborhood
            .as_deref()
            .is_some_and(|n| n != existing.neighborhood);

        let name = dto.name.unwrap_or(existing.name);
        let address = dto.address.unwrap_or(existing.address);
        let neighborhood = dto.neighborhood.unwrap_or(existing.neighborhood);
        let phone = dto.phone.unwrap_or(existing.phone);
        let hours = dto.hours.unwrap_or(existing.hours);
        let responsible = dto.responsible.unwrap_or(existing.responsible);
        // An omitted description clears the stored one
        let description = dto.description;

        let (latitude, longitude) = if address_changed || neighborhood_changed {
            match self
                .geocoding
                .geocode_address(&address, Some(&neighborhood))
                .await
            {
                Some(c) => (Some(c.lat), Some(c.lng)),
                None => (None, None),
            }
        } else {
            (existing.latitude, existing.longitude)
        };

        let point: CollectionPoint = sqlx::query_as(
            r#"
            UPDATE collection_points
            SET name = $1, address = $2, neighborhood = $3, phone = $4, hours = $5,
                responsible = $6, description = $7, latitude = $8, longitude = $9,
                updated_at = now()
            WHERE id = $10
            RETURNING id, name, address, neighborhood, phone, hours, responsible,
                      status, description, latitude, longitude, user_id,
                      created_at, updated_at
            "#,
        )
        .bind(&name)
        .bind(&address)
        .bind(&neighborhood)
        .bind(&phone)
        .bind(&hours)
        .bind(&responsible)
        .bind(&description)
        .bind(latitude)
        .bind(longitude)
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(handle_db_error)?;

        self.changelog
            .record(&user.sub, Some(id), "update_point", details)
            .await;

        let mut by_point = self.needs_by_point(&[id]).await?;
        let needs = by_point.remove(&id).unwrap_or_default();

        Ok(PointResponseDto::from_point(point, needs))
    }

    /// Switch a point's lifecycle status (owner or admin)
    pub async fn update_status(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        status: PointStatus,
    ) -> Result<PointResponseDto> {
        let existing = self.find_point(id).await?;
        if !existing.managed_by(user) {
            return Err(AppError::Forbidden(MSG_NOT_POINT_MANAGER.to_string()));
        }

        let point: CollectionPoint = sqlx::query_as(
            r#"
            UPDATE collection_points
            SET status = $1, updated_at = now()
            WHERE id = $2
            RETURNING id, name, address, neighborhood, phone, hours, responsible,
                      status, description, latitude, longitude, user_id,
                      created_at, updated_at
            "#,
        )
        .bind(status)
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(handle_db_error)?;

        self.changelog
            .record(
                &user.sub,
                Some(id),
                "update_point_status",
                Some(json!({ "status": status })),
            )
            .await;

        let mut by_point = self.needs_by_point(&[id]).await?;
        let needs = by_point.remove(&id).unwrap_or_default();

        Ok(PointResponseDto::from_point(point, needs))
    }

    /// Delete a point (owner or admin); its needs cascade with it
    pub async fn delete(&self, user: &AuthenticatedUser, id: Uuid) -> Result<()> {
        let existing = self.find_point(id).await?;
        if !existing.managed_by(user) {
            return Err(AppError::Forbidden(MSG_NOT_POINT_MANAGER.to_string()));
        }

        sqlx::query("DELETE FROM collection_points WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(handle_db_error)?;

        self.changelog
            .record(
                &user.sub,
                Some(id),
                "delete_point",
                Some(json!({ "name": existing.name })),
            )
            .await;

        Ok(())
    }

    async fn find_point(&self, id: Uuid) -> Result<CollectionPoint> {
        sqlx::query_as(
            r#"
            SELECT id, name, address, neighborhood, phone, hours, responsible,
                   status, description, latitude, longitude, user_id,
                   created_at, updated_at
            FROM collection_points
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::NotFound(MSG_POINT_NOT_FOUND.to_string()))
    }

    async fn with_needs(&self, points: Vec<CollectionPoint>) -> Result<Vec<PointResponseDto>> {
        let ids: Vec<Uuid> = points.iter().map(|p| p.id).collect();
        let mut by_point = self.needs_by_point(&ids).await?;

        Ok(points
            .into_iter()
            .map(|point| {
                let needs = by_point.remove(&point.id).unwrap_or_default();
                PointResponseDto::from_point(point, needs)
            })
            .collect())
    }

    /// Needs for a set of points in one round trip, grouped by point
    async fn needs_by_point(&self, point_ids: &[Uuid]) -> Result<HashMap<Uuid, Vec<Need>>> {
        if point_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let needs: Vec<Need> = sqlx::query_as(
            r#"
            SELECT id, collection_point_id, category, custom_label, urgency,
                   is_active, created_at, updated_at
            FROM needs
            WHERE collection_point_id = ANY($1)
            ORDER BY created_at
            "#,
        )
        .bind(point_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        let mut by_point: HashMap<Uuid, Vec<Need>> = HashMap::new();
        for need in needs {
            by_point
                .entry(need.collection_point_id)
                .or_default()
                .push(need);
        }

        Ok(by_point)
    }

    /// Cache warm-up: write freshly geocoded coordinates back to their
    /// records, matched by point id. Best-effort; a failed write only logs.
    async fn persist_fresh_coordinates(&self, enriched: &[EnrichedPoint]) {
        for entry in enriched.iter().filter(|e| e.freshly_geocoded()) {
            let Some(coordinate) = entry.resolution.coordinate() else {
                continue;
            };

            let result = sqlx::query(
                r#"
                UPDATE collection_points
                SET latitude = $1, longitude = $2, updated_at = now()
                WHERE id = $3
                "#,
            )
            .bind(coordinate.lat)
            .bind(coordinate.lng)
            .bind(entry.point.id)
            .execute(&self.pool)
            .await;

            if let Err(e) = result {
                tracing::warn!(
                    "Failed to cache coordinate for point {}: {:?}",
                    entry.point.id,
                    e
                );
            }
        }
    }
}
