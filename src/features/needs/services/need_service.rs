use std::sync::Arc;

use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{handle_db_error, AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::changelog::ChangeLogService;
use crate::features::needs::dtos::{CreateNeedDto, NeedResponseDto, UpdateNeedDto};
use crate::features::needs::models::{Need, Urgency};
use crate::features::points::models::CollectionPoint;
use crate::shared::constants::{
    CATEGORY_OTHER, MSG_NEED_NOT_FOUND, MSG_NOT_POINT_MANAGER, MSG_POINT_NOT_FOUND,
};
use crate::shared::validation::validate_custom_label;

/// Service for supply-need operations.
///
/// Every mutation is authorized against the parent collection point:
/// only its owner or a site-wide admin may touch its needs.
pub struct NeedService {
    pool: PgPool,
    changelog: Arc<ChangeLogService>,
}

impl NeedService {
    pub fn new(pool: PgPool, changelog: Arc<ChangeLogService>) -> Self {
        Self { pool, changelog }
    }

    /// Add a need to a collection point, starting at low urgency and active
    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        point_id: Uuid,
        dto: CreateNeedDto,
    ) -> Result<NeedResponseDto> {
        let point = self.find_point(point_id).await?;
        if !point.managed_by(user) {
            return Err(AppError::Forbidden(MSG_NOT_POINT_MANAGER.to_string()));
        }

        validate_custom_label(&dto.category, dto.custom_label.as_deref())
            .map_err(AppError::Validation)?;

        let need: Need = sqlx::query_as(
            r#"
            INSERT INTO needs (collection_point_id, category, custom_label, urgency, is_active)
            VALUES ($1, $2, $3, $4, TRUE)
            RETURNING id, collection_point_id, category, custom_label, urgency,
                      is_active, created_at, updated_at
            "#,
        )
        .bind(point_id)
        .bind(&dto.category)
        .bind(&dto.custom_label)
        .bind(Urgency::default())
        .fetch_one(&self.pool)
        .await
        .map_err(handle_db_error)?;

        self.changelog
            .record(
                &user.sub,
                Some(point_id),
                "create_need",
                Some(json!({
                    "category": need.category,
                    "custom_label": need.custom_label,
                })),
            )
            .await;

        Ok(NeedResponseDto::from(need))
    }

    /// Advance a need one urgency step: low -> urgent -> excess -> low
    pub async fn toggle(&self, user: &AuthenticatedUser, need_id: Uuid) -> Result<NeedResponseDto> {
        let need = self.find_need(need_id).await?;
        self.authorize_parent(user, &need).await?;

        let next = need.urgency.next();

        let updated: Need = sqlx::query_as(
            r#"
            UPDATE needs
            SET urgency = $1, updated_at = now()
            WHERE id = $2
            RETURNING id, collection_point_id, category, custom_label, urgency,
                      is_active, created_at, updated_at
            "#,
        )
        .bind(next)
        .bind(need_id)
        .fetch_one(&self.pool)
        .await
        .map_err(handle_db_error)?;

        self.changelog
            .record(
                &user.sub,
                Some(need.collection_point_id),
                "toggle_need",
                Some(json!({
                    "category": updated.category,
                    "from": need.urgency,
                    "to": updated.urgency,
                })),
            )
            .await;

        Ok(NeedResponseDto::from(updated))
    }

    /// Update a need's category, custom label or active flag.
    ///
    /// Switching the category away from "Outros" drops the stale custom
    /// label.
    pub async fn update(
        &self,
        user: &AuthenticatedUser,
        need_id: Uuid,
        dto: UpdateNeedDto,
    ) -> Result<NeedResponseDto> {
        let existing = self.find_need(need_id).await?;
        self.authorize_parent(user, &existing).await?;

        let category = dto.category.unwrap_or(existing.category);
        let custom_label = if category == CATEGORY_OTHER {
            dto.custom_label.or(existing.custom_label)
        } else {
            None
        };
        validate_custom_label(&category, custom_label.as_deref()).map_err(AppError::Validation)?;

        let is_active = dto.is_active.unwrap_or(existing.is_active);

        let updated: Need = sqlx::query_as(
            r#"
            UPDATE needs
            SET category = $1, custom_label = $2, is_active = $3, updated_at = now()
            WHERE id = $4
            RETURNING id, collection_point_id, category, custom_label, urgency,
                      is_active, created_at, updated_at
            "#,
        )
        .bind(&category)
        .bind(&custom_label)
        .bind(is_active)
        .bind(need_id)
        .fetch_one(&self.pool)
        .await
        .map_err(handle_db_error)?;

        self.changelog
            .record(
                &user.sub,
                Some(updated.collection_point_id),
                "update_need",
                Some(json!({
                    "category": updated.category,
                    "custom_label": updated.custom_label,
                    "is_active": updated.is_active,
                })),
            )
            .await;

        Ok(NeedResponseDto::from(updated))
    }

    /// Remove a need
    pub async fn delete(&self, user: &AuthenticatedUser, need_id: Uuid) -> Result<()> {
        let need = self.find_need(need_id).await?;
        self.authorize_parent(user, &need).await?;

        sqlx::query("DELETE FROM needs WHERE id = $1")
            .bind(need_id)
            .execute(&self.pool)
            .await
            .map_err(handle_db_error)?;

        self.changelog
            .record(
                &user.sub,
                Some(need.collection_point_id),
                "delete_need",
                Some(json!({ "category": need.category })),
            )
            .await;

        Ok(())
    }

    async fn find_need(&self, id: Uuid) -> Result<Need> {
        sqlx::query_as(
            r#"
            SELECT id, collection_point_id, category, custom_label, urgency,
                   is_active, created_at, updated_at
            FROM needs
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::NotFound(MSG_NEED_NOT_FOUND.to_string()))
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

    /// Check the caller manages the need's parent point
    async fn authorize_parent(&self, user: &AuthenticatedUser, need: &Need) -> Result<()> {
        let point = self.find_point(need.collection_point_id).await?;
        if !point.managed_by(user) {
            return Err(AppError::Forbidden(MSG_NOT_POINT_MANAGER.to_string()));
        }
        Ok(())
    }
}
