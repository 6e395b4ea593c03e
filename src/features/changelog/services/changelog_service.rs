use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::changelog::dtos::ChangeLogResponseDto;
use crate::features::changelog::models::ChangeLog;
use crate::shared::types::PaginationQuery;

/// Service for the admin audit trail.
///
/// Writes are best-effort: a failed insert is logged and swallowed so the
/// operation being audited never fails because of its audit entry.
pub struct ChangeLogService {
    pool: PgPool,
}

impl ChangeLogService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record an action against the audit trail
    pub async fn record(
        &self,
        user_id: &str,
        collection_point_id: Option<Uuid>,
        action: &str,
        details: Option<serde_json::Value>,
    ) {
        let result = sqlx::query(
            r#"
            INSERT INTO change_logs (user_id, collection_point_id, action, details)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(user_id)
        .bind(collection_point_id)
        .bind(action)
        .bind(details)
        .execute(&self.pool)
        .await;

        if let Err(e) = result {
            tracing::warn!(
                "Failed to record audit entry ({} by {}): {:?}",
                action,
                user_id,
                e
            );
        }
    }

    /// List audit entries, newest first
    pub async fn list(
        &self,
        params: &PaginationQuery,
    ) -> Result<(Vec<ChangeLogResponseDto>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM change_logs")
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        let entries: Vec<ChangeLog> = sqlx::query_as(
            r#"
            SELECT id, user_id, collection_point_id, action, details, created_at
            FROM change_logs
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(params.limit())
        .bind(params.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok((
            entries.into_iter().map(ChangeLogResponseDto::from).collect(),
            total,
        ))
    }
}
