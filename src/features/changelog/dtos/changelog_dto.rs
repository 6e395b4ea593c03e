use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::changelog::models::ChangeLog;

/// Response DTO for an audit trail entry
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChangeLogResponseDto {
    pub id: Uuid,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_point_id: Option<Uuid>,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl From<ChangeLog> for ChangeLogResponseDto {
    fn from(entry: ChangeLog) -> Self {
        Self {
            id: entry.id,
            user_id: entry.user_id,
            collection_point_id: entry.collection_point_id,
            action: entry.action,
            details: entry.details,
            created_at: entry.created_at,
        }
    }
}
