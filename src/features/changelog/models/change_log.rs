use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for an audit trail entry
#[derive(Debug, Clone, FromRow)]
pub struct ChangeLog {
    pub id: Uuid,
    pub user_id: String,
    pub collection_point_id: Option<Uuid>,
    pub action: String,
    pub details: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}
