use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::needs::models::{Need, Urgency};
use crate::shared::validation::validate_need_category;

/// Request DTO for adding a need to a collection point
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateNeedDto {
    /// Category from the canonical list (e.g. "Água", "Cobertores", "Outros")
    #[validate(custom(function = validate_need_category))]
    pub category: String,

    /// Free-text label, required when the category is "Outros"
    #[validate(length(
        min = 1,
        max = 100,
        message = "O rótulo deve ter entre 1 e 100 caracteres"
    ))]
    pub custom_label: Option<String>,
}

/// Request DTO for updating a need
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateNeedDto {
    #[validate(custom(function = validate_need_category))]
    pub category: Option<String>,

    #[validate(length(
        min = 1,
        max = 100,
        message = "O rótulo deve ter entre 1 e 100 caracteres"
    ))]
    pub custom_label: Option<String>,

    pub is_active: Option<bool>,
}

/// Response DTO for a supply need
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NeedResponseDto {
    pub id: Uuid,
    pub collection_point_id: Uuid,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_label: Option<String>,
    /// Category or, for "Outros", the custom label
    pub display_label: String,
    pub urgency: Urgency,
    /// pt-BR label for the urgency level
    pub urgency_label: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Need> for NeedResponseDto {
    fn from(need: Need) -> Self {
        Self {
            display_label: need.display_label().to_string(),
            urgency_label: need.urgency.label().to_string(),
            id: need.id,
            collection_point_id: need.collection_point_id,
            category: need.category,
            custom_label: need.custom_label,
            urgency: need.urgency,
            is_active: need.is_active,
            created_at: need.created_at,
            updated_at: need.updated_at,
        }
    }
}
