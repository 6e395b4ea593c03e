use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// Supply-need urgency matching database enum.
///
/// A perpetual three-step cycle driven by manual toggles; there is no
/// terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "need_urgency", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Low,
    Urgent,
    Excess,
}

impl Urgency {
    /// One toggle step: low -> urgent -> excess -> low
    pub fn next(self) -> Self {
        match self {
            Urgency::Low => Urgency::Urgent,
            Urgency::Urgent => Urgency::Excess,
            Urgency::Excess => Urgency::Low,
        }
    }

    /// Short label shown to users
    pub fn label(&self) -> &'static str {
        match self {
            Urgency::Low => "Baixo",
            Urgency::Urgent => "Urgente",
            Urgency::Excess => "Excesso",
        }
    }
}

impl Default for Urgency {
    fn default() -> Self {
        Urgency::Low
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Urgency::Low => write!(f, "low"),
            Urgency::Urgent => write!(f, "urgent"),
            Urgency::Excess => write!(f, "excess"),
        }
    }
}

/// Database model for a supply need
#[derive(Debug, Clone, FromRow)]
pub struct Need {
    pub id: Uuid,
    pub collection_point_id: Uuid,
    pub category: String,
    /// Free-text label, only set for the "Outros" category
    pub custom_label: Option<String>,
    pub urgency: Urgency,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Need {
    /// Display label: the custom text for "Outros", the category otherwise
    pub fn display_label(&self) -> &str {
        match self.custom_label.as_deref() {
            Some(label) if !label.is_empty() => label,
            _ => &self.category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urgency_cycle_sequence() {
        assert_eq!(Urgency::Low.next(), Urgency::Urgent);
        assert_eq!(Urgency::Urgent.next(), Urgency::Excess);
        assert_eq!(Urgency::Excess.next(), Urgency::Low);
    }

    #[test]
    fn test_three_toggles_return_to_start() {
        let start = Urgency::Low;
        assert_eq!(start.next().next().next(), start);
    }

    #[test]
    fn test_new_need_defaults_to_low() {
        assert_eq!(Urgency::default(), Urgency::Low);
    }

    #[test]
    fn test_display_label_prefers_custom_text() {
        let need = Need {
            id: Uuid::new_v4(),
            collection_point_id: Uuid::new_v4(),
            category: "Outros".to_string(),
            custom_label: Some("Ração para animais".to_string()),
            urgency: Urgency::Low,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(need.display_label(), "Ração para animais");

        let plain = Need {
            custom_label: None,
            category: "Água potável".to_string(),
            ..need
        };
        assert_eq!(plain.display_label(), "Água potável");
    }
}
