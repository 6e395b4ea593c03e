use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// Incident type matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "report_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    Flooding,
    Landslide,
}

impl ReportType {
    /// Short label shown to users
    pub fn label(&self) -> &'static str {
        match self {
            ReportType::Flooding => "Alagamento",
            ReportType::Landslide => "Deslizamento",
        }
    }
}

impl std::fmt::Display for ReportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportType::Flooding => write!(f, "flooding"),
            ReportType::Landslide => write!(f, "landslide"),
        }
    }
}

/// Database model for an anonymous incident report.
///
/// Reports are short-lived: they stop being served once `expires_at`
/// passes, independently of when the sweeper physically removes them.
#[derive(Debug, Clone, FromRow)]
pub struct Report {
    pub id: Uuid,
    pub report_type: ReportType,
    pub address: String,
    pub neighborhood: String,
    /// Optional landmark near the incident
    pub reference: Option<String>,
    pub description: String,
    pub photo_url: Option<String>,
    /// Reporting IP, kept for throttling and abuse follow-up
    pub ip_address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_type_labels() {
        assert_eq!(ReportType::Flooding.label(), "Alagamento");
        assert_eq!(ReportType::Landslide.label(), "Deslizamento");
    }

    #[test]
    fn test_report_type_wire_format() {
        assert_eq!(ReportType::Flooding.to_string(), "flooding");
        assert_eq!(ReportType::Landslide.to_string(), "landslide");

        let parsed: ReportType = serde_json::from_str("\"landslide\"").unwrap();
        assert_eq!(parsed, ReportType::Landslide);
    }
}
