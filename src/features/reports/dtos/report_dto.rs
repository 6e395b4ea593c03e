use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::reports::models::{Report, ReportType};
use crate::shared::constants::{
    REPORT_ADDRESS_MAX_LEN, REPORT_DESCRIPTION_MAX_LEN, REPORT_NEIGHBORHOOD_MAX_LEN,
    REPORT_REFERENCE_MAX_LEN,
};
use crate::shared::links::maps_search_link;

/// Request DTO for an anonymous incident report
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateReportDto {
    pub report_type: ReportType,

    #[validate(length(max = REPORT_ADDRESS_MAX_LEN, message = "Endereço muito longo"))]
    pub address: String,

    #[validate(length(max = REPORT_NEIGHBORHOOD_MAX_LEN, message = "Bairro muito longo"))]
    pub neighborhood: String,

    /// Optional landmark near the incident
    #[validate(length(max = REPORT_REFERENCE_MAX_LEN, message = "Referência muito longa"))]
    pub reference: Option<String>,

    #[validate(length(max = REPORT_DESCRIPTION_MAX_LEN, message = "Descrição muito longa"))]
    pub description: String,

    /// Public URL of a previously uploaded photo
    #[validate(url(message = "URL da foto inválida"))]
    pub photo_url: Option<String>,
}

/// Query parameters for the report listing
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ReportListQuery {
    /// Time window in hours: 6, 12 or 24 (default 24)
    pub hours: Option<i64>,
}

/// Response DTO for an incident report.
///
/// The reporting IP is never exposed.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportResponseDto {
    pub id: Uuid,
    pub report_type: ReportType,
    /// pt-BR label for the incident type
    pub type_label: String,
    pub address: String,
    pub neighborhood: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    /// Map search for "address, neighborhood"
    pub maps_link: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl From<Report> for ReportResponseDto {
    fn from(report: Report) -> Self {
        Self {
            type_label: report.report_type.label().to_string(),
            maps_link: maps_search_link(&format!(
                "{}, {}",
                report.address, report.neighborhood
            )),
            id: report.id,
            report_type: report.report_type,
            address: report.address,
            neighborhood: report.neighborhood,
            reference: report.reference,
            description: report.description,
            photo_url: report.photo_url,
            created_at: report.created_at,
            expires_at: report.expires_at,
        }
    }
}
