use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::needs::dtos::NeedResponseDto;
use crate::features::needs::models::Need;
use crate::features::points::models::{CollectionPoint, PointResolution, PointStatus};
use crate::shared::links::{maps_search_link, tel_link, whatsapp_link};
use crate::shared::validation::PHONE_REGEX;

/// Request DTO for registering a collection point
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreatePointDto {
    #[validate(length(min = 1, max = 255, message = "Informe o nome do local"))]
    pub name: String,

    #[validate(length(min = 1, max = 255, message = "Informe o endereço"))]
    pub address: String,

    #[validate(length(min = 1, max = 100, message = "Informe o bairro"))]
    pub neighborhood: String,

    #[validate(regex(path = *PHONE_REGEX, message = "Telefone inválido"))]
    pub phone: String,

    #[validate(length(min = 1, max = 100, message = "Informe o horário de funcionamento"))]
    pub hours: String,

    #[validate(length(min = 1, max = 255, message = "Informe o responsável"))]
    pub responsible: String,

    /// Optional free text; the exact value "Abrigo" marks a shelter
    #[validate(length(max = 255, message = "Descrição muito longa"))]
    pub description: Option<String>,
}

/// Request DTO for updating a collection point.
///
/// Absent fields keep their stored value, except `description`: omitting it
/// clears the stored description (the edit form always sends the whole
/// record, so an absent description means "none").
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdatePointDto {
    #[validate(length(min = 1, max = 255, message = "Informe o nome do local"))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 255, message = "Informe o endereço"))]
    pub address: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Informe o bairro"))]
    pub neighborhood: Option<String>,

    #[validate(regex(path = *PHONE_REGEX, message = "Telefone inválido"))]
    pub phone: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Informe o horário de funcionamento"))]
    pub hours: Option<String>,

    #[validate(length(min = 1, max = 255, message = "Informe o responsável"))]
    pub responsible: Option<String>,

    #[validate(length(max = 255, message = "Descrição muito longa"))]
    pub description: Option<String>,
}

/// Request DTO for switching a point's lifecycle status
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdatePointStatusDto {
    pub status: PointStatus,
}

/// Query parameters for the public point listing
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct PointSearchQuery {
    /// Case-insensitive filter over name, neighborhood and address
    pub search: Option<String>,
}

/// Query parameters for the nearby listing (caller's location)
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct NearbyQuery {
    #[param(minimum = -90, maximum = 90)]
    pub lat: f64,
    #[param(minimum = -180, maximum = 180)]
    pub lng: f64,
}

/// Outbound contact links rendered next to a collection point
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContactLinksDto {
    /// Phone dialer link
    pub tel: String,
    /// WhatsApp conversation link
    pub whatsapp: String,
    /// Map search for "address, neighborhood"
    pub maps: String,
}

impl ContactLinksDto {
    fn for_point(point: &CollectionPoint) -> Self {
        Self {
            tel: tel_link(&point.phone),
            whatsapp: whatsapp_link(&point.phone),
            maps: maps_search_link(&format!("{}, {}", point.address, point.neighborhood)),
        }
    }
}

/// Response DTO for a collection point with its needs embedded
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PointResponseDto {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub neighborhood: String,
    pub phone: String,
    pub hours: String,
    pub responsible: String,
    pub status: PointStatus,
    /// pt-BR label for the status
    pub status_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_shelter: bool,
    /// Cached coordinate, both present or both absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    pub needs: Vec<NeedResponseDto>,
    pub contact_links: ContactLinksDto,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PointResponseDto {
    pub fn from_point(point: CollectionPoint, needs: Vec<Need>) -> Self {
        Self {
            status_label: point.status.label().to_string(),
            is_shelter: point.is_shelter(),
            contact_links: ContactLinksDto::for_point(&point),
            needs: needs.into_iter().map(NeedResponseDto::from).collect(),
            id: point.id,
            name: point.name,
            address: point.address,
            neighborhood: point.neighborhood,
            phone: point.phone,
            hours: point.hours,
            responsible: point.responsible,
            status: point.status,
            description: point.description,
            latitude: point.latitude,
            longitude: point.longitude,
            created_at: point.created_at,
            updated_at: point.updated_at,
        }
    }
}

/// Response DTO for the nearby listing: a point plus where its coordinate
/// came from and the distance to the caller
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NearbyPointDto {
    #[serde(flatten)]
    pub point: PointResponseDto,
    pub resolution: PointResolution,
}
