use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::auth::model::AuthenticatedUser;
use crate::shared::constants::SHELTER_DESCRIPTION;
use crate::shared::geo::Coordinate;

/// Collection point lifecycle status matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "point_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PointStatus {
    Open,
    TemporarilyClosed,
    Closed,
}

impl PointStatus {
    /// Short label shown to users
    pub fn label(&self) -> &'static str {
        match self {
            PointStatus::Open => "Aberto",
            PointStatus::TemporarilyClosed => "Temp. Fechado",
            PointStatus::Closed => "Encerrado",
        }
    }
}

impl std::fmt::Display for PointStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PointStatus::Open => write!(f, "open"),
            PointStatus::TemporarilyClosed => write!(f, "temporarily_closed"),
            PointStatus::Closed => write!(f, "closed"),
        }
    }
}

/// Database model for a collection point
#[derive(Debug, Clone, FromRow)]
pub struct CollectionPoint {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub neighborhood: String,
    pub phone: String,
    pub hours: String,
    pub responsible: String,
    pub status: PointStatus,
    pub description: Option<String>,
    /// Cached coordinate; both fields present or the cache does not count
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CollectionPoint {
    /// Cached coordinate, only when both components are present
    pub fn cached_coordinate(&self) -> Option<Coordinate> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(Coordinate::new(lat, lng)),
            _ => None,
        }
    }

    /// Points described as shelters get their own marker in listings
    pub fn is_shelter(&self) -> bool {
        self.description.as_deref() == Some(SHELTER_DESCRIPTION)
    }

    /// Mutation rights: the creating user or a site-wide admin
    pub fn managed_by(&self, user: &AuthenticatedUser) -> bool {
        self.user_id == user.sub || user.is_admin()
    }
}

/// Where a point's coordinate came from, and the distance to the caller
/// when a reference location was provided.
///
/// An explicit variant instead of bare optional fields: `Unresolved` means
/// both the cached coordinate and the address lookup came up empty.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PointResolution {
    Resolved {
        coordinate: Coordinate,
        #[serde(skip_serializing_if = "Option::is_none")]
        distance_km: Option<f64>,
    },
    Unresolved,
}

impl PointResolution {
    pub fn distance_km(&self) -> Option<f64> {
        match self {
            PointResolution::Resolved { distance_km, .. } => *distance_km,
            PointResolution::Unresolved => None,
        }
    }

    pub fn coordinate(&self) -> Option<Coordinate> {
        match self {
            PointResolution::Resolved { coordinate, .. } => Some(*coordinate),
            PointResolution::Unresolved => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{create_admin_user, create_point_admin_user};

    fn sample_point() -> CollectionPoint {
        CollectionPoint {
            id: Uuid::new_v4(),
            name: "Ponto Centro".to_string(),
            address: "Rua Halfeld, 100".to_string(),
            neighborhood: "Centro".to_string(),
            phone: "(32) 99999-0000".to_string(),
            hours: "8h às 18h".to_string(),
            responsible: "Maria".to_string(),
            status: PointStatus::Open,
            description: None,
            latitude: None,
            longitude: None,
            user_id: "user-1".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_cached_coordinate_requires_both_components() {
        let mut point = sample_point();
        assert!(point.cached_coordinate().is_none());

        point.latitude = Some(-21.76);
        assert!(point.cached_coordinate().is_none());

        point.longitude = Some(-43.35);
        let coord = point.cached_coordinate().unwrap();
        assert!((coord.lat - (-21.76)).abs() < 1e-9);
        assert!((coord.lng - (-43.35)).abs() < 1e-9);
    }

    #[test]
    fn test_shelter_marker_matches_exact_description() {
        let mut point = sample_point();
        assert!(!point.is_shelter());

        point.description = Some("Abrigo".to_string());
        assert!(point.is_shelter());

        point.description = Some("abrigo improvisado".to_string());
        assert!(!point.is_shelter());
    }

    #[test]
    fn test_managed_by_owner_or_admin() {
        let point = sample_point();

        let owner = create_point_admin_user("user-1");
        let admin = create_admin_user();
        let stranger = create_point_admin_user("someone-else");

        assert!(point.managed_by(&owner));
        assert!(point.managed_by(&admin));
        assert!(!point.managed_by(&stranger));
    }
}
