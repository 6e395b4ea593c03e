use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Mean Earth radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A resolved latitude/longitude pair.
///
/// Not authoritative for a collection point until persisted onto its record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Great-circle distance between two coordinates in kilometers (haversine).
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_point_is_zero() {
        let p = Coordinate::new(-21.7607, -43.3503);
        assert!(distance_km(p, p).abs() < 1e-9);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = Coordinate::new(-21.7607, -43.3503);
        let b = Coordinate::new(-21.7350, -43.4120);

        let ab = distance_km(a, b);
        let ba = distance_km(b, a);
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn test_one_degree_of_longitude_at_equator() {
        let origin = Coordinate::new(0.0, 0.0);
        let east = Coordinate::new(0.0, 1.0);

        let d = distance_km(origin, east);
        assert!((d - 111.2).abs() < 0.5, "got {} km", d);
    }

    #[test]
    fn test_known_city_pair() {
        // Juiz de Fora to Rio de Janeiro, roughly 135 km great-circle
        let jf = Coordinate::new(-21.7642, -43.3496);
        let rio = Coordinate::new(-22.9068, -43.1729);

        let d = distance_km(jf, rio);
        assert!(d > 125.0 && d < 145.0, "got {} km", d);
    }
}
