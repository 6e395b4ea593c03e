use async_trait::async_trait;
use serde::Deserialize;

use crate::core::config::GeocodingConfig;
use crate::shared::geo::Coordinate;

/// Address-to-coordinate resolution seam.
///
/// The enrichment pipeline depends on this trait rather than the concrete
/// Nominatim client so lookups can be observed and faked in tests.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolve an address to a coordinate, `None` on any miss or failure.
    async fn resolve(&self, address: &str, neighborhood: Option<&str>) -> Option<Coordinate>;
}

/// Nominatim search result structure
#[derive(Debug, Deserialize)]
pub struct NominatimPlace {
    pub lat: String,
    pub lon: String,
    pub display_name: String,
}

/// Service for resolving street addresses to coordinates using Nominatim.
///
/// Lookups are soft: any failure (network, HTTP status, body parse, empty
/// result set, malformed coordinates) yields `None`. Callers treat a missing
/// coordinate as "address not found" and never see the underlying error.
pub struct GeocodingService {
    client: reqwest::Client,
    config: GeocodingConfig,
}

impl GeocodingService {
    pub fn new(config: GeocodingConfig) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(config.user_agent.clone())
                .build()
                .expect("Failed to build HTTP client"),
            config,
        }
    }

    /// Resolve an address to coordinates.
    ///
    /// The configured city and state are appended to every query; the
    /// neighborhood slots in between when present.
    pub async fn geocode_address(
        &self,
        address: &str,
        neighborhood: Option<&str>,
    ) -> Option<Coordinate> {
        let query = self.compose_query(address, neighborhood);

        let url = format!(
            "{}/search?q={}&format=json&limit=1&countrycodes=br",
            self.config.base_url,
            urlencoding::encode(&query)
        );

        tracing::debug!("Geocoding: {} -> {}", query, url);

        let place = self.execute_request(&url).await?;

        let coordinate = Self::place_to_coordinate(&place);
        match &coordinate {
            Some(c) => {
                tracing::debug!(
                    "Geocoded '{}' -> {} ({}, {})",
                    query,
                    place.display_name,
                    c.lat,
                    c.lng
                );
            }
            None => {
                tracing::warn!(
                    "Nominatim returned unparseable coordinates for '{}': lat={}, lon={}",
                    query,
                    place.lat,
                    place.lon
                );
            }
        }

        coordinate
    }

    fn compose_query(&self, address: &str, neighborhood: Option<&str>) -> String {
        match neighborhood {
            Some(n) if !n.trim().is_empty() => format!(
                "{}, {}, {}, {}",
                address.trim(),
                n.trim(),
                self.config.city,
                self.config.state
            ),
            _ => format!(
                "{}, {}, {}",
                address.trim(),
                self.config.city,
                self.config.state
            ),
        }
    }

    /// Execute HTTP request to Nominatim and parse the first result
    async fn execute_request(&self, url: &str) -> Option<NominatimPlace> {
        let response = match self.client.get(url).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!("Nominatim request failed: {:?}", e);
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::warn!("Nominatim returned status: {}", response.status());
            return None;
        }

        let results: Vec<NominatimPlace> = match response.json().await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!("Failed to parse Nominatim response: {:?}", e);
                return None;
            }
        };

        results.into_iter().next()
    }

    /// Parse Nominatim's string coordinates, rejecting malformed values
    fn place_to_coordinate(place: &NominatimPlace) -> Option<Coordinate> {
        let lat = place.lat.parse::<f64>().ok()?;
        let lng = place.lon.parse::<f64>().ok()?;
        Some(Coordinate::new(lat, lng))
    }
}

#[async_trait]
impl Geocoder for GeocodingService {
    async fn resolve(&self, address: &str, neighborhood: Option<&str>) -> Option<Coordinate> {
        self.geocode_address(address, neighborhood).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> GeocodingService {
        GeocodingService::new(GeocodingConfig {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: "test-agent".to_string(),
            city: "Juiz de Fora".to_string(),
            state: "MG".to_string(),
        })
    }

    #[test]
    fn test_compose_query_appends_city_and_state() {
        let svc = service();
        assert_eq!(
            svc.compose_query("Rua Halfeld, 100", None),
            "Rua Halfeld, 100, Juiz de Fora, MG"
        );
    }

    #[test]
    fn test_compose_query_includes_neighborhood() {
        let svc = service();
        assert_eq!(
            svc.compose_query("Rua Halfeld, 100", Some("Centro")),
            "Rua Halfeld, 100, Centro, Juiz de Fora, MG"
        );
    }

    #[test]
    fn test_compose_query_skips_blank_neighborhood() {
        let svc = service();
        assert_eq!(
            svc.compose_query(" Rua Halfeld, 100 ", Some("  ")),
            "Rua Halfeld, 100, Juiz de Fora, MG"
        );
    }

    #[test]
    fn test_place_to_coordinate_parses_valid_strings() {
        let place = NominatimPlace {
            lat: "-21.7624".to_string(),
            lon: "-43.3501".to_string(),
            display_name: "Juiz de Fora, MG, Brasil".to_string(),
        };
        let coord = GeocodingService::place_to_coordinate(&place).unwrap();
        assert!((coord.lat - (-21.7624)).abs() < 1e-9);
        assert!((coord.lng - (-43.3501)).abs() < 1e-9);
    }

    #[test]
    fn test_place_to_coordinate_rejects_malformed_values() {
        let place = NominatimPlace {
            lat: "not-a-number".to_string(),
            lon: "-43.3501".to_string(),
            display_name: "somewhere".to_string(),
        };
        assert!(GeocodingService::place_to_coordinate(&place).is_none());
    }
}
