//! Coordinate enrichment for collection point listings.
//!
//! Each point resolves to a coordinate from its cached latitude/longitude
//! when both are present; only uncached points go to the geocoder, and
//! those lookups run concurrently. A miss on both paths passes through as
//! `Unresolved` so the output always has the same length and order as the
//! input.

use std::collections::HashMap;

use futures::future::join_all;
use uuid::Uuid;

use crate::features::geocoding::Geocoder;
use crate::features::points::models::{CollectionPoint, PointResolution};
use crate::shared::geo::{self, Coordinate};

/// A collection point paired with its coordinate resolution
#[derive(Debug, Clone)]
pub struct EnrichedPoint {
    pub point: CollectionPoint,
    pub resolution: PointResolution,
}

impl EnrichedPoint {
    /// True when the coordinate came from the geocoder rather than the
    /// record itself. These points are candidates for cache warm-up.
    pub fn freshly_geocoded(&self) -> bool {
        matches!(self.resolution, PointResolution::Resolved { .. })
            && self.point.cached_coordinate().is_none()
    }
}

/// Resolve a coordinate for every point, computing the distance to
/// `user_coordinate` when one is given.
///
/// Identical address strings are looked up independently; results are
/// applied by point id, never by arrival order. In-flight lookups are not
/// cancelled when the caller goes away; a superseded batch simply resolves
/// later and its cache writes land last-arrival-wins per point.
pub async fn enrich(
    points: Vec<CollectionPoint>,
    geocoder: &dyn Geocoder,
    user_coordinate: Option<Coordinate>,
) -> Vec<EnrichedPoint> {
    let lookups = points
        .iter()
        .filter(|point| point.cached_coordinate().is_none())
        .map(|point| {
            let id = point.id;
            let address = point.address.clone();
            let neighborhood = point.neighborhood.clone();
            async move { (id, geocoder.resolve(&address, Some(&neighborhood)).await) }
        })
        .collect::<Vec<_>>();

    let mut geocoded: HashMap<Uuid, Option<Coordinate>> =
        join_all(lookups).await.into_iter().collect();

    points
        .into_iter()
        .map(|point| {
            let coordinate = point
                .cached_coordinate()
                .or_else(|| geocoded.remove(&point.id).flatten());

            let resolution = match coordinate {
                Some(coordinate) => PointResolution::Resolved {
                    coordinate,
                    distance_km: user_coordinate.map(|from| geo::distance_km(from, coordinate)),
                },
                None => PointResolution::Unresolved,
            };

            EnrichedPoint { point, resolution }
        })
        .collect()
}

/// Sort ascending by distance to the caller; unresolved points go last.
///
/// The sort is stable, so ties keep the listing's name order.
pub fn sort_nearest(enriched: &mut [EnrichedPoint]) {
    enriched.sort_by(|a, b| {
        match (a.resolution.distance_km(), b.resolution.distance_km()) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(std::cmp::Ordering::Equal),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        }
    });
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::Utc;

    use super::*;
    use crate::features::points::models::PointStatus;

    /// Fake geocoder with canned answers, counting every invocation
    struct FakeGeocoder {
        answers: HashMap<String, Coordinate>,
        calls: AtomicUsize,
    }

    impl FakeGeocoder {
        fn new(answers: Vec<(&str, Coordinate)>) -> Self {
            Self {
                answers: answers
                    .into_iter()
                    .map(|(a, c)| (a.to_string(), c))
                    .collect(),
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Geocoder for FakeGeocoder {
        async fn resolve(&self, address: &str, _neighborhood: Option<&str>) -> Option<Coordinate> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.answers.get(address).copied()
        }
    }

    fn point(name: &str, address: &str, cached: Option<(f64, f64)>) -> CollectionPoint {
        CollectionPoint {
            id: Uuid::new_v4(),
            name: name.to_string(),
            address: address.to_string(),
            neighborhood: "Centro".to_string(),
            phone: "(32) 99999-0000".to_string(),
            hours: "8h às 18h".to_string(),
            responsible: "Maria".to_string(),
            status: PointStatus::Open,
            description: None,
            latitude: cached.map(|(lat, _)| lat),
            longitude: cached.map(|(_, lng)| lng),
            user_id: "user-1".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_cached_points_never_hit_the_geocoder() {
        let geocoder = FakeGeocoder::new(vec![]);
        let points = vec![
            point("A", "Rua A, 1", Some((-21.76, -43.35))),
            point("B", "Rua B, 2", Some((-21.70, -43.40))),
        ];

        let enriched = enrich(points, &geocoder, None).await;

        assert_eq!(geocoder.call_count(), 0);
        assert!(enriched
            .iter()
            .all(|e| matches!(e.resolution, PointResolution::Resolved { .. })));
        assert!(enriched.iter().all(|e| !e.freshly_geocoded()));
    }

    #[tokio::test]
    async fn test_only_uncached_points_are_looked_up() {
        let geocoder = FakeGeocoder::new(vec![("Rua B, 2", Coordinate::new(-21.70, -43.40))]);
        let points = vec![
            point("A", "Rua A, 1", Some((-21.76, -43.35))),
            point("B", "Rua B, 2", None),
        ];

        let enriched = enrich(points, &geocoder, None).await;

        assert_eq!(geocoder.call_count(), 1);
        assert!(!enriched[0].freshly_geocoded());
        assert!(enriched[1].freshly_geocoded());
    }

    #[tokio::test]
    async fn test_misses_pass_through_unresolved_in_order() {
        let geocoder = FakeGeocoder::new(vec![("Rua C, 3", Coordinate::new(-21.71, -43.41))]);
        let points = vec![
            point("A", "Rua Desconhecida, 9", None),
            point("B", "Rua B, 2", Some((-21.76, -43.35))),
            point("C", "Rua C, 3", None),
        ];

        let enriched = enrich(points, &geocoder, None).await;

        assert_eq!(enriched.len(), 3);
        assert_eq!(enriched[0].point.name, "A");
        assert_eq!(enriched[1].point.name, "B");
        assert_eq!(enriched[2].point.name, "C");
        assert_eq!(enriched[0].resolution, PointResolution::Unresolved);
        assert!(matches!(
            enriched[2].resolution,
            PointResolution::Resolved { .. }
        ));
    }

    #[tokio::test]
    async fn test_duplicate_addresses_are_not_deduplicated() {
        let geocoder = FakeGeocoder::new(vec![("Rua A, 1", Coordinate::new(-21.76, -43.35))]);
        let points = vec![
            point("A1", "Rua A, 1", None),
            point("A2", "Rua A, 1", None),
        ];

        let enriched = enrich(points, &geocoder, None).await;

        assert_eq!(geocoder.call_count(), 2);
        assert!(enriched.iter().all(|e| e.freshly_geocoded()));
    }

    #[tokio::test]
    async fn test_distance_measured_from_caller_location() {
        let geocoder = FakeGeocoder::new(vec![]);
        let here = Coordinate::new(-21.76, -43.35);
        let points = vec![point("A", "Rua A, 1", Some((-21.76, -43.35)))];

        let enriched = enrich(points, &geocoder, Some(here)).await;

        let d = enriched[0].resolution.distance_km().unwrap();
        assert!(d.abs() < 1e-9, "distance to self should be zero, got {}", d);
    }

    #[tokio::test]
    async fn test_sort_nearest_orders_by_distance_with_unresolved_last() {
        let geocoder = FakeGeocoder::new(vec![]);
        let here = Coordinate::new(-21.7600, -43.3500);
        let points = vec![
            point("Longe", "Rua A, 1", Some((-21.9000, -43.3500))),
            point("Sem coordenada", "Rua B, 2", None),
            point("Perto", "Rua C, 3", Some((-21.7610, -43.3500))),
        ];

        let mut enriched = enrich(points, &geocoder, Some(here)).await;
        sort_nearest(&mut enriched);

        assert_eq!(enriched[0].point.name, "Perto");
        assert_eq!(enriched[1].point.name, "Longe");
        assert_eq!(enriched[2].point.name, "Sem coordenada");
        assert_eq!(enriched[2].resolution, PointResolution::Unresolved);
    }
}
