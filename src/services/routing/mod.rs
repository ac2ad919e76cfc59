//! Routing service for fetching route legs between locations.
//!
//! Uses OSRM for production, mock for tests.

pub mod osrm;

pub use osrm::{OsrmClient, OsrmConfig};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::services::geo::haversine_miles;
use crate::services::hos::rules::US_INTERSTATE;
use crate::types::Location;

/// Errors surfaced by a routing adapter.
#[derive(Debug, Error)]
pub enum RoutingError {
    /// The service answered with a payload that could not be interpreted.
    #[error("invalid routing response: {0}")]
    InvalidResponse(String),

    /// The service found no path between the two coordinates.
    #[error("no route found between {origin} and {destination}")]
    NoRouteFound { origin: String, destination: String },

    /// The request exceeded the configured deadline.
    #[error("routing request timed out after {0} seconds")]
    Timeout(u64),
}

/// Route geometry as an ordered polyline.
/// Coordinates are in [latitude, longitude] order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteGeometry {
    #[serde(rename = "type")]
    pub geometry_type: String,
    /// Array of [lat, lon] coordinates forming the route polyline
    pub coordinates: Vec<[f64; 2]>,
}

impl RouteGeometry {
    /// Create a LineString geometry from decoded coordinates.
    pub fn line_string(coordinates: Vec<[f64; 2]>) -> Self {
        Self {
            geometry_type: "LineString".to_string(),
            coordinates,
        }
    }

    /// Create empty geometry (for fallback when no shape is available)
    pub fn empty() -> Self {
        Self::line_string(vec![])
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }
}

/// A routed driving leg between two locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteLeg {
    pub distance_miles: f64,
    pub duration_hours: f64,
    pub geometry: RouteGeometry,
}

/// Routing repository trait for abstraction (OSRM, mock, etc.)
#[async_trait]
pub trait RouteRepository: Send + Sync {
    /// Fetch distance, duration and geometry for a single leg.
    async fn fetch_leg(
        &self,
        origin: &Location,
        destination: &Location,
    ) -> Result<RouteLeg, RoutingError>;

    /// Get service name for logging
    fn name(&self) -> &str;
}

/// Mock routing repository for tests and offline use.
/// Uses Haversine distance × coefficient for estimation.
pub struct MockRouteRepository {
    /// Coefficient for converting straight-line to road distance (default: 1.3)
    road_coefficient: f64,
    /// Average truck speed in mph for time estimation (default: 55)
    average_speed_mph: f64,
}

impl Default for MockRouteRepository {
    fn default() -> Self {
        Self {
            road_coefficient: 1.3,
            average_speed_mph: US_INTERSTATE.average_truck_speed_mph,
        }
    }
}

impl MockRouteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(road_coefficient: f64, average_speed_mph: f64) -> Self {
        Self {
            road_coefficient,
            average_speed_mph,
        }
    }
}

#[async_trait]
impl RouteRepository for MockRouteRepository {
    async fn fetch_leg(
        &self,
        origin: &Location,
        destination: &Location,
    ) -> Result<RouteLeg, RoutingError> {
        let straight_line = haversine_miles(origin, destination);
        let road_miles = straight_line * self.road_coefficient;
        let duration_hours = road_miles / self.average_speed_mph;

        // Straight line between the endpoints stands in for the road shape.
        let geometry = RouteGeometry::line_string(vec![
            [origin.latitude, origin.longitude],
            [destination.latitude, destination.longitude],
        ]);

        Ok(RouteLeg {
            distance_miles: road_miles,
            duration_hours,
            geometry,
        })
    }

    fn name(&self) -> &str {
        "MockRouting"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chicago() -> Location {
        Location::new(-87.6298, 41.8781)
    }

    fn indianapolis() -> Location {
        Location::new(-86.1581, 39.7684)
    }

    #[tokio::test]
    async fn test_mock_routing_two_locations() {
        let repo = MockRouteRepository::new();
        let leg = repo.fetch_leg(&chicago(), &indianapolis()).await.unwrap();

        // ~165 mi straight line, ~215 mi road
        assert!(
            leg.distance_miles > 190.0 && leg.distance_miles < 240.0,
            "Expected ~215 miles, got {}",
            leg.distance_miles
        );

        // ~215 mi at 55 mph is ~3.9 hours
        assert!(
            leg.duration_hours > 3.0 && leg.duration_hours < 5.0,
            "Expected ~4 hours, got {}",
            leg.duration_hours
        );
    }

    #[tokio::test]
    async fn test_mock_routing_same_point_is_zero_leg() {
        let repo = MockRouteRepository::new();
        let leg = repo.fetch_leg(&chicago(), &chicago()).await.unwrap();

        assert!(leg.distance_miles.abs() < 0.001);
        assert!(leg.duration_hours.abs() < 0.001);
    }

    #[tokio::test]
    async fn test_mock_routing_geometry_endpoints() {
        let repo = MockRouteRepository::new();
        let leg = repo.fetch_leg(&chicago(), &indianapolis()).await.unwrap();

        assert_eq!(leg.geometry.coordinates.len(), 2);
        // [lat, lon] order
        assert!((leg.geometry.coordinates[0][0] - 41.8781).abs() < 0.0001);
        assert!((leg.geometry.coordinates[0][1] - (-87.6298)).abs() < 0.0001);
    }

    #[tokio::test]
    async fn test_mock_routing_custom_params() {
        let repo = MockRouteRepository::with_params(1.5, 40.0);
        let leg = repo.fetch_leg(&chicago(), &indianapolis()).await.unwrap();

        // Higher coefficient: ~248 mi; slower speed: ~6.2 hours
        assert!(
            leg.distance_miles > 230.0 && leg.distance_miles < 270.0,
            "Expected ~248 miles with 1.5 coefficient, got {}",
            leg.distance_miles
        );
        assert!(leg.duration_hours > 5.0 && leg.duration_hours < 7.5);
    }

    #[test]
    fn test_routing_repository_name() {
        let mock = MockRouteRepository::new();
        assert_eq!(mock.name(), "MockRouting");
    }

    #[test]
    fn test_route_geometry_empty() {
        let geometry = RouteGeometry::empty();
        assert!(geometry.is_empty());
        assert_eq!(geometry.geometry_type, "LineString");
    }
}
