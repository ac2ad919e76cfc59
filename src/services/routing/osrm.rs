//! OSRM routing engine client
//!
//! OSRM API documentation:
//! https://project-osrm.org/docs/v5.24.0/api/#route-service

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::types::Location;

use super::{RouteGeometry, RouteLeg, RouteRepository, RoutingError};

/// Meters per statute mile, for converting OSRM distances.
const METERS_PER_MILE: f64 = 1609.34;

/// OSRM encodes polylines with 5 decimal places (Google's default).
const POLYLINE_PRECISION: u32 = 5;

/// OSRM client configuration
#[derive(Debug, Clone)]
pub struct OsrmConfig {
    /// Base URL of the OSRM route service
    /// (e.g., "http://router.project-osrm.org/route/v1/driving")
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://router.project-osrm.org/route/v1/driving".to_string(),
            timeout_seconds: 10,
        }
    }
}

impl OsrmConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

/// OSRM routing client
pub struct OsrmClient {
    client: Client,
    config: OsrmConfig,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    /// Build the route request URL for a single leg.
    fn build_leg_url(&self, origin: &Location, destination: &Location) -> String {
        format!(
            "{}/{},{};{},{}?overview=full&geometries=polyline",
            self.config.base_url,
            origin.latitude,
            origin.longitude,
            destination.latitude,
            destination.longitude,
        )
    }

    fn convert_response(
        &self,
        response: OsrmResponse,
        origin: &Location,
        destination: &Location,
    ) -> Result<RouteLeg, RoutingError> {
        if response.code != "Ok" || response.routes.is_empty() {
            warn!(
                "OSRM returned no routes: {} - {}",
                response.code,
                response.message.as_deref().unwrap_or("no message")
            );
            return Err(RoutingError::NoRouteFound {
                origin: format!("{},{}", origin.latitude, origin.longitude),
                destination: format!("{},{}", destination.latitude, destination.longitude),
            });
        }

        // OSRM returns multiple routes; pick the first one.
        let route = &response.routes[0];
        debug!(
            "Selected route with distance {}m and duration {}s",
            route.distance, route.duration
        );

        let coordinates = if route.geometry.is_empty() {
            vec![]
        } else {
            decode_polyline(&route.geometry, POLYLINE_PRECISION)?
        };
        debug!("Decoded geometry with {} coordinate points", coordinates.len());

        Ok(RouteLeg {
            distance_miles: route.distance / METERS_PER_MILE,
            duration_hours: route.duration / 3600.0,
            geometry: RouteGeometry::line_string(coordinates),
        })
    }
}

#[async_trait::async_trait]
impl RouteRepository for OsrmClient {
    async fn fetch_leg(
        &self,
        origin: &Location,
        destination: &Location,
    ) -> Result<RouteLeg, RoutingError> {
        let url = self.build_leg_url(origin, destination);
        debug!("Requesting route leg from OSRM: {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                RoutingError::Timeout(self.config.timeout_seconds)
            } else {
                RoutingError::InvalidResponse(format!("request failed: {}", e))
            }
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RoutingError::InvalidResponse(format!(
                "OSRM returned error {}: {}",
                status, body
            )));
        }

        let parsed: OsrmResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                RoutingError::Timeout(self.config.timeout_seconds)
            } else {
                RoutingError::InvalidResponse(format!("failed to parse OSRM response: {}", e))
            }
        })?;

        self.convert_response(parsed, origin, destination)
    }

    fn name(&self) -> &str {
        "OSRM"
    }
}

// OSRM API types

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    code: String,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    /// Distance in meters
    distance: f64,
    /// Duration in seconds
    duration: f64,
    /// Encoded polyline shape
    #[serde(default)]
    geometry: String,
}

/// Decode an encoded polyline into [lat, lon] coordinate pairs.
/// Precision is 5 decimal places for OSRM's default encoding.
fn decode_polyline(encoded: &str, precision: u32) -> Result<Vec<[f64; 2]>, RoutingError> {
    let factor = 10_f64.powi(precision as i32);
    let mut coordinates = Vec::new();
    let mut lat = 0i64;
    let mut lng = 0i64;

    let bytes = encoded.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        // Decode latitude
        let mut shift = 0;
        let mut result = 0i64;
        loop {
            if i >= bytes.len() {
                return Err(RoutingError::InvalidResponse(
                    "invalid polyline encoding".to_string(),
                ));
            }
            let byte = bytes[i] as i64 - 63;
            i += 1;
            result |= (byte & 0x1f) << shift;
            shift += 5;
            if byte < 0x20 {
                break;
            }
        }
        let dlat = if result & 1 != 0 {
            !(result >> 1)
        } else {
            result >> 1
        };
        lat += dlat;

        // Decode longitude
        shift = 0;
        result = 0;
        loop {
            if i >= bytes.len() {
                return Err(RoutingError::InvalidResponse(
                    "invalid polyline encoding".to_string(),
                ));
            }
            let byte = bytes[i] as i64 - 63;
            i += 1;
            result |= (byte & 0x1f) << shift;
            shift += 5;
            if byte < 0x20 {
                break;
            }
        }
        let dlng = if result & 1 != 0 {
            !(result >> 1)
        } else {
            result >> 1
        };
        lng += dlng;

        coordinates.push([lat as f64 / factor, lng as f64 / factor]);
    }

    Ok(coordinates)
}
