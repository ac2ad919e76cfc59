//! Route plan output types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::services::routing::RouteGeometry;

use super::RouteSegment;

/// The complete planned trip: every segment in chronological order plus
/// summary statistics. Immutable once returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePlan {
    pub segments: Vec<RouteSegment>,
    pub total_distance_miles: f64,
    pub total_duration_hours: f64,
    /// Hours spent with status On Duty (Driving).
    pub driving_time: f64,
    /// Hours spent with status Off Duty.
    pub resting_time: f64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Both legs' polylines merged into a single line string.
    pub route_geometry: RouteGeometry,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DutyStatus, SegmentType};
    use chrono::TimeZone;

    #[test]
    fn plan_serializes_geometry_as_line_string() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 6, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
        let plan = RoutePlan {
            segments: vec![RouteSegment {
                segment_type: SegmentType::DriveToPickup,
                start_time: start,
                end_time: end,
                duration_hours: 2.0,
                distance_miles: 130.0,
                location: "On Route to destination".to_string(),
                status: DutyStatus::OnDutyDriving,
            }],
            total_distance_miles: 130.0,
            total_duration_hours: 2.0,
            driving_time: 2.0,
            resting_time: 0.0,
            start_time: start,
            end_time: end,
            route_geometry: RouteGeometry::line_string(vec![[52.5169, 13.3887], [52.52, 13.41]]),
        };

        let json: serde_json::Value = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["route_geometry"]["type"], "LineString");
        assert_eq!(json["route_geometry"]["coordinates"][0][0], 52.5169);
        assert_eq!(json["segments"].as_array().unwrap().len(), 1);
    }
}
