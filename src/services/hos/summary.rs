//! Trip summary computation.

use chrono::{DateTime, Utc};

use crate::services::routing::RouteGeometry;
use crate::types::{DutyStatus, RoutePlan, RouteSegment};

/// Fold the final segment list into a [`RoutePlan`].
pub fn summarize_trip(
    segments: Vec<RouteSegment>,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    to_pickup_geometry: &RouteGeometry,
    to_drop_off_geometry: &RouteGeometry,
) -> RoutePlan {
    let mut total_distance = 0.0;
    let mut total_duration = 0.0;
    let mut driving_time = 0.0;
    let mut resting_time = 0.0;

    for segment in &segments {
        total_distance += segment.distance_miles;
        total_duration += segment.duration_hours;
        match segment.status {
            DutyStatus::OnDutyDriving => driving_time += segment.duration_hours,
            DutyStatus::OffDuty => resting_time += segment.duration_hours,
            _ => {}
        }
    }

    let route_geometry = combine_geometries(to_pickup_geometry, to_drop_off_geometry);

    RoutePlan {
        segments,
        total_distance_miles: total_distance,
        total_duration_hours: total_duration,
        driving_time,
        resting_time,
        start_time,
        end_time,
        route_geometry,
    }
}

/// Concatenate the two legs' polylines into one line string.
///
/// The second leg starts where the first ends, so its first point is dropped
/// when it exactly equals the first leg's last point.
pub fn combine_geometries(first: &RouteGeometry, second: &RouteGeometry) -> RouteGeometry {
    if first.is_empty() {
        return second.clone();
    }
    if second.is_empty() {
        return first.clone();
    }

    let mut coordinates = first.coordinates.clone();
    let mut tail = second.coordinates.as_slice();
    if coordinates.last() == tail.first() {
        tail = &tail[1..];
    }
    coordinates.extend_from_slice(tail);

    RouteGeometry::line_string(coordinates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SegmentType;
    use chrono::TimeZone;

    fn ts(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, h, m, 0).unwrap()
    }

    fn segment(
        segment_type: SegmentType,
        status: DutyStatus,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        hours: f64,
        miles: f64,
    ) -> RouteSegment {
        RouteSegment {
            segment_type,
            start_time: start,
            end_time: end,
            duration_hours: hours,
            distance_miles: miles,
            location: "On Route to destination".to_string(),
            status,
        }
    }

    #[test]
    fn totals_sum_over_all_segments() {
        let segments = vec![
            segment(
                SegmentType::DriveToPickup,
                DutyStatus::OnDutyDriving,
                ts(6, 0),
                ts(8, 0),
                2.0,
                130.0,
            ),
            segment(
                SegmentType::Pickup,
                DutyStatus::OnDutyNotDriving,
                ts(8, 0),
                ts(9, 0),
                1.0,
                0.0,
            ),
            segment(
                SegmentType::ShortBreak,
                DutyStatus::OffDuty,
                ts(9, 0),
                ts(9, 30),
                0.5,
                0.0,
            ),
            segment(
                SegmentType::DriveToDropOff,
                DutyStatus::OnDutyDriving,
                ts(9, 30),
                ts(11, 30),
                2.0,
                130.0,
            ),
        ];

        let plan = summarize_trip(
            segments,
            ts(6, 0),
            ts(11, 30),
            &RouteGeometry::empty(),
            &RouteGeometry::empty(),
        );

        assert_eq!(plan.total_duration_hours, 5.5);
        assert_eq!(plan.total_distance_miles, 260.0);
        assert_eq!(plan.driving_time, 4.0);
        assert_eq!(plan.resting_time, 0.5);
        assert_eq!(plan.segments.len(), 4);
        assert_eq!(plan.start_time, ts(6, 0));
        assert_eq!(plan.end_time, ts(11, 30));
    }

    #[test]
    fn sleeper_berth_is_not_counted_as_resting_time() {
        let segments = vec![segment(
            SegmentType::DailyRest,
            DutyStatus::SleeperBerth,
            ts(6, 0),
            ts(16, 0),
            10.0,
            0.0,
        )];

        let plan = summarize_trip(
            segments,
            ts(6, 0),
            ts(16, 0),
            &RouteGeometry::empty(),
            &RouteGeometry::empty(),
        );

        assert_eq!(plan.resting_time, 0.0);
        assert_eq!(plan.driving_time, 0.0);
        assert_eq!(plan.total_duration_hours, 10.0);
    }

    #[test]
    fn geometry_merge_drops_duplicated_seam_point() {
        let first = RouteGeometry::line_string(vec![[41.0, -87.0], [41.5, -86.5]]);
        let second = RouteGeometry::line_string(vec![[41.5, -86.5], [42.0, -86.0]]);

        let combined = combine_geometries(&first, &second);
        assert_eq!(
            combined.coordinates,
            vec![[41.0, -87.0], [41.5, -86.5], [42.0, -86.0]]
        );
    }

    #[test]
    fn geometry_merge_keeps_distinct_join_points() {
        let first = RouteGeometry::line_string(vec![[41.0, -87.0], [41.5, -86.5]]);
        let second = RouteGeometry::line_string(vec![[41.6, -86.4], [42.0, -86.0]]);

        let combined = combine_geometries(&first, &second);
        assert_eq!(combined.coordinates.len(), 4);
    }

    #[test]
    fn geometry_merge_with_empty_sides() {
        let line = RouteGeometry::line_string(vec![[41.0, -87.0], [41.5, -86.5]]);
        let empty = RouteGeometry::empty();

        assert_eq!(combine_geometries(&empty, &line), line);
        assert_eq!(combine_geometries(&line, &empty), line);
        assert!(combine_geometries(&empty, &empty).is_empty());
    }
}
