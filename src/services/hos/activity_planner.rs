//! Pickup and drop-off activity planning.
//!
//! Loading and unloading are on-duty, non-driving work of fixed duration.
//! Unlike driving they are performable past the 14-hour window and the
//! cycle cap, so no rest is inserted here; the hours still accrue into the
//! cycle counters and the next driving leg reacts to them.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::types::{DutyStatus, RouteSegment, SegmentType};

use super::driver_state::DriverState;
use super::rules::HosRuleSet;
use super::segment_planner::hours_to_duration;

/// Emit the single segment for a pickup or drop-off.
///
/// `segment_type` must be `Pickup` or `DropOff`.
pub fn handle_activity(
    current_time: DateTime<Utc>,
    segment_type: SegmentType,
    driver_state: &mut DriverState,
    rules: &HosRuleSet,
) -> RouteSegment {
    debug_assert!(matches!(
        segment_type,
        SegmentType::Pickup | SegmentType::DropOff
    ));

    driver_state.check_day_change(current_time);

    let end_time = current_time + hours_to_duration(rules.pickup_drop_off_hours);
    info!(
        "Handling transport activity {:?} at time={}",
        segment_type, current_time
    );

    driver_state.add_on_duty_hours(rules.pickup_drop_off_hours);

    // Loading starts the 14-hour clock when no duty period is open yet.
    if driver_state.current_on_duty_window_start.is_none() {
        driver_state.current_on_duty_window_start = Some(current_time);
    }

    let location = match segment_type {
        SegmentType::Pickup => "Pickup Location",
        _ => "Drop-off Location",
    };

    let segment = RouteSegment {
        segment_type,
        start_time: current_time,
        end_time,
        duration_hours: rules.pickup_drop_off_hours,
        distance_miles: 0.0,
        location: location.to_string(),
        status: DutyStatus::OnDutyNotDriving,
    };

    driver_state.check_day_change(end_time);

    segment
}
