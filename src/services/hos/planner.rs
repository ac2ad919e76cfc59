//! Trip orchestration.
//!
//! Stitches the two routed legs and the pickup/drop-off activities into a
//! complete compliant plan. The only async boundary is the concurrent fetch
//! of both legs; everything after that is pure computation over a driver
//! state this planner exclusively owns. Dropping the returned future cancels
//! the in-flight routing requests; partial plans are never surfaced.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::error::PlanError;
use crate::services::routing::RouteRepository;
use crate::types::{Location, RoutePlan, SegmentType};

use super::activity_planner::handle_activity;
use super::driver_state::DriverState;
use super::rules::{HosRuleSet, RuleType};
use super::segment_planner::plan_route_segment;
use super::summary::summarize_trip;

/// Plans one truck trip: current position → pickup → drop-off.
pub struct RoutePlanner {
    current_location: Location,
    pickup_location: Location,
    drop_off_location: Location,
    rules: &'static HosRuleSet,
    current_cycle_used: f64,
    repository: Arc<dyn RouteRepository>,
}

impl RoutePlanner {
    /// Validate inputs and build a planner. Validation happens here, before
    /// any routing request is made.
    pub fn new(
        current_location: Location,
        pickup_location: Location,
        drop_off_location: Location,
        rule_type: RuleType,
        current_cycle_used: f64,
        repository: Arc<dyn RouteRepository>,
    ) -> Result<Self, PlanError> {
        let rules = rule_type.rule_set();

        if !current_cycle_used.is_finite()
            || !(0.0..=rules.max_cycle_hours).contains(&current_cycle_used)
        {
            return Err(PlanError::InvalidInput(format!(
                "current cycle used must be between 0 and {} hours, got {}",
                rules.max_cycle_hours, current_cycle_used
            )));
        }

        for (name, location) in [
            ("current", &current_location),
            ("pickup", &pickup_location),
            ("drop-off", &drop_off_location),
        ] {
            if !location.is_valid() {
                return Err(PlanError::InvalidInput(format!(
                    "{} location has out-of-range coordinates ({}, {})",
                    name, location.latitude, location.longitude
                )));
            }
        }

        Ok(Self {
            current_location,
            pickup_location,
            drop_off_location,
            rules,
            current_cycle_used,
            repository,
        })
    }

    /// Plan the full trip starting at `start_time`.
    pub async fn plan(&self, start_time: DateTime<Utc>) -> Result<RoutePlan, PlanError> {
        info!("Fetching route legs from {}", self.repository.name());

        let (to_pickup, to_drop_off) = tokio::try_join!(
            self.repository
                .fetch_leg(&self.current_location, &self.pickup_location),
            self.repository
                .fetch_leg(&self.pickup_location, &self.drop_off_location),
        )?;

        let mut driver_state = DriverState::with_cycle_used(self.current_cycle_used);
        let mut segments = Vec::new();
        let mut current_time = start_time;

        // Leg 1: drive to pickup.
        let leg = plan_route_segment(
            current_time,
            SegmentType::DriveToPickup,
            to_pickup.duration_hours,
            to_pickup.distance_miles,
            &mut driver_state,
            self.rules,
        );
        segments.extend(leg.segments);
        current_time = leg.end_time;

        // Pickup activity.
        let pickup = handle_activity(
            current_time,
            SegmentType::Pickup,
            &mut driver_state,
            self.rules,
        );
        current_time = pickup.end_time;
        segments.push(pickup);

        // Leg 2: drive to drop-off.
        let leg = plan_route_segment(
            current_time,
            SegmentType::DriveToDropOff,
            to_drop_off.duration_hours,
            to_drop_off.distance_miles,
            &mut driver_state,
            self.rules,
        );
        segments.extend(leg.segments);
        current_time = leg.end_time;

        // Drop-off activity.
        let drop_off = handle_activity(
            current_time,
            SegmentType::DropOff,
            &mut driver_state,
            self.rules,
        );
        current_time = drop_off.end_time;
        segments.push(drop_off);

        let plan = summarize_trip(
            segments,
            start_time,
            current_time,
            &to_pickup.geometry,
            &to_drop_off.geometry,
        );

        check_plan_invariants(&plan, &driver_state)?;

        info!(
            "Trip planning completed: {} segments, {:.2} hours, {:.2} miles",
            plan.segments.len(),
            plan.total_duration_hours,
            plan.total_distance_miles
        );

        Ok(plan)
    }
}

/// Post-condition checks on the emitted plan. A failure here is a planner
/// bug, surfaced with context instead of returning a corrupt schedule.
fn check_plan_invariants(plan: &RoutePlan, driver_state: &DriverState) -> Result<(), PlanError> {
    if plan.segments.is_empty() {
        return Err(PlanError::InvariantViolation(
            "plan contains no segments".to_string(),
        ));
    }

    for pair in plan.segments.windows(2) {
        if pair[0].end_time != pair[1].start_time {
            return Err(PlanError::InvariantViolation(format!(
                "segments are not contiguous at {}: next starts at {}",
                pair[0].end_time, pair[1].start_time
            )));
        }
    }

    for segment in &plan.segments {
        if !segment.duration_hours.is_finite()
            || segment.duration_hours < 0.0
            || !segment.distance_miles.is_finite()
            || segment.distance_miles < 0.0
        {
            return Err(PlanError::InvariantViolation(format!(
                "segment at {} has a negative or non-finite counter",
                segment.start_time
            )));
        }
    }

    let duration_sum: f64 = plan.segments.iter().map(|s| s.duration_hours).sum();
    if (duration_sum - plan.total_duration_hours).abs() > 1e-6 {
        return Err(PlanError::InvariantViolation(format!(
            "segment durations sum to {} but total is {}",
            duration_sum, plan.total_duration_hours
        )));
    }

    let bad_slot = driver_state
        .duty_hours_last_8_days
        .iter()
        .any(|h| !h.is_finite() || *h < 0.0);
    if bad_slot {
        return Err(PlanError::InvariantViolation(format!(
            "8-day duty window holds a negative or non-finite value: {:?}",
            driver_state.duty_hours_last_8_days
        )));
    }

    Ok(())
}
