//! Leg planning under Hours of Service constraints.
//!
//! Given a routed leg (duration + distance) and the driver's current state,
//! this module walks the leg chronologically and splits it into driving
//! sub-segments interleaved with whatever interventions the rules demand:
//! refueling stops, 30-minute breaks, 10-hour rests and 34-hour cycle
//! restarts. The caller's clock only moves forward; every emitted segment is
//! contiguous with its predecessor.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use crate::types::{DutyStatus, RouteSegment, SegmentType};

use super::driver_state::{hours_between, DriverState};
use super::rules::HosRuleSet;

/// Remaining leg durations below this snap to zero (six minutes).
const MINIMUM_SEGMENT_HOURS: f64 = 0.1;

/// Segments planned for one leg, plus where the clock ends up after them.
#[derive(Debug, Clone)]
pub struct PlannedLeg {
    pub segments: Vec<RouteSegment>,
    pub end_time: DateTime<Utc>,
}

/// Convert fractional hours to a chrono duration at microsecond precision.
pub(crate) fn hours_to_duration(hours: f64) -> Duration {
    Duration::microseconds((hours * 3_600_000_000.0).round() as i64)
}

/// Plan one driving leg.
///
/// `segment_type` must be one of the driving variants. The loop runs until
/// the leg's remaining duration reaches zero; every iteration either drives
/// a positive stretch or inserts an intervention that restores driving
/// allowance, so termination is guaranteed.
pub fn plan_route_segment(
    start_time: DateTime<Utc>,
    segment_type: SegmentType,
    leg_hours: f64,
    leg_miles: f64,
    driver_state: &mut DriverState,
    rules: &HosRuleSet,
) -> PlannedLeg {
    debug_assert!(segment_type.is_driving());
    debug_assert!(leg_hours >= 0.0 && leg_miles >= 0.0);

    info!(
        "Starting route segment planning: type={:?}, hours={:.2}, miles={:.2}",
        segment_type, leg_hours, leg_miles
    );

    let mut segments: Vec<RouteSegment> = Vec::new();
    let mut current_time = start_time;
    let mut remaining_hours = leg_hours;
    let mut remaining_miles = leg_miles;

    while remaining_hours > 0.0 {
        debug!(
            "Trip planning iteration: remaining_hours={:.2}, current_time={}",
            remaining_hours, current_time
        );

        // Step 1: open the on-duty window if needed, roll the calendar.
        if driver_state.current_on_duty_window_start.is_none() {
            driver_state.current_on_duty_window_start = Some(current_time);
            info!("Starting new on-duty window at time={}", current_time);
        }
        driver_state.check_day_change(current_time);

        // Step 2: 34-hour cycle restart.
        if driver_state.total_duty_hours_last_8_days() >= rules.restart_trigger_hours {
            info!(
                "Cycle restart needed: {:.2} duty hours in the last 8 days",
                driver_state.total_duty_hours_last_8_days()
            );
            current_time = add_34h_restart(driver_state, current_time, &mut segments, rules);
            continue;
        }

        // Step 3: refueling. Highest operational priority; the stop is
        // performable even once the 14-hour window has run out.
        if driver_state.needs_refueling(rules) {
            current_time = add_refueling_stop(driver_state, current_time, &mut segments, rules);
            continue;
        }

        // Step 4: mandatory daily rest.
        if let Some(reason) = rest_needed(driver_state, current_time, rules) {
            info!("Rest needed: {}", reason);
            current_time = add_rest_period(driver_state, current_time, &mut segments, rules);
            continue;
        }

        // Step 5: 30-minute driving break.
        if driver_state.needs_30min_break(rules) {
            current_time = add_short_break(driver_state, current_time, &mut segments, rules);
            continue;
        }

        // Step 6: drive as far as the limits allow.
        match create_driving_segment(
            driver_state,
            current_time,
            remaining_hours,
            remaining_miles,
            &mut segments,
            segment_type,
            rules,
        ) {
            Some((end_time, hours_left, miles_left)) => {
                current_time = end_time;
                remaining_hours = hours_left;
                remaining_miles = miles_left;
            }
            None => {
                info!("No driving hours available, adding rest period");
                current_time = add_rest_period(driver_state, current_time, &mut segments, rules);
            }
        }
    }

    info!(
        "Route segment planning completed: {} segments created",
        segments.len()
    );

    PlannedLeg {
        segments,
        end_time: current_time,
    }
}

/// Why a daily rest is required right now, if it is.
fn rest_needed(
    driver_state: &DriverState,
    current_time: DateTime<Utc>,
    rules: &HosRuleSet,
) -> Option<String> {
    if let Some(window_start) = driver_state.current_on_duty_window_start {
        let window_hours = hours_between(window_start, current_time);
        debug!("Current on-duty window: {:.2} hours", window_hours);

        if window_hours >= rules.max_duty_hours {
            return Some(format!(
                "14-hour on-duty window reached ({:.2} hours)",
                window_hours
            ));
        }
    }

    // The daily driving limit never forces a rest by itself; it only bounds
    // available_driving_hours, and exhaustion falls through to the driving
    // step's rest fallback.
    if driver_state.current_day_driving_hours >= rules.max_driving_hours {
        info!(
            "Daily driving limit reached ({:.2} hours). Cannot drive but can work.",
            driver_state.current_day_driving_hours
        );
    }

    if driver_state.total_duty_hours_last_8_days() >= rules.max_cycle_hours {
        return Some(format!(
            "70-hour/8-day limit reached ({:.2} hours)",
            driver_state.total_duty_hours_last_8_days()
        ));
    }

    None
}

fn add_34h_restart(
    driver_state: &mut DriverState,
    current_time: DateTime<Utc>,
    segments: &mut Vec<RouteSegment>,
    rules: &HosRuleSet,
) -> DateTime<Utc> {
    let end_time = current_time + hours_to_duration(rules.restart_duration_hours);
    info!("Adding 34-hour reset from {} to {}", current_time, end_time);

    segments.push(RouteSegment {
        segment_type: SegmentType::Restart34h,
        start_time: current_time,
        end_time,
        duration_hours: rules.restart_duration_hours,
        distance_miles: 0.0,
        location: "34-Hour Reset".to_string(),
        status: DutyStatus::OffDuty,
    });

    driver_state.apply_34h_restart();
    end_time
}

fn add_refueling_stop(
    driver_state: &mut DriverState,
    current_time: DateTime<Utc>,
    segments: &mut Vec<RouteSegment>,
    rules: &HosRuleSet,
) -> DateTime<Utc> {
    info!("Vehicle needs refueling at time={}", current_time);
    let end_time = current_time + hours_to_duration(rules.refueling_stop_hours);

    if driver_state.needs_30min_break(rules) {
        // The one-hour stop is long enough to double as the driving break.
        info!("Driver also needs 30-min break, satisfying it during refueling");
        segments.push(RouteSegment {
            segment_type: SegmentType::RefuelingWithBreak,
            start_time: current_time,
            end_time,
            duration_hours: rules.refueling_stop_hours,
            distance_miles: 0.0,
            location: "Refueling for 1 hour, 30 min break included".to_string(),
            status: DutyStatus::OnDutyNotDriving,
        });
        driver_state.reset_accumulative_driving();
    } else {
        segments.push(RouteSegment {
            segment_type: SegmentType::Refueling,
            start_time: current_time,
            end_time,
            duration_hours: rules.refueling_stop_hours,
            distance_miles: 0.0,
            location: "Refueling".to_string(),
            status: DutyStatus::OnDutyNotDriving,
        });
    }

    driver_state.add_on_duty_hours(rules.refueling_stop_hours);
    driver_state.refuel();
    end_time
}

fn add_rest_period(
    driver_state: &mut DriverState,
    current_time: DateTime<Utc>,
    segments: &mut Vec<RouteSegment>,
    rules: &HosRuleSet,
) -> DateTime<Utc> {
    info!("Adding mandatory rest period at time={}", current_time);
    let end_time = current_time + hours_to_duration(rules.daily_rest_hours);

    segments.push(RouteSegment {
        segment_type: SegmentType::DailyRest,
        start_time: current_time,
        end_time,
        duration_hours: rules.daily_rest_hours,
        distance_miles: 0.0,
        location: "10 hr rest period".to_string(),
        status: DutyStatus::SleeperBerth,
    });

    driver_state.take_daily_rest();
    end_time
}

fn add_short_break(
    driver_state: &mut DriverState,
    current_time: DateTime<Utc>,
    segments: &mut Vec<RouteSegment>,
    rules: &HosRuleSet,
) -> DateTime<Utc> {
    info!("Driver needs 30-minute break at time={}", current_time);
    let end_time = current_time + hours_to_duration(rules.short_break_hours);

    segments.push(RouteSegment {
        segment_type: SegmentType::ShortBreak,
        start_time: current_time,
        end_time,
        duration_hours: rules.short_break_hours,
        distance_miles: 0.0,
        location: "30 min break".to_string(),
        status: DutyStatus::OffDuty,
    });

    driver_state.reset_accumulative_driving();
    end_time
}

/// Drive for as long as the limits allow. Returns the new clock position and
/// remaining leg values, or `None` when no driving hours are available.
fn create_driving_segment(
    driver_state: &mut DriverState,
    current_time: DateTime<Utc>,
    remaining_hours: f64,
    remaining_miles: f64,
    segments: &mut Vec<RouteSegment>,
    segment_type: SegmentType,
    rules: &HosRuleSet,
) -> Option<(DateTime<Utc>, f64, f64)> {
    let mut available = driver_state.available_driving_hours(current_time, rules);
    let hours_until_break =
        rules.accumulative_driving_limit_hours - driver_state.accumulative_driving_hours;
    if hours_until_break < available {
        available = hours_until_break.max(0.0);
    }

    let drive_hours = available.min(remaining_hours);
    debug!(
        "Available driving hours: {:.2}, drivable hours this stretch: {:.2}",
        available, drive_hours
    );

    if drive_hours <= 0.0 {
        return None;
    }

    // Pro-rate distance over the remaining leg.
    let segment_distance = (drive_hours / remaining_hours) * remaining_miles;
    let end_time = current_time + hours_to_duration(drive_hours);

    info!(
        "Creating driving segment for {:.2} hours, {:.2} miles",
        drive_hours, segment_distance
    );

    segments.push(RouteSegment {
        segment_type,
        start_time: current_time,
        end_time,
        duration_hours: drive_hours,
        distance_miles: segment_distance,
        location: "On Route to destination".to_string(),
        status: DutyStatus::OnDutyDriving,
    });

    driver_state.add_driving_hours(drive_hours);
    driver_state.add_miles(segment_distance);

    let mut hours_left = remaining_hours - drive_hours;
    let mut miles_left = remaining_miles - segment_distance;

    if hours_left < MINIMUM_SEGMENT_HOURS {
        debug!("Snapping small leg remainder ({:.2}) to zero", hours_left);
        hours_left = 0.0;
        miles_left = 0.0;
    }

    Some((end_time, hours_left, miles_left))
}
