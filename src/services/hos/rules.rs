//! Hours of Service rule sets.
//!
//! A rule set is a plain value; two plans with different rule sets can
//! coexist. Only the U.S. interstate rules ship today, but every numeric
//! limit the planner consults lives here so alternative rule sets can vary
//! them.

use serde::{Deserialize, Serialize};

/// Numeric limits for one Hours of Service regime.
#[derive(Debug, Clone, PartialEq)]
pub struct HosRuleSet {
    /// Maximum driving hours per duty day (the "11-hour limit").
    pub max_driving_hours: f64,
    /// Maximum elapsed on-duty window per day (the "14-hour window").
    pub max_duty_hours: f64,
    /// Off-duty period that resets the daily window and counters.
    pub daily_rest_hours: f64,
    /// The mandatory driving break duration (30 minutes).
    pub short_break_hours: f64,
    /// Maximum on-duty hours in the rolling 8-day cycle.
    pub max_cycle_hours: f64,
    /// Miles between refueling stops.
    pub refuel_distance_miles: f64,
    /// On-duty time spent at a pickup or drop-off.
    pub pickup_drop_off_hours: f64,
    /// Cumulative driving hours after which the short break is due.
    pub accumulative_driving_limit_hours: f64,
    /// 8-day duty total at which a cycle restart is scheduled.
    pub restart_trigger_hours: f64,
    /// Duration of the cycle restart (34 hours).
    pub restart_duration_hours: f64,
    /// Duration of a refueling stop.
    pub refueling_stop_hours: f64,
    /// Average truck speed in mph, for estimation when no router is available.
    pub average_truck_speed_mph: f64,
}

/// U.S. interstate (FMCSA property-carrying) rules.
pub const US_INTERSTATE: HosRuleSet = HosRuleSet {
    max_driving_hours: 11.0,
    max_duty_hours: 14.0,
    daily_rest_hours: 10.0,
    short_break_hours: 0.5,
    max_cycle_hours: 70.0,
    refuel_distance_miles: 1000.0,
    pickup_drop_off_hours: 1.0,
    accumulative_driving_limit_hours: 8.0,
    restart_trigger_hours: 61.0,
    restart_duration_hours: 34.0,
    refueling_stop_hours: 1.0,
    average_truck_speed_mph: 55.0,
};

/// Selector for the rule set a plan runs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleType {
    Interstate,
}

impl RuleType {
    /// Resolve the selector to its rule set.
    pub fn rule_set(&self) -> &'static HosRuleSet {
        match self {
            RuleType::Interstate => &US_INTERSTATE,
        }
    }
}
