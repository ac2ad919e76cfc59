//! Driver state tracking for Hours of Service compliance.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::debug;

use super::rules::HosRuleSet;

/// Mutable accumulator for every counter the HOS rules constrain.
///
/// Owned exclusively by one planning call and mutated in strict program
/// order; none of the operations fail. Negative inputs are programming
/// bugs, guarded by debug assertions.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverState {
    /// Rolling window for the 70-hour/8-day rule. Index 0 is today,
    /// index 7 the oldest day. Always exactly 8 slots.
    pub duty_hours_last_8_days: [f64; 8],
    /// Driving hours accumulated in the current duty day.
    pub current_day_driving_hours: f64,
    /// All on-duty hours (driving and not) in the current duty day.
    pub current_day_on_duty_hours: f64,
    /// Start of the current 14-hour window, if one is open.
    pub current_on_duty_window_start: Option<DateTime<Utc>>,
    /// Driving hours since the last qualifying break (for the 8-hour limit).
    pub accumulative_driving_hours: f64,
    /// Miles driven since the last refueling stop.
    pub miles_since_refueling: f64,
    /// Calendar date of the last day-change check.
    pub last_day_check: Option<NaiveDate>,
}

impl Default for DriverState {
    fn default() -> Self {
        Self {
            duty_hours_last_8_days: [0.0; 8],
            current_day_driving_hours: 0.0,
            current_day_on_duty_hours: 0.0,
            current_on_duty_window_start: None,
            accumulative_driving_hours: 0.0,
            miles_since_refueling: 0.0,
            last_day_check: None,
        }
    }
}

impl DriverState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A state whose oldest cycle slot carries the hours the driver had
    /// already used before this trip.
    pub fn with_cycle_used(cycle_hours: f64) -> Self {
        debug_assert!(cycle_hours >= 0.0);
        let mut state = Self::new();
        // Slot 7 is the eighth (oldest) day of the cycle.
        state.duty_hours_last_8_days[7] = cycle_hours;
        state
    }

    /// Add driving hours to the driving, on-duty and rolling-window counters.
    pub fn add_driving_hours(&mut self, hours: f64) {
        debug_assert!(hours >= 0.0);
        self.current_day_driving_hours += hours;
        self.current_day_on_duty_hours += hours;
        self.accumulative_driving_hours += hours;
        self.duty_hours_last_8_days[0] += hours;
    }

    /// Add on-duty (not driving) hours. Driving counters are untouched.
    pub fn add_on_duty_hours(&mut self, hours: f64) {
        debug_assert!(hours >= 0.0);
        self.current_day_on_duty_hours += hours;
        self.duty_hours_last_8_days[0] += hours;
    }

    /// Add miles to the refueling counter.
    pub fn add_miles(&mut self, miles: f64) {
        debug_assert!(miles >= 0.0);
        self.miles_since_refueling += miles;
    }

    /// Reset the miles counter after a refueling stop.
    pub fn refuel(&mut self) {
        self.miles_since_refueling = 0.0;
    }

    /// Reset the 8-hour driving counter after a qualifying break
    /// (a 30-minute break or a one-hour refueling stop).
    pub fn reset_accumulative_driving(&mut self) {
        self.accumulative_driving_hours = 0.0;
    }

    /// Reset the daily window and counters after a 10-hour rest.
    /// The 8-day window is untouched; it shifts only with calendar days.
    pub fn take_daily_rest(&mut self) {
        self.current_on_duty_window_start = None;
        self.current_day_driving_hours = 0.0;
        self.current_day_on_duty_hours = 0.0;
        self.accumulative_driving_hours = 0.0;
    }

    /// Zero the whole cycle after a 34-hour restart.
    pub fn apply_34h_restart(&mut self) {
        self.duty_hours_last_8_days = [0.0; 8];
        self.current_on_duty_window_start = None;
        self.current_day_driving_hours = 0.0;
        self.current_day_on_duty_hours = 0.0;
        self.accumulative_driving_hours = 0.0;
    }

    /// Shift the 8-day window once per elapsed calendar day.
    ///
    /// Daily counters are NOT reset here: a day rollover without a 10-hour
    /// rest does not hand the driver back their driving allowance.
    pub fn check_day_change(&mut self, current_time: DateTime<Utc>) {
        let today = current_time.date_naive();
        let last = match self.last_day_check {
            Some(date) => date,
            None => {
                self.last_day_check = Some(today);
                return;
            }
        };

        let elapsed_days = (today - last).num_days();
        if elapsed_days <= 0 {
            return;
        }

        debug!(
            "Shifting 8-day duty window by {} day(s): {} -> {}",
            elapsed_days, last, today
        );
        for _ in 0..elapsed_days {
            self.duty_hours_last_8_days.rotate_right(1);
            self.duty_hours_last_8_days[0] = 0.0;
        }
        self.last_day_check = Some(today);
    }

    /// Total on-duty hours in the rolling 8-day window.
    pub fn total_duty_hours_last_8_days(&self) -> f64 {
        self.duty_hours_last_8_days.iter().sum()
    }

    /// Hours the driver may still drive at `now`, the minimum of the
    /// cycle, daily-driving and duty-window limits, each floored at zero.
    pub fn available_driving_hours(&self, now: DateTime<Utc>, rules: &HosRuleSet) -> f64 {
        let cycle_limit = rules.max_cycle_hours - self.total_duty_hours_last_8_days();
        let driving_limit = rules.max_driving_hours - self.current_day_driving_hours;

        let window_limit = match self.current_on_duty_window_start {
            Some(window_start) => {
                let elapsed = hours_between(window_start, now);
                rules.max_duty_hours - elapsed
            }
            None => f64::INFINITY,
        };

        cycle_limit.min(driving_limit).min(window_limit).max(0.0)
    }

    /// Whether the 30-minute break is due.
    pub fn needs_30min_break(&self, rules: &HosRuleSet) -> bool {
        self.accumulative_driving_hours >= rules.accumulative_driving_limit_hours
    }

    /// Whether the vehicle needs a refueling stop.
    pub fn needs_refueling(&self, rules: &HosRuleSet) -> bool {
        self.miles_since_refueling >= rules.refuel_distance_miles
    }
}

/// Elapsed wall-clock hours between two instants.
pub(crate) fn hours_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / 3_600_000.0
}
