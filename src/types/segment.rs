//! Trip segment types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The kind of activity a segment represents.
///
/// Serialized identifiers are stable and consumed by downstream log
/// renderers; do not change them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentType {
    #[serde(rename = "pickup")]
    Pickup,
    #[serde(rename = "drop_off")]
    DropOff,
    #[serde(rename = "drive to pickup")]
    DriveToPickup,
    #[serde(rename = "drive to drop off")]
    DriveToDropOff,
    /// Required 30-min break after 8 hrs of driving.
    #[serde(rename = "mandatory_driving_break")]
    ShortBreak,
    /// Required 10-hr daily rest.
    #[serde(rename = "mandatory_rest_period")]
    DailyRest,
    #[serde(rename = "refueling")]
    Refueling,
    /// A one-hour refueling stop that also fulfills the mandatory
    /// driving break.
    #[serde(rename = "refueling_and_break")]
    RefuelingWithBreak,
    /// 34-hour cycle restart.
    #[serde(rename = "driving_rest")]
    Restart34h,
}

impl SegmentType {
    /// True for the two driving variants.
    pub fn is_driving(&self) -> bool {
        matches!(self, SegmentType::DriveToPickup | SegmentType::DriveToDropOff)
    }
}

/// The driver's regulatory duty classification during a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DutyStatus {
    #[serde(rename = "On Duty (Driving)")]
    OnDutyDriving,
    #[serde(rename = "On Duty (Not Driving)")]
    OnDutyNotDriving,
    #[serde(rename = "Off Duty")]
    OffDuty,
    #[serde(rename = "sleeperBerth")]
    SleeperBerth,
}

/// A single timestamped slice of the planned trip.
///
/// Segments are contiguous within a plan: each segment's `end_time` equals
/// the next segment's `start_time`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSegment {
    #[serde(rename = "type")]
    pub segment_type: SegmentType,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration_hours: f64,
    pub distance_miles: f64,
    /// Human-readable place description ("On Route to destination",
    /// "Pickup Location", ...).
    pub location: String,
    pub status: DutyStatus,
}
