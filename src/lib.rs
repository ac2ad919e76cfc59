//! HOS-compliant trip planning core.
//!
//! Plans a commercial truck trip from the driver's current position through a
//! pickup location to a drop-off location, producing a timestamped sequence
//! of activity segments (driving, pickup/drop-off work, mandatory breaks,
//! rest periods, refueling stops) that satisfies FMCSA Hours of Service
//! regulations.
//!
//! The planning core is synchronous and owns its [`DriverState`] for the
//! duration of one [`RoutePlanner::plan`] call; the only async boundary is
//! the concurrent fetch of the two route legs from the routing adapter.

pub mod error;
pub mod services;
pub mod types;

pub use error::PlanError;
pub use services::hos::driver_state::DriverState;
pub use services::hos::planner::RoutePlanner;
pub use services::hos::rules::{HosRuleSet, RuleType};
pub use services::routing::{RouteGeometry, RouteLeg, RouteRepository, RoutingError};
pub use types::{DutyStatus, Location, RoutePlan, RouteSegment, SegmentType};
