//! Hours of Service planning core.
//!
//! The modules here are synchronous and deterministic: given two routed legs
//! and the driver's accumulated hours, they emit the same compliant schedule
//! every time. Only [`planner::RoutePlanner`] touches the network, and only
//! to fetch the two legs before planning begins.

pub mod activity_planner;
pub mod driver_state;
pub mod planner;
pub mod rules;
pub mod segment_planner;
pub mod summary;
