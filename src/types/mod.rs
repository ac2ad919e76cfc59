//! Type definitions

pub mod location;
pub mod plan;
pub mod segment;

pub use location::*;
pub use plan::*;
pub use segment::*;
