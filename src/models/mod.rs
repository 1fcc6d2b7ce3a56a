//! Core data models for zone and proximity analysis.

pub mod coordinate;
pub mod record;
pub mod zone;

pub use coordinate::Coordinate;
pub use record::{EntityRecord, ProximityResult, SpatialRecord};
pub use zone::{ContainmentResult, Zone, ZoneType};
