//! Zonewatch - spatial association for incident locations
//!
//! Resolves the most specific zone containing an incident point and ranks
//! nearby located records by great-circle distance. Shared by the server and
//! analyze binaries.

pub mod analysis;
pub mod config;
pub mod error;
pub mod models;
pub mod pip;
pub mod proximity;
pub mod schema;
pub mod store;

pub use analysis::{analyze, analyze_entities, AnalysisOptions, LocationAnalysis};
pub use models::{ContainmentResult, Coordinate, ProximityResult, SpatialRecord, Zone, ZoneType};
pub use pip::{point_in_polygon, resolve_containing_zone};
pub use proximity::{find_nearby, haversine_distance};
