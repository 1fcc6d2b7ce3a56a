//! Point-in-Polygon (PIP) zone lookup.
//!
//! Resolves the most specific zone containing a point, plus its ancestor
//! chain, using an R-tree over zone bounding boxes and an exact ray-casting
//! test on the candidates.

mod hierarchy;
mod index;
mod polygon;
mod service;

pub use hierarchy::ZoneArena;
pub use index::ZoneSpatialIndex;
pub use polygon::point_in_polygon;
pub use service::{resolve_containing_zone, ZoneResolver};
