//! Great-circle distance and radius search over located records.

mod distance;
mod nearby;

pub use distance::{haversine_distance, EARTH_RADIUS_METERS};
pub use nearby::{find_nearby, DEFAULT_MAX_RESULTS};
