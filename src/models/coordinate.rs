//! Geographic coordinate type and lenient parsing from loosely-typed entity fields.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Latitude bounds in degrees
pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;

/// Longitude bounds in degrees
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// Geographic point (lat/lon, degrees)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    #[serde(alias = "lat")]
    pub latitude: f64,
    #[serde(alias = "lon", alias = "lng")]
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// True if both components are finite and inside the valid lat/lon ranges.
    pub fn is_valid(&self) -> bool {
        (MIN_LAT..=MAX_LAT).contains(&self.latitude)
            && (MIN_LON..=MAX_LON).contains(&self.longitude)
    }

    /// Parse a coordinate out of an arbitrary JSON value.
    ///
    /// Accepted shapes:
    /// - `{"latitude": .., "longitude": ..}` (also `lat` / `lon` / `lng`)
    /// - `[lat, lon]`
    /// - `"lat,lon"`
    ///
    /// Components may be numbers or numeric strings. Range is not checked here;
    /// use [`Coordinate::is_valid`] for that.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Object(map) => {
                let lat = ["latitude", "lat"]
                    .iter()
                    .find_map(|k| map.get(*k))
                    .and_then(number_from_value)?;
                let lon = ["longitude", "lon", "lng"]
                    .iter()
                    .find_map(|k| map.get(*k))
                    .and_then(number_from_value)?;
                Some(Self::new(lat, lon))
            }
            Value::Array(items) if items.len() == 2 => {
                let lat = number_from_value(&items[0])?;
                let lon = number_from_value(&items[1])?;
                Some(Self::new(lat, lon))
            }
            Value::String(s) => {
                let (lat, lon) = s.split_once(',')?;
                Some(Self::new(
                    lat.trim().parse().ok()?,
                    lon.trim().parse().ok()?,
                ))
            }
            _ => None,
        }
    }
}

/// Read a float from a JSON number or numeric string.
pub(crate) fn number_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validity_ranges() {
        assert!(Coordinate::new(31.7683, 35.2137).is_valid());
        assert!(Coordinate::new(-90.0, 180.0).is_valid());
        assert!(!Coordinate::new(90.5, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, -180.1).is_valid());
        assert!(!Coordinate::new(f64::NAN, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, f64::INFINITY).is_valid());
    }

    #[test]
    fn test_from_object_with_aliases() {
        let c = Coordinate::from_value(&json!({"lat": 32.1, "lng": "34.8"})).unwrap();
        assert_eq!(c, Coordinate::new(32.1, 34.8));

        let c = Coordinate::from_value(&json!({"latitude": "1.5", "longitude": 2})).unwrap();
        assert_eq!(c, Coordinate::new(1.5, 2.0));
    }

    #[test]
    fn test_from_array_and_string() {
        assert_eq!(
            Coordinate::from_value(&json!([10.0, 20.0])),
            Some(Coordinate::new(10.0, 20.0))
        );
        assert_eq!(
            Coordinate::from_value(&json!(" 10.5 , -20.25 ")),
            Some(Coordinate::new(10.5, -20.25))
        );
    }

    #[test]
    fn test_from_garbage() {
        assert!(Coordinate::from_value(&json!(null)).is_none());
        assert!(Coordinate::from_value(&json!({"lat": "north", "lng": 1})).is_none());
        assert!(Coordinate::from_value(&json!({"lat": 1})).is_none());
        assert!(Coordinate::from_value(&json!([1.0])).is_none());
        assert!(Coordinate::from_value(&json!("somewhere")).is_none());
        assert!(Coordinate::from_value(&json!(true)).is_none());
    }

    #[test]
    fn test_deserialize_aliases() {
        let c: Coordinate = serde_json::from_value(json!({"lat": 1.0, "lon": 2.0})).unwrap();
        assert_eq!(c, Coordinate::new(1.0, 2.0));
    }
}
