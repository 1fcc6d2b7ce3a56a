//! Records carrying a location, and the raw entity shape they are read from.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::Coordinate;

/// Backends hand out ids as strings or as integers; both become strings.
pub(crate) fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {}",
            other
        ))),
    }
}

fn optional_id_from_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {}",
            other
        ))),
    }
}

/// Raw entity as returned by the backend entity API.
///
/// Everything beyond the identifying fields lands in `fields`, so the location
/// field name is free to vary per entity type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityRecord {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,

    #[serde(
        default,
        deserialize_with = "optional_id_from_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub type_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl EntityRecord {
    /// `display_name`, else a string `name` field
    pub fn label(&self) -> Option<&str> {
        self.display_name
            .as_deref()
            .or_else(|| self.fields.get("name").and_then(Value::as_str))
    }

    /// Look up a field by dotted path, e.g. `"data.location"`.
    pub fn field(&self, path: &str) -> Option<&Value> {
        let mut parts = path.split('.');
        let mut current = self.fields.get(parts.next()?)?;
        for part in parts {
            current = current.as_object()?.get(part)?;
        }
        Some(current)
    }
}

/// A read-only record eligible for proximity ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpatialRecord {
    pub id: String,

    #[serde(default)]
    pub type_id: String,

    pub display_name: String,

    /// Absent when the source field is missing or not a coordinate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Coordinate>,
}

impl SpatialRecord {
    pub fn new(
        id: impl Into<String>,
        type_id: impl Into<String>,
        display_name: impl Into<String>,
        location: Option<Coordinate>,
    ) -> Self {
        Self {
            id: id.into(),
            type_id: type_id.into(),
            display_name: display_name.into(),
            location,
        }
    }

    /// Build from a raw entity, reading the location from `location_field`.
    ///
    /// Display name falls back to the id. An unreadable location becomes `None`.
    pub fn from_entity(entity: &EntityRecord, location_field: &str) -> Self {
        let location = entity
            .field(location_field)
            .and_then(Coordinate::from_value);

        Self {
            id: entity.id.clone(),
            type_id: entity.type_id.clone().unwrap_or_default(),
            display_name: entity.label().unwrap_or(&entity.id).to_string(),
            location,
        }
    }

    /// Location if present and within valid lat/lon ranges
    pub fn valid_location(&self) -> Option<Coordinate> {
        self.location.filter(Coordinate::is_valid)
    }
}

/// A record within the search radius and its distance from the query point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProximityResult {
    pub record: SpatialRecord,
    pub distance_meters: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entity(value: Value) -> EntityRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_from_entity_top_level_field() {
        let e = entity(json!({
            "id": "cam-1",
            "type_id": "camera",
            "name": "Gate camera",
            "position": {"lat": 31.77, "lng": 35.21}
        }));
        let record = SpatialRecord::from_entity(&e, "position");
        assert_eq!(record.display_name, "Gate camera");
        assert_eq!(record.type_id, "camera");
        assert_eq!(record.location, Some(Coordinate::new(31.77, 35.21)));
    }

    #[test]
    fn test_from_entity_nested_field() {
        let e = entity(json!({
            "id": "h-7",
            "data": {"location": "31.5,35.1"}
        }));
        let record = SpatialRecord::from_entity(&e, "data.location");
        assert_eq!(record.display_name, "h-7");
        assert_eq!(record.location, Some(Coordinate::new(31.5, 35.1)));
    }

    #[test]
    fn test_from_entity_missing_or_bad_location() {
        let e = entity(json!({"id": "x", "location": {"lat": "n/a", "lng": 1}}));
        assert!(SpatialRecord::from_entity(&e, "location").location.is_none());
        assert!(SpatialRecord::from_entity(&e, "elsewhere").location.is_none());
        assert!(SpatialRecord::from_entity(&e, "location.lat.deeper").location.is_none());
    }

    #[test]
    fn test_numeric_ids_and_both_name_fields() {
        let e = entity(json!({
            "id": 42,
            "type_id": 7,
            "name": "Short",
            "display_name": "North gate",
            "location": [31.0, 35.0]
        }));
        assert_eq!(e.id, "42");
        assert_eq!(e.type_id.as_deref(), Some("7"));
        let record = SpatialRecord::from_entity(&e, "location");
        assert_eq!(record.display_name, "North gate");

        let bad_id: Result<EntityRecord, _> = serde_json::from_value(json!({"id": {"x": 1}}));
        assert!(bad_id.is_err());
    }

    #[test]
    fn test_valid_location_filters_range() {
        let r = SpatialRecord::new("r", "t", "R", Some(Coordinate::new(123.0, 0.0)));
        assert!(r.location.is_some());
        assert!(r.valid_location().is_none());
    }
}
