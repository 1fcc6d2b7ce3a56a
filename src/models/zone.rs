//! Zone hierarchy types for containment lookup.

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// Kind of zone in the physical-location hierarchy.
///
/// Site > area > subarea > room / equipment point / checkpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum ZoneType {
    Site,
    Area,
    Subarea,
    Room,
    EquipmentPoint,
    Checkpoint,
    /// Anything the backend sends that we do not recognize, or no type at all
    #[default]
    Unknown,
}

impl ZoneType {
    /// Specificity rank used to pick the most specific containing zone.
    pub fn rank(&self) -> u8 {
        match self {
            ZoneType::Room | ZoneType::EquipmentPoint | ZoneType::Checkpoint => 4,
            ZoneType::Subarea => 3,
            ZoneType::Area => 2,
            ZoneType::Site => 1,
            ZoneType::Unknown => 0,
        }
    }

    /// Get all known zone types, least specific first
    pub fn all() -> &'static [ZoneType] {
        &[
            ZoneType::Site,
            ZoneType::Area,
            ZoneType::Subarea,
            ZoneType::Room,
            ZoneType::EquipmentPoint,
            ZoneType::Checkpoint,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ZoneType::Site => "site",
            ZoneType::Area => "area",
            ZoneType::Subarea => "subarea",
            ZoneType::Room => "room",
            ZoneType::EquipmentPoint => "equipment_point",
            ZoneType::Checkpoint => "checkpoint",
            ZoneType::Unknown => "unknown",
        }
    }
}

impl From<String> for ZoneType {
    fn from(value: String) -> Self {
        let normalized = value.trim().to_ascii_lowercase();
        ZoneType::all()
            .iter()
            .copied()
            .find(|t| t.as_str() == normalized)
            .unwrap_or(ZoneType::Unknown)
    }
}

impl std::fmt::Display for ZoneType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A polygonal zone with an optional parent reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    #[serde(deserialize_with = "super::record::id_from_string_or_number")]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, rename = "type", alias = "zone_type")]
    pub zone_type: ZoneType,

    /// Polygon ring, implicitly closed (last point connects to first)
    #[serde(default)]
    pub boundary_points: Vec<Coordinate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl Zone {
    pub fn new(id: impl Into<String>, zone_type: ZoneType, boundary_points: Vec<Coordinate>) -> Self {
        Self {
            id: id.into(),
            name: None,
            zone_type,
            boundary_points,
            parent_id: None,
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// A boundary needs at least three points to enclose anything
    pub fn has_polygon(&self) -> bool {
        self.boundary_points.len() >= 3
    }

    /// Parent id, treating an empty string as no parent
    pub fn parent(&self) -> Option<&str> {
        self.parent_id.as_deref().filter(|p| !p.is_empty())
    }
}

/// Most specific containing zone plus its ancestor chain (root first).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContainmentResult {
    pub zone: Option<Zone>,
    pub hierarchy: Vec<Zone>,
}

impl ContainmentResult {
    pub fn is_empty(&self) -> bool {
        self.zone.is_none()
    }
}
