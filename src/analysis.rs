//! Location analysis: containing zone plus nearby records for one point.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::models::{ContainmentResult, Coordinate, EntityRecord, ProximityResult, SpatialRecord, Zone};
use crate::pip::ZoneResolver;
use crate::proximity::{find_nearby, DEFAULT_MAX_RESULTS};

pub const DEFAULT_RADIUS_METERS: f64 = 500.0;
pub const DEFAULT_LOCATION_FIELD: &str = "location";

/// Knobs for a single analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    pub radius_meters: f64,
    pub max_results: usize,
    /// Dotted path of the location field on raw entity records
    pub location_field: String,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            radius_meters: DEFAULT_RADIUS_METERS,
            max_results: DEFAULT_MAX_RESULTS,
            location_field: DEFAULT_LOCATION_FIELD.to_string(),
        }
    }
}

/// Result of analyzing one incident location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationAnalysis {
    pub point: Coordinate,
    pub containment: ContainmentResult,
    pub nearby: Vec<ProximityResult>,
    pub analyzed_at: DateTime<Utc>,
}

/// Run containment and proximity for `point` against one snapshot.
pub fn analyze(
    point: &Coordinate,
    zones: Vec<Zone>,
    records: &[SpatialRecord],
    options: &AnalysisOptions,
) -> LocationAnalysis {
    if !point.is_valid() {
        debug!(
            "Skipping analysis for invalid point ({}, {})",
            point.latitude, point.longitude
        );
        return LocationAnalysis {
            point: *point,
            containment: ContainmentResult::default(),
            nearby: Vec::new(),
            analyzed_at: Utc::now(),
        };
    }

    let zone_count = zones.len();
    let containment = ZoneResolver::new(zones).resolve(point);
    let nearby = find_nearby(point, records, options.radius_meters, options.max_results);

    info!(
        "Analyzed ({}, {}) against {} zones / {} records: zone={:?}, {} nearby",
        point.latitude,
        point.longitude,
        zone_count,
        records.len(),
        containment.zone.as_ref().map(|z| z.id.as_str()),
        nearby.len()
    );

    LocationAnalysis {
        point: *point,
        containment,
        nearby,
        analyzed_at: Utc::now(),
    }
}

/// Same as [`analyze`] but reading locations out of raw entities first.
pub fn analyze_entities(
    point: &Coordinate,
    zones: Vec<Zone>,
    entities: &[EntityRecord],
    options: &AnalysisOptions,
) -> LocationAnalysis {
    let records: Vec<SpatialRecord> = entities
        .iter()
        .map(|e| SpatialRecord::from_entity(e, &options.location_field))
        .collect();
    analyze(point, zones, &records, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ZoneType;
    use serde_json::json;

    fn site() -> Zone {
        Zone::new(
            "hq",
            ZoneType::Site,
            vec![
                Coordinate::new(31.0, 35.0),
                Coordinate::new(31.0, 35.1),
                Coordinate::new(31.1, 35.1),
                Coordinate::new(31.1, 35.0),
            ],
        )
    }

    #[test]
    fn test_analyze_entities() {
        let entities: Vec<EntityRecord> = serde_json::from_value(json!([
            {"id": "cam-1", "name": "Lobby cam", "location": {"lat": 31.0501, "lng": 35.05}},
            {"id": "cam-2", "location": {"lat": 31.09, "lng": 35.09}},
            {"id": "cam-3", "location": "not a place"}
        ]))
        .unwrap();

        let point = Coordinate::new(31.05, 35.05);
        let result = analyze_entities(&point, vec![site()], &entities, &AnalysisOptions::default());

        assert_eq!(result.containment.zone.unwrap().id, "hq");
        assert_eq!(result.nearby.len(), 1);
        assert_eq!(result.nearby[0].record.display_name, "Lobby cam");
    }

    #[test]
    fn test_invalid_point_is_empty() {
        let records = vec![SpatialRecord::new(
            "r",
            "t",
            "R",
            Some(Coordinate::new(31.05, 35.05)),
        )];
        let result = analyze(
            &Coordinate::new(95.0, 35.05),
            vec![site()],
            &records,
            &AnalysisOptions::default(),
        );
        assert!(result.containment.is_empty());
        assert!(result.containment.hierarchy.is_empty());
        assert!(result.nearby.is_empty());
        assert_eq!(result.point.latitude, 95.0);

        let nan = analyze(
            &Coordinate::new(f64::NAN, 35.05),
            vec![site()],
            &records,
            &AnalysisOptions {
                radius_meters: f64::MAX,
                ..AnalysisOptions::default()
            },
        );
        assert!(nan.containment.is_empty());
        assert!(nan.nearby.is_empty());
    }

    #[test]
    fn test_options_defaults_fill_missing_fields() {
        let opts: AnalysisOptions = serde_json::from_value(json!({"radius_meters": 50.0})).unwrap();
        assert_eq!(opts.radius_meters, 50.0);
        assert_eq!(opts.max_results, DEFAULT_MAX_RESULTS);
        assert_eq!(opts.location_field, "location");
    }
}
