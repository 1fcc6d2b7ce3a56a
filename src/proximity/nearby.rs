use tracing::debug;

use super::haversine_distance;
use crate::models::{Coordinate, ProximityResult, SpatialRecord};

/// Result cap used when the caller does not give one
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Records within `radius_meters` of `point`, nearest first, at most `max_count`.
///
/// Records without a valid location are skipped. Equal distances keep input
/// order. A non-finite or negative radius matches nothing.
pub fn find_nearby(
    point: &Coordinate,
    records: &[SpatialRecord],
    radius_meters: f64,
    max_count: usize,
) -> Vec<ProximityResult> {
    if !point.is_valid() || !radius_meters.is_finite() || radius_meters < 0.0 || max_count == 0 {
        return Vec::new();
    }

    let mut skipped = 0usize;
    let mut results: Vec<ProximityResult> = records
        .iter()
        .filter_map(|record| {
            let Some(location) = record.valid_location() else {
                skipped += 1;
                return None;
            };
            let distance_meters = haversine_distance(point, &location);
            (distance_meters <= radius_meters).then(|| ProximityResult {
                record: record.clone(),
                distance_meters,
            })
        })
        .collect();

    results.sort_by(|a, b| a.distance_meters.total_cmp(&b.distance_meters));
    results.truncate(max_count);

    debug!(
        "Nearby search within {}m: {} hits, {} records without usable location",
        radius_meters,
        results.len(),
        skipped
    );

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, location: Option<Coordinate>) -> SpatialRecord {
        SpatialRecord::new(id, "camera", id.to_uppercase(), location)
    }

    /// Points stepping north from the origin by roughly 111m each
    fn ladder(n: usize) -> Vec<SpatialRecord> {
        (0..n)
            .map(|i| {
                record(
                    &format!("r{}", i),
                    Some(Coordinate::new(i as f64 * 0.001, 0.0)),
                )
            })
            .collect()
    }

    #[test]
    fn test_sorted_and_within_radius() {
        let mut records = ladder(6);
        records.reverse();
        let origin = Coordinate::new(0.0, 0.0);

        let hits = find_nearby(&origin, &records, 300.0, 10);
        let ids: Vec<&str> = hits.iter().map(|h| h.record.id.as_str()).collect();
        assert_eq!(ids, vec!["r0", "r1", "r2"]);
        assert!(hits.iter().all(|h| h.distance_meters <= 300.0));
        assert!(hits
            .windows(2)
            .all(|w| w[0].distance_meters <= w[1].distance_meters));
    }

    #[test]
    fn test_max_count() {
        let records = ladder(30);
        let hits = find_nearby(&Coordinate::new(0.0, 0.0), &records, 1_000_000.0, 10);
        assert_eq!(hits.len(), 10);
        assert!(find_nearby(&Coordinate::new(0.0, 0.0), &records, 1_000.0, 0).is_empty());
    }

    #[test]
    fn test_bad_locations_excluded() {
        let records = vec![
            record("none", None),
            record("lat-out", Some(Coordinate::new(91.0, 0.0))),
            record("lon-out", Some(Coordinate::new(0.0, 200.0))),
            record("nan", Some(Coordinate::new(f64::NAN, 0.0))),
            record("ok", Some(Coordinate::new(0.0005, 0.0))),
        ];
        let hits = find_nearby(&Coordinate::new(0.0, 0.0), &records, 500.0, 10);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].record.id, "ok");
    }

    #[test]
    fn test_equal_distances_keep_input_order() {
        let records = vec![
            record("east", Some(Coordinate::new(0.0, 0.001))),
            record("west", Some(Coordinate::new(0.0, -0.001))),
        ];
        let hits = find_nearby(&Coordinate::new(0.0, 0.0), &records, 500.0, 10);
        assert_eq!(hits[0].record.id, "east");
        assert_eq!(hits[1].record.id, "west");
    }

    #[test]
    fn test_bad_radius_or_point() {
        let records = ladder(3);
        let origin = Coordinate::new(0.0, 0.0);
        assert!(find_nearby(&origin, &records, -1.0, 10).is_empty());
        assert!(find_nearby(&origin, &records, f64::NAN, 10).is_empty());
        assert!(find_nearby(&Coordinate::new(100.0, 0.0), &records, 500.0, 10).is_empty());

        // Zero radius still matches a record sitting on the point
        assert_eq!(find_nearby(&origin, &records, 0.0, 10).len(), 1);
    }
}
