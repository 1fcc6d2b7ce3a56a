//! Zone resolver for looking up the containing zone hierarchy for a point.

use tracing::debug;

use super::{point_in_polygon, ZoneArena, ZoneSpatialIndex};
use crate::models::{ContainmentResult, Coordinate, Zone};

/// Point-in-Polygon zone lookup over one zone snapshot
pub struct ZoneResolver {
    arena: ZoneArena,
    index: ZoneSpatialIndex,
}

impl ZoneResolver {
    /// Create a resolver from a zone snapshot
    pub fn new(zones: Vec<Zone>) -> Self {
        let index = ZoneSpatialIndex::build(&zones);
        let arena = ZoneArena::build(zones);
        Self { arena, index }
    }

    /// Slots of all zones whose boundary contains the point, in input order
    pub fn containing(&self, point: &Coordinate) -> Vec<usize> {
        if !point.is_valid() {
            return Vec::new();
        }

        self.index
            .candidates(point)
            .into_iter()
            .filter(|slot| {
                self.arena
                    .get(*slot)
                    .is_some_and(|z| point_in_polygon(point, &z.boundary_points))
            })
            .collect()
    }

    /// Find the most specific containing zone and its ancestor chain
    pub fn resolve(&self, point: &Coordinate) -> ContainmentResult {
        let matches = self.containing(point);

        // Strictly greater keeps the first match on equal rank
        let mut best: Option<(usize, u8)> = None;
        for slot in &matches {
            let Some(zone) = self.arena.get(*slot) else {
                continue;
            };
            let rank = zone.zone_type.rank();
            if best.map_or(true, |(_, r)| rank > r) {
                best = Some((*slot, rank));
            }
        }

        debug!(
            "Zone lookup at ({}, {}): {} containing zones",
            point.latitude,
            point.longitude,
            matches.len()
        );

        let Some((slot, _)) = best else {
            return ContainmentResult::default();
        };

        let hierarchy: Vec<Zone> = self
            .arena
            .lineage(slot)
            .into_iter()
            .filter_map(|s| self.arena.get(s).cloned())
            .collect();

        ContainmentResult {
            zone: self.arena.get(slot).cloned(),
            hierarchy,
        }
    }

    /// Get the zone arena (for stats/debugging)
    pub fn arena(&self) -> &ZoneArena {
        &self.arena
    }
}

/// Resolve the most specific zone containing `point` in a zone snapshot.
///
/// Never fails: no match yields an empty result.
pub fn resolve_containing_zone(point: &Coordinate, zones: &[Zone]) -> ContainmentResult {
    ZoneResolver::new(zones.to_vec()).resolve(point)
}
