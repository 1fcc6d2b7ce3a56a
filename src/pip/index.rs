//! Spatial index for fast zone candidate lookups.

use geo::{BoundingRect, Coord, LineString};
use rstar::{RTree, RTreeObject, AABB};
use tracing::debug;

use crate::models::{Coordinate, Zone};

/// Wrapper for R-tree indexing of a zone by arena slot
#[derive(Debug, Clone)]
pub struct IndexedZone {
    pub slot: usize,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for IndexedZone {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

impl IndexedZone {
    pub fn new(slot: usize, zone: &Zone) -> Option<Self> {
        if !zone.has_polygon() {
            return None;
        }
        let (min_x, min_y, max_x, max_y) = boundary_bbox(&zone.boundary_points)?;
        Some(Self {
            slot,
            envelope: AABB::from_corners([min_x, min_y], [max_x, max_y]),
        })
    }
}

/// Bounding box of a ring as `(min_lon, min_lat, max_lon, max_lat)`
pub fn boundary_bbox(points: &[Coordinate]) -> Option<(f64, f64, f64, f64)> {
    if !points
        .iter()
        .all(|p| p.latitude.is_finite() && p.longitude.is_finite())
    {
        return None;
    }

    let ring: LineString<f64> = points
        .iter()
        .map(|p| Coord {
            x: p.longitude,
            y: p.latitude,
        })
        .collect();
    let rect = ring.bounding_rect()?;
    Some((rect.min().x, rect.min().y, rect.max().x, rect.max().y))
}

/// Spatial index over zone bounding boxes using R-tree
pub struct ZoneSpatialIndex {
    tree: RTree<IndexedZone>,
}

impl ZoneSpatialIndex {
    /// Build spatial index over the given zones; slots are positions in `zones`
    pub fn build(zones: &[Zone]) -> Self {
        let indexed: Vec<IndexedZone> = zones
            .iter()
            .enumerate()
            .filter_map(|(slot, zone)| IndexedZone::new(slot, zone))
            .collect();

        debug!(
            "Indexed {} of {} zones (others lack a usable boundary)",
            indexed.len(),
            zones.len()
        );

        Self {
            tree: RTree::bulk_load(indexed),
        }
    }

    /// Slots of zones whose bounding box covers the point, in input order
    pub fn candidates(&self, point: &Coordinate) -> Vec<usize> {
        let query_envelope = AABB::from_point([point.longitude, point.latitude]);
        let mut slots: Vec<usize> = self
            .tree
            .locate_in_envelope_intersecting(&query_envelope)
            .map(|iz| iz.slot)
            .collect();
        slots.sort_unstable();
        slots
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}
