//! Zone arena with index-based parent links.

use hashbrown::{HashMap, HashSet};
use tracing::warn;

use crate::models::Zone;

/// Flat zone storage where parent references are resolved to slot indices
/// once at build time.
#[derive(Debug, Clone, Default)]
pub struct ZoneArena {
    zones: Vec<Zone>,
    parents: Vec<Option<usize>>,
}

impl ZoneArena {
    pub fn build(zones: Vec<Zone>) -> Self {
        let parents = {
            // First occurrence wins for duplicated ids
            let mut by_id: HashMap<&str, usize> = HashMap::with_capacity(zones.len());
            for (slot, zone) in zones.iter().enumerate() {
                by_id.entry(zone.id.as_str()).or_insert(slot);
            }

            zones
                .iter()
                .map(|zone| zone.parent().and_then(|p| by_id.get(p).copied()))
                .collect()
        };

        Self { zones, parents }
    }

    pub fn get(&self, slot: usize) -> Option<&Zone> {
        self.zones.get(slot)
    }

    pub fn parent_of(&self, slot: usize) -> Option<usize> {
        self.parents.get(slot).copied().flatten()
    }

    /// Slots from the root down to `slot` (inclusive).
    ///
    /// Stops at a zone without a parent, at a parent id missing from the set,
    /// or when a parent cycle is detected.
    pub fn lineage(&self, slot: usize) -> Vec<usize> {
        if slot >= self.zones.len() {
            return Vec::new();
        }

        let mut chain = vec![slot];
        let mut visited: HashSet<usize> = HashSet::new();
        visited.insert(slot);

        let mut current = slot;
        while let Some(parent) = self.parent_of(current) {
            if !visited.insert(parent) {
                warn!(
                    "Parent cycle detected at zone '{}', truncating hierarchy",
                    self.zones[parent].id
                );
                break;
            }
            chain.push(parent);
            current = parent;
        }

        chain.reverse();
        chain
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ZoneType;

    fn zone(id: &str, parent: Option<&str>) -> Zone {
        let z = Zone::new(id, ZoneType::Area, vec![]);
        match parent {
            Some(p) => z.with_parent(p),
            None => z,
        }
    }

    #[test]
    fn test_lineage_root_first() {
        let arena = ZoneArena::build(vec![
            zone("room", Some("area")),
            zone("site", None),
            zone("area", Some("site")),
        ]);
        let ids: Vec<&str> = arena
            .lineage(0)
            .into_iter()
            .map(|s| arena.get(s).unwrap().id.as_str())
            .collect();
        assert_eq!(ids, vec!["site", "area", "room"]);
    }

    #[test]
    fn test_missing_parent_stops_walk() {
        let arena = ZoneArena::build(vec![zone("room", Some("ghost"))]);
        assert_eq!(arena.lineage(0), vec![0]);
        assert_eq!(arena.parent_of(0), None);
    }

    #[test]
    fn test_cycle_terminates() {
        let arena = ZoneArena::build(vec![
            zone("a", Some("b")),
            zone("b", Some("c")),
            zone("c", Some("a")),
        ]);
        let chain = arena.lineage(0);
        assert_eq!(chain.len(), 3);
        assert_eq!(*chain.last().unwrap(), 0);

        let self_loop = ZoneArena::build(vec![zone("s", Some("s"))]);
        assert_eq!(self_loop.lineage(0), vec![0]);
    }

    #[test]
    fn test_duplicate_ids_resolve_to_first() {
        let arena = ZoneArena::build(vec![
            zone("dup", None),
            zone("dup", Some("other")),
            zone("child", Some("dup")),
        ]);
        assert_eq!(arena.parent_of(2), Some(0));
    }

    #[test]
    fn test_out_of_range_slot() {
        let arena = ZoneArena::build(vec![]);
        assert!(arena.is_empty());
        assert!(arena.lineage(3).is_empty());
    }
}
