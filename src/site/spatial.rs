//! Spatial indexing for placed footprints
//!
//! R-tree over building footprints so clearance queries only look at
//! neighbours inside the clearance envelope.

use super::building::Building;
use super::geometry::Rect;
use rstar::{RTree, RTreeObject, AABB};

/// Footprint wrapper for R-tree spatial indexing
#[derive(Clone, Debug)]
pub struct IndexedFootprint {
    /// Position of the building in its layout
    pub index: usize,
    pub footprint: Rect,
    bounds: AABB<[f64; 2]>,
}

impl IndexedFootprint {
    pub fn new(index: usize, footprint: Rect) -> Self {
        Self {
            index,
            footprint,
            bounds: footprint.envelope(),
        }
    }
}

impl RTreeObject for IndexedFootprint {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        self.bounds
    }
}

/// R-tree of footprints keyed by layout index
#[derive(Clone, Debug, Default)]
pub struct FootprintIndex {
    tree: RTree<IndexedFootprint>,
}

impl FootprintIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_buildings(buildings: &[Building]) -> Self {
        let entries = buildings
            .iter()
            .enumerate()
            .map(|(i, b)| IndexedFootprint::new(i, b.footprint()))
            .collect();
        Self {
            tree: RTree::bulk_load(entries),
        }
    }

    pub fn insert(&mut self, index: usize, footprint: Rect) {
        self.tree.insert(IndexedFootprint::new(index, footprint));
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Candidates whose bounds come within `radius` of `rect` on both axes.
    ///
    /// Superset of the footprints at Euclidean distance <= `radius`; callers
    /// apply the exact distance test.
    pub fn near<'a>(
        &'a self,
        rect: &Rect,
        radius: f64,
    ) -> impl Iterator<Item = &'a IndexedFootprint> + 'a {
        let search_bounds = rect.expanded(radius).envelope();
        self.tree.locate_in_envelope_intersecting(&search_bounds)
    }
}
