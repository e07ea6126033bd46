//! R*-tree over building bounding boxes, used to prefilter proximity tests.

use std::fmt;

use dh_core::BuildingId;
use dh_features::Building;
use geo::{BoundingRect, Coord};
use rstar::primitives::{GeomWithData, Rectangle};
use rstar::{AABB, Envelope, RTree, RTreeObject, SelectionFunction};

/// A building's bounding box tagged with its id.
type IndexedBuilding = GeomWithData<Rectangle<[f64; 2]>, BuildingId>;

/// Spatial index over building bounding boxes.
///
/// Buildings without an exterior ring or with non-finite coordinates are not
/// indexed and never returned; the matcher treats them as near nothing.
pub struct BuildingIndex {
    tree: RTree<IndexedBuilding>,
}

impl BuildingIndex {
    pub fn new(buildings: &[Building]) -> Self {
        let entries = buildings
            .iter()
            .filter(|b| b.has_finite_geometry())
            .filter_map(|b| {
                let rect = b.geometry.bounding_rect()?;
                let (min, max) = (rect.min(), rect.max());
                Some(GeomWithData::new(
                    Rectangle::from_corners([min.x, min.y], [max.x, max.y]),
                    b.id,
                ))
            })
            .collect();
        Self {
            tree: RTree::bulk_load(entries),
        }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Buildings whose bounding box meets the box of half-widths `extent`
    /// centred on `at`.
    pub fn query(
        &self,
        at: Coord<f64>,
        extent: (f64, f64),
    ) -> impl Iterator<Item = BuildingId> + '_ {
        let (dx, dy) = extent;
        let query = AABB::from_corners([at.x - dx, at.y - dy], [at.x + dx, at.y + dy]);
        self.tree
            .locate_with_selection_function(EnvelopeHits { query })
            .map(|entry| entry.data)
    }
}

impl fmt::Debug for BuildingIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildingIndex")
            .field("len", &self.len())
            .finish()
    }
}

struct EnvelopeHits {
    query: AABB<[f64; 2]>,
}

impl SelectionFunction<IndexedBuilding> for EnvelopeHits {
    fn should_unpack_parent(&self, envelope: &AABB<[f64; 2]>) -> bool {
        envelope.intersects(&self.query)
    }

    fn should_unpack_leaf(&self, leaf: &IndexedBuilding) -> bool {
        leaf.envelope().intersects(&self.query)
    }
}
