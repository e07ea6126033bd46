//! The "near" predicate between a pipe vertex and a building polygon.

use geo::{Closest, ClosestPoint, Contains, Coord, Intersects, Point, Polygon};

use crate::distance::DistanceModel;

/// Default near-distance tolerance, in the distance model's units.
pub const DEFAULT_TOLERANCE: f64 = 0.01;

/// A vertex is near a polygon if the polygon contains it, its boundary
/// touches it, or the shortest distance between them is below `tolerance`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearPredicate {
    pub tolerance: f64,
    pub model: DistanceModel,
}

impl Default for NearPredicate {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            model: DistanceModel::default(),
        }
    }
}

impl NearPredicate {
    pub fn new(tolerance: f64, model: DistanceModel) -> Self {
        Self { tolerance, model }
    }

    pub fn is_near(&self, vertex: Coord<f64>, polygon: &Polygon<f64>) -> bool {
        let point = Point::from(vertex);
        if polygon.contains(&point) || polygon.intersects(&point) {
            return true;
        }
        match polygon.closest_point(&point) {
            Closest::Intersection(p) | Closest::SinglePoint(p) => {
                self.model.distance(vertex, p.0) < self.tolerance
            }
            Closest::Indeterminate => false,
        }
    }
}
