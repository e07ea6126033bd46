//! ProximityMatcher: candidate buildings for every pipe.

use std::collections::BTreeSet;

use dh_core::BuildingId;
use dh_features::{Building, Pipe};
use rayon::prelude::*;
use tracing::debug;

use crate::index::BuildingIndex;
use crate::near::NearPredicate;

/// Candidate building ids per pipe, indexed by pipe position, each sorted by id.
pub type CandidateSets = Vec<Vec<BuildingId>>;

/// Finds, for each pipe, every building near any vertex of its polyline.
///
/// Each pipe is matched independently against the shared, read-only building
/// set, so matching runs in parallel across pipes when `parallel` is set.
/// The R*-tree prefilter only bounds cost; results are identical without it.
#[derive(Debug, Clone, Copy)]
pub struct ProximityMatcher {
    pub near: NearPredicate,
    pub use_index: bool,
    pub parallel: bool,
}

impl Default for ProximityMatcher {
    fn default() -> Self {
        Self::new(NearPredicate::default())
    }
}

impl ProximityMatcher {
    pub fn new(near: NearPredicate) -> Self {
        Self {
            near,
            use_index: true,
            parallel: true,
        }
    }

    pub fn with_index(mut self, use_index: bool) -> Self {
        self.use_index = use_index;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn match_all(&self, pipes: &[Pipe], buildings: &[Building]) -> CandidateSets {
        let index = self.use_index.then(|| BuildingIndex::new(buildings));
        let index = index.as_ref();

        let sets: CandidateSets = if self.parallel {
            pipes
                .par_iter()
                .map(|pipe| self.candidates_for(pipe, buildings, index))
                .collect()
        } else {
            pipes
                .iter()
                .map(|pipe| self.candidates_for(pipe, buildings, index))
                .collect()
        };

        debug!(
            pipes = pipes.len(),
            buildings = buildings.len(),
            unmatched = sets.iter().filter(|s| s.is_empty()).count(),
            single = sets.iter().filter(|s| s.len() == 1).count(),
            multiple = sets.iter().filter(|s| s.len() > 1).count(),
            "matched pipes to buildings"
        );
        sets
    }

    /// Candidate buildings of a single pipe, sorted by id.
    ///
    /// Non-finite vertices and buildings with non-finite coordinates never match.
    pub fn candidates_for(
        &self,
        pipe: &Pipe,
        buildings: &[Building],
        index: Option<&BuildingIndex>,
    ) -> Vec<BuildingId> {
        let mut found = BTreeSet::new();
        for vertex in pipe.vertices() {
            if !(vertex.x.is_finite() && vertex.y.is_finite()) {
                continue;
            }
            match index {
                Some(index) => {
                    let extent = self.near.model.search_extent(vertex, self.near.tolerance);
                    for id in index.query(vertex, extent) {
                        if found.contains(&id) {
                            continue;
                        }
                        if let Some(building) = buildings.get(id.position()) {
                            if self.near.is_near(vertex, &building.geometry) {
                                found.insert(id);
                            }
                        }
                    }
                }
                None => {
                    for building in buildings {
                        if !found.contains(&building.id)
                            && building.has_finite_geometry()
                            && self.near.is_near(vertex, &building.geometry)
                        {
                            found.insert(building.id);
                        }
                    }
                }
            }
        }
        found.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceModel;
    use dh_core::Id;
    use geo::{LineString, Polygon};

    fn building(i: u32, x0: f64, y0: f64, size: f64) -> Building {
        let ring = LineString::from(vec![
            [x0, y0],
            [x0 + size, y0],
            [x0 + size, y0 + size],
            [x0, y0 + size],
        ]);
        Building::new(Id::from_index(i), Polygon::new(ring, vec![]))
    }

    fn pipe(i: u32, coords: Vec<[f64; 2]>) -> Pipe {
        Pipe::new(Id::from_index(i), LineString::from(coords))
    }

    fn planar() -> ProximityMatcher {
        ProximityMatcher::new(NearPredicate::new(0.01, DistanceModel::Euclidean))
    }

    #[test]
    fn interior_vertex_counts() {
        // The pipe bends into the building; neither endpoint touches it.
        let buildings = vec![building(0, 10.0, 10.0, 4.0)];
        let pipes = vec![pipe(0, vec![[0.0, 0.0], [12.0, 12.0], [30.0, 0.0]])];
        let sets = planar().match_all(&pipes, &buildings);
        assert_eq!(sets, vec![vec![Id::from_index(0)]]);
    }

    #[test]
    fn multiple_candidates_sorted_and_unique() {
        let buildings = vec![building(0, 0.0, 0.0, 1.0), building(1, 5.0, 0.0, 1.0)];
        let pipes = vec![pipe(0, vec![[5.5, 0.5], [0.5, 0.5], [0.6, 0.6]])];
        let sets = planar().match_all(&pipes, &buildings);
        assert_eq!(sets, vec![vec![Id::from_index(0), Id::from_index(1)]]);
    }

    #[test]
    fn far_pipe_has_no_candidates() {
        let buildings = vec![building(0, 0.0, 0.0, 1.0)];
        let pipes = vec![pipe(0, vec![[3.0, 3.0], [4.0, 4.0]])];
        for matcher in [planar(), planar().with_index(false), planar().with_parallel(false)] {
            assert_eq!(matcher.match_all(&pipes, &buildings), vec![Vec::<BuildingId>::new()]);
        }
    }

    #[test]
    fn empty_polyline_matches_nothing() {
        let buildings = vec![building(0, 0.0, 0.0, 1.0)];
        let pipes = vec![pipe(0, vec![])];
        assert!(planar().match_all(&pipes, &buildings)[0].is_empty());
    }

    #[test]
    fn non_finite_building_matches_nothing_with_or_without_index() {
        let mut buildings: Vec<Building> = (0..40)
            .map(|i| building(i, f64::from(i) * 2.0, 0.0, 1.0))
            .collect();
        buildings.push(building(40, f64::NAN, 0.0, 1.0));
        let pipes = vec![
            pipe(0, vec![[0.5, -1.0], [0.5, 0.5]]),
            pipe(1, vec![[f64::NAN, 0.5], [4.5, 0.5]]),
        ];

        let indexed = planar().match_all(&pipes, &buildings);
        let brute = planar().with_index(false).with_parallel(false).match_all(&pipes, &buildings);
        assert_eq!(indexed, brute);
        assert_eq!(indexed, vec![vec![Id::from_index(0)], vec![Id::from_index(2)]]);
    }
}
