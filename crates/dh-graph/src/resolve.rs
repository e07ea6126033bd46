//! AmbiguityResolver: reduce multi-building candidate sets.
//!
//! A pipe with several candidate buildings drops every candidate that any
//! other pipe also lists. Claims are counted once over the pre-resolution
//! snapshot, so the outcome never depends on the order pipes are processed.

use std::collections::{HashMap, HashSet};

use dh_core::{BuildingId, PipeId};
use dh_geo::CandidateSets;
use rayon::prelude::*;
use tracing::debug;

use crate::error::{GraphError, GraphResult};

#[derive(Debug, Clone)]
pub struct AmbiguityResolver<'a> {
    snapshot: &'a [Vec<BuildingId>],
    /// Number of distinct pipes listing each building before resolution.
    claims: HashMap<BuildingId, usize>,
}

impl<'a> AmbiguityResolver<'a> {
    pub fn new(snapshot: &'a [Vec<BuildingId>]) -> Self {
        let mut claims: HashMap<BuildingId, usize> = HashMap::new();
        for set in snapshot {
            let unique: HashSet<BuildingId> = set.iter().copied().collect();
            for building in unique {
                *claims.entry(building).or_default() += 1;
            }
        }
        Self { snapshot, claims }
    }

    /// Number of pipes listing `building` before resolution.
    pub fn claim_count(&self, building: BuildingId) -> usize {
        self.claims.get(&building).copied().unwrap_or(0)
    }

    /// Multi-building cleanup for one pipe.
    ///
    /// Fails with `InvalidResolverState` unless the pipe's pre-resolution set
    /// holds more than one building. The result keeps only buildings no other
    /// pipe lists: one survivor makes the pipe a definite connector, zero or
    /// several are returned as they are.
    pub fn clean_up(&self, pipe: PipeId) -> GraphResult<Vec<BuildingId>> {
        let set = self.candidates(pipe)?;
        if set.len() <= 1 {
            return Err(GraphError::InvalidResolverState {
                pipe,
                candidates: set.len(),
            });
        }
        Ok(self.survivors(set))
    }

    /// Resolved set of one pipe; sets of zero or one building pass through.
    pub fn resolve(&self, pipe: PipeId) -> GraphResult<Vec<BuildingId>> {
        let set = self.candidates(pipe)?;
        Ok(self.resolve_set(set))
    }

    /// Resolve every pipe of the snapshot.
    pub fn resolve_all(&self, parallel: bool) -> CandidateSets {
        let resolved: CandidateSets = if parallel {
            self.snapshot
                .par_iter()
                .map(|set| self.resolve_set(set))
                .collect()
        } else {
            self.snapshot.iter().map(|set| self.resolve_set(set)).collect()
        };

        let ambiguous_before = self.snapshot.iter().filter(|s| s.len() > 1).count();
        debug!(
            ambiguous_before,
            resolved = count_changed(self.snapshot, &resolved, |s| s.len() == 1),
            emptied = count_changed(self.snapshot, &resolved, Vec::is_empty),
            still_ambiguous = resolved.iter().filter(|s| s.len() > 1).count(),
            "resolved candidate sets"
        );
        resolved
    }

    /// Resolve pipes one at a time in the given order, writing each result
    /// into a working copy of the snapshot.
    ///
    /// Pipes missing from `order` keep their pre-resolution set.
    pub fn resolve_in_order(&self, order: &[PipeId]) -> GraphResult<CandidateSets> {
        let mut working = self.snapshot.to_vec();
        for &pipe in order {
            if self.candidates(pipe)?.len() > 1 {
                working[pipe.position()] = self.clean_up(pipe)?;
            }
        }
        Ok(working)
    }

    fn candidates(&self, pipe: PipeId) -> GraphResult<&'a [BuildingId]> {
        self.snapshot
            .get(pipe.position())
            .map(Vec::as_slice)
            .ok_or_else(|| GraphError::NotFound {
                what: "pipe",
                id: pipe.to_string(),
            })
    }

    fn resolve_set(&self, set: &[BuildingId]) -> Vec<BuildingId> {
        if set.len() > 1 {
            self.survivors(set)
        } else {
            set.to_vec()
        }
    }

    fn survivors(&self, set: &[BuildingId]) -> Vec<BuildingId> {
        // The pipe itself accounts for one claim.
        set.iter()
            .copied()
            .filter(|&b| self.claim_count(b) <= 1)
            .collect()
    }
}

fn count_changed(
    before: &[Vec<BuildingId>],
    after: &[Vec<BuildingId>],
    pred: impl Fn(&Vec<BuildingId>) -> bool,
) -> usize {
    before
        .iter()
        .zip(after)
        .filter(|&(b, a)| b.len() > 1 && pred(a))
        .count()
}
