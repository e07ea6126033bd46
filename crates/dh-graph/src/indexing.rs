//! Identifier lookup for pipes and buildings.
//!
//! Maps the identifiers carried by the source features onto the compact ids
//! of the owning network.

use std::collections::HashMap;

use dh_core::{BuildingId, Id, PipeId};
use dh_features::{Building, Pipe};
use tracing::warn;

use crate::error::{GraphError, GraphResult};

#[derive(Debug, Clone, Default)]
pub struct FeatureIndex {
    pipes: HashMap<String, PipeId>,
    buildings: HashMap<String, BuildingId>,
}

impl FeatureIndex {
    /// Index entities by feature identifier; the first of duplicates wins.
    pub fn from_entities(pipes: &[Pipe], buildings: &[Building]) -> Self {
        Self {
            pipes: index_keys("pipe", pipes.iter().map(|p| (p.feature_id.as_deref(), p.id))),
            buildings: index_keys(
                "building",
                buildings.iter().map(|b| (b.feature_id.as_deref(), b.id)),
            ),
        }
    }

    pub fn pipe_id(&self, feature_id: &str) -> GraphResult<PipeId> {
        self.pipes
            .get(feature_id)
            .copied()
            .ok_or_else(|| not_found("pipe", feature_id))
    }

    pub fn building_id(&self, feature_id: &str) -> GraphResult<BuildingId> {
        self.buildings
            .get(feature_id)
            .copied()
            .ok_or_else(|| not_found("building", feature_id))
    }

    pub fn pipe_count(&self) -> usize {
        self.pipes.len()
    }

    pub fn building_count(&self) -> usize {
        self.buildings.len()
    }
}

fn index_keys<'a>(
    what: &'static str,
    entries: impl Iterator<Item = (Option<&'a str>, Id)>,
) -> HashMap<String, Id> {
    let mut map: HashMap<String, Id> = HashMap::new();
    for (key, id) in entries {
        let Some(key) = key else { continue };
        if map.contains_key(key) {
            warn!(what, id = key, "duplicate feature identifier; keeping the first");
            continue;
        }
        map.insert(key.to_string(), id);
    }
    map
}

fn not_found(what: &'static str, id: &str) -> GraphError {
    GraphError::NotFound {
        what,
        id: id.to_string(),
    }
}
