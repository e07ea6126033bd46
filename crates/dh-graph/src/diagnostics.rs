//! Data-quality diagnostics over a built network.
//!
//! Problems found here are reported, never raised: a network with ambiguous
//! pipes or orphaned buildings is still a valid network.

use std::collections::{HashMap, HashSet};

use dh_core::BuildingId;
use dh_features::{Building, Pipe};
use serde::{Deserialize, Serialize};

use crate::graph::Network;

/// Pipes still ambiguous after resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipeDiagnostics<T> {
    #[serde(rename = "pipes with multiple connected buildings")]
    pub with_multiple_buildings: Vec<T>,
}

/// Buildings without exactly one serving pipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingDiagnostics<T> {
    #[serde(rename = "buildings without connector")]
    pub without_connector: Vec<T>,
    /// Supply sites are exempt.
    #[serde(rename = "buildings with multiple connectors")]
    pub with_multiple_connectors: Vec<T>,
    /// Buildings without a connector that some pipe was near before
    /// resolution dropped it.
    #[serde(rename = "contested", default)]
    pub contested: Vec<T>,
}

// No `T: Default` bound: diagnostics hold entity references.
impl<T> Default for PipeDiagnostics<T> {
    fn default() -> Self {
        Self {
            with_multiple_buildings: Vec::new(),
        }
    }
}

impl<T> Default for BuildingDiagnostics<T> {
    fn default() -> Self {
        Self {
            without_connector: Vec::new(),
            with_multiple_connectors: Vec::new(),
            contested: Vec::new(),
        }
    }
}

impl<T> PipeDiagnostics<T> {
    pub fn is_empty(&self) -> bool {
        self.with_multiple_buildings.is_empty()
    }
}

impl<T> BuildingDiagnostics<T> {
    pub fn is_empty(&self) -> bool {
        self.without_connector.is_empty() && self.with_multiple_connectors.is_empty()
    }
}

impl PipeDiagnostics<&Pipe> {
    pub fn ids(&self) -> PipeDiagnostics<String> {
        PipeDiagnostics {
            with_multiple_buildings: sorted_ids(
                self.with_multiple_buildings
                    .iter()
                    .map(|p| p.feature_id.as_deref()),
            ),
        }
    }
}

impl BuildingDiagnostics<&Building> {
    pub fn ids(&self) -> BuildingDiagnostics<String> {
        let ids = |v: &[&Building]| sorted_ids(v.iter().map(|b| b.feature_id.as_deref()));
        BuildingDiagnostics {
            without_connector: ids(&self.without_connector),
            with_multiple_connectors: ids(&self.with_multiple_connectors),
            contested: ids(&self.contested),
        }
    }
}

/// Collect present, non-empty identifiers, sorted case-insensitively.
pub fn sorted_ids<'a>(ids: impl Iterator<Item = Option<&'a str>>) -> Vec<String> {
    let mut out: Vec<String> = ids
        .flatten()
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect();
    out.sort_by_key(|id| id.to_lowercase());
    out
}

impl Network {
    pub fn problematic_pipes(&self) -> PipeDiagnostics<&Pipe> {
        PipeDiagnostics {
            with_multiple_buildings: self.pipes.iter().filter(|p| p.is_ambiguous()).collect(),
        }
    }

    pub fn problematic_pipe_ids(&self) -> PipeDiagnostics<String> {
        self.problematic_pipes().ids()
    }

    pub fn problematic_buildings(&self) -> BuildingDiagnostics<&Building> {
        let mut claims: HashMap<BuildingId, usize> = HashMap::new();
        for pipe in &self.pipes {
            if let Some(b) = pipe.resolved_building() {
                *claims.entry(b).or_default() += 1;
            }
        }
        let nearby: HashSet<BuildingId> = self
            .pipes
            .iter()
            .flat_map(|p| p.candidate_buildings.iter().copied())
            .collect();

        let mut diag = BuildingDiagnostics::default();
        for building in &self.buildings {
            match claims.get(&building.id).copied().unwrap_or(0) {
                0 => {
                    diag.without_connector.push(building);
                    if nearby.contains(&building.id) {
                        diag.contested.push(building);
                    }
                }
                1 => {}
                _ if building.is_supply() => {}
                _ => diag.with_multiple_connectors.push(building),
            }
        }
        diag
    }

    pub fn problematic_building_ids(&self) -> BuildingDiagnostics<String> {
        self.problematic_buildings().ids()
    }
}
