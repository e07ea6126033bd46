//! Explicit build context: feature source plus configuration.

use dh_core::ensure_non_negative;
use dh_features::FeatureSource;
use dh_geo::{DEFAULT_TOLERANCE, DistanceModel, NearPredicate, ProximityMatcher};
use serde::{Deserialize, Serialize};

use crate::error::GraphResult;
use crate::graph::Network;

/// Settings that shape network construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Near-distance tolerance in the distance model's units.
    pub tolerance: f64,
    pub distance_model: DistanceModel,
    /// Prefilter proximity tests with an R*-tree.
    pub use_index: bool,
    /// Match and resolve pipes on the rayon thread pool.
    pub parallel: bool,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            distance_model: DistanceModel::default(),
            use_index: true,
            parallel: true,
        }
    }
}

impl NetworkConfig {
    pub fn validate(&self) -> GraphResult<()> {
        ensure_non_negative(self.tolerance, "tolerance")?;
        Ok(())
    }

    pub fn matcher(&self) -> ProximityMatcher {
        ProximityMatcher::new(NearPredicate::new(self.tolerance, self.distance_model))
            .with_index(self.use_index)
            .with_parallel(self.parallel)
    }
}

/// Everything a network build reads, passed explicitly.
#[derive(Debug, Clone)]
pub struct NetworkContext<S> {
    pub source: S,
    pub config: NetworkConfig,
}

impl<S: FeatureSource> NetworkContext<S> {
    pub fn new(source: S, config: NetworkConfig) -> Self {
        Self { source, config }
    }

    pub fn with_defaults(source: S) -> Self {
        Self::new(source, NetworkConfig::default())
    }

    /// Build the network from the source's current snapshot.
    pub fn build(&self) -> GraphResult<Network> {
        Network::build(self)
    }
}
