//! Network construction pipeline.

use dh_core::{StageTimer, StageTimings};
use dh_features::{FeatureSet, FeatureSource, NetworkBuilder};
use tracing::info;

use crate::context::{NetworkConfig, NetworkContext};
use crate::error::GraphResult;
use crate::graph::Network;
use crate::indexing::FeatureIndex;
use crate::resolve::AmbiguityResolver;
use crate::topology::Topology;
use crate::validate::validate_network;

impl Network {
    /// Filter, match, resolve and classify the context's features.
    pub fn build<S: FeatureSource>(ctx: &NetworkContext<S>) -> GraphResult<Self> {
        ctx.config.validate()?;

        let timer = StageTimer::start("filter");
        let features = NetworkBuilder::new().build(&ctx.source);
        let timings = StageTimings {
            filter_s: timer.stop(),
            ..StageTimings::default()
        };

        Self::assemble(features, &ctx.config, timings)
    }

    /// Build from already-filtered features.
    pub fn from_features(features: FeatureSet, config: &NetworkConfig) -> GraphResult<Self> {
        config.validate()?;
        Self::assemble(features, config, StageTimings::default())
    }

    fn assemble(
        features: FeatureSet,
        config: &NetworkConfig,
        mut timings: StageTimings,
    ) -> GraphResult<Self> {
        let FeatureSet {
            mut pipes,
            mut buildings,
        } = features;

        let timer = StageTimer::start("match");
        let candidates = config.matcher().match_all(&pipes, &buildings);
        timings.match_s = timer.stop();

        let timer = StageTimer::start("resolve");
        let resolved = AmbiguityResolver::new(&candidates).resolve_all(config.parallel);
        timings.resolve_s = timer.stop();

        for ((pipe, before), after) in pipes.iter_mut().zip(candidates).zip(resolved) {
            pipe.candidate_buildings = before;
            pipe.connected_buildings = after;
        }

        // First resolved pipe in input order becomes the building's connector.
        for pipe in &pipes {
            let Some(b) = pipe.resolved_building() else {
                continue;
            };
            if let Some(building) = buildings.get_mut(b.position()) {
                building.connector.get_or_insert(pipe.id);
            }
        }

        let timer = StageTimer::start("topology");
        let topo = Topology::build(&mut pipes);
        timings.topology_s = timer.stop();

        let index = FeatureIndex::from_entities(&pipes, &buildings);
        let network = Network {
            pipes,
            buildings,
            nodes: topo.nodes,
            node_lookup: topo.node_lookup,
            connectors: topo.connectors,
            links: topo.links,
            forks: topo.forks,
            index,
            timings,
        };
        validate_network(&network)?;

        info!(
            pipes = network.pipes.len(),
            buildings = network.buildings.len(),
            connectors = network.connectors.len(),
            links = network.links.len(),
            nodes = network.nodes.len(),
            forks = network.forks.len(),
            elapsed_s = network.timings.total_s(),
            "network built"
        );
        Ok(network)
    }
}
