//! The owning network graph.

use std::collections::HashMap;

use dh_core::{BuildingId, NodeId, PipeId, StageTimings};
use dh_features::{Building, Pipe};
use geo::Coord;

use crate::error::GraphResult;
use crate::indexing::FeatureIndex;
use crate::topology::{Node, NodeKey};

/// The network: a validated, immutable collection of pipes, buildings and nodes.
///
/// The network exclusively owns every entity. Relationships (pipe to
/// building, node to pipes, building to connector) are ids resolved through
/// the owning collections. A changed input snapshot needs a new build.
#[derive(Debug, Clone)]
pub struct Network {
    pub(crate) pipes: Vec<Pipe>,
    pub(crate) buildings: Vec<Building>,
    pub(crate) nodes: Vec<Node>,
    pub(crate) node_lookup: HashMap<NodeKey, NodeId>,
    pub(crate) connectors: Vec<PipeId>,
    pub(crate) links: Vec<PipeId>,
    pub(crate) forks: Vec<NodeId>,
    pub(crate) index: FeatureIndex,
    pub(crate) timings: StageTimings,
}

impl Network {
    pub fn all_pipes(&self) -> &[Pipe] {
        &self.pipes
    }

    pub fn all_buildings(&self) -> &[Building] {
        &self.buildings
    }

    pub fn all_nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Pipes with a non-empty (possibly still ambiguous) building set.
    pub fn connectors(&self) -> impl Iterator<Item = &Pipe> + '_ {
        self.connectors.iter().filter_map(|&id| self.pipe(id))
    }

    /// Pipes serving no building: the trunk and distribution network.
    pub fn links(&self) -> impl Iterator<Item = &Pipe> + '_ {
        self.links.iter().filter_map(|&id| self.pipe(id))
    }

    pub fn forks(&self) -> impl Iterator<Item = &Node> + '_ {
        self.forks.iter().filter_map(|&id| self.node(id))
    }

    pub fn connector_ids(&self) -> &[PipeId] {
        &self.connectors
    }

    pub fn link_ids(&self) -> &[PipeId] {
        &self.links
    }

    pub fn fork_ids(&self) -> &[NodeId] {
        &self.forks
    }

    pub fn pipe(&self, id: PipeId) -> Option<&Pipe> {
        self.pipes.get(id.position())
    }

    pub fn building(&self, id: BuildingId) -> Option<&Building> {
        self.buildings.get(id.position())
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.position())
    }

    /// The pipe carrying the given source identifier.
    pub fn pipe_from_id(&self, feature_id: &str) -> GraphResult<&Pipe> {
        let id = self.index.pipe_id(feature_id)?;
        Ok(&self.pipes[id.position()])
    }

    /// The building carrying the given source identifier.
    pub fn building_from_id(&self, feature_id: &str) -> GraphResult<&Building> {
        let id = self.index.building_id(feature_id)?;
        Ok(&self.buildings[id.position()])
    }

    /// Node at exactly these coordinates, if any pipe ends there.
    pub fn node_at(&self, coord: Coord<f64>) -> Option<&Node> {
        self.node_lookup
            .get(&NodeKey::of(coord))
            .and_then(|&id| self.node(id))
    }

    pub fn is_fork(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(|n| n.is_fork)
    }

    /// Pipes incident to a node.
    pub fn node_pipes(&self, id: NodeId) -> impl Iterator<Item = &Pipe> + '_ {
        self.node(id)
            .into_iter()
            .flat_map(|n| n.pipes.iter())
            .filter_map(|&p| self.pipe(p))
    }

    /// Buildings a pipe is connected to after resolution.
    pub fn connected_buildings(&self, id: PipeId) -> impl Iterator<Item = &Building> + '_ {
        self.pipe(id)
            .into_iter()
            .flat_map(|p| p.connected_buildings.iter())
            .filter_map(|&b| self.building(b))
    }

    /// Seconds spent in each construction stage.
    pub fn timings(&self) -> StageTimings {
        self.timings
    }
}
