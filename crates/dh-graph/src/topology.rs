//! TopologyGraph: endpoint merging, connector/link partition and forks.

use std::collections::HashMap;

use dh_core::{NodeId, PipeId, exact_bits};
use dh_features::Pipe;
use geo::Coord;

/// Number of incident link pipes above which a node is a fork.
pub const FORK_MIN_LINKS: usize = 3;

/// Exact-equality key of a coordinate pair.
///
/// No snapping: two endpoints share a node only if both coordinates compare
/// equal as floats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeKey {
    x: u64,
    y: u64,
}

impl NodeKey {
    pub fn of(coord: Coord<f64>) -> Self {
        Self {
            x: exact_bits(coord.x),
            y: exact_bits(coord.y),
        }
    }
}

/// A topology point shared by every pipe starting or ending at its coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub coord: Coord<f64>,
    /// Point identifier from the first pipe endpoint that supplied one.
    pub label: Option<String>,
    /// Incident pipes in ascending id order; a pipe looping back onto the
    /// node is listed once.
    pub pipes: Vec<PipeId>,
    pub link_count: usize,
    pub is_fork: bool,
}

impl Node {
    pub fn key(&self) -> NodeKey {
        NodeKey::of(self.coord)
    }
}

/// Result of grouping pipe endpoints and classifying pipes.
#[derive(Debug, Clone, Default)]
pub struct Topology {
    pub nodes: Vec<Node>,
    pub node_lookup: HashMap<NodeKey, NodeId>,
    pub connectors: Vec<PipeId>,
    pub links: Vec<PipeId>,
    pub forks: Vec<NodeId>,
}

impl Topology {
    /// Build nodes from resolved pipes and record each pipe's endpoint nodes.
    ///
    /// Pipes must carry their resolved `connected_buildings`; pipes without
    /// vertices get no nodes.
    pub fn build(pipes: &mut [Pipe]) -> Self {
        let mut topo = Topology::default();

        for pipe in pipes.iter_mut() {
            let (Some(start), Some(end)) = (pipe.start(), pipe.end()) else {
                continue;
            };
            let start_node = topo.intern(start, pipe.start_label.as_deref());
            let end_node = topo.intern(end, pipe.end_label.as_deref());
            pipe.start_node = Some(start_node);
            pipe.end_node = Some(end_node);

            topo.nodes[start_node.position()].pipes.push(pipe.id);
            if end_node != start_node {
                topo.nodes[end_node.position()].pipes.push(pipe.id);
            }
        }

        let mut is_link = vec![false; pipes.len()];
        for pipe in pipes.iter() {
            if pipe.is_connector() {
                topo.connectors.push(pipe.id);
            } else {
                topo.links.push(pipe.id);
                if let Some(flag) = is_link.get_mut(pipe.id.position()) {
                    *flag = true;
                }
            }
        }

        for node in &mut topo.nodes {
            node.pipes.sort();
            node.link_count = node
                .pipes
                .iter()
                .filter(|p| is_link.get(p.position()).copied().unwrap_or(false))
                .count();
            node.is_fork = node.link_count >= FORK_MIN_LINKS;
            if node.is_fork {
                topo.forks.push(node.id);
            }
        }

        topo
    }

    fn intern(&mut self, coord: Coord<f64>, label: Option<&str>) -> NodeId {
        let key = NodeKey::of(coord);
        if let Some(&id) = self.node_lookup.get(&key) {
            let node = &mut self.nodes[id.position()];
            if node.label.is_none() {
                node.label = label.map(str::to_string);
            }
            return id;
        }
        let id = NodeId::from_position(self.nodes.len());
        self.nodes.push(Node {
            id,
            coord,
            label: label.map(str::to_string),
            pipes: Vec::new(),
            link_count: 0,
            is_fork: false,
        });
        self.node_lookup.insert(key, id);
        id
    }
}
