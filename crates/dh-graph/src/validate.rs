//! Structural checks run on every freshly built network.

use std::collections::HashSet;

use dh_core::PipeId;

use crate::error::{GraphError, GraphResult};
use crate::graph::Network;
use crate::topology::FORK_MIN_LINKS;

fn violation(what: impl Into<String>) -> GraphError {
    GraphError::Invariant { what: what.into() }
}

/// Validate ids, the connector/link partition, node incidence and forks.
pub(crate) fn validate_network(net: &Network) -> GraphResult<()> {
    for (i, pipe) in net.pipes.iter().enumerate() {
        if pipe.id.position() != i {
            return Err(violation(format!("pipe {} stored at position {i}", pipe.id)));
        }
        if pipe
            .connected_buildings
            .iter()
            .any(|b| !pipe.candidate_buildings.contains(b))
        {
            return Err(violation(format!(
                "pipe {} gained a building during resolution",
                pipe.id
            )));
        }
    }

    let connectors: HashSet<PipeId> = net.connectors.iter().copied().collect();
    let links: HashSet<PipeId> = net.links.iter().copied().collect();
    if connectors.len() + links.len() != net.pipes.len() || !connectors.is_disjoint(&links) {
        return Err(violation("connectors and links do not partition the pipes"));
    }
    for pipe in &net.pipes {
        if pipe.is_connector() != connectors.contains(&pipe.id) {
            return Err(violation(format!("pipe {} misclassified", pipe.id)));
        }
    }

    for pipe in &net.pipes {
        for node_id in [pipe.start_node, pipe.end_node].into_iter().flatten() {
            let incident = net
                .node(node_id)
                .is_some_and(|n| n.pipes.binary_search(&pipe.id).is_ok());
            if !incident {
                return Err(violation(format!(
                    "pipe {} not listed at node {node_id}",
                    pipe.id
                )));
            }
        }
    }

    for node in &net.nodes {
        let link_count = node.pipes.iter().filter(|p| links.contains(p)).count();
        if link_count != node.link_count || node.is_fork != (link_count >= FORK_MIN_LINKS) {
            return Err(violation(format!("node {} has a stale fork flag", node.id)));
        }
    }

    for building in &net.buildings {
        let Some(pipe_id) = building.connector else {
            continue;
        };
        let consistent = net
            .pipe(pipe_id)
            .is_some_and(|p| p.resolved_building() == Some(building.id));
        if !consistent {
            return Err(violation(format!(
                "building {} points at pipe {pipe_id} which does not serve it",
                building.id
            )));
        }
    }

    Ok(())
}
