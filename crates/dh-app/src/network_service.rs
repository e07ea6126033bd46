//! Building networks from files and looking entities up.

use std::path::Path;

use dh_core::{BuildingId, NodeId, as_kw, as_m, as_mm};
use dh_features::{Building, Pipe};
use dh_graph::{Network, NetworkConfig, NetworkContext};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::snapshot_service::load_snapshot;

/// Load a snapshot file and build its network.
pub fn build_network(snapshot: &Path, config: &NetworkConfig) -> AppResult<Network> {
    let source = load_snapshot(snapshot)?;
    let network = NetworkContext::new(source, *config).build()?;
    Ok(network)
}

/// One pipe with its relationships spelled out as source identifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipeSummary {
    pub id: Option<String>,
    pub is_connector: bool,
    pub connected_buildings: Vec<String>,
    pub candidate_buildings: Vec<String>,
    pub start_node: Option<[f64; 2]>,
    pub end_node: Option<[f64; 2]>,
    pub diameter_mm: Option<f64>,
    pub length_m: Option<f64>,
    pub capacity_kw: Option<f64>,
}

/// One building with its connector spelled out as a source identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingSummary {
    pub id: Option<String>,
    pub connector: Option<String>,
    pub is_supply: bool,
    pub category: Option<String>,
    pub heat_demand_kw: Option<f64>,
    pub supply_capacity_kw: Option<f64>,
}

pub fn lookup_pipe(network: &Network, id: &str) -> AppResult<PipeSummary> {
    let pipe = network.pipe_from_id(id)?;
    Ok(summarize_pipe(network, pipe))
}

pub fn lookup_building(network: &Network, id: &str) -> AppResult<BuildingSummary> {
    let building = network.building_from_id(id)?;
    Ok(summarize_building(network, building))
}

fn summarize_pipe(network: &Network, pipe: &Pipe) -> PipeSummary {
    let building_ids = |ids: &[BuildingId]| -> Vec<String> {
        ids.iter()
            .filter_map(|&b| network.building(b))
            .filter_map(|b| b.feature_id.clone())
            .collect()
    };
    let node_coord = |node: Option<NodeId>| {
        node.and_then(|n| network.node(n))
            .map(|n| [n.coord.x, n.coord.y])
    };

    PipeSummary {
        id: pipe.feature_id.clone(),
        is_connector: pipe.is_connector(),
        connected_buildings: building_ids(&pipe.connected_buildings),
        candidate_buildings: building_ids(&pipe.candidate_buildings),
        start_node: node_coord(pipe.start_node),
        end_node: node_coord(pipe.end_node),
        diameter_mm: pipe.diameter.map(as_mm),
        length_m: pipe.length.map(as_m),
        capacity_kw: pipe.capacity.map(as_kw),
    }
}

fn summarize_building(network: &Network, building: &Building) -> BuildingSummary {
    BuildingSummary {
        id: building.feature_id.clone(),
        connector: building
            .connector
            .and_then(|p| network.pipe(p))
            .and_then(|p| p.feature_id.clone()),
        is_supply: building.is_supply(),
        category: building.category.clone(),
        heat_demand_kw: building.demand_cap_heat.map(as_kw),
        supply_capacity_kw: building.supply_capacity.map(as_kw),
    }
}
