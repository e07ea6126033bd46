//! Serializable summary of a built network.

use dh_core::StageTimings;
use dh_graph::{BuildingDiagnostics, Network, PipeDiagnostics};
use serde::{Deserialize, Serialize};

/// Entity counts of a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NetworkCounts {
    pub pipes: usize,
    pub buildings: usize,
    pub connectors: usize,
    pub links: usize,
    pub nodes: usize,
    pub forks: usize,
}

/// A node where three or more link pipes meet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForkSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub x: f64,
    pub y: f64,
    pub links: usize,
}

/// Counts, forks and diagnostics, keyed the way downstream tools expect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkReport {
    pub counts: NetworkCounts,
    pub forks: Vec<ForkSummary>,
    #[serde(flatten)]
    pub pipes: PipeDiagnostics<String>,
    #[serde(flatten)]
    pub buildings: BuildingDiagnostics<String>,
    #[serde(default)]
    pub timings: StageTimings,
}

impl NetworkReport {
    pub fn from_network(network: &Network) -> Self {
        let counts = NetworkCounts {
            pipes: network.all_pipes().len(),
            buildings: network.all_buildings().len(),
            connectors: network.connector_ids().len(),
            links: network.link_ids().len(),
            nodes: network.all_nodes().len(),
            forks: network.fork_ids().len(),
        };
        let forks = network
            .forks()
            .map(|node| ForkSummary {
                label: node.label.clone(),
                x: node.coord.x,
                y: node.coord.y,
                links: node.link_count,
            })
            .collect();

        Self {
            counts,
            forks,
            pipes: network.problematic_pipe_ids(),
            buildings: network.problematic_building_ids(),
            timings: network.timings(),
        }
    }

    /// Whether any data-quality problem was found.
    pub fn has_problems(&self) -> bool {
        !self.pipes.is_empty() || !self.buildings.is_empty()
    }

    /// Human-readable rendering for terminals.
    pub fn to_text(&self) -> String {
        let c = &self.counts;
        let mut out = String::new();
        out.push_str(&format!(
            "pipes:      {} ({} connectors, {} links)\n",
            c.pipes, c.connectors, c.links
        ));
        out.push_str(&format!("buildings:  {}\n", c.buildings));
        out.push_str(&format!("nodes:      {} ({} forks)\n", c.nodes, c.forks));
        for fork in &self.forks {
            let label = fork.label.as_deref().unwrap_or("-");
            out.push_str(&format!(
                "  fork {label} at ({}, {}) with {} links\n",
                fork.x, fork.y, fork.links
            ));
        }

        let sections = [
            ("pipes with multiple connected buildings", &self.pipes.with_multiple_buildings),
            ("buildings without connector", &self.buildings.without_connector),
            ("buildings with multiple connectors", &self.buildings.with_multiple_connectors),
            ("contested", &self.buildings.contested),
        ];
        for (title, ids) in sections {
            if ids.is_empty() {
                continue;
            }
            out.push_str(&format!("{title} ({}):\n", ids.len()));
            for id in ids {
                out.push_str(&format!("  {id}\n"));
            }
        }
        out
    }
}
