//! Summary statistics for a mention graph.
//!
//! # Statistics Provided
//!
//! - **agent_count / edge_count / total_weight**: size of the graph. Edges are
//!   counted once regardless of weight; `total_weight` sums the weights.
//! - **density**: `edge_count / (n * (n - 1))`. Zero for fewer than 2 agents.
//! - **component_count / largest_component_ratio**: weakly connected structure.
//! - **isolated_count**: agents with no edge in either direction.
//! - **max_in_degree / max_out_degree**: distinct mentioners / mentionees.
//! - **mutual_pair_count**: pairs that mention each other.
//! - **integration_ref_count**: messages carrying integration references.
//! - **content_hash**: BLAKE3 fingerprint of the weighted edge set.

use petgraph::Direction;
use petgraph::visit::IntoNodeIdentifiers;
use serde::Serialize;

use crate::graph::build::MentionGraph;
use crate::graph::components::{CollaborationLevel, component_ratio, connected_components};
use crate::graph::mutual::mutual_references;

/// Summary statistics for a [`MentionGraph`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    pub agent_count: usize,
    pub edge_count: usize,
    pub total_weight: u64,
    pub density: f64,
    pub component_count: usize,
    pub largest_component_ratio: f64,
    pub collaboration: CollaborationLevel,
    pub isolated_count: usize,
    pub max_in_degree: usize,
    pub max_out_degree: usize,
    pub mutual_pair_count: usize,
    pub integration_ref_count: usize,
    pub content_hash: String,
}

impl GraphStats {
    /// Compute statistics for `graph`.
    #[must_use]
    pub fn from_graph(graph: &MentionGraph) -> Self {
        let dg = graph.to_digraph();
        let agent_count = dg.node_count();
        let edge_count = dg.edge_count();

        let components = connected_components(&graph.adjacency, &graph.agents);
        let largest_component_ratio = component_ratio(&components);

        let degree = |idx, dir| dg.neighbors_directed(idx, dir).count();

        let isolated_count = dg
            .node_identifiers()
            .filter(|&idx| {
                degree(idx, Direction::Incoming) == 0 && degree(idx, Direction::Outgoing) == 0
            })
            .count();

        let max_in_degree = dg
            .node_identifiers()
            .map(|idx| degree(idx, Direction::Incoming))
            .max()
            .unwrap_or(0);

        let max_out_degree = dg
            .node_identifiers()
            .map(|idx| degree(idx, Direction::Outgoing))
            .max()
            .unwrap_or(0);

        Self {
            agent_count,
            edge_count,
            total_weight: graph.total_weight(),
            density: compute_density(agent_count, edge_count),
            component_count: components.len(),
            largest_component_ratio,
            collaboration: CollaborationLevel::from_ratio(largest_component_ratio),
            isolated_count,
            max_in_degree,
            max_out_degree,
            mutual_pair_count: mutual_references(&graph.adjacency).len(),
            integration_ref_count: graph.integration_refs.len(),
            content_hash: graph.content_hash(),
        }
    }

    /// Return `true` if nobody mentions anybody.
    #[must_use]
    pub const fn is_flat(&self) -> bool {
        self.edge_count == 0
    }
}

#[allow(clippy::cast_precision_loss)]
fn compute_density(agent_count: usize, edge_count: usize) -> f64 {
    if agent_count < 2 {
        return 0.0_f64;
    }
    let max_edges = (agent_count * (agent_count - 1)) as f64;
    edge_count as f64 / max_edges
}
