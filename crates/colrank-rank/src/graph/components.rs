//! Connected components of the mention graph (edges treated as undirected).
//!
//! Components partition the agent universe. They are emitted in the order
//! their seed agent first appears in the universe, and each component lists
//! its members in universe order, so the result does not depend on traversal
//! order. Traversal uses an explicit stack; no recursion.

use petgraph::graph::NodeIndex;
use serde::Serialize;
use tracing::instrument;

use crate::graph::Agent;
use crate::graph::build::{Adjacency, to_digraph};

/// A maximal set of agents connected through mentions in either direction.
pub type Component = Vec<Agent>;

/// Connected components over `agents`, treating every edge as undirected.
///
/// An agent with no edges forms a singleton component.
#[must_use]
#[instrument(skip_all, fields(agents = agents.len()))]
pub fn connected_components(adjacency: &Adjacency, agents: &[Agent]) -> Vec<Component> {
    let graph = to_digraph(adjacency, agents);
    let n = graph.node_count();
    let mut visited = vec![false; n];
    let mut components = Vec::new();

    for seed in 0..n {
        if visited[seed] {
            continue;
        }

        let mut members: Vec<usize> = Vec::new();
        let mut stack = vec![NodeIndex::new(seed)];
        visited[seed] = true;

        while let Some(node) = stack.pop() {
            members.push(node.index());
            for neighbor in graph.neighbors_undirected(node) {
                if !visited[neighbor.index()] {
                    visited[neighbor.index()] = true;
                    stack.push(neighbor);
                }
            }
        }

        members.sort_unstable();
        components.push(
            members
                .into_iter()
                .map(|i| graph[NodeIndex::new(i)].clone())
                .collect(),
        );
    }

    components
}

/// Size of the largest component divided by the number of agents.
///
/// `0.0` for an empty universe; otherwise in `[1/n, 1.0]`.
#[must_use]
pub fn largest_component_ratio(adjacency: &Adjacency, agents: &[Agent]) -> f64 {
    component_ratio(&connected_components(adjacency, agents))
}

/// [`largest_component_ratio`] over an already computed partition.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn component_ratio(components: &[Component]) -> f64 {
    let total: usize = components.iter().map(Vec::len).sum();
    if total == 0 {
        return 0.0;
    }
    let largest = components.iter().map(Vec::len).max().unwrap_or(0);
    largest as f64 / total as f64
}

/// Coarse reading of [`largest_component_ratio`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CollaborationLevel {
    /// One component spans every agent.
    Full,
    /// The largest component holds more than half of the agents.
    Emerging,
    /// Everything else, including an empty universe.
    Fragmented,
}

impl CollaborationLevel {
    /// Classify a largest-component ratio.
    #[must_use]
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= 1.0 {
            Self::Full
        } else if ratio > 0.5 {
            Self::Emerging
        } else {
            Self::Fragmented
        }
    }

    /// One-line description for reports.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Full => "Full collaboration (all agents connected)",
            Self::Emerging => "Emerging collaboration",
            Self::Fragmented => "Fragmented (low collaboration)",
        }
    }
}
