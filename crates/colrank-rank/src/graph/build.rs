//! Mention graph construction from a message sequence.
//!
//! # Edge Rule
//!
//! An edge `a → b` exists when a message sent by `a` mentions `@b`. Its
//! weight is the number of *messages* from `a` that mention `b` at least
//! once: repeating `@b` inside one message still counts once. A sender
//! mentioning itself never creates an edge.
//!
//! # Agent Universe
//!
//! Every sender and every mentioned identifier is an agent. The universe is
//! kept in first-appearance order across the log (the sender of a message
//! appears before the identifiers it mentions). That order is the only
//! authority for matrix positions and component emission order, so it is
//! built once here and passed explicitly to everything downstream.
//!
//! # Integration References
//!
//! Mentions inside integration sections (see [`crate::graph::scan`]) are
//! recorded per message as [`IntegrationReference`]s. They are observational
//! and never feed edge weights.

#![allow(clippy::module_name_repetitions)]

use std::collections::{BTreeMap, HashSet};

use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use tracing::{debug, instrument};

use colrank_core::Message;

use crate::graph::Agent;
use crate::graph::matrix::AgentIndex;
use crate::graph::scan::{extract_integration_section, mentions};

/// Sender → (mentioned agent → weight). No agent maps to itself.
///
/// Outer keys are exactly the agents that mention someone else.
pub type Adjacency = BTreeMap<Agent, BTreeMap<Agent, u32>>;

/// Mentions a message made inside its integration sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntegrationReference {
    pub from: Agent,
    pub references: Vec<Agent>,
}

/// A weighted directed mention graph plus its observational side data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MentionGraph {
    /// Weighted edges.
    pub adjacency: Adjacency,
    /// All agents, first-appearance order, no duplicates.
    pub agents: Vec<Agent>,
    /// Integration references in message order.
    pub integration_refs: Vec<IntegrationReference>,
}

/// Build a [`MentionGraph`] from messages in log order.
#[must_use]
pub fn build_graph<'a, I>(messages: I) -> MentionGraph
where
    I: IntoIterator<Item = &'a Message>,
{
    MentionGraph::build(messages)
}

impl MentionGraph {
    /// Build the graph from messages in log order.
    #[instrument(skip(messages))]
    pub fn build<'a, I>(messages: I) -> Self
    where
        I: IntoIterator<Item = &'a Message>,
    {
        let mut adjacency = Adjacency::new();
        let mut agents: Vec<Agent> = Vec::new();
        let mut seen: HashSet<Agent> = HashSet::new();
        let mut integration_refs = Vec::new();
        let mut message_count = 0usize;

        let mut admit = |agent: &str, agents: &mut Vec<Agent>| {
            if !seen.contains(agent) {
                seen.insert(agent.to_owned());
                agents.push(agent.to_owned());
            }
        };

        for msg in messages {
            message_count += 1;
            let sender = msg.from.as_str();
            admit(sender, &mut agents);

            // Dedupe within the message, keeping first-occurrence order.
            let mut mentioned: Vec<&str> = Vec::new();
            for name in mentions(&msg.content) {
                if name != sender && !mentioned.contains(&name) {
                    mentioned.push(name);
                }
            }

            for name in mentioned {
                admit(name, &mut agents);
                *adjacency
                    .entry(sender.to_owned())
                    .or_default()
                    .entry(name.to_owned())
                    .or_insert(0) += 1;
            }

            let references = extract_integration_section(&msg.content);
            if !references.is_empty() {
                integration_refs.push(IntegrationReference {
                    from: sender.to_owned(),
                    references,
                });
            }
        }

        let graph = Self {
            adjacency,
            agents,
            integration_refs,
        };
        debug!(
            messages = message_count,
            agents = graph.agents.len(),
            edges = graph.edge_count(),
            "built mention graph"
        );
        graph
    }

    /// Number of distinct agents.
    #[must_use]
    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    /// Number of distinct directed edges (ignoring weight).
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeMap::len).sum()
    }

    /// Sum of all edge weights.
    #[must_use]
    pub fn total_weight(&self) -> u64 {
        self.adjacency
            .values()
            .flat_map(BTreeMap::values)
            .map(|&w| u64::from(w))
            .sum()
    }

    /// Weight of `from → to`, or 0 when absent.
    #[must_use]
    pub fn weight(&self, from: &str, to: &str) -> u32 {
        self.adjacency
            .get(from)
            .and_then(|targets| targets.get(to))
            .copied()
            .unwrap_or(0)
    }

    /// All edges as `(from, to, weight)`, ordered by the agent universe
    /// position of `from`, then of `to`.
    #[must_use]
    pub fn edges(&self) -> Vec<(&str, &str, u32)> {
        let index = AgentIndex::new(&self.agents);
        let mut edges: Vec<(&str, &str, u32)> = self
            .adjacency
            .iter()
            .flat_map(|(from, targets)| {
                targets
                    .iter()
                    .map(move |(to, &w)| (from.as_str(), to.as_str(), w))
            })
            .collect();
        edges.sort_by_key(|&(from, to, _)| {
            (
                index.position(from).unwrap_or(usize::MAX),
                index.position(to).unwrap_or(usize::MAX),
            )
        });
        edges
    }

    /// BLAKE3 fingerprint of the weighted edge set.
    ///
    /// Independent of message order; changes only when an edge or a weight
    /// changes.
    #[must_use]
    pub fn content_hash(&self) -> String {
        compute_edge_hash(&self.adjacency)
    }

    /// A petgraph view where `NodeIndex::new(i)` is `self.agents[i]`.
    #[must_use]
    pub fn to_digraph(&self) -> DiGraph<Agent, u32> {
        to_digraph(&self.adjacency, &self.agents)
    }
}

/// Materialise `adjacency` as a petgraph [`DiGraph`] over `agents`.
///
/// Node `i` carries `agents[i]`. Edges touching an agent outside `agents`,
/// and self-loops, are skipped.
#[must_use]
pub fn to_digraph(adjacency: &Adjacency, agents: &[Agent]) -> DiGraph<Agent, u32> {
    let index = AgentIndex::new(agents);
    let mut graph = DiGraph::<Agent, u32>::with_capacity(index.len(), 0);
    for agent in index.agents() {
        graph.add_node(agent.clone());
    }

    for (from, targets) in adjacency {
        let Some(i) = index.position(from) else {
            continue;
        };
        for (to, &weight) in targets {
            match index.position(to) {
                Some(j) if j != i => {
                    graph.add_edge(NodeIndex::new(i), NodeIndex::new(j), weight);
                }
                _ => {}
            }
        }
    }
    graph
}

fn compute_edge_hash(adjacency: &Adjacency) -> String {
    let mut hasher = blake3::Hasher::new();
    for (from, targets) in adjacency {
        for (to, weight) in targets {
            hasher.update(from.as_bytes());
            hasher.update(b"\x00");
            hasher.update(to.as_bytes());
            hasher.update(b"\x00");
            hasher.update(&weight.to_le_bytes());
        }
    }
    format!("blake3:{}", hasher.finalize())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
