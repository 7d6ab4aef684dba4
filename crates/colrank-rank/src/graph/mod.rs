//! Mention graph module.
//!
//! # Overview
//!
//! Turns a message log into a weighted directed graph over agent identifiers
//! and derives the observational views used in reports. Everything here is a
//! pure function of the input sequence: nothing is cached or mutated across
//! calls.
//!
//! ## Pipeline
//!
//! ```text
//! [Message]
//!        ↓  scan::mentions / scan::extract_integration_section
//!        ↓  build::build_graph()
//! MentionGraph { adjacency, agents (first-appearance order), integration_refs }
//!   ├─ matrix::to_matrix()              → (AdjacencyMatrix, AgentIndex)
//!   ├─ mutual::mutual_references()      → {MutualPair}
//!   ├─ components::connected_components() / largest_component_ratio()
//!   └─ stats::GraphStats::from_graph()
//! ```
//!
//! ## Typical Usage
//!
//! ```rust,ignore
//! use colrank_rank::graph::{build_graph, connected_components, GraphStats};
//!
//! let graph = build_graph(log.messages());
//! let components = connected_components(&graph.adjacency, &graph.agents);
//! let stats = GraphStats::from_graph(&graph);
//! ```

pub mod build;
pub mod components;
pub mod matrix;
pub mod mutual;
pub mod scan;
pub mod stats;

pub use colrank_core::Agent;

// Re-export primary types at module level for convenience.
pub use build::{Adjacency, IntegrationReference, MentionGraph, build_graph};
pub use components::{
    CollaborationLevel, Component, component_ratio, connected_components, largest_component_ratio,
};
pub use matrix::{AdjacencyMatrix, AgentIndex, MatrixShapeError, to_matrix};
pub use mutual::{MutualPair, is_mutual, mutual_references};
pub use scan::{extract_integration_section, extract_mentions};
pub use stats::GraphStats;
