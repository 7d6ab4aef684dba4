#![forbid(unsafe_code)]
//! colrank-rank library.
//!
//! Builds the mention graph from a message log and ranks agents by directed
//! eigenvector centrality.
//!
//! # Conventions
//!
//! - **Errors**: Graph construction and scoring are total; the only fallible
//!   entry point is [`graph::AdjacencyMatrix::from_rows`].
//! - **Logging**: Use `tracing` macros (`debug!`, `trace!`). Nothing in this
//!   crate logs above `debug`.
//! - **Determinism**: Iteration order is fixed everywhere (`BTreeMap`, agent
//!   universe order). Identical input yields bit-identical scores.

pub mod graph;
pub mod metrics;
pub mod score;

pub use graph::{MentionGraph, build_graph};
pub use score::{AgentScore, RankedAgent, Scores, compute_scores};
