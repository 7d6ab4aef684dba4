//! Centrality metrics for the mention graph.
//!
//! # Overview
//!
//! Only one metric is defined: directed eigenvector centrality
//! (`eigenvector`), which answers "which agents are mentioned by other
//! highly-mentioned agents?". It operates on the dense
//! [`AdjacencyMatrix`](crate::graph::AdjacencyMatrix) and returns scores
//! aligned with the matrix rows.
//!
//! ```rust,ignore
//! use colrank_rank::graph::to_matrix;
//! use colrank_rank::metrics::eigenvector::eigenvector_centrality;
//!
//! let (matrix, index) = to_matrix(&graph.adjacency, &graph.agents);
//! let ev = eigenvector_centrality(&matrix);
//! ```

pub mod eigenvector;

pub use eigenvector::{
    EigenvectorResult, MAX_ITERATIONS, TOLERANCE, Termination, eigenvector_centrality,
};
