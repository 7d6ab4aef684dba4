//! Directed eigenvector centrality via power iteration.
//!
//! # Overview
//!
//! An agent is important when important agents mention it. Scores are the
//! dominant eigenvector of the **transposed** adjacency matrix, so a node's
//! score is fed by its incoming edges: `score(i) = Σ_j w(j → i) · score(j)`.
//!
//! # Protocol
//!
//! The numeric procedure is fixed. Changing any constant or step defines a
//! different, incompatible ranking:
//!
//! 1. `n = 0` → empty result.
//! 2. `T = Aᵀ`; start from the uniform vector `1/n`.
//! 3. Up to [`MAX_ITERATIONS`] times:
//!    - `next = T · scores`
//!    - if `‖next‖₂ = 0`, stop and return the uniform vector `1/n`
//!    - `next /= ‖next‖₂`
//!    - `delta = ‖next − scores‖₁`; `scores = next`; stop if `delta <` [`TOLERANCE`]
//! 4. Divide by the maximum entry so the top score is exactly `1.0`.
//!
//! Normalisation uses L2 and the convergence test uses L1. Hitting the
//! iteration cap is not an error; the last iterate is used as-is.
//!
//! # Output
//!
//! An [`EigenvectorResult`] whose `scores` are index-aligned with the rows of
//! the input matrix.

use nalgebra::DVector;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::graph::matrix::AdjacencyMatrix;

/// Convergence threshold on the L1 change between successive iterates.
pub const TOLERANCE: f64 = 1e-6;

/// Hard cap on power-iteration steps.
pub const MAX_ITERATIONS: usize = 1000;

/// Why the iteration stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// Zero-size matrix; no iteration ran.
    Empty,
    /// L1 change fell below [`TOLERANCE`].
    Converged,
    /// An iterate had zero L2 norm; scores fell back to uniform.
    ZeroNorm,
    /// [`MAX_ITERATIONS`] reached without converging.
    IterationCap,
}

/// Result of eigenvector centrality computation.
#[derive(Debug, Clone, PartialEq)]
pub struct EigenvectorResult {
    /// Scores aligned with matrix rows.
    pub scores: Vec<f64>,
    /// Number of iterations performed.
    pub iterations: usize,
    /// How the loop ended.
    pub termination: Termination,
}

impl EigenvectorResult {
    /// Whether the iterate converged within [`MAX_ITERATIONS`].
    #[must_use]
    pub fn converged(&self) -> bool {
        matches!(self.termination, Termination::Converged)
    }
}

/// Compute directed eigenvector centrality for `matrix`.
#[must_use]
#[instrument(skip(matrix), fields(n = matrix.dim()))]
#[allow(clippy::cast_precision_loss)]
pub fn eigenvector_centrality(matrix: &AdjacencyMatrix) -> EigenvectorResult {
    let n = matrix.dim();

    if n == 0 {
        return EigenvectorResult {
            scores: Vec::new(),
            iterations: 0,
            termination: Termination::Empty,
        };
    }

    // Incoming weight: transposed[(i, j)] = w(j → i).
    let transposed = matrix.as_matrix().transpose();
    let uniform = 1.0 / n as f64;
    let mut scores = DVector::from_element(n, uniform);

    let mut iterations = 0;
    let mut termination = Termination::IterationCap;

    for iter in 0..MAX_ITERATIONS {
        iterations = iter + 1;

        let mut next = &transposed * &scores;

        let norm = next.norm();
        if norm <= 0.0 {
            debug!(iterations, "zero-norm iterate; returning uniform scores");
            return EigenvectorResult {
                scores: vec![uniform; n],
                iterations,
                termination: Termination::ZeroNorm,
            };
        }
        next /= norm;

        let delta: f64 = next
            .iter()
            .zip(scores.iter())
            .map(|(a, b)| (a - b).abs())
            .sum();

        scores = next;

        if delta < TOLERANCE {
            termination = Termination::Converged;
            break;
        }
    }

    if termination == Termination::IterationCap {
        debug!(iterations, "iteration cap reached; using last iterate");
    }

    let max = scores.max();
    if max > 0.0 {
        scores /= max;
    }

    debug!(iterations, ?termination, "eigenvector centrality computed");

    EigenvectorResult {
        scores: scores.iter().copied().collect(),
        iterations,
        termination,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
