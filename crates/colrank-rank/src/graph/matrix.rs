//! Dense adjacency matrix materialisation.
//!
//! [`AgentIndex`] maps agents to dense positions `0..n` in agent-universe
//! order. It is the sole authority for what a matrix row or column means:
//! `matrix[(i, j)]` is the weight of `index.agent(i) → index.agent(j)`.

use std::collections::HashMap;

use nalgebra::DMatrix;
use tracing::{instrument, trace};

use crate::graph::Agent;
use crate::graph::build::Adjacency;

// ---------------------------------------------------------------------------
// AgentIndex
// ---------------------------------------------------------------------------

/// Bijection between agents and dense matrix positions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentIndex {
    agents: Vec<Agent>,
    positions: HashMap<Agent, usize>,
}

impl AgentIndex {
    /// Index `agents` in order. A repeated agent keeps its first position.
    #[must_use]
    pub fn new(agents: &[Agent]) -> Self {
        let mut index = Self {
            agents: Vec::with_capacity(agents.len()),
            positions: HashMap::with_capacity(agents.len()),
        };
        for agent in agents {
            if !index.positions.contains_key(agent) {
                index.positions.insert(agent.clone(), index.agents.len());
                index.agents.push(agent.clone());
            }
        }
        index
    }

    #[must_use]
    pub fn position(&self, agent: &str) -> Option<usize> {
        self.positions.get(agent).copied()
    }

    #[must_use]
    pub fn agent(&self, position: usize) -> Option<&str> {
        self.agents.get(position).map(String::as_str)
    }

    /// Agents in position order.
    #[must_use]
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

// ---------------------------------------------------------------------------
// AdjacencyMatrix
// ---------------------------------------------------------------------------

/// Errors from building an [`AdjacencyMatrix`] out of caller-supplied rows.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MatrixShapeError {
    /// A row's length differs from the number of rows.
    #[error("adjacency matrix must be square: row {row} has {len} entries, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },

    /// A weight is negative, NaN, or infinite.
    #[error("invalid edge weight {value} at ({row}, {col})")]
    InvalidWeight { row: usize, col: usize, value: f64 },
}

/// A square, non-negative weight matrix. Row = source, column = target.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjacencyMatrix {
    inner: DMatrix<f64>,
}

impl AdjacencyMatrix {
    /// An `n × n` matrix of zeros.
    #[must_use]
    pub fn zeros(n: usize) -> Self {
        Self {
            inner: DMatrix::zeros(n, n),
        }
    }

    /// Build from row-major rows, validating shape and weights.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixShapeError`] if the rows are ragged or non-square, or
    /// if any entry is negative or not finite.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, MatrixShapeError> {
        let n = rows.len();
        for (row, values) in rows.iter().enumerate() {
            if values.len() != n {
                return Err(MatrixShapeError::NotSquare {
                    row,
                    len: values.len(),
                    expected: n,
                });
            }
            if let Some((col, &value)) = values
                .iter()
                .enumerate()
                .find(|&(_, &v)| !v.is_finite() || v < 0.0)
            {
                return Err(MatrixShapeError::InvalidWeight { row, col, value });
            }
        }

        Ok(Self {
            inner: DMatrix::from_fn(n, n, |i, j| rows[i][j]),
        })
    }

    /// Number of rows (= columns).
    #[must_use]
    pub fn dim(&self) -> usize {
        self.inner.nrows()
    }

    /// Weight of edge `i → j`.
    ///
    /// # Panics
    ///
    /// Panics if `i` or `j` is out of bounds.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.inner[(i, j)]
    }

    /// True when every entry is zero.
    #[must_use]
    pub fn is_edgeless(&self) -> bool {
        self.inner.iter().all(|&w| w == 0.0)
    }

    #[must_use]
    pub const fn as_matrix(&self) -> &DMatrix<f64> {
        &self.inner
    }

    /// Row-major copy, mainly for display and tests.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.inner
            .row_iter()
            .map(|row| row.iter().copied().collect())
            .collect()
    }
}

/// Materialise `adjacency` as a dense matrix over `agents`.
///
/// Entries that reference an agent outside `agents`, and self-loops, are
/// skipped so the result is always square with a zero diagonal.
#[must_use]
#[instrument(skip_all, fields(agents = agents.len()))]
pub fn to_matrix(adjacency: &Adjacency, agents: &[Agent]) -> (AdjacencyMatrix, AgentIndex) {
    let index = AgentIndex::new(agents);
    let mut matrix = AdjacencyMatrix::zeros(index.len());

    for (from, targets) in adjacency {
        let Some(i) = index.position(from) else {
            trace!(agent = %from, "skipping source outside agent universe");
            continue;
        };
        for (to, &weight) in targets {
            match index.position(to) {
                Some(j) if j != i => matrix.inner[(i, j)] = f64::from(weight),
                _ => trace!(from = %from, to = %to, "skipping edge entry"),
            }
        }
    }

    (matrix, index)
}
