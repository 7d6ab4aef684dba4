//! Agent scores: centrality mapped back to agent identifiers.
//!
//! [`compute_scores`] is the bridge from the graph builder to reports. It
//! materializes the adjacency matrix, runs the centrality engine, and rounds
//! each score to six decimal digits. The rounding is for stable display only;
//! it happens after convergence and never feeds back into the iteration.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::graph::{Adjacency, Agent, to_matrix};
use crate::metrics::eigenvector::{EigenvectorResult, Termination, eigenvector_centrality};

/// Decimal digits kept in reported scores.
pub const SCORE_DECIMALS: i32 = 6;

/// One agent and its centrality.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentScore {
    pub agent: Agent,
    pub score: f64,
}

/// A row of the ranked report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedAgent {
    /// 1-based position.
    pub rank: usize,
    pub agent: Agent,
    pub score: f64,
}

/// Centrality for every agent in the universe, in universe order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scores {
    entries: Vec<AgentScore>,
    iterations: usize,
    termination: Termination,
}

impl Scores {
    fn from_result(agents: &[Agent], result: &EigenvectorResult) -> Self {
        let entries = agents
            .iter()
            .zip(&result.scores)
            .map(|(agent, &score)| AgentScore {
                agent: agent.clone(),
                score: round_score(score),
            })
            .collect();

        Self {
            entries,
            iterations: result.iterations,
            termination: result.termination,
        }
    }

    /// Score for `agent`, if it is part of the universe.
    #[must_use]
    pub fn get(&self, agent: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.agent == agent)
            .map(|entry| entry.score)
    }

    /// Entries in agent-universe order.
    pub fn iter(&self) -> std::slice::Iter<'_, AgentScore> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest score, or `None` for an empty universe.
    #[must_use]
    pub fn max(&self) -> Option<f64> {
        self.entries.iter().map(|e| e.score).reduce(f64::max)
    }

    /// Power-iteration steps performed.
    #[must_use]
    pub const fn iterations(&self) -> usize {
        self.iterations
    }

    #[must_use]
    pub const fn termination(&self) -> Termination {
        self.termination
    }

    #[must_use]
    pub fn converged(&self) -> bool {
        self.termination == Termination::Converged
    }

    /// Agents sorted by descending score.
    ///
    /// Equal scores keep agent-universe order (first appearance in the log),
    /// so the ranking is fully determined by the input sequence.
    #[must_use]
    pub fn ranked(&self) -> Vec<RankedAgent> {
        let mut order: Vec<&AgentScore> = self.entries.iter().collect();
        order.sort_by(|a, b| b.score.total_cmp(&a.score));
        order
            .into_iter()
            .enumerate()
            .map(|(i, entry)| RankedAgent {
                rank: i + 1,
                agent: entry.agent.clone(),
                score: entry.score,
            })
            .collect()
    }

    /// Agent → score mapping.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<Agent, f64> {
        self.entries
            .iter()
            .map(|e| (e.agent.clone(), e.score))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Scores {
    type Item = &'a AgentScore;
    type IntoIter = std::slice::Iter<'a, AgentScore>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Compute eigenvector centrality for every agent in `agents`.
///
/// Agents with no edges still receive a score. An empty universe yields an
/// empty [`Scores`].
#[must_use]
#[instrument(skip_all, fields(agents = agents.len()))]
pub fn compute_scores(adjacency: &Adjacency, agents: &[Agent]) -> Scores {
    let (matrix, index) = to_matrix(adjacency, agents);
    let result = eigenvector_centrality(&matrix);
    let scores = Scores::from_result(index.agents(), &result);

    debug!(
        agents = scores.len(),
        iterations = scores.iterations(),
        converged = scores.converged(),
        "scores computed"
    );

    scores
}

fn round_score(score: f64) -> f64 {
    let scale = 10_f64.powi(SCORE_DECIMALS);
    (score * scale).round() / scale
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
