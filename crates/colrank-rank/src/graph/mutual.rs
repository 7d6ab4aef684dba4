//! Mutual references: pairs of agents that mention each other.
//!
//! Observational only. Each unordered pair is reported once.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::graph::Agent;
use crate::graph::build::Adjacency;

/// An unordered pair `{a, b}` with edges `a → b` and `b → a`.
///
/// Stored with the lexicographically smaller agent first, so `(a, b)` and
/// `(b, a)` construct the same value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MutualPair {
    pub a: Agent,
    pub b: Agent,
}

impl MutualPair {
    #[must_use]
    pub fn new(x: impl Into<Agent>, y: impl Into<Agent>) -> Self {
        let (x, y) = (x.into(), y.into());
        if x <= y { Self { a: x, b: y } } else { Self { a: y, b: x } }
    }

    /// True if `agent` is one side of the pair.
    #[must_use]
    pub fn involves(&self, agent: &str) -> bool {
        self.a == agent || self.b == agent
    }
}

/// True when both `a → b` and `b → a` exist.
#[must_use]
pub fn is_mutual(adjacency: &Adjacency, a: &str, b: &str) -> bool {
    let has = |from: &str, to: &str| adjacency.get(from).is_some_and(|t| t.contains_key(to));
    has(a, b) && has(b, a)
}

/// Every mutual pair in `adjacency`.
#[must_use]
pub fn mutual_references(adjacency: &Adjacency) -> BTreeSet<MutualPair> {
    adjacency
        .iter()
        .flat_map(|(a, targets)| targets.keys().map(move |b| (a, b)))
        .filter(|(a, b)| a < b && is_mutual(adjacency, a, b))
        .map(|(a, b)| MutualPair::new(a.as_str(), b.as_str()))
        .collect()
}
