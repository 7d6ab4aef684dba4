//! Known-topology regressions and properties for the centrality engine.
//!
//! Expected values are derived analytically from the dominant eigenvector of
//! the transposed adjacency matrix.

#![allow(clippy::float_cmp)]

use colrank_core::Message;
use colrank_rank::graph::{AdjacencyMatrix, build_graph, to_matrix};
use colrank_rank::metrics::eigenvector::{
    MAX_ITERATIONS, TOLERANCE, Termination, eigenvector_centrality,
};
use colrank_rank::score::compute_scores;
use proptest::prelude::*;

fn log(items: &[(&str, &str)]) -> Vec<Message> {
    items.iter().map(|(f, c)| Message::new(*f, *c)).collect()
}

// ---------------------------------------------------------------------------
// Protocol constants
// ---------------------------------------------------------------------------

#[test]
fn protocol_constants_are_fixed() {
    assert_eq!(TOLERANCE, 1e-6);
    assert_eq!(MAX_ITERATIONS, 1000);
}

// ---------------------------------------------------------------------------
// Known topologies
// ---------------------------------------------------------------------------

#[test]
fn end_to_end_example_scores() {
    let graph = build_graph(&log(&[
        ("Alice", "@Bob hi"),
        ("Bob", "@Alice hey @Carol help"),
        ("Carol", "@Alice @Bob ready"),
    ]));
    let scores = compute_scores(&graph.adjacency, &graph.agents);

    assert!(scores.converged());
    assert_eq!(scores.max(), Some(1.0));

    let alice = scores.get("Alice").expect("alice");
    let bob = scores.get("Bob").expect("bob");
    let carol = scores.get("Carol").expect("carol");
    assert!(alice >= bob && bob >= carol);
    // Carol = 1/φ.
    assert!((carol - 0.618_034).abs() < 1e-5);

    let ranked = scores.ranked();
    assert_eq!(ranked[0].agent, "Alice");
    assert_eq!(ranked[2].agent, "Carol");
}

#[test]
fn no_edges_gives_uniform_scores() {
    let graph = build_graph(&log(&[("A", "hi"), ("B", "hi"), ("C", "hi")]));
    let scores = compute_scores(&graph.adjacency, &graph.agents);
    assert_eq!(scores.termination(), Termination::ZeroNorm);
    for entry in &scores {
        assert_eq!(entry.score, 0.333_333);
    }
}

#[test]
fn directed_chain_collapses_to_uniform() {
    let graph = build_graph(&log(&[("A", "@B"), ("B", "@C")]));
    let scores = compute_scores(&graph.adjacency, &graph.agents);
    assert_eq!(scores.termination(), Termination::ZeroNorm);
    assert_eq!(scores.get("A"), scores.get("C"));
}

#[test]
fn weights_shift_importance() {
    // Hub ⇄ A and Hub ⇄ B, plus A → B: B gets weight from both others.
    let graph = build_graph(&log(&[
        ("Hub", "@A @B"),
        ("A", "@Hub @B"),
        ("B", "@Hub"),
        ("B", "@Hub"),
    ]));
    let scores = compute_scores(&graph.adjacency, &graph.agents);
    assert!(scores.converged());
    assert_eq!(scores.get("Hub"), Some(1.0));
    assert!(scores.get("B") > scores.get("A"));
}

#[test]
fn matrix_index_order_matches_universe() {
    let graph = build_graph(&log(&[("Zed", "@Amy"), ("Amy", "@Zed")]));
    let (matrix, index) = to_matrix(&graph.adjacency, &graph.agents);
    assert_eq!(index.agents(), ["Zed", "Amy"]);
    assert_eq!(matrix.get(0, 1), 1.0);
    assert_eq!(matrix.get(1, 0), 1.0);
    assert_eq!(matrix.get(0, 0), 0.0);
}

#[test]
fn periodic_graph_stops_at_iteration_cap() {
    let matrix = AdjacencyMatrix::from_rows(&[
        vec![0.0, 1.0, 1.0],
        vec![1.0, 0.0, 0.0],
        vec![1.0, 0.0, 0.0],
    ])
    .expect("square");
    let result = eigenvector_centrality(&matrix);
    assert_eq!(result.termination, Termination::IterationCap);
    assert_eq!(result.iterations, MAX_ITERATIONS);
    assert!(!result.converged());
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

const NAMES: [&str; 5] = ["ada", "bo", "cy", "dee", "eli"];

fn arb_log() -> impl Strategy<Value = Vec<Message>> {
    prop::collection::vec(
        (0..NAMES.len(), prop::collection::vec(0..NAMES.len(), 0..4)),
        0..20,
    )
    .prop_map(|items| {
        items
            .into_iter()
            .map(|(from, to)| {
                let content: Vec<String> = to.iter().map(|&i| format!("@{}", NAMES[i])).collect();
                Message::new(NAMES[from], content.join(" "))
            })
            .collect()
    })
}

/// A log that always contains the cycle ada → bo → ada.
fn arb_log_with_cycle() -> impl Strategy<Value = Vec<Message>> {
    arb_log().prop_map(|mut messages| {
        messages.push(Message::new("ada", "@bo"));
        messages.push(Message::new("bo", "@ada"));
        messages
    })
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(128))]

    #[test]
    fn scores_are_bit_identical_across_runs(messages in arb_log()) {
        let graph = build_graph(&messages);
        let a = compute_scores(&graph.adjacency, &graph.agents);
        let b = compute_scores(&graph.adjacency, &graph.agents);
        let bits = |s: &colrank_rank::Scores| -> Vec<u64> {
            s.iter().map(|e| e.score.to_bits()).collect()
        };
        prop_assert_eq!(bits(&a), bits(&b));
        prop_assert_eq!(a.ranked(), b.ranked());
    }

    #[test]
    fn scores_within_unit_interval(messages in arb_log()) {
        let graph = build_graph(&messages);
        let scores = compute_scores(&graph.adjacency, &graph.agents);
        prop_assert_eq!(scores.len(), graph.agents.len());
        for entry in &scores {
            prop_assert!((0.0..=1.0).contains(&entry.score), "{} = {}", entry.agent, entry.score);
        }
    }

    #[test]
    fn max_is_one_when_a_cycle_exists(messages in arb_log_with_cycle()) {
        let graph = build_graph(&messages);
        let scores = compute_scores(&graph.adjacency, &graph.agents);
        prop_assert_eq!(scores.max(), Some(1.0));
    }

    #[test]
    fn ranking_is_sorted_descending(messages in arb_log()) {
        let graph = build_graph(&messages);
        let ranked = compute_scores(&graph.adjacency, &graph.agents).ranked();
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
            prop_assert_eq!(pair[0].rank + 1, pair[1].rank);
        }
    }
}
