//! Graph builder regressions over hand-written logs, plus proptest
//! properties over generated ones.

use colrank_core::Message;
use colrank_rank::graph::{
    CollaborationLevel, GraphStats, MutualPair, build_graph, connected_components,
    largest_component_ratio, mutual_references,
};
use proptest::prelude::*;

fn log(items: &[(&str, &str)]) -> Vec<Message> {
    items.iter().map(|(f, c)| Message::new(*f, *c)).collect()
}

// ---------------------------------------------------------------------------
// Known logs
// ---------------------------------------------------------------------------

#[test]
fn end_to_end_example_edges() {
    let graph = build_graph(&log(&[
        ("Alice", "@Bob hi"),
        ("Bob", "@Alice hey @Carol help"),
        ("Carol", "@Alice @Bob ready"),
    ]));

    assert_eq!(graph.agents, vec!["Alice", "Bob", "Carol"]);
    assert_eq!(
        graph.edges(),
        vec![
            ("Alice", "Bob", 1),
            ("Bob", "Alice", 1),
            ("Bob", "Carol", 1),
            ("Carol", "Alice", 1),
            ("Carol", "Bob", 1),
        ]
    );

    let components = connected_components(&graph.adjacency, &graph.agents);
    assert_eq!(components, vec![vec!["Alice", "Bob", "Carol"]]);
    assert!((largest_component_ratio(&graph.adjacency, &graph.agents) - 1.0).abs() < 1e-12);

    let mutual = mutual_references(&graph.adjacency);
    assert_eq!(mutual.len(), 1);
    assert!(mutual.contains(&MutualPair::new("Alice", "Bob")));
}

#[test]
fn repeated_mention_in_one_message_counts_once() {
    let graph = build_graph(&log(&[("A", "@B @B @B"), ("A", "@B again")]));
    assert_eq!(graph.weight("A", "B"), 2);
}

#[test]
fn self_mentions_add_no_edge() {
    let graph = build_graph(&log(&[("A", "I am @A, ask @B")]));
    assert_eq!(graph.weight("A", "A"), 0);
    assert_eq!(graph.weight("A", "B"), 1);
    assert_eq!(graph.agents, vec!["A", "B"]);
}

#[test]
fn mentioned_but_silent_agent_joins_universe() {
    let graph = build_graph(&log(&[("A", "ping @Ghost")]));
    assert_eq!(graph.agents, vec!["A", "Ghost"]);
    assert!(graph.adjacency.get("Ghost").is_none());
}

#[test]
fn integration_section_is_recorded_without_extra_weight() {
    let graph = build_graph(&log(&[
        ("Dana", "Plan ready.\nIntegration:\n- @Eve parser\n- @Finn docs\n\n\n@Gus fyi"),
    ]));
    assert_eq!(graph.integration_refs.len(), 1);
    assert_eq!(graph.integration_refs[0].from, "Dana");
    assert_eq!(graph.integration_refs[0].references, vec!["Eve", "Finn"]);
    // Section mentions are still ordinary mentions, counted once.
    assert_eq!(graph.weight("Dana", "Eve"), 1);
    assert_eq!(graph.weight("Dana", "Gus"), 1);
}

#[test]
fn fragmented_team_stats() {
    let graph = build_graph(&log(&[
        ("A", "@B"),
        ("C", "@D"),
        ("E", "alone"),
        ("F", "alone"),
    ]));
    let stats = GraphStats::from_graph(&graph);
    assert_eq!(stats.agent_count, 6);
    assert_eq!(stats.component_count, 4);
    assert_eq!(stats.isolated_count, 2);
    assert_eq!(stats.collaboration, CollaborationLevel::Fragmented);
}

#[test]
fn content_hash_ignores_universe_order_but_not_weights() {
    let a = build_graph(&log(&[("A", "@B"), ("B", "@A")]));
    let b = build_graph(&log(&[("B", "@A"), ("A", "@B")]));
    let c = build_graph(&log(&[("B", "@A"), ("A", "@B"), ("A", "@B")]));
    assert_eq!(a.content_hash(), b.content_hash());
    assert_ne!(a.content_hash(), c.content_hash());
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

const NAMES: [&str; 6] = ["ada", "bo", "cy", "dee", "eli", "fox"];

fn arb_message() -> impl Strategy<Value = Message> {
    (
        0..NAMES.len(),
        prop::collection::vec((0..NAMES.len(), "[ a-z.,!?]{0,6}"), 0..5),
    )
        .prop_map(|(from, parts)| {
            let content: String = parts
                .into_iter()
                .map(|(to, filler)| format!("@{} {filler}", NAMES[to]))
                .collect();
            Message::new(NAMES[from], content)
        })
}

fn arb_log() -> impl Strategy<Value = Vec<Message>> {
    prop::collection::vec(arb_message(), 0..24)
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(256))]

    #[test]
    fn no_self_loops(messages in arb_log()) {
        let graph = build_graph(&messages);
        for (from, targets) in &graph.adjacency {
            prop_assert!(!targets.contains_key(from));
        }
    }

    #[test]
    fn weight_bounded_by_sender_message_count(messages in arb_log()) {
        let graph = build_graph(&messages);
        for (from, to, weight) in graph.edges() {
            let sent = messages.iter().filter(|m| m.from == from).count();
            prop_assert!(weight >= 1);
            prop_assert!(weight as usize <= sent, "{from}->{to} = {weight} > {sent}");
        }
    }

    #[test]
    fn every_edge_endpoint_is_in_universe(messages in arb_log()) {
        let graph = build_graph(&messages);
        for (from, to, _) in graph.edges() {
            prop_assert!(graph.agents.iter().any(|a| a == from));
            prop_assert!(graph.agents.iter().any(|a| a == to));
        }
    }

    #[test]
    fn mutual_pairs_are_symmetric(messages in arb_log()) {
        let graph = build_graph(&messages);
        for pair in mutual_references(&graph.adjacency) {
            prop_assert!(graph.weight(&pair.a, &pair.b) > 0);
            prop_assert!(graph.weight(&pair.b, &pair.a) > 0);
            prop_assert!(pair.a < pair.b);
        }
    }

    #[test]
    fn components_partition_universe(messages in arb_log()) {
        let graph = build_graph(&messages);
        let components = connected_components(&graph.adjacency, &graph.agents);
        let mut members: Vec<&String> = components.iter().flatten().collect();
        members.sort();
        let mut universe: Vec<&String> = graph.agents.iter().collect();
        universe.sort();
        prop_assert_eq!(members, universe);
    }

    #[test]
    fn ratio_is_one_only_for_a_single_component(messages in arb_log()) {
        let graph = build_graph(&messages);
        let ratio = largest_component_ratio(&graph.adjacency, &graph.agents);
        if graph.agents.is_empty() {
            prop_assert!(ratio.abs() < f64::EPSILON);
        } else {
            #[allow(clippy::cast_precision_loss)]
            let floor = 1.0 / graph.agents.len() as f64;
            prop_assert!(ratio >= floor - 1e-12 && ratio <= 1.0);

            let components = connected_components(&graph.adjacency, &graph.agents);
            let spans_everyone = (ratio - 1.0).abs() < f64::EPSILON;
            prop_assert_eq!(spans_everyone, components.len() == 1);
        }
    }

    #[test]
    fn build_is_deterministic(messages in arb_log()) {
        let a = build_graph(&messages);
        let b = build_graph(&messages);
        prop_assert_eq!(a, b);
    }
}
