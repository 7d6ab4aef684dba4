#![no_main]

use colrank_core::MessageLog;
use colrank_rank::{build_graph, compute_scores};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(log) = MessageLog::parse(text) else {
        return;
    };

    let graph = build_graph(log.messages());
    let scores = compute_scores(&graph.adjacency, &graph.agents);
    assert_eq!(scores.len(), graph.agents.len());
    for entry in &scores {
        assert!((0.0..=1.0).contains(&entry.score));
    }
});
