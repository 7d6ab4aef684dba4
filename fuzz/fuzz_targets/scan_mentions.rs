#![no_main]

use colrank_core::Message;
use colrank_rank::build_graph;
use colrank_rank::graph::scan::{extract_integration_section, mentions, sections};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    for name in mentions(text) {
        assert!(!name.is_empty());
    }
    for section in sections(text) {
        assert!(text.contains(section.body));
    }
    let _ = extract_integration_section(text);

    let graph = build_graph(&[Message::new("fuzzer", text)]);
    assert!(graph.adjacency.get("fuzzer").is_none_or(|t| !t.contains_key("fuzzer")));
});
