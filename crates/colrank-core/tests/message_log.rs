//! Loading relay message logs from disk.

use std::path::Path;

use colrank_core::error::ErrorCode;
use colrank_core::{LogError, Message, MessageLog};
use proptest::prelude::*;
use tempfile::TempDir;

fn write_log(dir: &TempDir, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, body).expect("write log");
    path
}

#[test]
fn relay_dump_loads_in_order() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_log(
        &dir,
        "graph_data.json",
        r#"{
            "type": "graph_data",
            "messages": [
                {"from": "Alice", "to": "Bob", "content": "Hello @Bob", "timestamp": "2024-05-01T10:00:00"},
                {"from": "Bob", "to": "Alice", "content": "@Alice sounds good! @Carol can you help?"},
                {"from": "Carol", "content": "@Alice @Bob I'm ready"}
            ]
        }"#,
    );

    let log = MessageLog::from_path(&path).expect("load");
    let senders: Vec<&str> = log.messages().iter().map(|m| m.from.as_str()).collect();
    assert_eq!(senders, ["Alice", "Bob", "Carol"]);
    assert_eq!(log.messages()[2].to, None);
}

#[test]
fn jsonl_file_loads() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_log(
        &dir,
        "messages.jsonl",
        "{\"from\":\"Dave\",\"content\":\"@Alice I want to join\"}\n{\"from\":\"Alice\",\"content\":\"@Dave welcome!\"}\n",
    );

    let log = MessageLog::from_path(&path).expect("load");
    assert_eq!(
        log.into_iter().collect::<Vec<_>>(),
        vec![
            Message::new("Dave", "@Alice I want to join"),
            Message::new("Alice", "@Dave welcome!"),
        ]
    );
}

#[test]
fn missing_file_maps_to_not_found_code() {
    let err = MessageLog::from_path(Path::new("/definitely/not/here.json")).expect_err("missing");
    assert!(matches!(err, LogError::Io { .. }));
    assert_eq!(err.code(), ErrorCode::LogNotFound);
}

#[test]
fn unparseable_file_maps_to_parse_code() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_log(&dir, "broken.json", "[{\"from\": \"A\"");
    let err = MessageLog::from_path(&path).expect_err("broken");
    assert_eq!(err.code(), ErrorCode::LogParseError);
}

proptest! {
    #[test]
    fn array_layout_preserves_every_record(
        records in prop::collection::vec(("[A-Za-z]{0,6}", ".{0,24}"), 0..16)
    ) {
        let messages: Vec<Message> = records
            .iter()
            .map(|(from, content)| Message::new(from.as_str(), content.as_str()))
            .collect();
        let text = serde_json::to_string(&messages).expect("serialize");

        let log = MessageLog::parse(&text).expect("parse");
        prop_assert_eq!(log.messages(), messages.as_slice());
    }
}
