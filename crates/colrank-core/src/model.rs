//! Message records consumed by the mention graph.
//!
//! A [`Message`] is the only thing the ranking core needs from the relay:
//! who sent it and what it said. The relay also records a recipient and a
//! timestamp; both are kept for round-tripping but never influence the graph.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An agent identifier. Identity is the string itself.
pub type Agent = String;

/// One logged message.
///
/// Missing or `null` `from`/`content` fields deserialize as empty strings,
/// so a partial record still contributes its sender (possibly `""`) to the
/// agent universe instead of being rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Sending agent.
    #[serde(default, deserialize_with = "string_or_empty")]
    pub from: Agent,
    /// Direct recipient, if the relay recorded one. Transport metadata only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Agent>,
    /// Free-form message text.
    #[serde(default, deserialize_with = "string_or_empty")]
    pub content: String,
    /// Relay receive time (ISO-8601), if present. Transport metadata only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl Message {
    /// Create a message from a sender and its text.
    #[must_use]
    pub fn new(from: impl Into<Agent>, content: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    /// Build a message from an arbitrary JSON value.
    ///
    /// Returns `None` when `value` is not an object. Any field with the
    /// wrong type is treated as absent.
    #[must_use]
    pub fn from_json(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let text = |key: &str| obj.get(key).and_then(Value::as_str).map(str::to_owned);

        Some(Self {
            from: text("from").unwrap_or_default(),
            to: text("to"),
            content: text("content").unwrap_or_default(),
            timestamp: text("timestamp"),
        })
    }
}

fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
