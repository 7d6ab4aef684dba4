//! Message log ingestion.
//!
//! # Accepted layouts
//!
//! - A JSON array of message objects.
//! - The relay's `graph_data` envelope: `{"type": "graph_data", "messages": [...]}`.
//! - JSON Lines: one message object per non-blank line.
//!
//! A single bare object is one message only if it has `from` or `content`
//! and no `type` other than `"message"`. Any other relay frame reads as an
//! empty log.
//!
//! Loading is permissive in the same way graph construction is: records that
//! are not objects are skipped with a warning, and absent fields default to
//! empty strings. Only input that is not JSON at all is rejected.

use std::io::Read;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::error::ErrorCode;
use crate::model::Message;

/// Errors from reading a message log.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// The log file (or stdin) could not be read.
    #[error("failed to read message log {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The input is not a JSON document, an envelope, or JSON Lines.
    #[error("message log is not valid JSON (line {line}): {source}")]
    Parse {
        /// 1-based line of the first unparseable record.
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

impl LogError {
    /// Return the machine-readable error code for this error.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound => {
                ErrorCode::LogNotFound
            }
            Self::Io { .. } => ErrorCode::LogReadFailed,
            Self::Parse { .. } => ErrorCode::LogParseError,
        }
    }
}

/// An ordered sequence of messages, as recorded by the relay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageLog {
    messages: Vec<Message>,
}

impl MessageLog {
    /// Wrap an existing message sequence.
    #[must_use]
    pub const fn new(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    /// Parse a log from text in any accepted layout.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Parse`] if the text is neither a single JSON
    /// document nor a sequence of JSON lines.
    #[instrument(skip(text), fields(bytes = text.len()))]
    pub fn parse(text: &str) -> Result<Self, LogError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }

        let log = match serde_json::from_str::<Value>(text) {
            Ok(Value::Array(records)) => Self::from_records(&records),
            Ok(value @ Value::Object(_)) => match value.get("messages").and_then(Value::as_array) {
                Some(records) => Self::from_records(records),
                // A single bare message object is a one-line JSONL log.
                None if is_message_object(&value) => {
                    Self::from_records(std::slice::from_ref(&value))
                }
                None => {
                    warn!(
                        frame = value.get("type").and_then(serde_json::Value::as_str).unwrap_or("?"),
                        "object is neither a message nor an envelope; treating as empty"
                    );
                    Self::default()
                }
            },
            Ok(other) => {
                warn!(kind = json_kind(&other), "message log is a scalar; treating as empty");
                Self::default()
            }
            Err(_) => Self::parse_lines(text)?,
        };

        debug!(messages = log.len(), "loaded message log");
        Ok(log)
    }

    /// Read and parse a log file. `-` reads from stdin.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Io`] if the source cannot be read, or
    /// [`LogError::Parse`] if its contents are not JSON.
    pub fn from_path(path: &Path) -> Result<Self, LogError> {
        let io_err = |source| LogError::Io {
            path: path.display().to_string(),
            source,
        };

        let text = if path.as_os_str() == "-" {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).map_err(io_err)?;
            buf
        } else {
            std::fs::read_to_string(path).map_err(io_err)?
        };

        Self::parse(&text)
    }

    /// Messages in log order.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    fn from_records(records: &[Value]) -> Self {
        let mut messages = Vec::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            match Message::from_json(record) {
                Some(msg) => messages.push(msg),
                None => warn!(index = i, kind = json_kind(record), "skipping non-object record"),
            }
        }
        Self { messages }
    }

    fn parse_lines(text: &str) -> Result<Self, LogError> {
        let mut records = Vec::new();
        for (i, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let value = serde_json::from_str::<Value>(line)
                .map_err(|source| LogError::Parse { line: i + 1, source })?;
            records.push(value);
        }
        Ok(Self::from_records(&records))
    }
}

impl From<Vec<Message>> for MessageLog {
    fn from(messages: Vec<Message>) -> Self {
        Self::new(messages)
    }
}

impl IntoIterator for MessageLog {
    type Item = Message;
    type IntoIter = std::vec::IntoIter<Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.into_iter()
    }
}

/// A bare object counts as a message when it carries message fields and is
/// not some other relay frame.
fn is_message_object(value: &Value) -> bool {
    let typed_as_message = value
        .get("type")
        .is_none_or(|kind| kind.as_str() == Some("message"));
    typed_as_message && (value.get("from").is_some() || value.get("content").is_some())
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
