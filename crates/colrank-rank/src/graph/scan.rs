//! Mention and section scanning over raw message text.
//!
//! # Mentions
//!
//! A mention is `@` followed by the longest run of word characters
//! (alphanumeric or `_`). A bare `@` with no word character after it is not
//! a mention. Scanning is a single left-to-right pass with no backtracking,
//! so cost is linear in the text length regardless of content.
//!
//! # Integration sections
//!
//! A message can declare what it builds on in a marked section. Three
//! case-insensitive headers are recognised:
//!
//! | Header        | Body                                                    |
//! |---------------|---------------------------------------------------------|
//! | `Integration` | block: up to the next `\n#` heading, a `\n\n\n` gap, or end of text |
//! | `Builds upon` | line: up to the next newline                            |
//! | `References`  | line: up to the next newline                            |
//!
//! A header may appear anywhere in the text, including inside a longer word,
//! and must be followed by a run of `:` and whitespace that contains at least
//! one `:` or newline. The body starts after that run. Only the first valid occurrence of each header is used;
//! bodies are scanned for mentions in table order.

use crate::graph::Agent;

/// True for characters that can appear in a mentioned identifier.
#[must_use]
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

// ---------------------------------------------------------------------------
// Mentions
// ---------------------------------------------------------------------------

/// Zero-copy iterator over the identifiers mentioned in a text.
#[derive(Debug, Clone)]
pub struct Mentions<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Mentions<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        loop {
            let at = self.rest.find('@')?;
            let after = &self.rest[at + 1..];
            let end = after
                .find(|c: char| !is_word_char(c))
                .unwrap_or(after.len());
            self.rest = &after[end..];
            if end > 0 {
                return Some(&after[..end]);
            }
        }
    }
}

/// Iterate over `@identifier` tokens in `text`, left to right.
#[must_use]
pub const fn mentions(text: &str) -> Mentions<'_> {
    Mentions { rest: text }
}

/// Every mentioned identifier in `text`, in order, duplicates retained.
#[must_use]
pub fn extract_mentions(text: &str) -> Vec<Agent> {
    mentions(text).map(str::to_owned).collect()
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// How far a section body extends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// Runs to the next `\n#` heading, a `\n\n\n` gap, or end of text.
    Block,
    /// Runs to the end of the line.
    Line,
}

/// Recognised section headers, in scan order.
pub const SECTION_HEADERS: [(&str, SectionKind); 3] = [
    ("integration", SectionKind::Block),
    ("builds upon", SectionKind::Line),
    ("references", SectionKind::Line),
];

/// A located section body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section<'a> {
    pub header: &'static str,
    pub kind: SectionKind,
    pub body: &'a str,
}

/// Locate the first valid section for each recognised header.
#[must_use]
pub fn sections(text: &str) -> Vec<Section<'_>> {
    SECTION_HEADERS
        .iter()
        .filter_map(|&(header, kind)| {
            find_section_body(text, header, kind).map(|body| Section { header, kind, body })
        })
        .collect()
}

/// Mentions found inside the integration sections of `text`.
///
/// Returns an empty vector when the text has no recognised section.
#[must_use]
pub fn extract_integration_section(text: &str) -> Vec<Agent> {
    sections(text)
        .iter()
        .flat_map(|section| mentions(section.body))
        .map(str::to_owned)
        .collect()
}

fn find_section_body<'a>(text: &'a str, header: &str, kind: SectionKind) -> Option<&'a str> {
    let bytes = text.as_bytes();
    let needle = header.as_bytes();
    let mut from = 0;

    while let Some(offset) = find_ascii_ci(&bytes[from..], needle) {
        let start = from + offset;
        let after_header = start + needle.len();
        from = start + 1;

        // Header bytes are ASCII, so `after_header` sits on a char boundary.
        let run_len = text[after_header..]
            .find(|c: char| c != ':' && !c.is_whitespace())
            .unwrap_or(text.len() - after_header);
        let run = &text[after_header..after_header + run_len];
        if !run.contains([':', '\n']) {
            continue;
        }

        let body = &text[after_header + run_len..];
        let end = match kind {
            SectionKind::Block => block_end(body),
            SectionKind::Line => body.find('\n').unwrap_or(body.len()),
        };
        return Some(&body[..end]);
    }

    None
}

fn block_end(body: &str) -> usize {
    let heading = body.find("\n#");
    let gap = body.find("\n\n\n");
    match (heading, gap) {
        (Some(a), Some(b)) => a.min(b),
        (Some(a), None) | (None, Some(a)) => a,
        (None, None) => body.len(),
    }
}

/// ASCII case-insensitive substring search over bytes.
fn find_ascii_ci(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
}
