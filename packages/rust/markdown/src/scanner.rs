//! Per-line classification: fence markers and ATX headings.
//!
//! Fence detection is lexical only. Every line whose trimmed text starts with
//! three backticks flips the state, whatever follows the backticks.

use std::sync::LazyLock;

use regex::Regex;

/// Matches `#` through `######`, whitespace, then text with at least one
/// non-whitespace character.
static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(\S.*)$").expect("heading regex"));

const FENCE_MARKER: &str = "```";

/// Whether the scanner is inside a fenced code block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum FenceState {
    #[default]
    Outside,
    Inside,
}

impl FenceState {
    /// Advance past `line`, flipping state on a fence marker.
    pub(crate) fn advance(self, line: &str) -> Self {
        if !is_fence_marker(line) {
            return self;
        }
        match self {
            Self::Outside => Self::Inside,
            Self::Inside => Self::Outside,
        }
    }

    /// Headings are only recognized outside fences.
    pub(crate) fn allows_headings(self) -> bool {
        self == Self::Outside
    }
}

/// A heading line split into marker count and trimmed title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Heading<'a> {
    pub level: u8,
    pub title: &'a str,
}

pub(crate) fn is_fence_marker(line: &str) -> bool {
    line.trim().starts_with(FENCE_MARKER)
}

/// Match `line` against the heading pattern. The marker must start at column 0.
pub(crate) fn match_heading(line: &str) -> Option<Heading<'_>> {
    let caps = HEADING_RE.captures(line)?;
    let level = caps.get(1)?.as_str().len() as u8;
    let title = caps.get(2)?.as_str().trim();
    Some(Heading { level, title })
}
