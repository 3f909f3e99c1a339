//! Core domain types for parsed instruction files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Canonical name of the instructions file searched for by default.
pub const DEFAULT_FILE_NAME: &str = "AGENTS.md";

/// Title given to the synthetic section that holds pre-heading text.
pub const PREAMBLE_TITLE: &str = "Preamble";

// ---------------------------------------------------------------------------
// Section
// ---------------------------------------------------------------------------

/// A titled span of the document, from one heading up to the next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Heading text with the `#` markers and surrounding whitespace removed.
    pub title: String,
    /// Number of `#` markers (1-6). Level 0 marks the synthetic preamble.
    pub level: u8,
    /// Lines between this heading and the next, trimmed as a block.
    pub content: String,
}

impl Section {
    /// Build the synthetic section holding text that precedes the first heading.
    pub fn preamble(content: impl Into<String>) -> Self {
        Self {
            title: PREAMBLE_TITLE.to_string(),
            level: 0,
            content: content.into(),
        }
    }

    /// Whether this section was synthesized from pre-heading text.
    pub fn is_preamble(&self) -> bool {
        self.level == 0
    }
}

// ---------------------------------------------------------------------------
// ParsedDocument
// ---------------------------------------------------------------------------

/// Result of parsing one instructions file. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedDocument {
    /// Path the document was read from.
    pub file_path: PathBuf,
    /// Sections in document order.
    pub sections: Vec<Section>,
    /// The original text, kept for diagnostics and re-parsing.
    pub raw: String,
}

impl ParsedDocument {
    /// Sections that came from real headings (skips a synthetic preamble).
    pub fn headings(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter(|s| !s.is_preamble())
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// A recommended topic: satisfied when any heading title contains any keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedTopic {
    /// Name used in the advisory message.
    pub name: String,
    /// Lowercase substrings matched against lowercased titles.
    pub keywords: Vec<String>,
}

impl RecommendedTopic {
    pub fn new(name: impl Into<String>, keywords: &[&str]) -> Self {
        Self {
            name: name.into(),
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }
}

/// The built-in topic table: setup, style, test.
pub fn default_topics() -> Vec<RecommendedTopic> {
    vec![
        RecommendedTopic::new("setup", &["setup", "install", "commands"]),
        RecommendedTopic::new("style", &["style", "convention", "format"]),
        RecommendedTopic::new("test", &["test", "testing"]),
    ]
}

/// Advisory outcome of validating a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// True iff `issues` is empty.
    pub valid: bool,
    /// Human-readable advisories, in evaluation order.
    pub issues: Vec<String>,
}

impl ValidationResult {
    pub fn from_issues(issues: Vec<String>) -> Self {
        Self {
            valid: issues.is_empty(),
            issues,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preamble_section_is_level_zero() {
        let section = Section::preamble("intro text");
        assert!(section.is_preamble());
        assert_eq!(section.title, PREAMBLE_TITLE);

        let heading = Section {
            title: "Setup".into(),
            level: 2,
            content: String::new(),
        };
        assert!(!heading.is_preamble());
    }

    #[test]
    fn headings_skip_preamble() {
        let doc = ParsedDocument {
            file_path: "AGENTS.md".into(),
            sections: vec![
                Section::preamble("intro"),
                Section {
                    title: "Testing".into(),
                    level: 1,
                    content: String::new(),
                },
            ],
            raw: String::new(),
        };
        let titles: Vec<&str> = doc.headings().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["Testing"]);
    }

    #[test]
    fn topic_keywords_are_lowercased() {
        let topic = RecommendedTopic::new("security", &["Security", "SECRETS"]);
        assert_eq!(topic.keywords, ["security", "secrets"]);
    }

    #[test]
    fn default_topics_order() {
        let names: Vec<String> = default_topics().into_iter().map(|t| t.name).collect();
        assert_eq!(names, ["setup", "style", "test"]);
    }

    #[test]
    fn document_serialization() {
        let doc = ParsedDocument {
            file_path: "/work/AGENTS.md".into(),
            sections: vec![Section {
                title: "Code Style".into(),
                level: 2,
                content: "Use rustfmt.".into(),
            }],
            raw: "## Code Style\nUse rustfmt.\n".into(),
        };

        let json = serde_json::to_string(&doc).expect("serialize");
        let parsed: ParsedDocument = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, doc);
    }

    #[test]
    fn validation_result_from_issues() {
        assert!(ValidationResult::from_issues(vec![]).valid);
        assert!(!ValidationResult::from_issues(vec!["x".into()]).valid);
    }
}
