//! Advisory validation against conventionally expected topics.
//!
//! Validation never rejects a document. It only lists topics the file seems
//! to be missing, so agents and authors can decide whether to add them.

use tracing::debug;

use agentsmd_shared::{ParsedDocument, RecommendedTopic, ValidationResult, default_topics};

/// Advisory emitted when no heading section exists at all.
pub const NO_HEADINGS_ISSUE: &str = "no valid Markdown headings found";

/// Validate against the built-in setup/style/test topics.
pub fn validate(doc: &ParsedDocument) -> ValidationResult {
    validate_with(doc, &default_topics())
}

/// Validate against a caller-supplied topic table.
///
/// Topics are checked in order; the missing-headings advisory always comes last.
/// The synthetic preamble section neither satisfies topics nor counts as a heading.
pub fn validate_with(doc: &ParsedDocument, topics: &[RecommendedTopic]) -> ValidationResult {
    let titles: Vec<String> = doc.headings().map(|s| s.title.to_lowercase()).collect();

    let mut issues: Vec<String> = topics
        .iter()
        .filter(|topic| !covers(&titles, topic))
        .map(missing_topic_issue)
        .collect();

    if titles.is_empty() {
        issues.push(NO_HEADINGS_ISSUE.to_string());
    }

    debug!(
        topics = topics.len(),
        issues = issues.len(),
        "validation complete"
    );

    ValidationResult::from_issues(issues)
}

/// Advisory text for a topic no heading covers.
pub fn missing_topic_issue(topic: &RecommendedTopic) -> String {
    format!("consider adding a section about {}", topic.name)
}

fn covers(titles: &[String], topic: &RecommendedTopic) -> bool {
    titles
        .iter()
        .any(|title| topic.keywords.iter().any(|kw| title.contains(kw.as_str())))
}
