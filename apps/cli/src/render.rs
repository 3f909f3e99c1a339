//! Human-readable rendering of parsed documents and validation results.

use std::fmt::Write;

use agentsmd_shared::{ParsedDocument, ValidationResult};

/// Maximum number of characters of section content shown in a preview.
const PREVIEW_CHARS: usize = 100;

/// Render the section outline: numbered titles indented by heading level,
/// each followed by a one-line content preview.
pub(crate) fn render_document(doc: &ParsedDocument) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Sections: {}\n", doc.sections.len());

    for (i, section) in doc.sections.iter().enumerate() {
        let indent = "  ".repeat(usize::from(section.level.saturating_sub(1)));
        let _ = writeln!(out, "{indent}{}. {}", i + 1, section.title);
        if let Some(preview) = preview(&section.content) {
            let _ = writeln!(out, "{indent}   {preview}");
        }
        out.push('\n');
    }

    out
}

/// Render the validation verdict and any advisories.
pub(crate) fn render_validation(result: &ValidationResult) -> String {
    let mut out = String::from("Validation:\n");

    if result.valid {
        out.push_str("   OK: follows common conventions\n");
        return out;
    }

    out.push_str("   Suggestions:\n");
    for issue in &result.issues {
        let _ = writeln!(out, "      - {issue}");
    }
    out
}

/// First [`PREVIEW_CHARS`] characters of `content` on a single line.
fn preview(content: &str) -> Option<String> {
    if content.is_empty() {
        return None;
    }

    let mut line: String = content
        .chars()
        .take(PREVIEW_CHARS)
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect();

    if content.chars().count() > PREVIEW_CHARS {
        line.push_str("...");
    }
    Some(line)
}
