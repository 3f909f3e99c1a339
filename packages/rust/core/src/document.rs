//! Reading instruction files from disk into [`ParsedDocument`]s.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use agentsmd_shared::{AgentsMdError, ParsedDocument, Result, SplitOptions};

/// Parse the file at `path` with default options.
pub fn parse(path: impl AsRef<Path>) -> Result<ParsedDocument> {
    parse_with(path, &SplitOptions::default())
}

/// Parse the file at `path`.
///
/// Returns [`AgentsMdError::NotFound`] when nothing exists at `path`, and
/// [`AgentsMdError::Io`] when the path exists but cannot be read as UTF-8 text.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn parse_with(path: impl AsRef<Path>, opts: &SplitOptions) -> Result<ParsedDocument> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(AgentsMdError::not_found(path));
    }

    let raw = std::fs::read_to_string(path).map_err(|e| AgentsMdError::io(path, e))?;
    debug!(bytes = raw.len(), "read instructions file");

    Ok(parse_str(path, raw, opts))
}

/// Build a document from text already in memory.
///
/// `file_path` is recorded as-is; nothing is read from disk.
pub fn parse_str(
    file_path: impl Into<PathBuf>,
    raw: impl Into<String>,
    opts: &SplitOptions,
) -> ParsedDocument {
    let raw = raw.into();
    let sections = agentsmd_markdown::split_with(&raw, opts);

    ParsedDocument {
        file_path: file_path.into(),
        sections,
        raw,
    }
}
