//! End-to-end `inspect` pipeline: start directory → locate → parse → validate.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use agentsmd_shared::{
    AgentsMdError, AppConfig, LocateOptions, ParsedDocument, Result, SplitOptions,
    ValidationResult,
};

use crate::{document, validate};

/// Result of the `inspect` pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inspection {
    /// The located and parsed document.
    pub document: ParsedDocument,
    /// Advisory findings for `document`.
    pub validation: ValidationResult,
}

/// Run the full `inspect` pipeline.
///
/// 1. Locate the nearest instructions file from `start_dir`
/// 2. Parse it into sections
/// 3. Validate against the configured topic table
///
/// A failed locate surfaces as [`AgentsMdError::NotFound`] naming
/// `start_dir/<file_name>`.
#[instrument(skip_all, fields(start = %start_dir.display()))]
pub fn inspect(start_dir: &Path, config: &AppConfig) -> Result<Inspection> {
    let locate_opts = LocateOptions::from(config);

    let path = agentsmd_discovery::locate_with(start_dir, &locate_opts)
        .ok_or_else(|| AgentsMdError::not_found(start_dir.join(&locate_opts.file_name)))?;

    let document = document::parse_with(&path, &SplitOptions::from(config))?;
    let validation = validate::validate_with(&document, &config.validate.topics());

    info!(
        path = %path.display(),
        sections = document.sections.len(),
        issues = validation.issues.len(),
        "inspection complete"
    );

    Ok(Inspection {
        document,
        validation,
    })
}
