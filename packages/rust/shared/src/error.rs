//! Error types for agentsmd.
//!
//! Library crates use [`AgentsMdError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all agentsmd operations.
///
/// Splitting and validating never fail; only file access and configuration do.
#[derive(Debug, thiserror::Error)]
pub enum AgentsMdError {
    /// The instructions file does not exist at the given path.
    #[error("instructions file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Filesystem I/O error while reading an existing path.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, AgentsMdError>;

impl AgentsMdError {
    /// Create a not-found error for the given path.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error means the file was missing, as opposed to unreadable.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
