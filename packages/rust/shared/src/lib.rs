//! Shared types, error model, and configuration for agentsmd.
//!
//! This crate is the foundation depended on by all other agentsmd crates.
//! It provides:
//! - [`AgentsMdError`], the unified error type
//! - Domain types ([`Section`], [`ParsedDocument`], [`ValidationResult`], [`RecommendedTopic`])
//! - Configuration ([`AppConfig`], [`SplitOptions`], [`LocateOptions`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, LocateConfig, LocateOptions, ParseConfig, SearchDepth, SplitOptions,
    ValidateConfig, config_dir, config_file_path, init_config, init_config_in, load_config,
    load_config_from,
};
pub use error::{AgentsMdError, Result};
pub use types::{
    DEFAULT_FILE_NAME, PREAMBLE_TITLE, ParsedDocument, RecommendedTopic, Section,
    ValidationResult, default_topics,
};
