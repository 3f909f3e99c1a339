//! Application configuration for agentsmd.
//!
//! User config lives at `~/.agentsmd/agentsmd.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AgentsMdError, Result};
use crate::types::{DEFAULT_FILE_NAME, RecommendedTopic, default_topics};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "agentsmd.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".agentsmd";

// ---------------------------------------------------------------------------
// Config structs (matching agentsmd.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Parsing behavior.
    #[serde(default)]
    pub parse: ParseConfig,

    /// Nearest-file search.
    #[serde(default)]
    pub locate: LocateConfig,

    /// Advisory validation rules.
    #[serde(default)]
    pub validate: ValidateConfig,
}

/// `[parse]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseConfig {
    /// File name to look for when locating.
    #[serde(default = "default_file_name")]
    pub file_name: String,

    /// Keep text before the first heading as a synthetic section.
    #[serde(default)]
    pub keep_preamble: bool,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            file_name: default_file_name(),
            keep_preamble: false,
        }
    }
}

fn default_file_name() -> String {
    DEFAULT_FILE_NAME.into()
}

/// `[locate]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocateConfig {
    /// How many parent directories to probe above the start directory.
    #[serde(default = "default_max_parents")]
    pub max_parents: usize,

    /// Walk every ancestor up to the filesystem root, ignoring `max_parents`.
    #[serde(default)]
    pub unbounded: bool,
}

impl Default for LocateConfig {
    fn default() -> Self {
        Self {
            max_parents: default_max_parents(),
            unbounded: false,
        }
    }
}

fn default_max_parents() -> usize {
    2
}

/// `[validate]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateConfig {
    /// Start from the built-in setup/style/test topics.
    #[serde(default = "default_true")]
    pub include_defaults: bool,

    /// Extra topics, checked after the built-in ones.
    #[serde(default)]
    pub topics: Vec<RecommendedTopic>,
}

impl Default for ValidateConfig {
    fn default() -> Self {
        Self {
            include_defaults: true,
            topics: Vec::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

impl ValidateConfig {
    /// The ordered rule table this config describes.
    pub fn topics(&self) -> Vec<RecommendedTopic> {
        let mut topics = if self.include_defaults {
            default_topics()
        } else {
            Vec::new()
        };
        topics.extend(self.topics.iter().map(|t| RecommendedTopic {
            name: t.name.clone(),
            keywords: t.keywords.iter().map(|k| k.to_lowercase()).collect(),
        }));
        topics
    }
}

// ---------------------------------------------------------------------------
// Runtime options (merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Options for the section splitter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitOptions {
    /// Emit pre-heading text as a level-0 `Preamble` section.
    pub keep_preamble: bool,
}

impl From<&AppConfig> for SplitOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            keep_preamble: config.parse.keep_preamble,
        }
    }
}

/// How far above the start directory the locator looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDepth {
    /// Probe the start directory plus this many parents.
    Bounded(usize),
    /// Probe every ancestor up to the filesystem root.
    Unbounded,
}

/// Options for the nearest-file locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocateOptions {
    /// File name probed in each directory.
    pub file_name: String,
    /// Search bound.
    pub depth: SearchDepth,
}

impl Default for LocateOptions {
    fn default() -> Self {
        Self {
            file_name: default_file_name(),
            depth: SearchDepth::Bounded(default_max_parents()),
        }
    }
}

impl From<&AppConfig> for LocateOptions {
    fn from(config: &AppConfig) -> Self {
        let depth = if config.locate.unbounded {
            SearchDepth::Unbounded
        } else {
            SearchDepth::Bounded(config.locate.max_parents)
        };
        Self {
            file_name: config.parse.file_name.clone(),
            depth,
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.agentsmd/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| AgentsMdError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.agentsmd/agentsmd.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| AgentsMdError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| AgentsMdError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Write a default config file into `dir`, creating the directory if needed.
/// Returns the path to the created file.
pub fn init_config_in(dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|e| AgentsMdError::io(dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| AgentsMdError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| AgentsMdError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Create the config directory and write a default config file.
pub fn init_config() -> Result<PathBuf> {
    init_config_in(&config_dir()?)
}
