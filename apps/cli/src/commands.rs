//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use tracing::info;

use agentsmd_shared::{
    AppConfig, LocateOptions, SplitOptions, init_config, load_config, load_config_from,
};

use crate::render;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// agentsmd: structured guidance from agent instruction files.
#[derive(Parser)]
#[command(
    name = "agentsmd",
    version,
    about = "Find, split, and check AGENTS.md instruction files.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of ~/.agentsmd/agentsmd.toml.
    #[arg(long, global = true, env = "AGENTSMD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Instructions file name to look for (defaults to AGENTS.md).
    #[arg(long, global = true)]
    pub file_name: Option<String>,

    /// Keep text before the first heading as a "Preamble" section.
    #[arg(long, global = true)]
    pub keep_preamble: bool,

    /// Number of parent directories to search above the start directory.
    #[arg(long, global = true)]
    pub max_parents: Option<usize>,

    /// Search every parent directory up to the filesystem root.
    #[arg(long, global = true)]
    pub unbounded: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Report output format.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Locate the nearest instructions file, parse it, and validate it.
    Check {
        /// Directory to start searching from.
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Report format.
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Exit with an error when validation reports any issue.
        #[arg(long)]
        strict: bool,
    },

    /// Parse a specific file and print its sections.
    Parse {
        /// Path to the Markdown file.
        file: PathBuf,

        /// Report format.
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the path of the nearest instructions file.
    Locate {
        /// Directory to start searching from.
        #[arg(default_value = ".")]
        dir: PathBuf,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "agentsmd=info",
        1 => "agentsmd=debug",
        _ => "agentsmd=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Config resolution
// ---------------------------------------------------------------------------

/// Load the config file, then apply CLI overrides on top.
fn resolve_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };

    if let Some(name) = &cli.file_name {
        config.parse.file_name = name.clone();
    }
    if cli.keep_preamble {
        config.parse.keep_preamble = true;
    }
    if let Some(parents) = cli.max_parents {
        config.locate.max_parents = parents;
    }
    if cli.unbounded {
        config.locate.unbounded = true;
    }

    Ok(config)
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;

    match cli.command {
        Command::Check {
            dir,
            format,
            strict,
        } => cmd_check(&dir, format, strict, &config),
        Command::Parse { file, format } => cmd_parse(&file, format, &config),
        Command::Locate { dir } => cmd_locate(&dir, &config),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(&config),
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_check(dir: &Path, format: OutputFormat, strict: bool, config: &AppConfig) -> Result<()> {
    info!(dir = %dir.display(), strict, "checking instructions file");

    let inspection = match agentsmd_core::inspect(dir, config) {
        Ok(inspection) => inspection,
        Err(e) if e.is_not_found() => {
            let name = &config.parse.file_name;
            return Err(eyre!(
                "no {name} found from '{}'. Try creating {name} in the current directory.",
                dir.display()
            ));
        }
        Err(e) => return Err(e.into()),
    };

    match format {
        OutputFormat::Text => {
            println!("Found: {}\n", inspection.document.file_path.display());
            print!("{}", render::render_document(&inspection.document));
            print!("{}", render::render_validation(&inspection.validation));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&inspection)?);
        }
    }

    if strict && !inspection.validation.valid {
        return Err(eyre!(
            "validation reported {} issue(s)",
            inspection.validation.issues.len()
        ));
    }

    Ok(())
}

fn cmd_parse(file: &Path, format: OutputFormat, config: &AppConfig) -> Result<()> {
    let document = agentsmd_core::parse_with(file, &SplitOptions::from(config))?;

    match format {
        OutputFormat::Text => print!("{}", render::render_document(&document)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&document)?),
    }

    Ok(())
}

fn cmd_locate(dir: &Path, config: &AppConfig) -> Result<()> {
    let opts = LocateOptions::from(config);

    match agentsmd_discovery::locate_with(dir, &opts) {
        Some(path) => {
            println!("{}", path.display());
            Ok(())
        }
        None => Err(eyre!(
            "no {} found from '{}'",
            opts.file_name,
            dir.display()
        )),
    }
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(config: &AppConfig) -> Result<()> {
    let toml_str = toml::to_string_pretty(config)?;
    println!("{toml_str}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentsmd_shared::SearchDepth;

    #[test]
    fn cli_defaults_to_current_dir() {
        let cli = Cli::try_parse_from(["agentsmd", "check"]).expect("parse args");
        let Command::Check { dir, strict, .. } = cli.command else {
            panic!("expected check command");
        };
        assert_eq!(dir, PathBuf::from("."));
        assert!(!strict);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "agentsmd",
            "locate",
            "some/dir",
            "--unbounded",
            "--file-name",
            "CLAUDE.md",
        ])
        .expect("parse args");
        assert!(cli.unbounded);
        assert_eq!(cli.file_name.as_deref(), Some("CLAUDE.md"));
    }

    #[test]
    fn overrides_apply_on_top_of_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = agentsmd_shared::init_config_in(dir.path()).expect("init config");

        let cli = Cli::try_parse_from([
            "agentsmd",
            "--config",
            path.to_str().expect("utf-8 path"),
            "--keep-preamble",
            "--max-parents",
            "4",
            "check",
        ])
        .expect("parse args");

        let config = resolve_config(&cli).expect("resolve");
        assert!(config.parse.keep_preamble);
        assert_eq!(
            LocateOptions::from(&config).depth,
            SearchDepth::Bounded(4)
        );
    }

    #[test]
    fn json_format_flag() {
        let cli = Cli::try_parse_from(["agentsmd", "parse", "AGENTS.md", "--format", "json"])
            .expect("parse args");
        assert!(matches!(
            cli.command,
            Command::Parse {
                format: OutputFormat::Json,
                ..
            }
        ));
    }
}
