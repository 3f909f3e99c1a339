//! agentsmd CLI: inspect agent instruction files.
//!
//! Finds the nearest `AGENTS.md`, splits it into heading sections, and
//! reports which conventional topics it seems to be missing.

mod commands;
mod render;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
