//! CLI command definitions and dispatch.

pub mod catalog;
pub mod check;
pub mod plan;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// pipeforge: Translate pipeline definitions into component trees.
#[derive(Parser, Debug)]
#[command(name = "pipeforge", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Catalog file (YAML or JSON) naming the containers and leaf types.
    #[arg(long, global = true, env = "PIPEFORGE_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Format of log lines written to stderr.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

/// Log line format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    Text,
    /// One JSON object per line.
    Json,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Translate a definition and report the first error, if any.
    Check(check::CheckArgs),
    /// Show the component tree and stage order of a definition.
    Plan(plan::PlanArgs),
    /// List the registered component types.
    Catalog(catalog::CatalogArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    let catalog_path = cli.catalog.as_deref();
    match cli.command {
        Command::Check(args) => check::execute(&args, catalog_path),
        Command::Plan(args) => plan::execute(&args, catalog_path),
        Command::Catalog(args) => catalog::execute(&args, catalog_path),
    }
}
