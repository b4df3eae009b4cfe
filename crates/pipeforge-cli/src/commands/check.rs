//! `pipeforge check`: Translate a definition and report the outcome.

use std::path::{Path, PathBuf};

use clap::Args;
use pipeforge_translate::outline::Outline;
use pipeforge_translate::pipeline_from_definition;

use crate::loader;
use crate::output::plural;

/// Arguments for the `check` command.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to the definition file (YAML or JSON).
    pub file: PathBuf,
}

/// Executes the `check` command.
///
/// # Errors
///
/// Returns the first error met while loading or translating the definition.
pub fn execute(args: &CheckArgs, catalog: Option<&Path>) -> anyhow::Result<()> {
    println!("{}", check(&args.file, catalog)?);
    Ok(())
}

/// Translates `file` and returns the success summary.
fn check(file: &Path, catalog: Option<&Path>) -> anyhow::Result<String> {
    let registry = loader::load_registry(catalog)?;
    let definition = loader::read_definition(file)?;
    let pipeline = pipeline_from_definition(&definition, &registry)?;
    let outline = Outline::of(pipeline.as_ref());
    Ok(format!(
        "ok: {} ({}, depth {})",
        file.display(),
        plural(outline.leaf_count(), "stage"),
        outline.depth()
    ))
}
