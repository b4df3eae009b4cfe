//! `pipeforge catalog`: List the registered component types.

use std::fmt::Write as _;
use std::path::Path;

use clap::Args;
use pipeforge_translate::registry::ComponentRegistry;
use serde::Serialize;

use crate::loader;
use crate::output::{OutputFormat, kind_label};

/// Arguments for the `catalog` command.
#[derive(Args, Debug)]
pub struct CatalogArgs {
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct Entry<'a> {
    #[serde(rename = "type")]
    type_name: &'a str,
    kind: &'static str,
}

/// Executes the `catalog` command.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded.
pub fn execute(args: &CatalogArgs, catalog: Option<&Path>) -> anyhow::Result<()> {
    let registry = loader::load_registry(catalog)?;
    tracing::info!(types = registry.len(), "listing catalog");
    println!("{}", render(&registry, args.format)?);
    Ok(())
}

fn render(registry: &ComponentRegistry, format: OutputFormat) -> anyhow::Result<String> {
    let entries: Vec<Entry<'_>> = registry
        .iter()
        .map(|(type_name, kind)| Entry {
            type_name,
            kind: kind_label(kind),
        })
        .collect();
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&entries)?),
        OutputFormat::Text => {
            let mut out = String::from("TYPE\tKIND");
            for entry in &entries {
                let _ = write!(out, "\n{}\t{}", entry.type_name, entry.kind);
            }
            Ok(out)
        }
    }
}
