//! `pipeforge plan`: Show the component tree and stage order of a definition.

use std::path::{Path, PathBuf};

use clap::Args;
use pipeforge_translate::graph::{Stage, StageGraph};
use pipeforge_translate::outline::Outline;
use pipeforge_translate::pipeline_from_definition;
use serde::Serialize;

use crate::loader;
use crate::output::{OutputFormat, plural, render_layers, underline};

/// Arguments for the `plan` command.
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Path to the definition file (YAML or JSON).
    pub file: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct PlanReport<'a> {
    pipeline: &'a Outline,
    layers: Vec<Vec<&'a Stage>>,
}

/// Executes the `plan` command.
///
/// Translates the definition, then prints its outline and the stages
/// grouped into dataflow layers.
///
/// # Errors
///
/// Returns an error if loading or translation fails.
pub fn execute(args: &PlanArgs, catalog: Option<&Path>) -> anyhow::Result<()> {
    println!("{}", plan(args, catalog)?);
    Ok(())
}

fn plan(args: &PlanArgs, catalog: Option<&Path>) -> anyhow::Result<String> {
    let registry = loader::load_registry(catalog)?;
    let definition = loader::read_definition(&args.file)?;
    let pipeline = pipeline_from_definition(&definition, &registry)?;

    let outline = Outline::of(pipeline.as_ref());
    let graph = StageGraph::from_component(pipeline.as_ref());
    let layers = graph.layers()?;

    match args.format {
        OutputFormat::Json => {
            let report = PlanReport {
                pipeline: &outline,
                layers,
            };
            Ok(serde_json::to_string_pretty(&report)?)
        }
        OutputFormat::Text => {
            let title = format!("Pipeline plan for: {}", args.file.display());
            Ok(format!(
                "{title}\n{}\n\n{}\nStages:\n{}\n  {} in {}.",
                underline(&title),
                outline.render_tree(),
                render_layers(&layers),
                plural(graph.stage_count(), "stage"),
                plural(layers.len(), "layer"),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use serde_json::Value;

    use super::*;

    const DEFINITION: &str = "\
pipeline.Sequential:
  steps:
    - x.Scaler
    - pipeline.Parallel:
        - x.PCA:
            n_components: 2
        - x.Identity
";

    fn args_for(dir: &tempfile::TempDir, format: OutputFormat) -> PlanArgs {
        let file = dir.path().join("pipeline.yaml");
        fs::write(&file, DEFINITION).expect("write definition");
        PlanArgs { file, format }
    }

    fn catalog(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("catalog.json");
        fs::write(&path, r#"{"components": ["x.Scaler", "x.PCA", "x.Identity"]}"#)
            .expect("write catalog");
        path
    }

    #[test]
    fn text_plan_lists_tree_and_layers() {
        let dir = tempfile::tempdir().expect("temp dir");
        let args = args_for(&dir, OutputFormat::Text);
        let report = plan(&args, Some(&catalog(&dir))).expect("should plan");
        assert!(report.contains("pipeline.Sequential (sequential)"), "got: {report}");
        assert!(report.contains("step_0: x.PCA {\"n_components\":2}"), "got: {report}");
        assert!(report.contains("[0] root/step_0  x.Scaler"), "got: {report}");
        assert!(report.contains("[1] root/step_1/step_1  x.Identity"), "got: {report}");
        assert!(report.ends_with("3 stages in 2 layers."), "got: {report}");
    }

    #[test]
    fn json_plan_is_machine_readable() {
        let dir = tempfile::tempdir().expect("temp dir");
        let args = args_for(&dir, OutputFormat::Json);
        let report = plan(&args, Some(&catalog(&dir))).expect("should plan");
        let value: Value = serde_json::from_str(&report).expect("valid json");
        assert_eq!(value["pipeline"]["type"], "pipeline.Sequential");
        assert_eq!(value["pipeline"]["children"][1]["kind"], "parallel");
        assert_eq!(value["layers"][0][0]["type"], "x.Scaler");
        assert_eq!(value["layers"][1].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn unknown_catalog_type_fails_plan() {
        let dir = tempfile::tempdir().expect("temp dir");
        let args = args_for(&dir, OutputFormat::Text);
        assert!(plan(&args, None).is_err());
    }
}
