//! Formatted output helpers for CLI commands.

use std::fmt::Write as _;

use clap::ValueEnum;
use pipeforge_common::types::ContainerKind;
use pipeforge_translate::graph::Stage;

/// Output format of reporting commands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Formats `count` followed by `noun`, pluralized with a trailing `s`.
#[must_use]
pub fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// A double horizontal rule as wide as `title`.
#[must_use]
pub fn underline(title: &str) -> String {
    "\u{2550}".repeat(title.chars().count())
}

/// Renders stage layers, one numbered line per stage.
#[must_use]
pub fn render_layers(layers: &[Vec<&Stage>]) -> String {
    let mut out = String::new();
    for (depth, layer) in layers.iter().enumerate() {
        for stage in layer {
            let _ = writeln!(out, "  [{depth}] {}  {}", stage.path, stage.type_name);
        }
    }
    out
}

/// Short label for the kind column of the catalog listing.
#[must_use]
pub const fn kind_label(kind: Option<ContainerKind>) -> &'static str {
    match kind {
        None => "leaf",
        Some(ContainerKind::Sequential) => "sequential",
        Some(ContainerKind::Parallel) => "parallel",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage(path: &str, type_name: &str) -> Stage {
        Stage {
            path: path.into(),
            type_name: type_name.into(),
        }
    }

    #[test]
    fn plural_handles_one_and_many() {
        assert_eq!(plural(1, "stage"), "1 stage");
        assert_eq!(plural(0, "stage"), "0 stages");
        assert_eq!(plural(3, "layer"), "3 layers");
    }

    #[test]
    fn underline_matches_title_width() {
        assert_eq!(underline("Plan"), "\u{2550}\u{2550}\u{2550}\u{2550}");
    }

    #[test]
    fn render_layers_numbers_by_depth() {
        let a = stage("root/step_0", "x.A");
        let b = stage("root/step_1/step_0", "x.B");
        let c = stage("root/step_1/step_1", "x.C");
        let rendered = render_layers(&[vec![&a], vec![&b, &c]]);
        assert_eq!(
            rendered,
            "  [0] root/step_0  x.A\n  [1] root/step_1/step_0  x.B\n  [1] root/step_1/step_1  x.C\n"
        );
    }

    #[test]
    fn kind_label_names_leaves() {
        assert_eq!(kind_label(None), "leaf");
        assert_eq!(kind_label(Some(ContainerKind::Parallel)), "parallel");
    }
}
