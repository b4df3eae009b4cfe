//! Structural summaries of a built component tree.
//!
//! An [`Outline`] captures what a translation produced (types, parameters,
//! labels, and order) without holding on to the components themselves. Two
//! outlines compare equal exactly when the trees are structurally identical.

use std::fmt::Write as _;

use pipeforge_common::types::{ContainerKind, Params, StepLabel};
use serde::Serialize;

use crate::component::Component;

/// Serializable summary of one component and its descendants.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outline {
    /// Registry name of the component.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Container flavor, absent for leaves.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ContainerKind>,
    /// Parameters the component kept.
    #[serde(skip_serializing_if = "Params::is_empty")]
    pub params: Params,
    /// Labeled children, in order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<OutlineChild>,
}

/// A labeled entry in [`Outline::children`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlineChild {
    /// `step_<index>` label.
    pub label: StepLabel,
    /// Summary of the child.
    #[serde(flatten)]
    pub outline: Outline,
}

impl Outline {
    /// Summarizes a component tree.
    #[must_use]
    pub fn of(component: &dyn Component) -> Self {
        Self {
            type_name: component.type_name().to_owned(),
            kind: component.container_kind(),
            params: component.params().cloned().unwrap_or_default(),
            children: component
                .children()
                .iter()
                .map(|child| OutlineChild {
                    label: child.label.clone(),
                    outline: Self::of(child.component.as_ref()),
                })
                .collect(),
        }
    }

    /// Number of leaf components in the tree.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        if self.kind.is_none() {
            1
        } else {
            self.children.iter().map(|c| c.outline.leaf_count()).sum()
        }
    }

    /// Nesting depth; a lone leaf has depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(|c| c.outline.depth())
            .max()
            .unwrap_or(0)
    }

    /// Renders the tree with box-drawing guides, one component per line.
    #[must_use]
    pub fn render_tree(&self) -> String {
        let mut out = String::new();
        self.render_line(&mut out);
        self.render_children(&mut out, "");
        out
    }

    fn render_line(&self, out: &mut String) {
        out.push_str(&self.type_name);
        if let Some(kind) = self.kind {
            let _ = write!(out, " ({kind})");
        }
        if !self.params.is_empty() {
            let params = serde_json::Value::Object(self.params.clone());
            let _ = write!(out, " {params}");
        }
        out.push('\n');
    }

    fn render_children(&self, out: &mut String, prefix: &str) {
        let last = self.children.len().saturating_sub(1);
        for (i, child) in self.children.iter().enumerate() {
            let (branch, indent) = if i == last {
                ("\u{2514}\u{2500}\u{2500} ", "    ")
            } else {
                ("\u{251c}\u{2500}\u{2500} ", "\u{2502}   ")
            };
            let _ = write!(out, "{prefix}{branch}{}: ", child.label);
            child.outline.render_line(out);
            child
                .outline
                .render_children(out, &format!("{prefix}{indent}"));
        }
    }
}
