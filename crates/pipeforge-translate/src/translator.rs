//! Definition-to-component translation.
//!
//! Two mutually recursive procedures do the work. The step resolver turns
//! one definition node into one component; the branch builder turns a
//! sequence of sibling nodes into labeled children, calling back into the
//! step resolver for each of them. Traversal is depth-first, left to right,
//! and the first error aborts the whole translation.
//!
//! Recursion depth equals the depth of the definition; very deep
//! definitions can exhaust the stack.

use pipeforge_common::constants::CHILDREN_PARAM_ALIASES;
use pipeforge_common::error::{PipeforgeError, Result};
use pipeforge_common::types::{ContainerKind, Params, StepLabel};
use serde_json::Value;

use crate::component::{BoxedComponent, ChildrenArg, ContainerArgs, LabeledChild};
use crate::definition::{DefinitionNode, Location, malformed, value_kind};
use crate::registry::{ComponentRegistry, Constructor, ContainerFn};

/// Builds a pipeline from a decoded definition.
///
/// The root may be a single step, or a sequence of steps which is wrapped in
/// the registry's parallel container.
///
/// # Errors
///
/// Returns the first malformed-definition, unresolvable-type, or
/// constructor error met in depth-first, left-to-right order.
pub fn pipeline_from_definition(
    definition: &Value,
    registry: &ComponentRegistry,
) -> Result<BoxedComponent> {
    Translator::new(registry).translate(definition)
}

/// Translator bound to one component registry.
#[derive(Debug, Clone, Copy)]
pub struct Translator<'r> {
    registry: &'r ComponentRegistry,
}

impl<'r> Translator<'r> {
    /// Creates a translator resolving names against `registry`.
    #[must_use]
    pub const fn new(registry: &'r ComponentRegistry) -> Self {
        Self { registry }
    }

    /// Translates a whole definition. See [`pipeline_from_definition`].
    ///
    /// # Errors
    ///
    /// Returns the first error met while building the tree.
    pub fn translate(&self, definition: &Value) -> Result<BoxedComponent> {
        tracing::info!(kind = value_kind(definition), "translating pipeline definition");
        let root = Location::root();
        let component = match definition {
            Value::Array(sequence) => {
                let Some((_, build)) = self.registry.parallel_container() else {
                    return Err(PipeforgeError::UnresolvableType {
                        at: root.to_string(),
                        type_name: format!("<{} container>", ContainerKind::Parallel),
                        hint: None,
                    });
                };
                self.branch_into_at(sequence, build.as_ref(), &root)?
            }
            node => self.resolve_at(node, &root)?,
        };
        tracing::info!(root = component.type_name(), "pipeline built");
        Ok(component)
    }

    /// Resolves one definition node into a component.
    ///
    /// # Errors
    ///
    /// Returns a malformed-definition error on structural violations, an
    /// unresolvable-type error for unknown names, and constructor errors
    /// unchanged.
    pub fn resolve_step(&self, node: &Value) -> Result<BoxedComponent> {
        self.resolve_at(node, &Location::root())
    }

    /// Builds the labeled children of a sequence without wrapping them.
    ///
    /// # Errors
    ///
    /// Returns the first error met while resolving a child.
    pub fn build_branch(&self, sequence: &[Value]) -> Result<Vec<LabeledChild>> {
        self.branch_at(sequence, &Location::root())
    }

    /// Builds the labeled children of a sequence and hands them to `build`
    /// as its positional argument.
    ///
    /// # Errors
    ///
    /// Returns the first error met while resolving a child, or the error
    /// returned by `build`.
    pub fn build_branch_into(
        &self,
        sequence: &[Value],
        build: &ContainerFn,
    ) -> Result<BoxedComponent> {
        self.branch_into_at(sequence, build, &Location::root())
    }

    fn resolve_at(&self, node: &Value, at: &Location<'_>) -> Result<BoxedComponent> {
        let step = DefinitionNode::classify(node, at)?;
        tracing::debug!(%at, type_name = step.type_name(), "building step");

        let constructor = self.lookup(step.type_name(), at)?;
        match (step, constructor) {
            (DefinitionNode::ScalarParameters { type_name, value }, _) => Err(malformed(
                at,
                format!(
                    "parameters of \"{type_name}\" should be a mapping or a sequence, found {}",
                    value_kind(value)
                ),
            )),
            (DefinitionNode::BareName(_), Constructor::Leaf(build)) => {
                build(Params::new()).map_err(PipeforgeError::Component)
            }
            (DefinitionNode::ParameterizedMapping { params, .. }, Constructor::Leaf(build)) => {
                build(params.cloned().unwrap_or_default()).map_err(PipeforgeError::Component)
            }
            (DefinitionNode::ParameterizedSequence { type_name, .. }, Constructor::Leaf(_)) => {
                Err(malformed(
                    at,
                    format!(
                        "\"{type_name}\" is not a container and takes a parameter mapping, found sequence"
                    ),
                ))
            }
            (
                DefinitionNode::ParameterizedSequence { children, .. },
                Constructor::Container { build, .. },
            ) => {
                let children = self.branch_at(children, at)?;
                build(ContainerArgs {
                    children,
                    children_arg: ChildrenArg::Positional,
                    params: Params::new(),
                })
                .map_err(PipeforgeError::Component)
            }
            (
                DefinitionNode::ParameterizedMapping {
                    type_name,
                    params: Some(params),
                },
                Constructor::Container { kind, build },
            ) => self.container_with_params(type_name, *kind, build.as_ref(), params, at),
            (step, Constructor::Container { kind, .. }) => {
                Err(missing_children(step.type_name(), *kind, at))
            }
        }
    }

    fn container_with_params(
        &self,
        type_name: &str,
        kind: ContainerKind,
        build: &ContainerFn,
        params: &Params,
        at: &Location<'_>,
    ) -> Result<BoxedComponent> {
        let present: Vec<(&'static str, &Value)> = CHILDREN_PARAM_ALIASES
            .into_iter()
            .filter_map(|alias| params.get(alias).map(|value| (alias, value)))
            .collect();
        let (alias, definition) = match present.as_slice() {
            [found] => *found,
            [] => return Err(missing_children(type_name, kind, at)),
            _ => {
                let names: Vec<&str> = present.iter().map(|(alias, _)| *alias).collect();
                return Err(malformed(
                    at,
                    format!(
                        "\"{type_name}\" has more than one children list: {}",
                        names.join(", ")
                    ),
                ));
            }
        };

        let children_at = at.key(alias);
        let Value::Array(sequence) = definition else {
            return Err(malformed(
                &children_at,
                format!(
                    "children list should be a sequence, found {}",
                    value_kind(definition)
                ),
            ));
        };
        let children = self.branch_at(sequence, &children_at)?;

        let rest: Params = params
            .iter()
            .filter(|(key, _)| key.as_str() != alias)
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        build(ContainerArgs {
            children,
            children_arg: ChildrenArg::Named(alias.to_owned()),
            params: rest,
        })
        .map_err(PipeforgeError::Component)
    }

    fn branch_at(&self, sequence: &[Value], at: &Location<'_>) -> Result<Vec<LabeledChild>> {
        sequence
            .iter()
            .enumerate()
            .map(|(index, node)| {
                let component = self.resolve_at(node, &at.index(index))?;
                Ok(LabeledChild {
                    label: StepLabel::for_index(index),
                    component,
                })
            })
            .collect()
    }

    fn branch_into_at(
        &self,
        sequence: &[Value],
        build: &ContainerFn,
        at: &Location<'_>,
    ) -> Result<BoxedComponent> {
        let children = self.branch_at(sequence, at)?;
        build(ContainerArgs {
            children,
            children_arg: ChildrenArg::Positional,
            params: Params::new(),
        })
        .map_err(PipeforgeError::Component)
    }

    fn lookup(&self, type_name: &str, at: &Location<'_>) -> Result<&'r Constructor> {
        self.registry
            .resolve(type_name)
            .ok_or_else(|| PipeforgeError::UnresolvableType {
                at: at.to_string(),
                type_name: type_name.to_owned(),
                hint: self.registry.suggest(type_name),
            })
    }
}

fn missing_children(type_name: &str, kind: ContainerKind, at: &Location<'_>) -> PipeforgeError {
    let conventional = kind.conventional_children_param();
    let alternative = CHILDREN_PARAM_ALIASES
        .into_iter()
        .find(|alias| *alias != conventional)
        .unwrap_or(conventional);
    malformed(
        at,
        format!(
            "{kind} container \"{type_name}\" needs its steps, either as a sequence or under \"{conventional}\" (or \"{alternative}\")"
        ),
    )
}
