//! Instantiated components and the built-in containers.
//!
//! The translator knows nothing about what a component does. It only needs
//! to hand the children of a container to that container's constructor and
//! to hand the finished tree back to the caller.

use std::any::Any;
use std::fmt;

use pipeforge_common::types::{ContainerKind, Params, StepLabel};

/// An object produced by resolving one definition node.
pub trait Component: fmt::Debug + Send + Sync {
    /// Registry name the component was built under.
    fn type_name(&self) -> &str;

    /// Parameters the component was built with, if it keeps them.
    fn params(&self) -> Option<&Params> {
        None
    }

    /// Container flavor, `None` for leaf components.
    fn container_kind(&self) -> Option<ContainerKind> {
        None
    }

    /// Children of a container, in definition order.
    fn children(&self) -> &[LabeledChild] {
        &[]
    }

    /// Returns `self` for downcasting.
    fn as_any(&self) -> &dyn Any;
}

impl dyn Component + '_ {
    /// Downcasts to a concrete component type.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref()
    }
}

/// Owned, type-erased component.
pub type BoxedComponent = Box<dyn Component>;

/// A child of a container together with its synthesized label.
#[derive(Debug)]
pub struct LabeledChild {
    /// `step_<index>` label.
    pub label: StepLabel,
    /// The built child.
    pub component: BoxedComponent,
}

/// How the children list was passed to a container constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildrenArg {
    /// As the single positional argument (definition value was a sequence).
    Positional,
    /// As the named parameter with this name (`steps` or `transformer_list`).
    Named(String),
}

/// Arguments handed to a container constructor.
#[derive(Debug)]
pub struct ContainerArgs {
    /// Built children, in definition order.
    pub children: Vec<LabeledChild>,
    /// How the children were supplied.
    pub children_arg: ChildrenArg,
    /// Remaining named parameters, children excluded.
    pub params: Params,
}

/// Built-in sequential or parallel container.
#[derive(Debug)]
pub struct Container {
    type_name: String,
    kind: ContainerKind,
    children: Vec<LabeledChild>,
    children_arg: ChildrenArg,
    params: Params,
}

impl Container {
    /// Creates a container from the arguments of its constructor.
    #[must_use]
    pub fn new(type_name: impl Into<String>, kind: ContainerKind, args: ContainerArgs) -> Self {
        Self {
            type_name: type_name.into(),
            kind,
            children: args.children,
            children_arg: args.children_arg,
            params: args.params,
        }
    }

    /// Returns the container flavor.
    #[must_use]
    pub const fn kind(&self) -> ContainerKind {
        self.kind
    }

    /// Returns how the children were passed to the constructor.
    #[must_use]
    pub const fn children_arg(&self) -> &ChildrenArg {
        &self.children_arg
    }

    /// Looks up a direct child by label.
    #[must_use]
    pub fn child(&self, label: &str) -> Option<&dyn Component> {
        self.children
            .iter()
            .find(|c| c.label.as_str() == label)
            .map(|c| c.component.as_ref())
    }
}

impl Component for Container {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn params(&self) -> Option<&Params> {
        Some(&self.params)
    }

    fn container_kind(&self) -> Option<ContainerKind> {
        Some(self.kind)
    }

    fn children(&self) -> &[LabeledChild] {
        &self.children
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Opaque leaf that only records its type name and parameters.
///
/// Registered for every name in a catalog so a definition can be checked
/// against a component library without linking that library.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogStage {
    type_name: String,
    params: Params,
}

impl CatalogStage {
    /// Creates a stage for the given type with the given parameters.
    #[must_use]
    pub fn new(type_name: impl Into<String>, params: Params) -> Self {
        Self {
            type_name: type_name.into(),
            params,
        }
    }
}

impl Component for CatalogStage {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn params(&self) -> Option<&Params> {
        Some(&self.params)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
