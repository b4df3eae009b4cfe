//! The component registry.
//!
//! A closed table from fully-qualified type path to constructor, filled at
//! start-up. Two kinds of constructors exist: leaf constructors taking named
//! parameters, and container constructors taking the built children.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use pipeforge_common::config::PipeforgeConfig;
use pipeforge_common::error::{ComponentError, PipeforgeError, Result};
use pipeforge_common::types::{ContainerKind, Params};

use crate::component::{BoxedComponent, CatalogStage, Container, ContainerArgs};
use crate::type_path::{TypePath, short_name};

/// Outcome of invoking a constructor.
pub type BuildResult = std::result::Result<BoxedComponent, ComponentError>;

/// Constructor of a leaf component. Default construction passes no params.
pub type LeafFn = dyn Fn(Params) -> BuildResult + Send + Sync;

/// Constructor of a container component.
pub type ContainerFn = dyn Fn(ContainerArgs) -> BuildResult + Send + Sync;

/// A registered constructor.
#[derive(Clone)]
pub enum Constructor {
    /// Builds a leaf from named parameters.
    Leaf(Arc<LeafFn>),
    /// Builds a container from its children and remaining parameters.
    Container {
        /// Sequential or parallel.
        kind: ContainerKind,
        /// The constructor itself.
        build: Arc<ContainerFn>,
    },
}

impl Constructor {
    /// Returns the container kind, `None` for leaf constructors.
    #[must_use]
    pub const fn container_kind(&self) -> Option<ContainerKind> {
        match self {
            Self::Leaf(_) => None,
            Self::Container { kind, .. } => Some(*kind),
        }
    }
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf(_) => f.write_str("Leaf"),
            Self::Container { kind, .. } => {
                f.debug_struct("Container").field("kind", kind).finish()
            }
        }
    }
}

/// Registry of component constructors keyed by type path.
///
/// Immutable once built; lookups take `&self`, so a shared registry serves
/// concurrent translations.
#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
    entries: BTreeMap<String, Constructor>,
}

impl ComponentRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in containers under the names
    /// given in `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if a container name is not a valid type path or both
    /// containers share a name.
    pub fn with_containers(config: &PipeforgeConfig) -> Result<Self> {
        let mut registry = Self::new();
        registry
            .register_builtin_container(&config.sequential_container, ContainerKind::Sequential)?;
        registry.register_builtin_container(&config.parallel_container, ContainerKind::Parallel)?;
        Ok(registry)
    }

    /// Creates a registry with the built-in containers and a
    /// [`CatalogStage`] for every catalog name in `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if any name is invalid or registered twice.
    pub fn from_config(config: &PipeforgeConfig) -> Result<Self> {
        let mut registry = Self::with_containers(config)?;
        for name in &config.components {
            let type_name = name.clone();
            registry.register_leaf(name, move |params| {
                Ok(Box::new(CatalogStage::new(type_name.clone(), params)) as BoxedComponent)
            })?;
        }
        tracing::info!(types = registry.len(), "component registry built from catalog");
        Ok(registry)
    }

    /// Registers a leaf constructor.
    ///
    /// # Errors
    ///
    /// Returns an error if `name` is not a valid type path or is taken.
    pub fn register_leaf<F>(&mut self, name: &str, build: F) -> Result<()>
    where
        F: Fn(Params) -> BuildResult + Send + Sync + 'static,
    {
        self.insert(name, Constructor::Leaf(Arc::new(build)))
    }

    /// Registers a container constructor of the given kind.
    ///
    /// # Errors
    ///
    /// Returns an error if `name` is not a valid type path or is taken.
    pub fn register_container<F>(
        &mut self,
        name: &str,
        kind: ContainerKind,
        build: F,
    ) -> Result<()>
    where
        F: Fn(ContainerArgs) -> BuildResult + Send + Sync + 'static,
    {
        self.insert(
            name,
            Constructor::Container {
                kind,
                build: Arc::new(build),
            },
        )
    }

    /// Registers the built-in [`Container`] under `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if `name` is not a valid type path or is taken.
    pub fn register_builtin_container(&mut self, name: &str, kind: ContainerKind) -> Result<()> {
        let type_name = name.to_owned();
        self.register_container(name, kind, move |args| {
            Ok(Box::new(Container::new(type_name.clone(), kind, args)) as BoxedComponent)
        })
    }

    fn insert(&mut self, name: &str, constructor: Constructor) -> Result<()> {
        let path = TypePath::parse(name)?;
        if self.entries.contains_key(path.as_str()) {
            tracing::warn!(name, "refusing to replace a registered component type");
            return Err(PipeforgeError::Config {
                message: format!("component type \"{name}\" is already registered"),
            });
        }
        tracing::debug!(name, kind = ?constructor, "registering component type");
        let _ = self.entries.insert(path.as_str().to_owned(), constructor);
        Ok(())
    }

    /// Looks up the constructor registered under `name`.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&Constructor> {
        self.entries.get(name)
    }

    /// Returns `true` if `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Returns the first parallel container, by name, if any is registered.
    #[must_use]
    pub fn parallel_container(&self) -> Option<(&str, &Arc<ContainerFn>)> {
        self.entries.iter().find_map(|(name, ctor)| match ctor {
            Constructor::Container {
                kind: ContainerKind::Parallel,
                build,
            } => Some((name.as_str(), build)),
            _ => None,
        })
    }

    /// Suggests registered names sharing the final segment of `name`.
    ///
    /// Returns `None` when nothing matches; several matches are joined with
    /// ` or `.
    #[must_use]
    pub fn suggest(&self, name: &str) -> Option<String> {
        let wanted = short_name(name);
        let matches: Vec<&str> = self
            .entries
            .keys()
            .map(String::as_str)
            .filter(|k| *k != name && short_name(k) == wanted)
            .collect();
        if matches.is_empty() {
            None
        } else {
            Some(matches.join(" or "))
        }
    }

    /// Iterates over registered names and their container kinds, sorted.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<ContainerKind>)> {
        self.entries
            .iter()
            .map(|(name, ctor)| (name.as_str(), ctor.container_kind()))
    }

    /// Number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
