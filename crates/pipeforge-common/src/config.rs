//! Configuration model for building a component registry.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PARALLEL_CONTAINER, DEFAULT_SEQUENTIAL_CONTAINER};

/// Root configuration: container names and the catalog of leaf types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipeforgeConfig {
    /// Registry name of the sequential container.
    pub sequential_container: String,
    /// Registry name of the parallel container.
    pub parallel_container: String,
    /// Fully-qualified names of the leaf component types to register.
    pub components: Vec<String>,
}

impl Default for PipeforgeConfig {
    fn default() -> Self {
        Self {
            sequential_container: DEFAULT_SEQUENTIAL_CONTAINER.into(),
            parallel_container: DEFAULT_PARALLEL_CONTAINER.into(),
            components: Vec::new(),
        }
    }
}

impl PipeforgeConfig {
    /// Parses a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid JSON or has unknown fields.
    pub fn from_json(text: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
