//! Domain primitive types used across the pipeforge workspace.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::STEP_LABEL_PREFIX;

/// Named constructor parameters, as decoded from a definition.
pub type Params = serde_json::Map<String, serde_json::Value>;

/// Label synthesized for a child of a container, e.g. `step_0`.
///
/// Labels are never taken from the input; the position of the child in its
/// definition sequence is the only information they carry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StepLabel(String);

impl StepLabel {
    /// Creates the label for the child at the given zero-based position.
    #[must_use]
    pub fn for_index(index: usize) -> Self {
        Self(format!("{STEP_LABEL_PREFIX}{index}"))
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StepLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Flavor of a composite component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerKind {
    /// Children run one after another, in definition order.
    Sequential,
    /// Children run independently on the same input.
    Parallel,
}

impl ContainerKind {
    /// Children parameter name conventionally used by this kind.
    #[must_use]
    pub const fn conventional_children_param(self) -> &'static str {
        match self {
            Self::Sequential => crate::constants::SEQUENTIAL_CHILDREN_PARAM,
            Self::Parallel => crate::constants::PARALLEL_CHILDREN_PARAM,
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential => write!(f, "sequential"),
            Self::Parallel => write!(f, "parallel"),
        }
    }
}
