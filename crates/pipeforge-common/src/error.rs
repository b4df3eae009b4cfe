//! Unified error types for the pipeforge workspace.
//!
//! Structural problems in a definition and unknown type names are reported
//! with the location of the offending node. Errors raised by component
//! constructors pass through untouched.

use std::path::PathBuf;

use thiserror::Error;

/// Error returned by an external component constructor.
pub type ComponentError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum PipeforgeError {
    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A configuration value is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// A definition node violates the structural grammar.
    #[error("malformed definition at {at}: {message}")]
    MalformedDefinition {
        /// Location of the offending node.
        at: String,
        /// Description of the violation.
        message: String,
    },

    /// A type name is not known to the component registry.
    #[error("unresolvable type \"{type_name}\" at {at}{}", hint_suffix(.hint))]
    UnresolvableType {
        /// Location of the node naming the type.
        at: String,
        /// The name that failed to resolve.
        type_name: String,
        /// A registered name sharing the same final path segment.
        hint: Option<String>,
    },

    /// A component constructor rejected its arguments.
    #[error(transparent)]
    Component(ComponentError),

    /// Serialization or deserialization failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}

fn hint_suffix(hint: &Option<String>) -> String {
    hint.as_ref()
        .map_or_else(String::new, |h| format!(" (did you mean {h}?)"))
}

impl PipeforgeError {
    /// Returns `true` for errors caused by the shape of the definition.
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedDefinition { .. })
    }

    /// Returns `true` for errors caused by an unknown type name.
    #[must_use]
    pub const fn is_unresolvable(&self) -> bool {
        matches!(self, Self::UnresolvableType { .. })
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, PipeforgeError>;
