//! Definition nodes and their locations.
//!
//! A decoded definition is a `serde_json::Value` tree. Each node is
//! classified into a [`DefinitionNode`] before it is resolved, so the
//! translator dispatches on a tag instead of probing value shapes.

use std::fmt;

use pipeforge_common::constants::ROOT_LOCATION;
use pipeforge_common::error::{PipeforgeError, Result};
use pipeforge_common::types::Params;
use serde_json::Value;

/// One classified node of a definition, borrowing from the decoded value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefinitionNode<'a> {
    /// A bare type name, default-constructed.
    BareName(&'a str),
    /// `{type_name: {param: value, ..}}`; a `null` value means no parameters.
    ParameterizedMapping {
        /// Type name taken from the single key.
        type_name: &'a str,
        /// Parameter mapping, `None` when the value was `null`.
        params: Option<&'a Params>,
    },
    /// `{type_name: [child, ..]}`: the children of a container, in order.
    ParameterizedSequence {
        /// Type name taken from the single key.
        type_name: &'a str,
        /// Child definition nodes.
        children: &'a [Value],
    },
    /// `{type_name: scalar}`. Rejected once the name has resolved.
    ScalarParameters {
        /// Type name taken from the single key.
        type_name: &'a str,
        /// The scalar found where parameters were expected.
        value: &'a Value,
    },
}

impl<'a> DefinitionNode<'a> {
    /// Classifies a decoded value.
    ///
    /// # Errors
    ///
    /// Returns a malformed-definition error if the value is neither a string
    /// nor a single-key mapping.
    pub fn classify(value: &'a Value, at: &Location<'_>) -> Result<Self> {
        match value {
            Value::String(name) => Ok(Self::BareName(name)),
            Value::Object(map) => {
                let mut entries = map.iter();
                let (Some((type_name, params)), None) = (entries.next(), entries.next()) else {
                    let keys: Vec<&str> = map.keys().map(String::as_str).collect();
                    return Err(malformed(
                        at,
                        format!(
                            "step should have a single key, found {}: [{}]",
                            keys.len(),
                            keys.join(", ")
                        ),
                    ));
                };
                match params {
                    Value::Null => Ok(Self::ParameterizedMapping {
                        type_name,
                        params: None,
                    }),
                    Value::Object(params) => Ok(Self::ParameterizedMapping {
                        type_name,
                        params: Some(params),
                    }),
                    Value::Array(children) => Ok(Self::ParameterizedSequence {
                        type_name,
                        children,
                    }),
                    value => Ok(Self::ScalarParameters { type_name, value }),
                }
            }
            other => Err(malformed(
                at,
                format!(
                    "expected step to be either a string or a mapping, found {}",
                    value_kind(other)
                ),
            )),
        }
    }

    /// Returns the type name this node refers to.
    #[must_use]
    pub const fn type_name(&self) -> &'a str {
        match *self {
            Self::BareName(type_name)
            | Self::ParameterizedMapping { type_name, .. }
            | Self::ParameterizedSequence { type_name, .. }
            | Self::ScalarParameters { type_name, .. } => type_name,
        }
    }
}

/// Human-readable kind of a decoded value, used in error messages.
#[must_use]
pub const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}

/// Builds a malformed-definition error at the given location.
pub(crate) fn malformed(at: &Location<'_>, message: String) -> PipeforgeError {
    PipeforgeError::MalformedDefinition {
        at: at.to_string(),
        message,
    }
}

/// Position of a node in the definition tree, e.g. `root.steps[1][0]`.
///
/// Locations form a borrowed chain from the node up to the root, so building
/// one for a child never allocates.
#[derive(Debug, Clone, Copy)]
pub struct Location<'p> {
    parent: Option<&'p Location<'p>>,
    segment: Segment<'p>,
}

#[derive(Debug, Clone, Copy)]
enum Segment<'p> {
    Root,
    Key(&'p str),
    Index(usize),
}

impl<'p> Location<'p> {
    /// The location of the definition root.
    #[must_use]
    pub const fn root() -> Self {
        Self {
            parent: None,
            segment: Segment::Root,
        }
    }

    /// The location of a named parameter below this one.
    #[must_use]
    pub const fn key<'c>(&'c self, key: &'c str) -> Location<'c>
    where
        'p: 'c,
    {
        Location {
            parent: Some(self),
            segment: Segment::Key(key),
        }
    }

    /// The location of the element at `index` below this one.
    #[must_use]
    pub const fn index<'c>(&'c self, index: usize) -> Location<'c>
    where
        'p: 'c,
    {
        Location {
            parent: Some(self),
            segment: Segment::Index(index),
        }
    }
}

impl fmt::Display for Location<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(parent) = self.parent {
            write!(f, "{parent}")?;
        }
        match self.segment {
            Segment::Root => write!(f, "{ROOT_LOCATION}"),
            Segment::Key(key) => write!(f, ".{key}"),
            Segment::Index(index) => write!(f, "[{index}]"),
        }
    }
}
