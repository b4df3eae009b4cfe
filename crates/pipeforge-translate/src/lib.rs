//! # pipeforge-translate
//!
//! Turns a decoded pipeline definition into a tree of instantiated
//! components.
//!
//! Handles:
//! - **Definition**: Classification of definition nodes and error locations.
//! - **Type path**: Parsing of fully-qualified dotted type names.
//! - **Component**: The component trait, labeled children, and the built-in
//!   containers.
//! - **Registry**: The closed table of constructors, keyed by type path.
//! - **Translator**: The recursive step resolver and branch builder.
//! - **Outline**: Serializable structural summaries of a built tree.
//! - **Graph**: Dataflow view of the leaf stages of a built tree.

pub mod component;
pub mod definition;
pub mod graph;
pub mod outline;
pub mod registry;
pub mod translator;
pub mod type_path;

pub use translator::{Translator, pipeline_from_definition};
