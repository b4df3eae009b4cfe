//! Workspace-wide constants and default names.

/// Prefix of the labels synthesized for the children of a container.
pub const STEP_LABEL_PREFIX: &str = "step_";

/// Children parameter conventionally used by sequential containers.
pub const SEQUENTIAL_CHILDREN_PARAM: &str = "steps";

/// Children parameter conventionally used by parallel containers.
pub const PARALLEL_CHILDREN_PARAM: &str = "transformer_list";

/// Every parameter name recognized as "the list of child steps".
///
/// Both spellings are accepted for both container kinds. The order is the
/// order in which they are looked up.
pub const CHILDREN_PARAM_ALIASES: [&str; 2] = [PARALLEL_CHILDREN_PARAM, SEQUENTIAL_CHILDREN_PARAM];

/// Default registry name of the built-in sequential container.
pub const DEFAULT_SEQUENTIAL_CONTAINER: &str = "pipeline.Sequential";

/// Default registry name of the built-in parallel container.
pub const DEFAULT_PARALLEL_CONTAINER: &str = "pipeline.Parallel";

/// Name of the root node in error locations.
pub const ROOT_LOCATION: &str = "root";

