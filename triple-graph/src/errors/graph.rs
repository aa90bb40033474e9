use thiserror::Error;

use super::{ConfigError, ParseError, StoreError};

/// Unified errors from graph operations.
///
/// Store and parse failures are wrapped unchanged; the remaining variants are
/// raised by the graph layer itself during traversal and file loading.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// A `parent_of` triple whose object is not a node.
    #[error("Object of {0} is not a node")]
    NotANode(String),

    /// A `parent_of` chain leads back to a node already on the current path.
    #[error("Cycle detected: {node} is its own ancestor")]
    Cycle { node: String },

    #[error("Traversal depth {depth} exceeds maximum {max}")]
    DepthExceeded { depth: usize, max: usize },
}
