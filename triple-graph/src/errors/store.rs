use thiserror::Error;

/// Represents errors reported by a triple store implementation.
///
/// The graph layer never inspects these beyond propagating them, except for
/// existence checks during intersection, which are collected per triple.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Graph already exists: {0}")]
    GraphExists(String),

    #[error("Graph not found: {0}")]
    GraphNotFound(String),

    #[error("Lock poisoned for graph {0}")]
    Poisoned(String),

    #[error("Scan receiver for graph {0} disconnected")]
    Disconnected(String),

    #[error("Storage error: {0}")]
    Backend(String),
}
