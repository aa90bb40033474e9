//! Error types for the triple graph.
//! Consolidates and re-exports the errors raised by parsing, the store
//! adapter, configuration and the graph operations layered on top of them.
mod config;
mod graph;
mod parse;
mod store;

pub use config::ConfigError;
pub use graph::GraphError;
pub use parse::ParseError;
pub use store::StoreError;
