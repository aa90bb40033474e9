//! Triple Graph - graph algebra over a triple store
//!
//! A layer of graph-level operations on top of a subject-predicate-object
//! store:
//! - Construction from triples or from serialized files
//! - Depth-first traversal along the `parent_of` relation
//! - Set algebra (subtraction, intersection) between graphs
//! - Canonical sorted serialization, one triple per line
//!
//! ## Usage
//!
//! ```
//! use triple_graph::{Graph, MemoryStore, Node, Triple};
//!
//! let store = MemoryStore::shared();
//! let triples: Vec<Triple> = [
//!     "/u<a>\t\"parent_of\"@[]\t/u<c>",
//!     "/u<a>\t\"parent_of\"@[]\t/u<b>",
//! ]
//! .iter()
//! .map(|line| line.parse())
//! .collect::<Result<_, _>>()?;
//!
//! let graph = Graph::from_triples(store, None, triples)?;
//!
//! let mut visited = Vec::new();
//! graph.visit_depth_first(&Node::parse("/u<a>")?, |node, depth| {
//!     visited.push((node.id().to_string(), depth));
//! })?;
//! assert_eq!(visited[1], ("b".to_string(), 1));
//!
//! assert!(graph.flush_string().starts_with("/u<a>\t\"parent_of\"@[]\t/u<b>"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod errors;
pub mod graph;
pub mod store;
pub mod triple;

pub use config::GraphConfig;
pub use errors::{ConfigError, GraphError, ParseError, StoreError};
pub use graph::{DepthFirst, Graph, Intersection, SkippedTriple};
pub use store::{MemoryStore, StoredGraph, TripleStore};
pub use triple::{Literal, LiteralBuilder, Node, Object, Predicate, Triple, PARENT_OF};
