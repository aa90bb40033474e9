//! Triple store adapter
//!
//! Defines the interface the graph layer consumes from a backing store and
//! provides `MemoryStore`, an in-process implementation.
//!
//! A store hands out named `StoredGraph` handles. Each handle supports bulk
//! add and remove, existence checks, a subject/predicate lookup and a
//! push-style full scan into a bounded channel.

mod memory;

pub use memory::MemoryStore;

use std::sync::mpsc::SyncSender;
use std::sync::Arc;

use crate::errors::StoreError;
use crate::triple::{Node, Predicate, Triple};

/// A collection of named graphs.
///
/// Implementations own name uniqueness: `new_graph` must fail with
/// `StoreError::GraphExists` when the name is taken.
pub trait TripleStore: Send + Sync {
    /// Human-readable store name.
    fn name(&self) -> &str;

    /// Store implementation version.
    fn version(&self) -> &str;

    /// Create a new, empty graph.
    fn new_graph(&self, name: &str) -> Result<Arc<dyn StoredGraph>, StoreError>;

    /// Look up an existing graph.
    fn graph(&self, name: &str) -> Result<Arc<dyn StoredGraph>, StoreError>;

    /// Remove a graph and all of its triples.
    fn delete_graph(&self, name: &str) -> Result<(), StoreError>;

    /// Names of all graphs currently held by the store.
    fn graph_names(&self) -> Result<Vec<String>, StoreError>;
}

/// A single named set of triples inside a store.
pub trait StoredGraph: Send + Sync {
    /// The graph name, unique within its store.
    fn id(&self) -> &str;

    /// Add triples. Adding a triple already present leaves the set unchanged.
    fn add_triples(&self, triples: &[Triple]) -> Result<(), StoreError>;

    /// Remove triples. Absent triples are ignored.
    fn remove_triples(&self, triples: &[Triple]) -> Result<(), StoreError>;

    /// Check whether a triple is present.
    fn exist(&self, triple: &Triple) -> Result<bool, StoreError>;

    /// All triples with the given subject and predicate, in no particular order.
    fn triples_for_subject_and_predicate(
        &self,
        subject: &Node,
        predicate: &Predicate,
    ) -> Result<Vec<Triple>, StoreError>;

    /// Stream every triple into `sender`.
    ///
    /// Returns once all triples have been sent. The sender is dropped on
    /// return, which closes the channel for the receiving side.
    fn triples(&self, sender: SyncSender<Triple>) -> Result<(), StoreError>;
}
