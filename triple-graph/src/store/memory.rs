//! In-memory triple store.

use std::collections::{HashMap, HashSet};
use std::sync::mpsc::SyncSender;
use std::sync::{Arc, RwLock};

use super::{StoredGraph, TripleStore};
use crate::errors::StoreError;
use crate::triple::{Node, Predicate, Triple};

const STORE_NAME: &str = "memory";

/// A `TripleStore` that keeps every graph in process memory.
///
/// Each graph is guarded by its own `RwLock`, so concurrent scans of the same
/// graph proceed in parallel while writes are serialized.
#[derive(Debug, Default)]
pub struct MemoryStore {
    graphs: RwLock<HashMap<String, Arc<MemoryGraph>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already wrapped for sharing between graphs.
    pub fn shared() -> Arc<dyn TripleStore> {
        Arc::new(Self::new())
    }
}

impl TripleStore for MemoryStore {
    fn name(&self) -> &str {
        STORE_NAME
    }

    fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    fn new_graph(&self, name: &str) -> Result<Arc<dyn StoredGraph>, StoreError> {
        let mut graphs = self
            .graphs
            .write()
            .map_err(|_| StoreError::Poisoned(STORE_NAME.to_string()))?;

        if graphs.contains_key(name) {
            return Err(StoreError::GraphExists(name.to_string()));
        }

        let graph = Arc::new(MemoryGraph::new(name));
        graphs.insert(name.to_string(), graph.clone());
        tracing::debug!(graph = %name, "Created graph");
        Ok(graph)
    }

    fn graph(&self, name: &str) -> Result<Arc<dyn StoredGraph>, StoreError> {
        let graphs = self
            .graphs
            .read()
            .map_err(|_| StoreError::Poisoned(STORE_NAME.to_string()))?;

        match graphs.get(name) {
            Some(graph) => Ok(graph.clone()),
            None => Err(StoreError::GraphNotFound(name.to_string())),
        }
    }

    fn delete_graph(&self, name: &str) -> Result<(), StoreError> {
        let mut graphs = self
            .graphs
            .write()
            .map_err(|_| StoreError::Poisoned(STORE_NAME.to_string()))?;

        match graphs.remove(name) {
            Some(_) => {
                tracing::debug!(graph = %name, "Deleted graph");
                Ok(())
            }
            None => Err(StoreError::GraphNotFound(name.to_string())),
        }
    }

    fn graph_names(&self) -> Result<Vec<String>, StoreError> {
        let graphs = self
            .graphs
            .read()
            .map_err(|_| StoreError::Poisoned(STORE_NAME.to_string()))?;

        let mut names: Vec<String> = graphs.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}

/// A single graph held by `MemoryStore`.
#[derive(Debug)]
struct MemoryGraph {
    id: String,
    triples: RwLock<HashSet<Triple>>,
}

impl MemoryGraph {
    fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            triples: RwLock::new(HashSet::new()),
        }
    }

    fn poisoned(&self) -> StoreError {
        StoreError::Poisoned(self.id.clone())
    }
}

impl StoredGraph for MemoryGraph {
    fn id(&self) -> &str {
        &self.id
    }

    fn add_triples(&self, triples: &[Triple]) -> Result<(), StoreError> {
        let mut set = self.triples.write().map_err(|_| self.poisoned())?;
        set.extend(triples.iter().cloned());
        Ok(())
    }

    fn remove_triples(&self, triples: &[Triple]) -> Result<(), StoreError> {
        let mut set = self.triples.write().map_err(|_| self.poisoned())?;
        for triple in triples {
            set.remove(triple);
        }
        Ok(())
    }

    fn exist(&self, triple: &Triple) -> Result<bool, StoreError> {
        let set = self.triples.read().map_err(|_| self.poisoned())?;
        Ok(set.contains(triple))
    }

    fn triples_for_subject_and_predicate(
        &self,
        subject: &Node,
        predicate: &Predicate,
    ) -> Result<Vec<Triple>, StoreError> {
        let set = self.triples.read().map_err(|_| self.poisoned())?;
        Ok(set
            .iter()
            .filter(|t| t.subject() == subject && t.predicate() == predicate)
            .cloned()
            .collect())
    }

    fn triples(&self, sender: SyncSender<Triple>) -> Result<(), StoreError> {
        let set = self.triples.read().map_err(|_| self.poisoned())?;
        for triple in set.iter() {
            sender
                .send(triple.clone())
                .map_err(|_| StoreError::Disconnected(self.id.clone()))?;
        }
        Ok(())
    }
}
