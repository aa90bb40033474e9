//! Graph operations over a triple store
//!
//! This module contains the collection type and the operations layered on
//! top of a `StoredGraph`:
//! - `Graph`: a named collection with a cumulative add counter
//! - `traversal`: depth-first walks along `parent_of`
//! - `algebra`: subtraction and intersection between graphs
//! - `serialize`: canonical sorted text form, one triple per line
//! - `ordering`: the deterministic sort orders shared by the above

mod algebra;
pub mod ordering;
mod serialize;
mod traversal;

pub use algebra::{Intersection, SkippedTriple};
pub use traversal::DepthFirst;

use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::mpsc;
use std::sync::{Arc, Mutex, OnceLock};
use std::thread;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::GraphConfig;
use crate::errors::{GraphError, StoreError};
use crate::store::{StoredGraph, TripleStore};
use crate::triple::Triple;

/// Upper bound (exclusive) of generated graph names.
const NAME_SPACE: u64 = 10_000_000_000_000_000;

/// A named, mutable set of triples plus a cumulative add counter.
///
/// The counter is not the live cardinality: it grows by the number of
/// triples passed to every `add` call and never shrinks. Bulk construction
/// pre-sets it to the input length before adding, so a graph built from `n`
/// triples reports `2 * n`. Use `len` for the number of distinct triples.
pub struct Graph {
    store: Arc<dyn TripleStore>,
    backing: Arc<dyn StoredGraph>,
    triples_count: usize,
    config: GraphConfig,
}

impl Graph {
    /// Create an empty graph, generating a name when none is given.
    ///
    /// Fails when the store already holds a graph with that name.
    pub fn new(store: Arc<dyn TripleStore>, name: Option<&str>) -> Result<Self, GraphError> {
        let name = match name {
            Some(name) => name.to_string(),
            None => random_name(),
        };
        let backing = store.new_graph(&name)?;

        Ok(Self {
            store,
            backing,
            triples_count: 0,
            config: GraphConfig::default(),
        })
    }

    /// Create a graph and add `triples` to it.
    ///
    /// The counter is set to `triples.len()` before the add, which increments
    /// it again, leaving `2 * triples.len()`.
    pub fn from_triples(
        store: Arc<dyn TripleStore>,
        name: Option<&str>,
        triples: Vec<Triple>,
    ) -> Result<Self, GraphError> {
        let mut graph = Self::new(store, name)?;
        graph.triples_count = triples.len();
        graph.add(&triples)?;
        Ok(graph)
    }

    /// Create a graph from a file in the serialized line format.
    ///
    /// The file is read fully before the graph is created, so a missing file
    /// leaves the store untouched. A parse failure returns the error and no
    /// graph, although the store keeps the partially filled backing graph.
    pub fn from_file(
        store: Arc<dyn TripleStore>,
        name: Option<&str>,
        path: impl AsRef<Path>,
    ) -> Result<Self, GraphError> {
        Self::from_file_with_config(store, name, path, GraphConfig::default())
    }

    /// `from_file` with a configuration applied before any line is parsed,
    /// so its literal bound covers the file contents.
    pub fn from_file_with_config(
        store: Arc<dyn TripleStore>,
        name: Option<&str>,
        path: impl AsRef<Path>,
        config: GraphConfig,
    ) -> Result<Self, GraphError> {
        let data = fs::read(path.as_ref())?;
        let mut graph = Self::new(store, name)?.with_config(config);
        graph.unmarshal(&data)?;
        tracing::debug!(
            graph = %graph.name(),
            path = %path.as_ref().display(),
            count = graph.triples_count,
            "Loaded graph from file"
        );
        Ok(graph)
    }

    /// Replace the configuration used by traversal, scans and parsing.
    pub fn with_config(mut self, config: GraphConfig) -> Self {
        self.config = config;
        self
    }

    /// Add triples, incrementing the counter by `triples.len()`.
    ///
    /// The counter moves even if the store rejects the triples or already
    /// holds some of them.
    pub fn add(&mut self, triples: &[Triple]) -> Result<(), GraphError> {
        self.triples_count += triples.len();
        self.backing.add_triples(triples)?;
        Ok(())
    }

    pub fn name(&self) -> &str {
        self.backing.id()
    }

    pub fn store(&self) -> &Arc<dyn TripleStore> {
        &self.store
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Cumulative number of triples passed to `add`, see the type docs.
    pub fn triples_count(&self) -> usize {
        self.triples_count
    }

    /// Number of distinct triples currently stored. Requires a full scan.
    pub fn len(&self) -> Result<usize, GraphError> {
        Ok(self.triples()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, GraphError> {
        Ok(self.len()? == 0)
    }

    /// Check whether a triple is stored in this graph.
    pub fn contains(&self, triple: &Triple) -> Result<bool, GraphError> {
        Ok(self.backing.exist(triple)?)
    }

    /// Materialize every triple, in store order.
    ///
    /// The store streams triples from a producer thread into a bounded
    /// channel while this thread collects them. Either the complete list or
    /// the store's error is returned, never a partial list.
    pub fn triples(&self) -> Result<Vec<Triple>, GraphError> {
        let (sender, receiver) = mpsc::sync_channel(self.config.scan_buffer.max(1));
        let backing = &self.backing;

        let (triples, outcome) = thread::scope(|scope| {
            let producer = scope.spawn(move || backing.triples(sender));
            let triples: Vec<Triple> = receiver.iter().collect();
            (triples, producer.join())
        });

        match outcome {
            Ok(Ok(())) => {
                tracing::trace!(graph = %self.name(), count = triples.len(), "Scanned graph");
                Ok(triples)
            }
            Ok(Err(e)) => Err(e.into()),
            Err(_) => Err(StoreError::Backend(format!(
                "scan of graph {} panicked",
                self.name()
            ))
            .into()),
        }
    }

    /// Materialize every triple in canonical order.
    pub fn sorted_triples(&self) -> Result<Vec<Triple>, GraphError> {
        let mut triples = self.triples()?;
        ordering::sort_triples(&mut triples);
        Ok(triples)
    }
}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("name", &self.name())
            .field("store", &self.store.name())
            .field("triples_count", &self.triples_count)
            .field("config", &self.config)
            .finish()
    }
}

/// Generate a decimal graph name below 10^16.
///
/// A single generator, seeded from the wall clock on first use, serves the
/// whole process.
fn random_name() -> String {
    static NAMES: OnceLock<Mutex<StdRng>> = OnceLock::new();

    let rng = NAMES.get_or_init(|| {
        let seed = Utc::now()
            .timestamp_nanos_opt()
            .unwrap_or_else(|| Utc::now().timestamp_micros());
        Mutex::new(StdRng::seed_from_u64(seed as u64))
    });
    let mut rng = rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    rng.gen_range(0..NAME_SPACE).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn triple(line: &str) -> Triple {
        line.parse().unwrap()
    }

    fn sample() -> Vec<Triple> {
        vec![
            triple("/u<a>\t\"parent_of\"@[]\t/u<b>"),
            triple("/u<a>\t\"parent_of\"@[]\t/u<c>"),
            triple("/u<c>\t\"parent_of\"@[]\t/u<d>"),
        ]
    }

    #[test]
    fn test_new_named_graph() {
        let store = MemoryStore::shared();
        let graph = Graph::new(store.clone(), Some("people")).unwrap();

        assert_eq!(graph.name(), "people");
        assert_eq!(graph.triples_count(), 0);
        assert!(graph.is_empty().unwrap());
        assert_eq!(store.graph_names().unwrap(), vec!["people"]);
    }

    #[test]
    fn test_new_graph_name_collision_fails() {
        let store = MemoryStore::shared();
        Graph::new(store.clone(), Some("people")).unwrap();

        let err = Graph::new(store, Some("people")).unwrap_err();
        assert!(matches!(err, GraphError::Store(StoreError::GraphExists(_))));
    }

    #[test]
    fn test_generated_names_are_decimal_and_distinct() {
        let store = MemoryStore::shared();
        let a = Graph::new(store.clone(), None).unwrap();
        let b = Graph::new(store, None).unwrap();

        assert_ne!(a.name(), b.name());
        for name in [a.name(), b.name()] {
            assert!(name.chars().all(|c| c.is_ascii_digit()));
            assert!(name.parse::<u64>().unwrap() < NAME_SPACE);
        }
    }

    #[test]
    fn test_from_triples_doubles_counter() {
        let graph = Graph::from_triples(MemoryStore::shared(), None, sample()).unwrap();

        assert_eq!(graph.triples_count(), 6);
        assert_eq!(graph.len().unwrap(), 3);
    }

    #[test]
    fn test_add_counts_duplicates() {
        let mut graph = Graph::new(MemoryStore::shared(), None).unwrap();
        let t = triple("/u<a>\t\"knows\"@[]\t/u<b>");

        graph.add(&[t.clone()]).unwrap();
        graph.add(&[t.clone(), t.clone()]).unwrap();

        assert_eq!(graph.triples_count(), 3);
        assert_eq!(graph.len().unwrap(), 1);
        assert!(graph.contains(&t).unwrap());
    }

    #[test]
    fn test_triples_with_small_scan_buffer() {
        let graph = Graph::from_triples(MemoryStore::shared(), None, sample())
            .unwrap()
            .with_config(GraphConfig::default().with_scan_buffer(1));

        assert_eq!(graph.sorted_triples().unwrap(), {
            let mut expected = sample();
            expected.sort();
            expected
        });
    }

    #[test]
    fn test_from_file_skips_blank_lines() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file).unwrap();
        writeln!(file, "/u<a>\t\"parent_of\"@[]\t/u<b>").unwrap();

        let graph = Graph::from_file(MemoryStore::shared(), None, file.path()).unwrap();

        assert_eq!(graph.len().unwrap(), 1);
        assert_eq!(graph.triples_count(), 1);
    }

    #[test]
    fn test_from_file_missing_path() {
        let store = MemoryStore::shared();
        let err = Graph::from_file(store.clone(), Some("g"), "/does/not/exist.triples").unwrap_err();

        assert!(matches!(err, GraphError::Io(_)));
        assert!(store.graph_names().unwrap().is_empty());
    }

    #[test]
    fn test_from_file_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "/u<a>\t\"parent_of\"@[]\t/u<b>").unwrap();
        writeln!(file, "not a triple").unwrap();

        let err = Graph::from_file(MemoryStore::shared(), None, file.path()).unwrap_err();
        assert!(matches!(err, GraphError::Parse(_)));
    }

    #[test]
    fn test_from_file_with_config_applies_literal_bound() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "/u<a>\t\"name\"@[]\t\"Alexander\"^^type:text").unwrap();
        let config = GraphConfig::default().with_max_literal_len(4);

        let err = Graph::from_file_with_config(MemoryStore::shared(), None, file.path(), config)
            .unwrap_err();
        assert!(matches!(
            err,
            GraphError::Parse(crate::errors::ParseError::LiteralTooLong { len: 9, max: 4 })
        ));

        let loaded = Graph::from_file_with_config(
            MemoryStore::shared(),
            None,
            file.path(),
            GraphConfig::default().with_max_literal_len(9),
        )
        .unwrap();
        assert_eq!(loaded.config().max_literal_len, Some(9));
        assert_eq!(loaded.len().unwrap(), 1);
    }
}
