//! Set algebra between graphs
//!
//! Both operations leave their inputs untouched and build the result as a
//! new graph, with a generated name, in the store of the left-hand graph.

use super::Graph;
use crate::errors::{GraphError, StoreError};
use crate::triple::Triple;

/// A triple left out of an intersection because its existence check failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedTriple {
    pub triple: Triple,
    pub error: StoreError,
}

/// Result of `Graph::intersect`.
///
/// `graph` holds every triple confirmed to exist in both inputs. Triples
/// whose existence could not be determined are not in `graph`; they are
/// listed in `skipped` instead of failing the whole operation.
#[derive(Debug)]
pub struct Intersection {
    pub graph: Graph,
    pub skipped: Vec<SkippedTriple>,
}

impl Intersection {
    /// Whether every existence check succeeded.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Discard the skipped list and keep the graph.
    pub fn into_graph(self) -> Graph {
        self.graph
    }
}

impl Graph {
    /// A new graph holding the same triples, under a generated name.
    ///
    /// Built through `from_triples`, so the copy's counter is twice the
    /// number of triples copied.
    fn copy(&self) -> Result<Graph, GraphError> {
        let triples = self.triples()?;
        let copy = Graph::from_triples(self.store.clone(), None, triples)?;
        Ok(copy.with_config(self.config.clone()))
    }

    /// Triples of `self` that are not in `other`.
    ///
    /// Copies `self`, then removes every triple of `other` from the copy.
    /// Triples of `other` missing from the copy are ignored.
    pub fn subtract(&self, other: &Graph) -> Result<Graph, GraphError> {
        let difference = self.copy()?;
        let others = other.triples()?;
        difference.backing.remove_triples(&others)?;

        tracing::debug!(
            left = %self.name(),
            right = %other.name(),
            result = %difference.name(),
            removed = others.len(),
            "Subtracted graphs"
        );
        Ok(difference)
    }

    /// Triples present in both `self` and `other`.
    ///
    /// Every triple of `self` is checked against `other` individually. A
    /// failing check excludes the triple and records it in
    /// `Intersection::skipped`. Failing to scan `self` or to add to the
    /// result graph is an error. `self` is scanned before the result graph is
    /// created, so a failed scan leaves the store unchanged.
    pub fn intersect(&self, other: &Graph) -> Result<Intersection, GraphError> {
        let triples = self.triples()?;
        let mut intersection =
            Graph::new(self.store.clone(), None)?.with_config(self.config.clone());
        let mut skipped = Vec::new();

        for triple in triples {
            match other.backing.exist(&triple) {
                Ok(true) => intersection.add(std::slice::from_ref(&triple))?,
                Ok(false) => {}
                Err(error) => {
                    tracing::warn!(
                        graph = %other.name(),
                        triple = %triple,
                        error = %error,
                        "Existence check failed, skipping triple"
                    );
                    skipped.push(SkippedTriple { triple, error });
                }
            }
        }

        tracing::debug!(
            left = %self.name(),
            right = %other.name(),
            result = %intersection.name(),
            skipped = skipped.len(),
            "Intersected graphs"
        );
        Ok(Intersection {
            graph: intersection,
            skipped,
        })
    }
}
