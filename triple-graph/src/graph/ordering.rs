//! Deterministic orderings for triples and nodes.
//!
//! Stores return triples in no particular order, so every consumer that
//! needs a stable result sorts through these helpers.

use std::cmp::Ordering;

use crate::triple::{Node, Triple};

/// Sort triples ascending by their whole canonical text.
pub fn sort_triples(triples: &mut [Triple]) {
    triples.sort_unstable_by(|a, b| a.as_str().cmp(b.as_str()));
}

/// Compare nodes by bare id, case-sensitive and byte-wise.
///
/// Nodes sharing an id fall back to their type so the order stays total.
pub fn compare_nodes(a: &Node, b: &Node) -> Ordering {
    a.id()
        .cmp(b.id())
        .then_with(|| a.node_type().cmp(b.node_type()))
}

/// Sort sibling nodes into traversal order.
pub fn sort_nodes(nodes: &mut [Node]) {
    nodes.sort_by(compare_nodes);
}
