//! Depth-first traversal along `parent_of`
//!
//! Interprets a graph as a forest where `(parent, parent_of, child)` triples
//! are the edges. Walks are pre-order: a node is visited before its children,
//! and siblings are visited in ascending id order.
//!
//! The walk uses an explicit stack, so deep trees do not grow the call stack.
//! The current root-to-node path is tracked and a `parent_of` chain that
//! loops back onto it stops the walk with `GraphError::Cycle`. A node
//! reachable from two different parents is visited once per parent.

use super::{ordering, Graph};
use crate::errors::GraphError;
use crate::triple::{Node, Predicate};

/// Walker for depth-first traversals over one graph.
#[derive(Debug)]
pub struct DepthFirst<'g> {
    graph: &'g Graph,
    parent_of: Predicate,
    max_depth: Option<usize>,
}

impl<'g> DepthFirst<'g> {
    /// Create a walker following `parent_of` edges of `graph`.
    pub fn new(graph: &'g Graph, parent_of: Predicate) -> Self {
        Self {
            graph,
            parent_of,
            max_depth: graph.config().max_depth,
        }
    }

    /// Limit how many levels below the root the walk may descend.
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The children of `node`, in visiting order.
    ///
    /// Fails with `GraphError::NotANode` if any `parent_of` object is a
    /// literal or predicate.
    pub fn children(&self, node: &Node) -> Result<Vec<Node>, GraphError> {
        let relations = self
            .graph
            .backing
            .triples_for_subject_and_predicate(node, &self.parent_of)?;

        let mut children = Vec::with_capacity(relations.len());
        for relation in relations {
            match relation.object().as_node() {
                Some(child) => children.push(child.clone()),
                None => return Err(GraphError::NotANode(relation.to_string())),
            }
        }

        ordering::sort_nodes(&mut children);
        Ok(children)
    }

    /// Walk from `root`, calling `visit` with each node and its depth.
    ///
    /// `root` is visited at `start_depth`, its children at `start_depth + 1`
    /// and so on. The first error ends the walk; nodes visited before it
    /// have already been passed to `visit`.
    pub fn walk<F>(&self, root: &Node, start_depth: usize, mut visit: F) -> Result<(), GraphError>
    where
        F: FnMut(&Node, usize),
    {
        let mut stack: Vec<(Node, usize)> = vec![(root.clone(), start_depth)];
        let mut path: Vec<Node> = Vec::new();

        while let Some((node, depth)) = stack.pop() {
            let level = depth - start_depth;
            path.truncate(level);

            visit(&node, depth);

            let children = self.children(&node)?;
            path.push(node);

            if children.is_empty() {
                continue;
            }

            if let Some(max) = self.max_depth {
                if level + 1 > max {
                    return Err(GraphError::DepthExceeded {
                        depth: level + 1,
                        max,
                    });
                }
            }

            if let Some(child) = children.iter().find(|child| path.contains(child)) {
                return Err(GraphError::Cycle {
                    node: child.to_string(),
                });
            }

            // Reversed so the smallest sibling is popped first.
            stack.extend(children.into_iter().rev().map(|child| (child, depth + 1)));
        }

        Ok(())
    }
}

impl Graph {
    /// Depth-first walk from `root` along `parent_of`, starting at depth 0.
    pub fn visit_depth_first<F>(&self, root: &Node, visit: F) -> Result<(), GraphError>
    where
        F: FnMut(&Node, usize),
    {
        self.visit_depth_first_from(root, visit, 0)
    }

    /// Depth-first walk from `root` along `parent_of`, visiting `root` at
    /// `start_depth`.
    pub fn visit_depth_first_from<F>(
        &self,
        root: &Node,
        visit: F,
        start_depth: usize,
    ) -> Result<(), GraphError>
    where
        F: FnMut(&Node, usize),
    {
        DepthFirst::new(self, Predicate::parent_of()).walk(root, start_depth, visit)
    }
}
