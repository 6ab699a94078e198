//! Graph shape validation.

use crate::graph::{GraphEdge, Identified};
use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The result of validating a pipeline before submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineAnalysis {
    pub num_nodes: usize,
    pub num_edges: usize,
    pub is_dag: bool,
}

/// A directed link between two identified vertices.
pub trait GraphLink {
    fn source(&self) -> &str;
    fn target(&self) -> &str;
}

impl GraphLink for GraphEdge {
    fn source(&self) -> &str {
        &self.source
    }

    fn target(&self) -> &str {
        &self.target
    }
}

impl<T: GraphLink> GraphLink for Arc<T> {
    fn source(&self) -> &str {
        T::source(self)
    }

    fn target(&self) -> &str {
        T::target(self)
    }
}

impl<T: GraphLink> GraphLink for &T {
    fn source(&self) -> &str {
        T::source(self)
    }

    fn target(&self) -> &str {
        T::target(self)
    }
}

/// Counts nodes and edges and reports whether the graph is acyclic.
///
/// Edges whose source is not among `nodes` are ignored. Traversal visits nodes in
/// list order and neighbors in edge order, and never re-enters a finished node.
pub fn analyze<N, E>(nodes: &[N], edges: &[E]) -> PipelineAnalysis
where
    N: Identified,
    E: GraphLink,
{
    let mut adjacency: AHashMap<&str, Vec<&str>> = nodes
        .iter()
        .map(|node| (node.id(), Vec::new()))
        .collect();

    for edge in edges {
        if let Some(neighbors) = adjacency.get_mut(edge.source()) {
            neighbors.push(edge.target());
        }
    }

    let mut visited: AHashSet<&str> = AHashSet::with_capacity(nodes.len());
    let is_dag = nodes.iter().all(|node| {
        visited.contains(node.id()) || !has_cycle_from(node.id(), &adjacency, &mut visited)
    });

    tracing::debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        is_dag,
        "pipeline analyzed"
    );

    PipelineAnalysis {
        num_nodes: nodes.len(),
        num_edges: edges.len(),
        is_dag,
    }
}

/// Iterative depth-first search from `start`, true when a back edge is found.
fn has_cycle_from<'a>(
    start: &'a str,
    adjacency: &AHashMap<&'a str, Vec<&'a str>>,
    visited: &mut AHashSet<&'a str>,
) -> bool {
    let mut on_stack: AHashSet<&str> = AHashSet::new();
    // (node, index of the next neighbor to examine)
    let mut stack: Vec<(&str, usize)> = vec![(start, 0)];
    visited.insert(start);
    on_stack.insert(start);

    while let Some((node, next)) = stack.last_mut() {
        let neighbors = adjacency.get(*node).map(Vec::as_slice).unwrap_or(&[]);
        match neighbors.get(*next) {
            Some(&neighbor) => {
                *next += 1;
                if on_stack.contains(neighbor) {
                    return true;
                }
                if visited.insert(neighbor) {
                    on_stack.insert(neighbor);
                    stack.push((neighbor, 0));
                }
            }
            None => {
                on_stack.remove(*node);
                stack.pop();
            }
        }
    }
    false
}
