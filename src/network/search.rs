//! Breadth-first search and shortest-path reconstruction

use std::collections::VecDeque;

use super::graph::{Graph, NodeId};
use crate::{Error, Result};

/// Outcome of one breadth-first search run.
///
/// Distances and parents are relative to [`SearchResult::source`]. A `None`
/// distance marks a node the search never reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    source: NodeId,
    visited: Vec<bool>,
    distance: Vec<Option<usize>>,
    parent: Vec<Option<NodeId>>,
    order: Vec<NodeId>,
}

impl SearchResult {
    pub fn source(&self) -> NodeId {
        self.source
    }

    /// Number of nodes the graph had when the search ran
    pub fn node_count(&self) -> usize {
        self.visited.len()
    }

    pub fn is_visited(&self, node: NodeId) -> bool {
        self.visited.get(node.index()).copied().unwrap_or(false)
    }

    /// Hop count from the source, or `None` when unreachable or unknown
    pub fn distance(&self, node: NodeId) -> Option<usize> {
        self.distance.get(node.index()).copied().flatten()
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.parent.get(node.index()).copied().flatten()
    }

    pub fn distances(&self) -> &[Option<usize>] {
        &self.distance
    }

    /// Nodes in the order they were taken off the frontier
    pub fn expansion_order(&self) -> &[NodeId] {
        &self.order
    }

    /// Nodes first discovered while expanding `node`, in ascending index order
    pub fn discovered_from(&self, node: NodeId) -> Vec<NodeId> {
        self.parent
            .iter()
            .enumerate()
            .filter(|&(_, parent)| *parent == Some(node))
            .map(|(index, _)| NodeId::new(index))
            .collect()
    }

    /// Shortest path from the source to `target`. See [`reconstruct_path`].
    pub fn path_to(&self, target: NodeId) -> Option<Vec<NodeId>> {
        reconstruct_path(self, target)
    }
}

/// Breadth-first search from `source` over `graph`.
///
/// Neighbours are scanned in ascending index order, so the parent tree (and
/// therefore every reconstructed path) is deterministic for a given graph.
///
/// # Errors
///
/// Returns [`Error::InvalidNode`] if `source` is not a node of `graph`.
pub fn bfs(graph: &Graph, source: NodeId) -> Result<SearchResult> {
    let node_count = graph.node_count();
    if !graph.contains(source) {
        return Err(Error::InvalidNode {
            index: source.index(),
            node_count,
        });
    }

    let mut visited = vec![false; node_count];
    let mut distance = vec![None; node_count];
    let mut parent = vec![None; node_count];
    let mut order = Vec::with_capacity(node_count);
    let mut frontier = VecDeque::with_capacity(node_count);

    visited[source.index()] = true;
    distance[source.index()] = Some(0);
    frontier.push_back((source, 0));

    while let Some((current, hops)) = frontier.pop_front() {
        order.push(current);
        for neighbor in graph.neighbors(current) {
            let slot = neighbor.index();
            if visited[slot] {
                continue;
            }
            visited[slot] = true;
            distance[slot] = Some(hops + 1);
            parent[slot] = Some(current);
            frontier.push_back((neighbor, hops + 1));
            tracing::trace!(from = %current, to = %neighbor, distance = hops + 1, "discovered node");
        }
    }

    tracing::debug!(
        source = %source,
        reached = order.len(),
        nodes = node_count,
        "breadth-first search finished"
    );

    Ok(SearchResult {
        source,
        visited,
        distance,
        parent,
        order,
    })
}

/// Walk parent pointers back from `target` and return the path in
/// source-to-target order.
///
/// Returns `None` when `target` was not reached (or is not a node of the
/// searched graph). A search's own source yields a one-element path.
pub fn reconstruct_path(result: &SearchResult, target: NodeId) -> Option<Vec<NodeId>> {
    result.distance(target)?;

    let mut path = vec![target];
    let mut current = target;
    while let Some(parent) = result.parent(current) {
        path.push(parent);
        current = parent;
    }
    path.reverse();
    Some(path)
}
