//! Fixed-capacity undirected network with named nodes

use std::fmt;

use serde::{Deserialize, Serialize};

use super::search::{self, SearchResult};
use crate::{Error, Result};

/// Node table size used when no explicit capacity is requested
pub const DEFAULT_CAPACITY: usize = 10;

/// Largest node table a graph may be built with
pub const MAX_CAPACITY: usize = 64;

/// Node names of the built-in demo network
pub const DEMO_NODES: [&str; 5] = ["A", "B", "C", "D", "E"];

/// Links of the built-in demo network, as node indices
pub const DEMO_EDGES: [(usize, usize); 6] = [(0, 1), (0, 2), (1, 2), (1, 3), (2, 4), (3, 4)];

/// Index of a node in a [`Graph`].
///
/// Ids are handed out by [`Graph::add_node`] in insertion order, starting at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for NodeId {
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Undirected network stored as a `capacity x capacity` adjacency matrix.
///
/// The matrix is allocated once at construction; adding nodes only grows the
/// name table. Adjacency is kept symmetric by [`Graph::add_connection`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    capacity: usize,
    names: Vec<String>,
    adjacency: Vec<bool>,
}

impl Graph {
    /// Create an empty graph with [`DEFAULT_CAPACITY`] node slots
    pub fn new() -> Self {
        Self::sized(DEFAULT_CAPACITY)
    }

    /// Create an empty graph with room for `capacity` nodes.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConfiguration`] unless `1 <= capacity <= MAX_CAPACITY`.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        if !(1..=MAX_CAPACITY).contains(&capacity) {
            return Err(Error::InvalidConfiguration {
                message: format!("capacity must be between 1 and {MAX_CAPACITY}, got {capacity}"),
            });
        }
        Ok(Self::sized(capacity))
    }

    fn sized(capacity: usize) -> Self {
        Self {
            capacity,
            names: Vec::with_capacity(capacity),
            adjacency: vec![false; capacity * capacity],
        }
    }

    /// The five-node network used by the packet demo:
    /// A-B, A-C, B-C, B-D, C-E, D-E.
    pub fn demo() -> Self {
        let mut graph = Self::new();
        graph.names = DEMO_NODES.iter().map(|name| name.to_string()).collect();
        for (a, b) in DEMO_EDGES {
            graph.link(a, b);
        }
        graph
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn node_count(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Append a named node and return its id.
    ///
    /// # Errors
    ///
    /// - [`Error::CapacityExceeded`] when every slot is taken
    /// - [`Error::EmptyNodeName`] for a blank name
    /// - [`Error::DuplicateNode`] when the name is already in use
    pub fn add_node(&mut self, name: impl Into<String>) -> Result<NodeId> {
        if self.names.len() >= self.capacity {
            return Err(Error::CapacityExceeded {
                capacity: self.capacity,
            });
        }

        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::EmptyNodeName);
        }
        if self.find(&name).is_some() {
            return Err(Error::DuplicateNode { name });
        }

        let id = NodeId::new(self.names.len());
        tracing::trace!(%id, %name, "added node");
        self.names.push(name);
        Ok(id)
    }

    /// Connect two nodes in both directions. Connecting an already linked
    /// pair is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNode`] if either id is outside the current node range.
    pub fn add_connection(&mut self, a: NodeId, b: NodeId) -> Result<()> {
        let a = self.checked_index(a)?;
        let b = self.checked_index(b)?;
        self.link(a, b);
        tracing::trace!(from = %self.names[a], to = %self.names[b], "connected nodes");
        Ok(())
    }

    fn link(&mut self, a: usize, b: usize) {
        self.adjacency[a * self.capacity + b] = true;
        self.adjacency[b * self.capacity + a] = true;
    }

    fn checked_index(&self, id: NodeId) -> Result<usize> {
        if self.contains(id) {
            Ok(id.index())
        } else {
            Err(Error::InvalidNode {
                index: id.index(),
                node_count: self.node_count(),
            })
        }
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.node_count()
    }

    /// Whether `a` and `b` are directly linked. Unknown ids are never linked.
    pub fn is_connected(&self, a: NodeId, b: NodeId) -> bool {
        self.contains(a)
            && self.contains(b)
            && self.adjacency[a.index() * self.capacity + b.index()]
    }

    /// Neighbours of `id` in ascending index order (empty for unknown ids)
    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let row = id.index();
        let count = if self.contains(id) { self.node_count() } else { 0 };
        (0..count)
            .filter(move |&col| self.adjacency[row * self.capacity + col])
            .map(NodeId::new)
    }

    /// Number of undirected links (a self-loop counts once)
    pub fn edge_count(&self) -> usize {
        let n = self.node_count();
        (0..n)
            .flat_map(|a| (a..n).map(move |b| (a, b)))
            .filter(|&(a, b)| self.adjacency[a * self.capacity + b])
            .count()
    }

    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.names.get(id.index()).map(String::as_str)
    }

    /// Like [`Graph::name`] but reports unknown ids as [`Error::InvalidNode`]
    pub fn node_name(&self, id: NodeId) -> Result<&str> {
        let index = self.checked_index(id)?;
        Ok(&self.names[index])
    }

    /// Look up a node by exact name
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.names
            .iter()
            .position(|candidate| candidate == name)
            .map(NodeId::new)
    }

    /// Like [`Graph::find`] but reports unknown names as [`Error::UnknownNodeName`]
    pub fn lookup(&self, name: &str) -> Result<NodeId> {
        self.find(name).ok_or_else(|| Error::UnknownNodeName {
            name: name.to_string(),
        })
    }

    /// All nodes with their names, in id order
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(index, name)| (NodeId::new(index), name.as_str()))
    }

    /// Every node's name with the names of its neighbours, in id order
    pub fn connections(&self) -> impl Iterator<Item = (&str, Vec<&str>)> + '_ {
        self.nodes().map(move |(id, name)| {
            let neighbors = self
                .neighbors(id)
                .map(|neighbor| self.names[neighbor.index()].as_str())
                .collect();
            (name, neighbors)
        })
    }

    /// Run a breadth-first search from `source`. See [`search::bfs`].
    pub fn bfs(&self, source: NodeId) -> Result<SearchResult> {
        search::bfs(self, source)
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

/// One line per node: `A: B C`
impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, neighbors) in self.connections() {
            write!(f, "{name}:")?;
            for neighbor in neighbors {
                write!(f, " {neighbor}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
