//! Configuration types for CLI commands

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    network::{DEFAULT_CAPACITY, DEMO_EDGES, DEMO_NODES, Graph, MAX_CAPACITY},
};

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

/// Network topology loaded from a JSON file.
///
/// ```json
/// { "capacity": 10, "nodes": ["A", "B"], "edges": [["A", "B"]] }
/// ```
///
/// `capacity` may be omitted. Edges name their endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyConfig {
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    pub nodes: Vec<String>,

    #[serde(default)]
    pub edges: Vec<(String, String)>,
}

impl Default for TopologyConfig {
    /// The five-node demo network
    fn default() -> Self {
        let nodes: Vec<String> = DEMO_NODES.iter().map(|name| name.to_string()).collect();
        let edges = DEMO_EDGES
            .iter()
            .map(|&(a, b)| (nodes[a].clone(), nodes[b].clone()))
            .collect();
        Self {
            capacity: DEFAULT_CAPACITY,
            nodes,
            edges,
        }
    }
}

impl TopologyConfig {
    /// Parse a topology from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a topology file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            operation: format!("read topology file {}", path.display()),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Validate the topology and build the graph it describes.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConfiguration`] for no nodes or a capacity outside
    /// `1..=MAX_CAPACITY`, and the graph's own errors for too many, blank or
    /// duplicate nodes or edges naming unknown nodes.
    pub fn build(&self) -> Result<Graph> {
        if self.nodes.is_empty() {
            return Err(Error::InvalidConfiguration {
                message: "topology has no nodes".to_string(),
            });
        }

        let mut graph = Graph::with_capacity(self.capacity)?;
        for name in &self.nodes {
            graph.add_node(name.as_str())?;
        }
        for (a, b) in &self.edges {
            let a = graph.lookup(a)?;
            let b = graph.lookup(b)?;
            graph.add_connection(a, b)?;
        }

        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            capacity = graph.capacity(),
            "built network topology"
        );
        Ok(graph)
    }
}
