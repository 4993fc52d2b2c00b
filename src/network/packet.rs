//! Cosmetic packet delivery along a breadth-first shortest path

use std::fmt;

use serde::Serialize;

use super::{
    graph::{Graph, NodeId},
    search::SearchResult,
};
use crate::Result;

/// Where a stop sits on the route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StopRole {
    Source,
    /// Intermediate stop, numbered from 1
    Hop(usize),
    Destination,
}

impl fmt::Display for StopRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopRole::Source => f.write_str("SOURCE"),
            StopRole::Hop(n) => write!(f, "HOP {n}"),
            StopRole::Destination => f.write_str("DESTINATION"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PacketStop {
    pub node: NodeId,
    pub name: String,
    pub role: StopRole,
}

/// A packet's journey from the search source to a destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PacketTrace {
    pub source: String,
    pub destination: String,
    pub stops: Vec<PacketStop>,
    pub total_hops: usize,
}

impl PacketTrace {
    /// Build the trace to `target` from a finished search.
    ///
    /// Returns `Ok(None)` when `target` is unreachable from the search source.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidNode`] if `result` was computed on a
    /// different graph and names a node `graph` does not have.
    pub fn route(graph: &Graph, result: &SearchResult, target: NodeId) -> Result<Option<Self>> {
        let Some(path) = result.path_to(target) else {
            return Ok(None);
        };

        let last = path.len() - 1;
        let mut stops = Vec::with_capacity(path.len());
        for (i, &node) in path.iter().enumerate() {
            let role = match i {
                0 => StopRole::Source,
                i if i == last => StopRole::Destination,
                i => StopRole::Hop(i),
            };
            stops.push(PacketStop {
                node,
                name: graph.node_name(node)?.to_string(),
                role,
            });
        }

        Ok(Some(Self {
            source: graph.node_name(result.source())?.to_string(),
            destination: graph.node_name(target)?.to_string(),
            stops,
            total_hops: last,
        }))
    }
}

impl fmt::Display for PacketTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== PACKET SENDING SIMULATION ===")?;
        writeln!(
            f,
            "Sending packet from {} to {}...",
            self.source, self.destination
        )?;
        writeln!(f)?;

        let last = self.stops.len().saturating_sub(1);
        for (i, stop) in self.stops.iter().enumerate() {
            writeln!(f, "Packet at: {} ({})", stop.name, stop.role)?;
            if i < last {
                writeln!(f, "  Traveling to next node...")?;
                writeln!(f)?;
            }
        }

        writeln!(f, "=== PACKET DELIVERED SUCCESSFULLY ===")?;
        writeln!(f, "Packet reached {} via shortest path!", self.destination)?;
        write!(f, "Total hops: {}", self.total_hops)
    }
}
