//! Breadth-first routing over a small named network

pub mod graph;
pub mod packet;
pub mod search;

pub use graph::{DEFAULT_CAPACITY, DEMO_EDGES, DEMO_NODES, Graph, MAX_CAPACITY, NodeId};
pub use packet::{PacketStop, PacketTrace, StopRole};
pub use search::{SearchResult, bfs, reconstruct_path};
