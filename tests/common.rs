//! Common test utilities for the searchlab test suite.
//!
//! Seeded generators for random networks and random legal games.

#![allow(dead_code)]

use rand::{Rng, SeedableRng, rngs::StdRng};
use searchlab::{
    network::{Graph, NodeId},
    tictactoe::{Board, GameSession},
};

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Random network with `nodes` nodes named `N0`, `N1`, ... where each pair
/// is linked with probability `density`.
pub fn random_graph(rng: &mut StdRng, nodes: usize, density: f64) -> Graph {
    let mut graph = Graph::with_capacity(nodes.max(1)).unwrap();
    for i in 0..nodes {
        graph.add_node(format!("N{i}")).unwrap();
    }
    for a in 0..nodes {
        for b in (a + 1)..nodes {
            if rng.random_bool(density) {
                graph
                    .add_connection(NodeId::new(a), NodeId::new(b))
                    .unwrap();
            }
        }
    }
    graph
}

/// Node names along `path`
pub fn names(graph: &Graph, path: &[NodeId]) -> Vec<String> {
    path.iter()
        .map(|&id| graph.name(id).unwrap().to_string())
        .collect()
}

/// Play uniformly random legal moves until the game ends. Returns the
/// session so the history can be inspected.
pub fn random_game(rng: &mut StdRng, session: &mut GameSession) -> Vec<Board> {
    let mut boards = vec![*session.board()];
    while !session.board().is_terminal() {
        let moves = session.board().empty_cells();
        let (row, col) = moves[rng.random_range(0..moves.len())];
        session.submit(row, col).unwrap();
        boards.push(*session.board());
    }
    boards
}

/// Count X and O marks on a board
pub fn mark_counts(board: &Board) -> (usize, usize) {
    use searchlab::tictactoe::Cell;
    let x = board.cells().iter().filter(|&&c| c == Cell::X).count();
    let o = board.cells().iter().filter(|&&c| c == Cell::O).count();
    (x, o)
}
