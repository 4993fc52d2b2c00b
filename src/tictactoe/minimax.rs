//! Exhaustive minimax search for the AI opponent
//!
//! The whole game tree below the current board is explored on every call.
//! There is no pruning and no transposition cache; a 3x3 board has at most
//! 9! move sequences, so the plain search is fast enough.

use super::{
    board::{BOARD_SIZE, Board, Cell, Player},
    lines::LineAnalyzer,
};
use crate::{Error, Result, ports::MoveSource};

/// Score of an immediate AI win; each ply of delay costs one point
pub const WIN_SCORE: i32 = 10;

/// Minimax value of every empty cell for `ai`, in row-major order.
///
/// Each value is the score of the board after `ai` takes that cell, with
/// `human` to reply: `10 - depth` for an AI win, `depth - 10` for a human win,
/// `0` for a draw, where `depth` counts plies after the candidate move.
pub fn score_moves(board: &Board, ai: Player, human: Player) -> Vec<((usize, usize), i32)> {
    let mut nodes = 0u64;
    let scores = board
        .empty_cells()
        .into_iter()
        .map(|(row, col)| {
            let mut cells = *board.cells();
            cells[row * BOARD_SIZE + col] = ai.to_cell();
            let score = minimax(cells, 0, false, ai, human, &mut nodes);
            ((row, col), score)
        })
        .collect();
    tracing::debug!(board = %board.encode(), %ai, nodes, "minimax search finished");
    scores
}

/// Optimal cell for `ai` to take next.
///
/// Keeps the first cell (row-major) with the strictly greatest minimax score,
/// so the AI takes the fastest win or the slowest loss and never loses when a
/// draw is available. Returns `None` if the board has no empty cell.
pub fn best_move(board: &Board, ai: Player, human: Player) -> Option<(usize, usize)> {
    let mut best: Option<((usize, usize), i32)> = None;
    for (cell, score) in score_moves(board, ai, human) {
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((cell, score));
        }
    }
    if let Some(((row, col), score)) = best {
        tracing::debug!(%ai, row, col, score, "minimax picked move");
    }
    best.map(|(cell, _)| cell)
}

/// The AI opponent: plays [`best_move`] for whichever side is to move
#[derive(Debug, Clone)]
pub struct MinimaxPlayer {
    name: String,
}

impl MinimaxPlayer {
    pub fn new() -> Self {
        Self::named("AI")
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for MinimaxPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveSource for MinimaxPlayer {
    fn select_move(&mut self, board: &Board) -> Result<(usize, usize)> {
        let ai = board.to_move();
        best_move(board, ai, ai.opponent()).ok_or(Error::NoValidMoves)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn minimax(
    cells: [Cell; 9],
    depth: i32,
    is_maximizing: bool,
    ai: Player,
    human: Player,
    nodes: &mut u64,
) -> i32 {
    *nodes += 1;

    if LineAnalyzer::has_won(&cells, ai) {
        return WIN_SCORE - depth;
    }
    if LineAnalyzer::has_won(&cells, human) {
        return depth - WIN_SCORE;
    }
    if !cells.contains(&Cell::Empty) {
        return 0;
    }

    let (mover, mut best) = if is_maximizing {
        (ai, i32::MIN)
    } else {
        (human, i32::MAX)
    };

    for (idx, &cell) in cells.iter().enumerate() {
        if cell != Cell::Empty {
            continue;
        }
        let mut next = cells;
        next[idx] = mover.to_cell();
        let score = minimax(next, depth + 1, !is_maximizing, ai, human, nodes);
        best = if is_maximizing {
            best.max(score)
        } else {
            best.min(score)
        };
    }

    best
}
