//! Observer port - receives board snapshots and the outcome of a game

use crate::{
    Result,
    tictactoe::{Board, GameOutcome, Player},
};

/// Observer trait for watching a game being played.
///
/// The turn loop calls the methods in this order:
/// 1. `on_game_start(board)` - once
/// 2. For each turn:
///    - `on_board(board)` - the position the mover sees
///    - `on_move(name, player, row, col)` - after a move was accepted
/// 3. `on_board(board)` with the final position, then `on_game_end(board, outcome)`
///
/// Every method defaults to doing nothing.
pub trait GameObserver {
    fn on_game_start(&mut self, _board: &Board) -> Result<()> {
        Ok(())
    }

    fn on_board(&mut self, _board: &Board) -> Result<()> {
        Ok(())
    }

    /// Called once `player` (driven by the source called `source_name`) has
    /// taken `(row, col)`.
    fn on_move(
        &mut self,
        _source_name: &str,
        _player: Player,
        _row: usize,
        _col: usize,
    ) -> Result<()> {
        Ok(())
    }

    fn on_game_end(&mut self, _board: &Board, _outcome: GameOutcome) -> Result<()> {
        Ok(())
    }
}

/// Observer that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl GameObserver for NullObserver {}
