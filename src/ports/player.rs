//! Move source port - where the next move of a game comes from

use crate::{Error, MoveRejection, Result, tictactoe::Board};

/// Anything that can pick the next `(row, col)` for the player to move.
///
/// The turn loop asks the source whose player is [`Board::to_move`]. Humans at
/// a console, the minimax AI, seeded random play and scripted test input are
/// all adapters of this port.
///
/// # Examples
///
/// ```no_run
/// use searchlab::{ports::MoveSource, tictactoe::Board};
///
/// struct FirstFree;
///
/// impl MoveSource for FirstFree {
///     fn select_move(&mut self, board: &Board) -> searchlab::Result<(usize, usize)> {
///         board
///             .empty_cells()
///             .first()
///             .copied()
///             .ok_or(searchlab::Error::NoValidMoves)
///     }
///
///     fn name(&self) -> &str {
///         "first-free"
///     }
/// }
/// ```
pub trait MoveSource {
    /// Choose a move for `board.to_move()`.
    ///
    /// # Errors
    ///
    /// Returns an error if no move can be produced (input closed, no empty
    /// cells). The turn loop propagates it.
    fn select_move(&mut self, board: &Board) -> Result<(usize, usize)>;

    /// Name shown when this source's moves are announced
    fn name(&self) -> &str;

    /// Called when the move returned by [`MoveSource::select_move`] was refused.
    ///
    /// Interactive sources report the problem and return `Ok(())`, and the
    /// turn loop asks again.
    ///
    /// # Default Implementation
    ///
    /// Fails with [`Error::InvalidMove`], since an automated source that picks
    /// an illegal cell would pick it again.
    fn on_rejected(&mut self, row: usize, col: usize, reason: MoveRejection) -> Result<()> {
        Err(Error::InvalidMove { row, col, reason })
    }
}

impl<S: MoveSource + ?Sized> MoveSource for Box<S> {
    fn select_move(&mut self, board: &Board) -> Result<(usize, usize)> {
        (**self).select_move(board)
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn on_rejected(&mut self, row: usize, col: usize, reason: MoveRejection) -> Result<()> {
        (**self).on_rejected(row, col, reason)
    }
}
