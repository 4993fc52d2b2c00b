//! Game status, outcomes and move history

use serde::{Deserialize, Serialize};

use super::board::{Board, Player};

/// A move in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub row: usize,
    pub col: usize,
    pub player: Player,
}

/// Outcome of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Player),
    Draw,
}

/// Where a game stands. `Won` and `Draw` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    AwaitingMove(Player),
    Won(Player),
    Draw,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::AwaitingMove(_))
    }

    pub fn outcome(self) -> Option<GameOutcome> {
        match self {
            GameStatus::AwaitingMove(_) => None,
            GameStatus::Won(player) => Some(GameOutcome::Win(player)),
            GameStatus::Draw => Some(GameOutcome::Draw),
        }
    }
}

/// A complete game with history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub initial: Board,
    pub moves: Vec<Move>,
    pub outcome: Option<GameOutcome>,
}

impl Game {
    /// Create a new game with X to open
    pub fn new() -> Self {
        Self::starting_with(Player::X)
    }

    /// Create a new game with `first_player` to open
    pub fn starting_with(first_player: Player) -> Self {
        Game {
            initial: Board::new_with_player(first_player),
            moves: Vec::new(),
            outcome: None,
        }
    }

    /// Play a move for the player whose turn it is and return the new status
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::GameOver`] once the game has an outcome, or
    /// [`crate::Error::InvalidMove`] if the cell cannot be taken.
    pub fn play(&mut self, row: usize, col: usize) -> Result<GameStatus, crate::Error> {
        if self.outcome.is_some() {
            return Err(crate::Error::GameOver);
        }

        let current = self.current_state()?;
        let next = current.play(row, col)?;

        self.moves.push(Move {
            row,
            col,
            player: current.to_move(),
        });

        let status = next.status();
        self.outcome = status.outcome();
        Ok(status)
    }

    /// Replay moves up to a given index (exclusive)
    fn replay_moves_until(&self, end_index: usize) -> Result<Board, crate::Error> {
        let mut board = self.initial;
        for m in self.moves.iter().take(end_index) {
            board.apply_move(m.row, m.col, m.player)?;
        }
        Ok(board)
    }

    /// Get current board
    ///
    /// # Errors
    ///
    /// Returns error if any move in the history is invalid for the board it
    /// was played on. This indicates corrupted game data.
    pub fn current_state(&self) -> Result<Board, crate::Error> {
        self.replay_moves_until(self.moves.len())
    }

    /// Get the sequence of boards, starting with the initial one
    ///
    /// # Errors
    ///
    /// Same as [`Game::current_state`].
    pub fn state_sequence(&self) -> Result<Vec<Board>, crate::Error> {
        let mut states = Vec::with_capacity(self.moves.len() + 1);
        let mut board = self.initial;
        states.push(board);

        for m in &self.moves {
            board.apply_move(m.row, m.col, m.player)?;
            states.push(board);
        }

        Ok(states)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_records_moves_and_outcome() {
        let mut game = Game::new();
        for (row, col) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            let status = game.play(row, col).unwrap();
            assert!(!status.is_terminal());
        }
        let status = game.play(0, 2).unwrap();

        assert_eq!(status, GameStatus::Won(Player::X));
        assert_eq!(game.outcome, Some(GameOutcome::Win(Player::X)));
        assert_eq!(game.moves.len(), 5);
        assert_eq!(game.moves[1].player, Player::O);
    }

    #[test]
    fn play_after_game_over_fails() {
        let mut game = Game::new();
        for (row, col) in [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)] {
            game.play(row, col).unwrap();
        }
        assert!(matches!(game.play(2, 2), Err(crate::Error::GameOver)));
    }

    #[test]
    fn invalid_move_is_not_recorded() {
        let mut game = Game::new();
        game.play(1, 1).unwrap();
        assert!(game.play(1, 1).is_err());
        assert_eq!(game.moves.len(), 1);
    }

    #[test]
    fn state_sequence_replays_each_move() {
        let mut game = Game::starting_with(Player::O);
        game.play(2, 2).unwrap();
        game.play(0, 0).unwrap();

        let states = game.state_sequence().unwrap();
        assert_eq!(states.len(), 3);
        assert_eq!(states[0].occupied_count(), 0);
        assert_eq!(states[1].to_move(), Player::X);
        assert_eq!(states[2], game.current_state().unwrap());
    }

    #[test]
    fn status_outcome_mapping() {
        assert_eq!(GameStatus::AwaitingMove(Player::O).outcome(), None);
        assert_eq!(
            GameStatus::Won(Player::O).outcome(),
            Some(GameOutcome::Win(Player::O))
        );
        assert!(GameStatus::Draw.is_terminal());
    }
}
