//! Board state representation and basic operations

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{
    game::{GameOutcome, GameStatus},
    lines::LineAnalyzer,
};
use crate::{Error, MoveRejection, Result};

/// Rows and columns on the board
pub const BOARD_SIZE: usize = 3;

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }
}

/// A player in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_cell().to_char())
    }
}

/// 3x3 grid plus the player whose turn it is.
///
/// Cells are stored row-major. The only way to change a board is
/// [`Board::apply_move`] (or its copying sibling [`Board::play`]), which keeps
/// the piece counts alternating: the opener is either level with or one
/// piece ahead of the other player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; 9],
    to_move: Player,
}

impl Board {
    /// Create a new empty board with X to move
    pub fn new() -> Self {
        Self::new_with_player(Player::X)
    }

    /// Create a new empty board with `first_player` to move
    pub fn new_with_player(first_player: Player) -> Self {
        Self {
            cells: [Cell::Empty; 9],
            to_move: first_player,
        }
    }

    /// Parse a board from 9 cell characters (`.` empty, `X`, `O`).
    ///
    /// Whitespace and `|`/`/` separators are ignored, so `"XO. / .X. / ..O"`
    /// is accepted. The player to move is inferred from the piece counts with
    /// X-first semantics.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for the wrong number of cells,
    /// an unknown character, or piece counts no X-first game can reach.
    pub fn from_string(s: &str) -> Result<Self> {
        let invalid = |message: String| Error::InvalidConfiguration {
            message: format!("board '{s}': {message}"),
        };

        let chars: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '|' && *c != '/')
            .collect();
        if chars.len() != 9 {
            return Err(invalid(format!("expected 9 cells, got {}", chars.len())));
        }

        let mut cells = [Cell::Empty; 9];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = Cell::from_char(c)
                .ok_or_else(|| invalid(format!("invalid character '{c}' at cell {i}")))?;
        }

        let x = cells.iter().filter(|&&c| c == Cell::X).count();
        let o = cells.iter().filter(|&&c| c == Cell::O).count();
        let to_move = if x == o {
            Player::X
        } else if x == o + 1 {
            Player::O
        } else {
            return Err(invalid(format!(
                "piece counts X={x}, O={o} must be equal or X ahead by 1"
            )));
        };

        Ok(Self { cells, to_move })
    }

    /// Row-major index of `(row, col)`, or `None` outside the board
    pub fn index(row: usize, col: usize) -> Option<usize> {
        (row < BOARD_SIZE && col < BOARD_SIZE).then_some(row * BOARD_SIZE + col)
    }

    /// Inverse of [`Board::index`]
    pub fn coords(index: usize) -> (usize, usize) {
        (index / BOARD_SIZE, index % BOARD_SIZE)
    }

    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Cell at `(row, col)`, or `None` outside the board
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        Self::index(row, col).map(|i| self.cells[i])
    }

    /// Count the number of occupied cells on the board
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != Cell::Empty).count()
    }

    /// Empty cells as `(row, col)` in row-major order
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| Self::coords(i))
            .collect()
    }

    /// Whether `(row, col)` is on the board and empty
    pub fn is_valid_move(&self, row: usize, col: usize) -> bool {
        self.get(row, col) == Some(Cell::Empty)
    }

    /// Why a move by `player` at `(row, col)` would be refused, if it would be
    pub fn check_move(&self, row: usize, col: usize, player: Player) -> Option<MoveRejection> {
        match self.get(row, col) {
            None => Some(MoveRejection::OutOfBounds),
            Some(Cell::X | Cell::O) => Some(MoveRejection::Occupied),
            Some(Cell::Empty) if player != self.to_move => Some(MoveRejection::OutOfTurn),
            Some(Cell::Empty) => None,
        }
    }

    /// Place `player`'s mark at `(row, col)` and hand the turn over.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMove`] without touching the board when the
    /// cell is off the board, occupied, or it is not `player`'s turn.
    pub fn apply_move(&mut self, row: usize, col: usize, player: Player) -> Result<()> {
        if let Some(reason) = self.check_move(row, col, player) {
            return Err(Error::InvalidMove { row, col, reason });
        }

        self.cells[row * BOARD_SIZE + col] = player.to_cell();
        self.to_move = player.opponent();
        Ok(())
    }

    /// Make a move for the player to move and return the new board
    #[must_use = "play returns a new board; the original is unchanged"]
    pub fn play(&self, row: usize, col: usize) -> Result<Board> {
        let mut next = *self;
        next.apply_move(row, col, self.to_move)?;
        Ok(next)
    }

    /// Whether `player` owns a full row, column or diagonal
    pub fn check_winner(&self, player: Player) -> bool {
        LineAnalyzer::has_won(&self.cells, player)
    }

    /// Whether no empty cells remain
    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// Get the winner if there is one
    pub fn winner(&self) -> Option<Player> {
        if self.check_winner(Player::X) {
            Some(Player::X)
        } else if self.check_winner(Player::O) {
            Some(Player::O)
        } else {
            None
        }
    }

    /// Where the game stands on this board
    pub fn status(&self) -> GameStatus {
        if let Some(winner) = self.winner() {
            GameStatus::Won(winner)
        } else if self.is_full() {
            GameStatus::Draw
        } else {
            GameStatus::AwaitingMove(self.to_move)
        }
    }

    /// Final outcome, or `None` while the game is still running
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.status().outcome()
    }

    /// Check if the game is over (win or draw)
    pub fn is_terminal(&self) -> bool {
        self.status().is_terminal()
    }

    /// Compact key such as `X...O...._X` (cells then player to move)
    pub fn encode(&self) -> String {
        format!(
            "{}_{}",
            self.cells.iter().map(|&c| c.to_char()).collect::<String>(),
            self.to_move
        )
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Grid with 1-based row and column labels, as shown to players
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const RULE: &str = "  +---+---+---+";

        writeln!(f, "    1   2   3")?;
        writeln!(f, "{RULE}")?;
        for row in 0..BOARD_SIZE {
            write!(f, "{} |", row + 1)?;
            for col in 0..BOARD_SIZE {
                let mark = match self.cells[row * BOARD_SIZE + col] {
                    Cell::Empty => ' ',
                    cell => cell.to_char(),
                };
                write!(f, " {mark} |")?;
            }
            writeln!(f)?;
            writeln!(f, "{RULE}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board() {
        let board = Board::new();
        assert_eq!(board.to_move(), Player::X);
        assert!(board.cells().iter().all(|&c| c == Cell::Empty));
        assert_eq!(board.status(), GameStatus::AwaitingMove(Player::X));
    }

    #[test]
    fn test_apply_move() {
        let mut board = Board::new();
        board.apply_move(1, 1, Player::X).unwrap();

        assert_eq!(board.get(1, 1), Some(Cell::X));
        assert_eq!(board.to_move(), Player::O);
        assert!(!board.is_valid_move(1, 1));
    }

    #[test]
    fn test_apply_move_rejects_occupied_cell() {
        let mut board = Board::from_string("X........").unwrap();
        let before = board;

        let err = board.apply_move(0, 0, Player::O).unwrap_err();
        assert!(err.to_string().contains("occupied"));
        assert_eq!(board, before);
    }

    #[test]
    fn test_apply_move_rejects_out_of_bounds() {
        let mut board = Board::new();
        let err = board.apply_move(3, 0, Player::X).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidMove {
                reason: MoveRejection::OutOfBounds,
                ..
            }
        ));
        assert!(!board.is_valid_move(0, 3));
    }

    #[test]
    fn test_apply_move_rejects_wrong_player() {
        let mut board = Board::new();
        let err = board.apply_move(0, 0, Player::O).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidMove {
                reason: MoveRejection::OutOfTurn,
                ..
            }
        ));
        assert_eq!(board.occupied_count(), 0);
    }

    #[test]
    fn test_play_leaves_original_untouched() {
        let board = Board::new();
        let next = board.play(0, 2).unwrap();
        assert_eq!(board.occupied_count(), 0);
        assert_eq!(next.get(0, 2), Some(Cell::X));
    }

    #[test]
    fn test_empty_cells_are_row_major() {
        let board = Board::from_string("XO.X.....").unwrap();
        let empty = board.empty_cells();
        assert_eq!(empty.len(), 6);
        assert_eq!(empty[0], (0, 2));
        assert_eq!(empty[1], (1, 1));
    }

    #[test]
    fn test_win_detection_row_column_diagonal() {
        assert!(Board::from_string("XXX OO. ...").unwrap().check_winner(Player::X));
        assert!(Board::from_string("XO. XO. .O X").unwrap().check_winner(Player::O));
        assert!(Board::from_string("XO. OX. ..X").unwrap().check_winner(Player::X));
        assert!(Board::from_string("XXO .O. OX.").unwrap().check_winner(Player::O));
    }

    #[test]
    fn test_draw_detection() {
        let board = Board::from_string("XOX XOO OXX").unwrap();
        assert!(board.is_full());
        assert_eq!(board.winner(), None);
        assert_eq!(board.status(), GameStatus::Draw);
        assert_eq!(board.outcome(), Some(GameOutcome::Draw));
    }

    #[test]
    fn test_full_board_with_winner_is_a_win() {
        let board = Board::from_string("XXX OOX OXO").unwrap();
        assert!(board.is_full());
        assert_eq!(board.status(), GameStatus::Won(Player::X));
    }

    #[test]
    fn test_from_string() {
        let board = Board::from_string("XOX......").unwrap();
        assert_eq!(board.get(0, 1), Some(Cell::O));
        assert_eq!(board.to_move(), Player::O);

        assert!(Board::from_string("XO").is_err());
        assert!(Board::from_string("XOZ......").is_err());
        assert!(Board::from_string("XXX......").is_err());
    }

    #[test]
    fn test_encode() {
        let board = Board::from_string("XO.......").unwrap();
        assert_eq!(board.encode(), "XO......._X");
        assert_eq!(Board::new_with_player(Player::O).encode(), "........._O");
    }

    #[test]
    fn test_display() {
        let board = Board::from_string("X.. .O. ...").unwrap();
        let expected = "    1   2   3\n  +---+---+---+\n1 | X |   |   |\n  +---+---+---+\n2 |   | O |   |\n  +---+---+---+\n3 |   |   |   |\n  +---+---+---+\n";
        assert_eq!(board.to_string(), expected);
    }

    #[test]
    fn test_player_alternation() {
        let mut board = Board::new();
        for (i, (row, col)) in [(0, 0), (0, 1), (0, 2)].into_iter().enumerate() {
            let expected = if i % 2 == 0 { Player::X } else { Player::O };
            assert_eq!(board.to_move(), expected);
            board = board.play(row, col).unwrap();
        }
        assert_eq!(board.to_move(), Player::O);
    }
}
