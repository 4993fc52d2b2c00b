//! Tic-Tac-Toe game engine with a minimax opponent

pub mod board;
pub mod game;
pub mod lines;
pub mod minimax;
pub mod session;

pub use board::{BOARD_SIZE, Board, Cell, Player};
pub use game::{Game, GameOutcome, GameStatus, Move};
pub use lines::{LineAnalyzer, WINNING_LINES};
pub use minimax::{MinimaxPlayer, WIN_SCORE, best_move, score_moves};
pub use session::{GameMode, GameSession, PlayConfig, play_turn_loop};
