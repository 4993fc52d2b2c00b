//! Adapters implementing the move source and observer ports.
//!
//! The console adapters talk to a human, [`RandomPlayer`] and the minimax AI
//! (in [`crate::tictactoe`]) are automated sources, and the scripted adapters
//! drive games from memory.

pub mod console;
pub mod random_player;
pub mod scripted;

pub use console::{ConsoleObserver, ConsolePlayer, prompt, read_trimmed_line};
pub use random_player::RandomPlayer;
pub use scripted::{GameEvent, RecordingObserver, ScriptedPlayer};
