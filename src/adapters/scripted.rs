//! In-memory move source and observer
//!
//! Replays a fixed list of moves and records what the turn loop reports.
//! Used by tests and by anything that needs to drive a game without a
//! terminal.

use std::collections::VecDeque;

use crate::{
    Error, MoveRejection, Result,
    ports::{GameObserver, MoveSource},
    tictactoe::{Board, GameOutcome, Player},
};

/// Plays queued moves in order; refused moves are recorded and skipped
#[derive(Debug, Clone)]
pub struct ScriptedPlayer {
    name: String,
    moves: VecDeque<(usize, usize)>,
    rejections: Vec<(usize, usize, MoveRejection)>,
}

impl ScriptedPlayer {
    pub fn new(moves: impl IntoIterator<Item = (usize, usize)>) -> Self {
        Self {
            name: "script".to_string(),
            moves: moves.into_iter().collect(),
            rejections: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Moves not yet played
    pub fn remaining(&self) -> usize {
        self.moves.len()
    }

    pub fn rejections(&self) -> &[(usize, usize, MoveRejection)] {
        &self.rejections
    }
}

impl MoveSource for ScriptedPlayer {
    fn select_move(&mut self, _board: &Board) -> Result<(usize, usize)> {
        self.moves.pop_front().ok_or_else(|| Error::InputClosed {
            expected: "scripted move".to_string(),
        })
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn on_rejected(&mut self, row: usize, col: usize, reason: MoveRejection) -> Result<()> {
        self.rejections.push((row, col, reason));
        Ok(())
    }
}

/// One notification received by [`RecordingObserver`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    Started(Board),
    Board(Board),
    Moved {
        source: String,
        player: Player,
        row: usize,
        col: usize,
    },
    Ended(Board, GameOutcome),
}

/// Keeps every observer event in order
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    pub events: Vec<GameEvent>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Boards shown to movers, including the final one
    pub fn boards(&self) -> Vec<Board> {
        self.events
            .iter()
            .filter_map(|event| match event {
                GameEvent::Board(board) => Some(*board),
                _ => None,
            })
            .collect()
    }

    /// Accepted moves as `(source, player, row, col)`
    pub fn moves(&self) -> Vec<(&str, Player, usize, usize)> {
        self.events
            .iter()
            .filter_map(|event| match event {
                GameEvent::Moved {
                    source,
                    player,
                    row,
                    col,
                } => Some((source.as_str(), *player, *row, *col)),
                _ => None,
            })
            .collect()
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.events.iter().rev().find_map(|event| match event {
            GameEvent::Ended(_, outcome) => Some(*outcome),
            _ => None,
        })
    }
}

impl GameObserver for RecordingObserver {
    fn on_game_start(&mut self, board: &Board) -> Result<()> {
        self.events.push(GameEvent::Started(*board));
        Ok(())
    }

    fn on_board(&mut self, board: &Board) -> Result<()> {
        self.events.push(GameEvent::Board(*board));
        Ok(())
    }

    fn on_move(&mut self, source_name: &str, player: Player, row: usize, col: usize) -> Result<()> {
        self.events.push(GameEvent::Moved {
            source: source_name.to_string(),
            player,
            row,
            col,
        });
        Ok(())
    }

    fn on_game_end(&mut self, board: &Board, outcome: GameOutcome) -> Result<()> {
        self.events.push(GameEvent::Ended(*board, outcome));
        Ok(())
    }
}
