//! Error types for the searchlab crate

use std::fmt;

use thiserror::Error;

/// Why a tic-tac-toe move was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRejection {
    OutOfBounds,
    Occupied,
    OutOfTurn,
}

impl fmt::Display for MoveRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            MoveRejection::OutOfBounds => "outside the 3x3 board",
            MoveRejection::Occupied => "already occupied",
            MoveRejection::OutOfTurn => "not that player's turn",
        };
        f.write_str(text)
    }
}

/// Main error type for the searchlab crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("node table is full (capacity {capacity})")]
    CapacityExceeded { capacity: usize },

    #[error("node index {index} is out of range (graph has {node_count} nodes)")]
    InvalidNode { index: usize, node_count: usize },

    #[error("unknown node name '{name}'")]
    UnknownNodeName { name: String },

    #[error("node '{name}' already exists")]
    DuplicateNode { name: String },

    #[error("node names must not be empty")]
    EmptyNodeName,

    #[error("invalid move at row {row}, col {col}: {reason}")]
    InvalidMove {
        row: usize,
        col: usize,
        reason: MoveRejection,
    },

    #[error("game already over")]
    GameOver,

    #[error("no valid moves available")]
    NoValidMoves,

    #[error("input stream closed before {expected}")]
    InputClosed { expected: String },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
