//! Search and game-playing demos
//!
//! This crate provides:
//! - Breadth-first search over a small named network, with shortest-path
//!   reconstruction and a packet delivery trace
//! - Tic-Tac-Toe with an exhaustive minimax opponent
//! - Ports for move sources and game observers, with console, random and
//!   scripted adapters
//! - The `searchlab` command-line interface

pub mod adapters;
pub mod cli;
pub mod error;
pub mod network;
pub mod ports;
pub mod tictactoe;

pub use error::{Error, MoveRejection, Result};
