//! CLI infrastructure for the searchlab demos
//!
//! This module provides the command-line interface for the network search
//! demo and the tic-tac-toe game.

pub mod commands;
pub mod config;
pub mod output;
