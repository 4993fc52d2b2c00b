//! searchlab CLI - breadth-first network search and tic-tac-toe with minimax
//!
//! This CLI provides:
//! - A network walkthrough: traversal, distances, shortest path, packet trace
//! - Console tic-tac-toe for two players or against the AI
//! - Batch simulations of the AI against automated opponents

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "searchlab")]
#[command(version, about = "Breadth-first search and minimax demos", long_about = None)]
struct Cli {
    /// Log debug details to stderr (RUST_LOG overrides)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search a network and send a packet along the shortest path
    Network(searchlab::cli::commands::network::NetworkArgs),

    /// Play tic-tac-toe or simulate AI games
    #[command(name = "tictactoe")]
    TicTacToe(searchlab::cli::commands::tictactoe::TicTacToeArgs),
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Network(args) => searchlab::cli::commands::network::execute(args),
        Commands::TicTacToe(args) => searchlab::cli::commands::tictactoe::execute(args),
    }
}
