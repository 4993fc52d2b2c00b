//! Tic-tac-toe commands - interactive play and AI simulations

use std::io::{self, BufRead, Write};

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use crate::{
    Error,
    adapters::{ConsoleObserver, ConsolePlayer, RandomPlayer, prompt},
    cli::output::{SharedWriter, create_progress, percent, print_kv, print_section},
    ports::{MoveSource, NullObserver},
    tictactoe::{
        GameMode, GameOutcome, GameSession, MinimaxPlayer, PlayConfig, Player, play_turn_loop,
    },
};

#[derive(Parser, Debug)]
#[command(about = "Play tic-tac-toe or simulate AI games")]
pub struct TicTacToeArgs {
    #[command(subcommand)]
    pub command: TicTacToeCommand,
}

#[derive(Subcommand, Debug)]
pub enum TicTacToeCommand {
    /// Play at the console (shows the main menu unless --mode is given)
    Play(PlayArgs),

    /// Pit the minimax AI against an automated opponent
    Simulate(SimulateArgs),
}

#[derive(Parser, Debug)]
pub struct PlayArgs {
    /// Start one game directly instead of showing the menu
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Your side against the AI
    #[arg(long, value_enum, default_value_t = PlayerArg::X)]
    pub human: PlayerArg,

    /// Side that makes the opening move
    #[arg(long, value_enum, default_value_t = PlayerArg::X)]
    pub first: PlayerArg,
}

#[derive(Parser, Debug)]
pub struct SimulateArgs {
    /// Number of games to play
    #[arg(long, short = 'g', default_value_t = 100)]
    pub games: usize,

    /// Opponent of the minimax AI
    #[arg(long, value_enum, default_value_t = OpponentArg::Random)]
    pub opponent: OpponentArg,

    /// Side the minimax AI plays
    #[arg(long, value_enum, default_value_t = PlayerArg::O)]
    pub ai: PlayerArg,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the tally as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Two humans taking turns at one keyboard
    TwoPlayer,
    /// Human against the minimax AI
    VsAi,
}

impl From<ModeArg> for GameMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::TwoPlayer => GameMode::TwoPlayer,
            ModeArg::VsAi => GameMode::VsAi,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlayerArg {
    X,
    O,
}

impl From<PlayerArg> for Player {
    fn from(player: PlayerArg) -> Self {
        match player {
            PlayerArg::X => Player::X,
            PlayerArg::O => Player::O,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OpponentArg {
    /// Uniformly random legal moves
    Random,
    /// A second minimax player
    Minimax,
}

/// Results of a simulation, from the AI's point of view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SimulationTally {
    pub games: usize,
    pub ai_wins: usize,
    pub draws: usize,
    pub ai_losses: usize,
}

impl SimulationTally {
    fn record(&mut self, outcome: GameOutcome, ai: Player) {
        self.games += 1;
        match outcome {
            GameOutcome::Draw => self.draws += 1,
            GameOutcome::Win(winner) if winner == ai => self.ai_wins += 1,
            GameOutcome::Win(_) => self.ai_losses += 1,
        }
    }
}

pub fn execute(args: TicTacToeArgs) -> Result<()> {
    match args.command {
        TicTacToeCommand::Play(args) => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            play(&args, &mut stdin.lock(), &mut stdout.lock())
        }
        TicTacToeCommand::Simulate(args) => {
            let tally = simulate(&args)?;
            let stdout = io::stdout();
            print_tally(&args, &tally, &mut stdout.lock())
        }
    }
}

/// Either one game in the chosen mode or the main menu
pub fn play<R: BufRead, W: Write>(args: &PlayArgs, input: &mut R, output: &mut W) -> Result<()> {
    let human = Player::from(args.human);
    let first = Player::from(args.first);
    match args.mode {
        Some(mode) => {
            let config = PlayConfig::new(mode.into())
                .with_human(human)
                .with_first_player(first);
            play_game(&config, input, output)?;
            Ok(())
        }
        None => run_menu(input, output, human, first),
    }
}

/// Main menu loop: 1 two players, 2 against the AI, 3 exit.
///
/// End of input at the menu exits like choice 3. Every game started from the
/// menu gives the human `human` and opens with `first`.
pub fn run_menu<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    human: Player,
    first: Player,
) -> Result<()> {
    writeln!(output, "===========================================")?;
    writeln!(output, "|              TIC TAC TOE                |")?;
    writeln!(output, "===========================================")?;

    loop {
        writeln!(output, "\n=== TIC TAC TOE GAME ===")?;
        writeln!(output, "1. 2-Player Mode")?;
        writeln!(output, "2. Player vs AI Mode")?;
        writeln!(output, "3. Exit")?;

        let choice = match prompt(input, output, "Enter your choice (1-3): ", "menu choice") {
            Ok(choice) => choice,
            Err(Error::InputClosed { .. }) => return Ok(()),
            Err(err) => return Err(err.into()),
        };

        let mode = match choice.as_str() {
            "1" => GameMode::TwoPlayer,
            "2" => GameMode::VsAi,
            "3" => {
                writeln!(output, "\nThanks for playing! Goodbye!")?;
                return Ok(());
            }
            _ => {
                writeln!(output, "\nInvalid choice! Please try again.")?;
                if !pause(input, output, "Press Enter to continue...")? {
                    return Ok(());
                }
                continue;
            }
        };

        let config = PlayConfig::new(mode)
            .with_human(human)
            .with_first_player(first);
        play_game(&config, input, output)?;
        if !pause(input, output, "\nPress Enter to return to main menu...")? {
            return Ok(());
        }
    }
}

/// Play one console game; the player and the observer share `output`
pub fn play_game<R: BufRead, W: Write>(
    config: &PlayConfig,
    input: &mut R,
    output: &mut W,
) -> Result<GameOutcome> {
    let shared = SharedWriter::new(output);
    let mut player = ConsolePlayer::new(input, shared.clone());
    let mut observer = ConsoleObserver::new(shared, config);
    Ok(play_turn_loop(config, &mut player, &mut observer)?)
}

/// Wait for Enter. Returns `false` if input has ended.
fn pause<R: BufRead, W: Write>(input: &mut R, output: &mut W, message: &str) -> Result<bool> {
    match prompt(input, output, message, "Enter") {
        Ok(_) => Ok(true),
        Err(Error::InputClosed { .. }) => Ok(false),
        Err(err) => Err(err.into()),
    }
}

/// Play `args.games` games of the minimax AI against the chosen opponent
pub fn simulate(args: &SimulateArgs) -> Result<SimulationTally> {
    if args.games == 0 {
        return Err(anyhow!("--games must be at least 1"));
    }

    let ai_side = Player::from(args.ai);
    let mut ai = MinimaxPlayer::new();
    let mut opponent: Box<dyn MoveSource> = match args.opponent {
        OpponentArg::Minimax => Box::new(MinimaxPlayer::named("Minimax")),
        OpponentArg::Random => Box::new(match args.seed {
            Some(seed) => RandomPlayer::with_seed("Random", seed),
            None => RandomPlayer::new("Random"),
        }),
    };

    let pb = create_progress(args.games as u64);
    let mut tally = SimulationTally::default();
    for _ in 0..args.games {
        let mut session = GameSession::new();
        let outcome = match ai_side {
            Player::X => session.play(&mut ai, &mut opponent, &mut NullObserver)?,
            Player::O => session.play(&mut opponent, &mut ai, &mut NullObserver)?,
        };
        tally.record(outcome, ai_side);
        pb.set_message(format!("{} AI losses", tally.ai_losses));
        pb.inc(1);
    }
    pb.finish_and_clear();

    tracing::info!(?tally, opponent = ?args.opponent, "simulation finished");
    Ok(tally)
}

fn print_tally<W: Write>(args: &SimulateArgs, tally: &SimulationTally, output: &mut W) -> Result<()> {
    if args.json {
        serde_json::to_writer_pretty(&mut *output, tally)?;
        writeln!(output)?;
        return Ok(());
    }

    print_section(output, "Simulation Results")?;
    print_kv(output, "AI side", &Player::from(args.ai).to_string())?;
    print_kv(output, "Opponent", &format!("{:?}", args.opponent))?;
    print_kv(output, "Games", &tally.games.to_string())?;
    print_kv(
        output,
        "AI wins",
        &format!("{} ({:.1}%)", tally.ai_wins, percent(tally.ai_wins, tally.games)),
    )?;
    print_kv(
        output,
        "Draws",
        &format!("{} ({:.1}%)", tally.draws, percent(tally.draws, tally.games)),
    )?;
    print_kv(
        output,
        "AI losses",
        &format!("{} ({:.1}%)", tally.ai_losses, percent(tally.ai_losses, tally.games)),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn run_menu_with(input: &str) -> String {
        let mut output = Vec::new();
        run_menu(&mut Cursor::new(input.to_string()), &mut output, Player::X, Player::X).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn menu_exits_on_three() {
        let text = run_menu_with("3\n");
        assert!(text.contains("1. 2-Player Mode"));
        assert!(text.ends_with("Thanks for playing! Goodbye!\n"));
    }

    #[test]
    fn menu_reprompts_on_invalid_choice() {
        let text = run_menu_with("7\n\n3\n");
        assert!(text.contains("Invalid choice! Please try again."));
        assert_eq!(text.matches("Enter your choice (1-3): ").count(), 2);
    }

    #[test]
    fn two_player_game_from_menu() {
        // X takes the top row
        let text = run_menu_with("1\n1\n1\n2\n1\n1\n2\n2\n2\n1\n3\n\n3\n");
        assert!(text.contains("Player O's turn"));
        assert!(text.contains("Player X wins!"));
        assert!(text.contains("Press Enter to return to main menu..."));
    }

    #[test]
    fn ai_answers_corner_with_center() {
        // The human stops after one move; closed input ends the game
        let args = PlayArgs {
            mode: Some(ModeArg::VsAi),
            human: PlayerArg::X,
            first: PlayerArg::X,
        };
        let mut output = Vec::new();
        let err = play(&args, &mut Cursor::new("1\n1\n".to_string()), &mut output).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::InputClosed { .. })
        ));

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("You will be playing as X, AI will be O"));
        assert!(text.contains("AI placed O at position (2, 2)"));
    }

    #[test]
    fn ai_opens_when_it_moves_first() {
        let args = PlayArgs {
            mode: Some(ModeArg::VsAi),
            human: PlayerArg::X,
            first: PlayerArg::O,
        };
        let mut output = Vec::new();
        let err = play(&args, &mut Cursor::new(String::new()), &mut output).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::InputClosed { .. })
        ));

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("AI placed O at position (1, 1)"));
        assert!(text.contains("Player X's turn"));
    }

    #[test]
    fn minimax_against_minimax_always_draws() {
        let args = SimulateArgs {
            games: 2,
            opponent: OpponentArg::Minimax,
            ai: PlayerArg::O,
            seed: None,
            json: false,
        };
        let tally = simulate(&args).unwrap();
        assert_eq!(tally.draws, 2);
    }

    #[test]
    fn minimax_never_loses_to_random_play() {
        let args = SimulateArgs {
            games: 10,
            opponent: OpponentArg::Random,
            ai: PlayerArg::X,
            seed: Some(11),
            json: false,
        };
        let tally = simulate(&args).unwrap();
        assert_eq!(tally.games, 10);
        assert_eq!(tally.ai_losses, 0);
    }

    #[test]
    fn tally_prints_as_table_or_json() {
        let args = SimulateArgs {
            games: 4,
            opponent: OpponentArg::Random,
            ai: PlayerArg::O,
            seed: Some(1),
            json: true,
        };
        let tally = SimulationTally {
            games: 4,
            ai_wins: 3,
            draws: 1,
            ai_losses: 0,
        };
        let mut output = Vec::new();
        print_tally(&args, &tally, &mut output).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["ai_wins"], 3);

        let table_args = SimulateArgs { json: false, ..args };
        let mut output = Vec::new();
        print_tally(&table_args, &tally, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Simulation Results"));
        assert!(text.contains("3 (75.0%)"));
    }
}
