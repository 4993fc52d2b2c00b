//! Console adapters: a human typing moves and a terminal showing the game
//!
//! Both adapters are generic over their reader/writer so the binary can hand
//! them stdin/stdout while tests use in-memory buffers.

use std::{
    collections::VecDeque,
    io::{BufRead, Write},
};

use crate::{
    Error, MoveRejection, Result,
    ports::{GameObserver, MoveSource},
    tictactoe::{Board, GameMode, GameOutcome, PlayConfig, Player},
};

const INVALID_MOVE: &str = "Invalid move! Please try again.";

/// Read one line and trim it.
///
/// # Errors
///
/// [`Error::InputClosed`] at end of input, [`Error::Io`] if reading fails.
pub fn read_trimmed_line<R: BufRead>(input: &mut R, expected: &str) -> Result<String> {
    let mut line = String::new();
    let read = input.read_line(&mut line).map_err(|source| Error::Io {
        operation: format!("read {expected}"),
        source,
    })?;
    if read == 0 {
        return Err(Error::InputClosed {
            expected: expected.to_string(),
        });
    }
    Ok(line.trim().to_string())
}

/// Print `text` without a newline, flush, and read the answer
pub fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    text: &str,
    expected: &str,
) -> Result<String> {
    write!(output, "{text}")?;
    output.flush()?;
    read_trimmed_line(input, expected)
}

/// A human entering 1-based row and column numbers, one per line or both
/// on one line separated by whitespace
pub struct ConsolePlayer<R, W> {
    input: R,
    output: W,
    name: String,
    pending: VecDeque<String>,
}

impl<R: BufRead, W: Write> ConsolePlayer<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            name: "Player".to_string(),
            pending: VecDeque::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Zero-based coordinate, or `None` if the answer is not 1, 2 or 3-ish.
    /// Words left over from an earlier line are used before prompting.
    fn read_coordinate(&mut self, label: &str) -> Result<Option<usize>> {
        if self.pending.is_empty() {
            let answer = prompt(
                &mut self.input,
                &mut self.output,
                &format!("Enter {label} (1-3): "),
                label,
            )?;
            self.pending = answer.split_whitespace().map(str::to_string).collect();
        }
        Ok(self
            .pending
            .pop_front()
            .and_then(|word| word.parse::<usize>().ok())
            .and_then(|n| n.checked_sub(1)))
    }
}

impl<R: BufRead, W: Write> MoveSource for ConsolePlayer<R, W> {
    fn select_move(&mut self, board: &Board) -> Result<(usize, usize)> {
        let player = board.to_move();
        loop {
            self.pending.clear();
            writeln!(self.output, "Player {player}'s turn")?;
            let row = self.read_coordinate("row")?;
            let col = self.read_coordinate("column")?;
            match (row, col) {
                (Some(row), Some(col)) if board.is_valid_move(row, col) => {
                    self.pending.clear();
                    return Ok((row, col));
                }
                _ => writeln!(self.output, "{INVALID_MOVE}")?,
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn on_rejected(&mut self, _row: usize, _col: usize, _reason: MoveRejection) -> Result<()> {
        writeln!(self.output, "{INVALID_MOVE}")?;
        Ok(())
    }
}

/// Prints boards, AI moves and the final result
pub struct ConsoleObserver<W> {
    output: W,
    mode: GameMode,
    human: Player,
}

impl<W: Write> ConsoleObserver<W> {
    pub fn new(output: W, config: &PlayConfig) -> Self {
        Self {
            output,
            mode: config.mode,
            human: config.human,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn outcome_message(&self, outcome: GameOutcome) -> String {
        match (self.mode, outcome) {
            (_, GameOutcome::Draw) => "It's a draw!".to_string(),
            (GameMode::TwoPlayer, GameOutcome::Win(winner)) => format!("Player {winner} wins!"),
            (GameMode::VsAi, GameOutcome::Win(winner)) if winner == self.human => {
                "You win! Congratulations!".to_string()
            }
            (GameMode::VsAi, GameOutcome::Win(_)) => "AI wins! Better luck next time!".to_string(),
        }
    }
}

impl<W: Write> GameObserver for ConsoleObserver<W> {
    fn on_game_start(&mut self, _board: &Board) -> Result<()> {
        if self.mode == GameMode::VsAi {
            writeln!(
                self.output,
                "\nYou will be playing as {}, AI will be {}",
                self.human,
                self.human.opponent()
            )?;
        }
        Ok(())
    }

    fn on_board(&mut self, board: &Board) -> Result<()> {
        writeln!(self.output)?;
        write!(self.output, "{board}")?;
        writeln!(self.output)?;
        if self.mode == GameMode::VsAi && !board.is_terminal() && board.to_move() != self.human {
            writeln!(self.output, "AI is thinking...")?;
        }
        Ok(())
    }

    fn on_move(&mut self, source_name: &str, player: Player, row: usize, col: usize) -> Result<()> {
        if self.mode == GameMode::VsAi && player != self.human {
            writeln!(
                self.output,
                "{source_name} placed {player} at position ({}, {})",
                row + 1,
                col + 1
            )?;
        }
        Ok(())
    }

    fn on_game_end(&mut self, _board: &Board, outcome: GameOutcome) -> Result<()> {
        let message = self.outcome_message(outcome);
        writeln!(self.output, "{message}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn output_text(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn console_player_converts_to_zero_based() {
        let mut player = ConsolePlayer::new(Cursor::new("2\n3\n"), Vec::new());
        let mv = player.select_move(&Board::new()).unwrap();
        assert_eq!(mv, (1, 2));

        let text = output_text(player.into_output());
        assert!(text.contains("Player X's turn"));
        assert!(text.contains("Enter column (1-3): "));
    }

    #[test]
    fn console_player_reprompts_on_bad_input() {
        let board = Board::from_string("X.. ... ...").unwrap();
        let input = "1\n1\nzero\n2\n0\n1\n3\n3\n";
        let mut player = ConsolePlayer::new(Cursor::new(input), Vec::new());

        assert_eq!(player.select_move(&board).unwrap(), (2, 2));
        let text = output_text(player.into_output());
        assert_eq!(text.matches(INVALID_MOVE).count(), 3);
    }

    #[test]
    fn console_player_takes_row_and_column_on_one_line() {
        let mut player = ConsolePlayer::new(Cursor::new("2 3\n"), Vec::new());
        assert_eq!(player.select_move(&Board::new()).unwrap(), (1, 2));

        let text = output_text(player.into_output());
        assert!(text.contains("Enter row (1-3): "));
        assert!(!text.contains("Enter column"));
    }

    #[test]
    fn console_player_drops_extra_words_after_a_bad_move() {
        let board = Board::from_string("X.. ... ...").unwrap();
        let input = "1 1 2 2\n3\n1\n";
        let mut player = ConsolePlayer::new(Cursor::new(input), Vec::new());

        assert_eq!(player.select_move(&board).unwrap(), (2, 0));
        let text = output_text(player.into_output());
        assert_eq!(text.matches(INVALID_MOVE).count(), 1);
    }

    #[test]
    fn console_player_reports_closed_input() {
        let mut player = ConsolePlayer::new(Cursor::new("1\n"), Vec::new());
        let err = player.select_move(&Board::new()).unwrap_err();
        assert!(matches!(err, Error::InputClosed { .. }));
    }

    #[test]
    fn observer_announces_ai_moves_only() {
        let config = PlayConfig::new(GameMode::VsAi);
        let mut observer = ConsoleObserver::new(Vec::new(), &config);
        observer.on_move("Player", Player::X, 0, 0).unwrap();
        observer.on_move("AI", Player::O, 1, 1).unwrap();

        let text = output_text(observer.into_output());
        assert_eq!(text, "AI placed O at position (2, 2)\n");
    }

    #[test]
    fn observer_shows_board_and_thinking_line_before_ai_turn() {
        let config = PlayConfig::new(GameMode::VsAi);
        let mut observer = ConsoleObserver::new(Vec::new(), &config);
        let board = Board::from_string("X.. ... ...").unwrap();
        observer.on_board(&board).unwrap();

        let text = output_text(observer.into_output());
        assert!(text.contains("1 | X |   |   |"));
        assert!(text.ends_with("AI is thinking...\n"));
    }

    #[test]
    fn observer_outcome_messages_depend_on_mode() {
        let vs_ai = PlayConfig::new(GameMode::VsAi);
        let observer = ConsoleObserver::new(Vec::new(), &vs_ai);
        assert_eq!(
            observer.outcome_message(GameOutcome::Win(Player::X)),
            "You win! Congratulations!"
        );
        assert_eq!(
            observer.outcome_message(GameOutcome::Win(Player::O)),
            "AI wins! Better luck next time!"
        );

        let two = PlayConfig::new(GameMode::TwoPlayer);
        let observer = ConsoleObserver::new(Vec::new(), &two);
        assert_eq!(
            observer.outcome_message(GameOutcome::Win(Player::O)),
            "Player O wins!"
        );
        assert_eq!(observer.outcome_message(GameOutcome::Draw), "It's a draw!");
    }
}
