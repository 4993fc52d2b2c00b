//! Turn loop driving one game between move sources

use serde::{Deserialize, Serialize};

use super::{
    board::{Board, Player},
    game::{Game, GameOutcome, GameStatus, Move},
    minimax::MinimaxPlayer,
};
use crate::{
    Error, Result,
    ports::{GameObserver, MoveSource},
};

/// Who sits at the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameMode {
    /// Two humans share one input
    TwoPlayer,
    /// One human against the minimax AI
    VsAi,
}

/// Settings for one game started from the menu or the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayConfig {
    pub mode: GameMode,
    /// The human's side in [`GameMode::VsAi`]; ignored for two players
    pub human: Player,
    pub first_player: Player,
}

impl PlayConfig {
    pub fn new(mode: GameMode) -> Self {
        Self {
            mode,
            human: Player::X,
            first_player: Player::X,
        }
    }

    pub fn with_human(mut self, human: Player) -> Self {
        self.human = human;
        self
    }

    pub fn with_first_player(mut self, first_player: Player) -> Self {
        self.first_player = first_player;
        self
    }

    /// The AI's side, if an AI plays
    pub fn ai(&self) -> Option<Player> {
        match self.mode {
            GameMode::TwoPlayer => None,
            GameMode::VsAi => Some(self.human.opponent()),
        }
    }
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self::new(GameMode::VsAi)
    }
}

/// One game in progress. The live board is owned here and only changes
/// through accepted moves, each of which is appended to the history; start a
/// new session for a new game.
#[derive(Debug, Clone)]
pub struct GameSession {
    game: Game,
    board: Board,
}

impl GameSession {
    pub fn new() -> Self {
        Self::starting_with(Player::X)
    }

    pub fn starting_with(first_player: Player) -> Self {
        let game = Game::starting_with(first_player);
        let board = game.initial;
        Self { game, board }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Move history of this session
    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn status(&self) -> GameStatus {
        self.board.status()
    }

    /// Apply one move request for the player to move.
    ///
    /// # Errors
    ///
    /// [`crate::Error::GameOver`] after the game ended, or
    /// [`crate::Error::InvalidMove`] for a cell that cannot be taken.
    pub fn submit(&mut self, row: usize, col: usize) -> Result<GameStatus> {
        if self.game.outcome.is_some() {
            return Err(Error::GameOver);
        }

        let player = self.board.to_move();
        self.board.apply_move(row, col, player)?;
        let status = self.board.status();
        self.game.moves.push(Move { row, col, player });
        self.game.outcome = status.outcome();
        tracing::debug!(row, col, board = %self.board.encode(), ?status, "move applied");
        Ok(status)
    }

    /// Show the board to the observer, then either finish the game or get
    /// one legal move from `source`.
    ///
    /// Refused moves are passed back to [`MoveSource::on_rejected`] and the
    /// source is asked again. Returns the outcome once the board is terminal.
    pub fn play_turn(
        &mut self,
        source: &mut dyn MoveSource,
        observer: &mut dyn GameObserver,
    ) -> Result<Option<GameOutcome>> {
        observer.on_board(&self.board)?;

        if let Some(outcome) = self.board.outcome() {
            tracing::info!(?outcome, moves = self.game.moves.len(), "game finished");
            observer.on_game_end(&self.board, outcome)?;
            return Ok(Some(outcome));
        }

        let player = self.board.to_move();
        loop {
            let (row, col) = source.select_move(&self.board)?;
            if let Some(reason) = self.board.check_move(row, col, player) {
                tracing::debug!(source = source.name(), row, col, %reason, "move refused");
                source.on_rejected(row, col, reason)?;
                continue;
            }

            self.submit(row, col)?;
            observer.on_move(source.name(), player, row, col)?;
            return Ok(None);
        }
    }

    /// Play to the end with `x` and `o` choosing moves for their sides
    pub fn play(
        &mut self,
        x: &mut dyn MoveSource,
        o: &mut dyn MoveSource,
        observer: &mut dyn GameObserver,
    ) -> Result<GameOutcome> {
        self.drive(x, Some(o), observer)
    }

    /// Play to the end with one source choosing moves for both sides
    pub fn play_shared(
        &mut self,
        source: &mut dyn MoveSource,
        observer: &mut dyn GameObserver,
    ) -> Result<GameOutcome> {
        self.drive(source, None, observer)
    }

    fn drive(
        &mut self,
        x: &mut dyn MoveSource,
        mut o: Option<&mut dyn MoveSource>,
        observer: &mut dyn GameObserver,
    ) -> Result<GameOutcome> {
        observer.on_game_start(&self.board)?;
        loop {
            let source: &mut dyn MoveSource = match (self.board.to_move(), o.as_deref_mut()) {
                (Player::O, Some(o)) => o,
                _ => &mut *x,
            };
            if let Some(outcome) = self.play_turn(source, observer)? {
                return Ok(outcome);
            }
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Run a fresh game for `config` until it ends.
///
/// `human` supplies every human move: both sides in
/// [`GameMode::TwoPlayer`], or the `config.human` side against the minimax
/// AI in [`GameMode::VsAi`].
pub fn play_turn_loop(
    config: &PlayConfig,
    human: &mut dyn MoveSource,
    observer: &mut dyn GameObserver,
) -> Result<GameOutcome> {
    let mut session = GameSession::starting_with(config.first_player);
    tracing::info!(mode = ?config.mode, human = %config.human, first = %config.first_player, "starting game");

    match config.mode {
        GameMode::TwoPlayer => session.play_shared(human, observer),
        GameMode::VsAi => {
            let mut ai = MinimaxPlayer::new();
            match config.human {
                Player::X => session.play(human, &mut ai, observer),
                Player::O => session.play(&mut ai, human, observer),
            }
        }
    }
}
