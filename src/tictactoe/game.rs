//! Turn-sequencing game engine

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{
    board::{BoardState, Mark},
    settings::GameSettings,
};
use crate::{Error, Result, ports::Player};

/// A move in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub position: usize,
    pub mark: Mark,
}

/// Outcome of a game.
///
/// Serialized as `"X"`, `"O"` (winner) or `"-"` (draw).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum GameOutcome {
    Win(Mark),
    Draw,
}

impl GameOutcome {
    pub fn symbol(self) -> &'static str {
        match self {
            GameOutcome::Win(mark) => mark.as_str(),
            GameOutcome::Draw => "-",
        }
    }

    /// Result from the point of view of `mark`
    pub fn result_for(self, mark: Mark) -> EpisodeResult {
        match self {
            GameOutcome::Win(winner) if winner == mark => EpisodeResult::Win,
            GameOutcome::Win(_) => EpisodeResult::Loss,
            GameOutcome::Draw => EpisodeResult::Draw,
        }
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl From<GameOutcome> for String {
    fn from(outcome: GameOutcome) -> Self {
        outcome.symbol().to_string()
    }
}

impl TryFrom<String> for GameOutcome {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        match value.as_str() {
            "-" => Ok(GameOutcome::Draw),
            other => other.parse().map(GameOutcome::Win),
        }
    }
}

/// Win, draw or loss for one participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EpisodeResult {
    Win,
    Draw,
    Loss,
}

/// One game between two players.
///
/// X always opens. Creating a game calls `start_game` on both players. Each
/// call to [`Game::make_move`] asks the player whose turn it is for a move, and
/// once the game is decided both players receive exactly one `end_game` call
/// carrying the outcome reward.
pub struct Game<'a> {
    board: BoardState,
    next_turn: Mark,
    settings: GameSettings,
    x_player: &'a mut dyn Player,
    o_player: &'a mut dyn Player,
    moves: Vec<Move>,
    outcome: Option<GameOutcome>,
}

impl<'a> Game<'a> {
    pub fn new(
        settings: GameSettings,
        x_player: &'a mut dyn Player,
        o_player: &'a mut dyn Player,
    ) -> Self {
        x_player.start_game();
        o_player.start_game();
        Self {
            board: BoardState::new(),
            next_turn: Mark::X,
            settings,
            x_player,
            o_player,
            moves: Vec::new(),
            outcome: None,
        }
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn next_turn(&self) -> Mark {
        self.next_turn
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn player_name(&self, mark: Mark) -> &str {
        match mark {
            Mark::X => self.x_player.name(),
            Mark::O => self.o_player.name(),
        }
    }

    fn player_mut(&mut self, mark: Mark) -> &mut (dyn Player + 'a) {
        match mark {
            Mark::X => &mut *self.x_player,
            Mark::O => &mut *self.o_player,
        }
    }

    /// Let the player to move take one turn.
    ///
    /// Returns `None` while the game continues, or the outcome once it is decided.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GameOver`] if called after the game ended, and
    /// [`Error::InvalidMove`] if the player picks an unavailable cell.
    pub fn make_move(&mut self) -> Result<Option<GameOutcome>> {
        if self.outcome.is_some() {
            return Err(Error::GameOver);
        }

        let mover = self.next_turn;
        let settings = self.settings;
        let board = self.board;
        let available = board.empty_cells();

        let position = self
            .player_mut(mover)
            .make_move(settings.step_reward, &board, &available)?;
        if !available.contains(&position) {
            return Err(Error::InvalidMove { position });
        }

        self.board = board.place(position, mover)?;
        self.moves.push(Move {
            position,
            mark: mover,
        });

        let outcome = self.board.check_winner();
        let final_board = self.board;
        match outcome {
            Some(GameOutcome::Win(winner)) => {
                assert_eq!(
                    winner, mover,
                    "{winner} cannot complete a line on {mover}'s move"
                );
                self.player_mut(mover)
                    .end_game(settings.win_reward, &final_board);
                self.player_mut(mover.opponent())
                    .end_game(settings.lose_reward, &final_board);
            }
            Some(GameOutcome::Draw) => {
                self.player_mut(mover)
                    .end_game(settings.draw_reward, &final_board);
                self.player_mut(mover.opponent())
                    .end_game(settings.draw_reward, &final_board);
            }
            None => {}
        }

        self.outcome = outcome;
        self.next_turn = mover.opponent();
        Ok(outcome)
    }

    /// Play turns until the game is decided
    pub fn play_to_end(&mut self) -> Result<GameOutcome> {
        loop {
            if let Some(outcome) = self.make_move()? {
                return Ok(outcome);
            }
        }
    }
}
