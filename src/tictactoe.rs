//! Tic-Tac-Toe game implementation

pub mod board;
pub mod game;
pub mod lines;
pub mod settings;

pub use board::{BoardState, Cell, Mark};
pub use game::{EpisodeResult, Game, GameOutcome, Move};
pub use lines::{LineAnalyzer, WINNING_LINES};
pub use settings::GameSettings;
