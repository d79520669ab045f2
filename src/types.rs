//! Newtype wrappers for player-relative board encodings.

use std::fmt;

use crate::tictactoe::{BoardState, Cell, Mark};

/// Board size constant for Tic-Tac-Toe.
pub const BOARD_SIZE: usize = 9;

/// Board encoded relative to the acting player.
///
/// Each of the nine characters is `'0'` (empty), `'1'` (the player's own mark)
/// or `'2'` (the rival's mark), so a value learned while playing X transfers to
/// the same position played as O.
///
/// # Examples
///
/// ```
/// use tictactoe_td::{tictactoe::{BoardState, Mark}, types::CanonicalState};
///
/// let board = BoardState::from_string("XOX OOX X--").unwrap();
/// assert_eq!(CanonicalState::encode(&board, Mark::X).as_str(), "121221100");
/// assert_eq!(CanonicalState::encode(&board, Mark::O).as_str(), "212112200");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalState(String);

impl CanonicalState {
    /// Encode `board` from the point of view of the player holding `mark`.
    ///
    /// Pure in both arguments. Nothing is cached, so reassigning a player's mark
    /// simply changes the next encoding.
    pub fn encode(board: &BoardState, mark: Mark) -> Self {
        let own = mark.to_cell();
        let encoded = board
            .cells
            .iter()
            .map(|&cell| match cell {
                Cell::Empty => '0',
                c if c == own => '1',
                _ => '2',
            })
            .collect();
        CanonicalState(encoded)
    }

    /// Parse and validate a canonical state string.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidCanonicalState`] unless the string is nine
    /// characters drawn from `'0'`, `'1'`, `'2'`.
    pub fn parse(s: &str) -> Result<Self, crate::Error> {
        let valid = s.chars().count() == BOARD_SIZE && s.chars().all(|c| matches!(c, '0'..='2'));
        if valid {
            Ok(CanonicalState(s.to_string()))
        } else {
            Err(crate::Error::InvalidCanonicalState {
                state: s.to_string(),
            })
        }
    }

    /// Get the encoding as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Cells that are still empty in this encoding
    pub fn empty_cells(&self) -> Vec<usize> {
        self.0
            .chars()
            .enumerate()
            .filter(|&(_, c)| c == '0')
            .map(|(i, _)| i)
            .collect()
    }
}

impl AsRef<str> for CanonicalState {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
