//! Board state representation and basic operations

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::{game::GameOutcome, lines::LineAnalyzer};
use crate::types::BOARD_SIZE;

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '-',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '-' | '.' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' => Some(Cell::O),
            _ => None,
        }
    }

    /// The mark occupying this cell, if any
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::X => Some(Mark::X),
            Cell::O => Some(Mark::O),
            Cell::Empty => None,
        }
    }
}

/// The literal mark a player places on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// Get the rival mark
    pub fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Convert mark to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Mark::X => Cell::X,
            Mark::O => Cell::O,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mark::X => "X",
            Mark::O => "O",
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mark {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "X" => Ok(Mark::X),
            "O" => Ok(Mark::O),
            _ => Err(crate::Error::InvalidMark {
                mark: s.to_string(),
            }),
        }
    }
}

/// Raw board: nine cells in row-major order.
///
/// Whose turn it is lives in [`super::Game`], not here; the same board can be
/// viewed by either player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardState {
    pub cells: [Cell; BOARD_SIZE],
}

impl BoardState {
    /// Create a new empty board
    pub fn new() -> Self {
        BoardState {
            cells: [Cell::Empty; BOARD_SIZE],
        }
    }

    /// Create a board from a string representation.
    ///
    /// Whitespace and `,` separators are ignored. The remaining characters must
    /// be exactly nine cells, each `-`/`.` (empty), `X` or `O`.
    ///
    /// # Errors
    ///
    /// Returns error if the board does not have nine cells or contains an
    /// unknown character.
    pub fn from_string(s: &str) -> Result<Self, crate::Error> {
        let chars: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ',')
            .collect();
        if chars.len() != BOARD_SIZE {
            return Err(crate::Error::InvalidBoardLength {
                expected: BOARD_SIZE,
                got: chars.len(),
                context: s.to_string(),
            });
        }

        let mut cells = [Cell::Empty; BOARD_SIZE];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: s.to_string(),
            })?;
        }

        Ok(BoardState { cells })
    }

    /// Get cell at position (0-8)
    ///
    /// # Panics
    ///
    /// Panics if `pos >= BOARD_SIZE`.
    pub fn get(&self, pos: usize) -> Cell {
        self.cells[pos]
    }

    /// Check if a position is empty
    ///
    /// # Panics
    ///
    /// Panics if `pos >= BOARD_SIZE`.
    pub fn is_empty(&self, pos: usize) -> bool {
        self.cells[pos] == Cell::Empty
    }

    /// Get all empty positions in ascending order
    pub fn empty_cells(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| i)
            .collect()
    }

    /// Place `mark` at `pos` and return the new board
    #[must_use = "place returns a new board state; the original is unchanged"]
    pub fn place(&self, pos: usize, mark: Mark) -> Result<BoardState, crate::Error> {
        if pos >= BOARD_SIZE || !self.is_empty(pos) {
            return Err(crate::Error::InvalidMove { position: pos });
        }

        let mut new_state = *self;
        new_state.cells[pos] = mark.to_cell();
        Ok(new_state)
    }

    /// Check if a mark has three in a row
    pub fn has_won(&self, mark: Mark) -> bool {
        LineAnalyzer::has_won(&self.cells, mark)
    }

    /// Get the winner if there is one
    pub fn winner(&self) -> Option<Mark> {
        if self.has_won(Mark::X) {
            Some(Mark::X)
        } else if self.has_won(Mark::O) {
            Some(Mark::O)
        } else {
            None
        }
    }

    /// Check whether the game is over.
    ///
    /// A completed line wins even on a full board; a full board without a line
    /// is a draw; anything else is still in progress (`None`).
    pub fn check_winner(&self) -> Option<GameOutcome> {
        if let Some(mark) = self.winner() {
            Some(GameOutcome::Win(mark))
        } else if !self.cells.contains(&Cell::Empty) {
            Some(GameOutcome::Draw)
        } else {
            None
        }
    }

    /// Render as three rows for terminal display
    pub fn grid(&self) -> String {
        self.cells
            .chunks(3)
            .map(|row| {
                row.iter()
                    .map(|c| c.to_char().to_string())
                    .collect::<Vec<_>>()
                    .join(" | ")
            })
            .collect::<Vec<_>>()
            .join("\n---------\n")
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &cell in &self.cells {
            write!(f, "{}", cell.to_char())?;
        }
        Ok(())
    }
}

impl FromStr for BoardState {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}
