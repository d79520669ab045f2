//! Human player reading moves from a terminal

use std::io::{self, BufRead, Write};

use log::warn;

use crate::{
    Error, Result,
    ports::Player,
    tictactoe::{BoardState, Mark},
};

const INVALID_INPUT: &str = "Invalid input! Please enter an integer in the list!";

/// Prompts for a move until it receives one of the available cells
pub struct ConsolePlayer<R, W> {
    mark: Mark,
    input: R,
    output: W,
}

impl ConsolePlayer<io::StdinLock<'static>, io::Stdout> {
    /// Bind to the process's stdin/stdout
    pub fn stdio(mark: Mark) -> Self {
        Self::new(mark, io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsolePlayer<R, W> {
    pub fn new(mark: Mark, input: R, output: W) -> Self {
        Self {
            mark,
            input,
            output,
        }
    }

    fn write_out(&mut self, text: &str) -> Result<()> {
        self.output
            .write_all(text.as_bytes())
            .and_then(|_| self.output.flush())
            .map_err(|e| Error::io("write to console", e))
    }

    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| Error::io("read from console", e))?;
        if read == 0 {
            return Err(Error::InputClosed);
        }
        Ok(line)
    }
}

impl<R: BufRead, W: Write> Player for ConsolePlayer<R, W> {
    fn mark(&self) -> Mark {
        self.mark
    }

    fn set_mark(&mut self, mark: Mark) {
        self.mark = mark;
    }

    fn name(&self) -> &str {
        "ConsolePlayer"
    }

    fn make_move(&mut self, _reward: f64, state: &BoardState, available: &[usize]) -> Result<usize> {
        if available.is_empty() {
            return Err(Error::NoValidMoves);
        }

        let listing = available
            .iter()
            .map(|m| m.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        self.write_out(&format!("{}\n", state.grid()))?;

        loop {
            self.write_out(&format!(
                "Enter next move as '{}' (Available: {listing}) ->  ",
                self.mark
            ))?;
            let line = self.read_line()?;
            match line.trim().parse::<usize>() {
                Ok(selected) if available.contains(&selected) => return Ok(selected),
                _ => self.write_out(&format!("{INVALID_INPUT}\n"))?,
            }
        }
    }

    fn end_game(&mut self, reward: f64, state: &BoardState) {
        if let Err(e) = self.write_out(&format!("{}\nGame over (reward {reward})\n", state.grid())) {
            warn!("could not show final board: {e}");
        }
    }
}
