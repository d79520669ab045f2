//! Player port - the interface the game loop drives every turn
//!
//! Baselines (random, console) and the TD learners all sit behind this trait,
//! so the game engine never needs to know which kind of player it is talking to.

use crate::{
    Result,
    tictactoe::{BoardState, Mark},
};

/// Player trait - one participant in a game
///
/// # Call sequence
///
/// Every episode opens with [`Player::start_game`]. The game loop then calls
/// [`Player::make_move`] once per turn and [`Player::end_game`] exactly once,
/// on win, loss or draw. An episode that aborts with an error never reaches
/// `end_game`; the next `start_game` is the only reset a player can rely on.
///
/// # Examples
///
/// ```no_run
/// use tictactoe_td::{
///     ports::Player,
///     tictactoe::{BoardState, Mark},
/// };
///
/// fn first_choice(player: &mut dyn Player) -> tictactoe_td::Result<usize> {
///     let board = BoardState::new();
///     player.make_move(0.0, &board, &board.empty_cells())
/// }
/// ```
pub trait Player {
    /// The mark this player currently places.
    fn mark(&self) -> Mark;

    /// Reassign the player's mark (e.g. swapping sides between episodes).
    fn set_mark(&mut self, mark: Mark);

    /// Short type name used in episode summaries.
    fn name(&self) -> &str;

    /// Reset per-episode state before the first move.
    ///
    /// # Default Implementation
    ///
    /// Does nothing, suitable for players that keep no turn memory.
    fn start_game(&mut self) {}

    /// Choose a cell to occupy.
    ///
    /// # Parameters
    ///
    /// * `reward` - Reward for the transition since this player's previous move
    /// * `state` - Current raw board
    /// * `available` - Empty cell indices (0-8), ascending
    ///
    /// # Errors
    ///
    /// Returns an error if no move can be produced (no available cells, closed
    /// console input, ...).
    fn make_move(&mut self, reward: f64, state: &BoardState, available: &[usize])
    -> Result<usize>;

    /// Register the end of the episode with its final reward.
    ///
    /// # Default Implementation
    ///
    /// Does nothing, suitable for players that do not learn.
    fn end_game(&mut self, _reward: f64, _state: &BoardState) {}
}
