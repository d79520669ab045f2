//! Non-learning players: a uniform random baseline and a human at the console.

pub mod console;
pub mod random;

pub use console::ConsolePlayer;
pub use random::RandomPlayer;
