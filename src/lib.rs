//! Tic-tac-toe testbed for tabular temporal difference control
//!
//! This crate provides:
//! - Complete Tic-Tac-Toe game engine driving two players through a fixed turn protocol
//! - Q-learning and Expected Sarsa agents over player-relative board encodings
//! - Random and console baselines
//! - Training and evaluation pipeline with observers and CSV export

pub mod cli;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod players;
pub mod ports;
pub mod q_learning;
pub mod tictactoe;
pub mod types;

pub use error::{Error, Result};
pub use types::CanonicalState;
