//! ttt-td - tic-tac-toe testbed for tabular TD control
//!
//! This CLI provides:
//! - Training Q-learning / Expected Sarsa agents against a random player
//! - Playing at the console against a random player or a trained policy
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ttt-td")]
#[command(version, about = "Tic-tac-toe testbed for Q-learning and Expected Sarsa", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a TD agent against a random player
    Train(tictactoe_td::cli::commands::train::TrainArgs),

    /// Play a game at the console
    Play(tictactoe_td::cli::commands::play::PlayArgs),
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => tictactoe_td::cli::commands::train::execute(args),
        Commands::Play(args) => tictactoe_td::cli::commands::play::execute(args),
    }
}
