//! Play command - a human at the console against a random player or a trained agent

use std::{
    io::{BufRead, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use crate::{
    cli::config::{load_game_settings, load_td_settings},
    players::{ConsolePlayer, RandomPlayer},
    ports::Player,
    q_learning::{TabularPolicy, TdAlgorithm, instantiate_agent},
    tictactoe::{Game, GameOutcome, Mark},
};

#[derive(Parser, Debug)]
#[command(about = "Play one game at the console")]
pub struct PlayArgs {
    /// Play against a frozen greedy agent loaded from this policy.json
    #[arg(long)]
    pub policy: Option<PathBuf>,

    /// Algorithm the policy was trained with
    #[arg(long, value_enum, requires = "policy")]
    pub algorithm: Option<TdAlgorithm>,

    /// Your mark (`x` opens)
    #[arg(long, default_value = "x")]
    pub mark: Mark,

    /// Reward configuration (JSON)
    #[arg(long)]
    pub game_config: Option<PathBuf>,

    /// Agent hyper-parameters (JSON), used with --policy
    #[arg(long)]
    pub td_config: Option<PathBuf>,

    /// Seed for the opponent
    #[arg(long)]
    pub seed: Option<u64>,
}

fn build_opponent(args: &PlayArgs, mark: Mark) -> Result<Box<dyn Player>> {
    let Some(path) = &args.policy else {
        let random = match args.seed {
            Some(seed) => RandomPlayer::with_seed(mark, seed),
            None => RandomPlayer::new(mark),
        };
        return Ok(Box::new(random));
    };

    let policy = TabularPolicy::load_json(path)
        .with_context(|| format!("Failed to load policy {}", path.display()))?;
    let mut settings = load_td_settings(args.td_config.as_deref())?;
    if let Some(seed) = args.seed {
        settings.random_seed = seed;
    }
    let algorithm = args.algorithm.unwrap_or(TdAlgorithm::QLearning);
    info!("loaded {} policy with {} states", algorithm.name(), policy.len());

    let mut agent = instantiate_agent(algorithm, mark, settings, Some(&policy))?;
    agent.set_frozen(true);
    agent.set_epsilon_greedy(false);
    let agent: Box<dyn Player> = agent;
    Ok(agent)
}

/// Play one game with `human` on `args.mark`
pub fn run_with<R: BufRead, W: Write>(
    args: &PlayArgs,
    mut human: ConsolePlayer<R, W>,
) -> Result<GameOutcome> {
    let settings = load_game_settings(args.game_config.as_deref())?;
    human.set_mark(args.mark);
    let mut opponent = build_opponent(args, args.mark.opponent())?;

    let mut game = match args.mark {
        Mark::X => Game::new(settings, &mut human, opponent.as_mut()),
        Mark::O => Game::new(settings, opponent.as_mut(), &mut human),
    };
    let outcome = game.play_to_end()?;
    info!(
        "{} vs {}: {outcome}",
        game.player_name(Mark::X),
        game.player_name(Mark::O)
    );
    Ok(outcome)
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let outcome = run_with(&args, ConsolePlayer::stdio(args.mark))?;
    let verdict = match outcome {
        GameOutcome::Win(mark) if mark == args.mark => "You win!",
        GameOutcome::Win(_) => "You lose.",
        GameOutcome::Draw => "It's a draw.",
    };
    println!("{verdict}");
    Ok(())
}
