//! Train command - train a Q-learning or Expected Sarsa agent against a random player

use std::{
    fs::{self, File},
    io::BufWriter,
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use serde::Serialize;
use serde_json::to_writer_pretty;

use crate::{
    cli::{
        config::{load_game_settings, load_td_settings},
        output::{print_kv, print_result, print_section},
    },
    export::write_episodes_csv,
    pipeline::{
        LogObserver, ProgressObserver, TrainSummary, TrainingConfig, TrainingPipeline,
        TrainingResult,
    },
    players::RandomPlayer,
    q_learning::{SavedTdAgent, TabularPolicy, TdAlgorithm, instantiate_agent},
    tictactoe::Mark,
};

pub const SUMMARY_FILE: &str = "summary.json";
pub const POLICY_FILE: &str = "policy.json";
pub const AGENT_FILE: &str = "agent.msgpack";
pub const EPISODES_FILE: &str = "episodes.csv";

#[derive(Debug, Serialize)]
struct SummaryFile<'a> {
    #[serde(flatten)]
    summary: &'a TrainSummary,
    training: &'a TrainingResult,
    evaluation: Option<&'a TrainingResult>,
}

#[derive(Parser, Debug)]
#[command(about = "Train a TD agent against a random player")]
pub struct TrainArgs {
    /// TD control algorithm
    #[arg(value_enum)]
    pub algorithm: TdAlgorithm,

    /// Number of training episodes
    #[arg(long, short = 'e')]
    pub episodes: usize,

    /// Name of the run; outputs go to OUTPUT_DIR/RUN_NAME
    #[arg(long, short = 'n')]
    pub run_name: String,

    /// Parent directory for run outputs
    #[arg(long, short = 'o', default_value = "runs")]
    pub output_dir: PathBuf,

    /// Reward configuration (JSON)
    #[arg(long)]
    pub game_config: Option<PathBuf>,

    /// Agent hyper-parameters (JSON)
    #[arg(long)]
    pub td_config: Option<PathBuf>,

    /// Warm-start from a saved policy.json
    #[arg(long)]
    pub policy: Option<PathBuf>,

    /// Seed for side assignment and the random rival
    #[arg(long)]
    pub seed: Option<u64>,

    /// Frozen greedy evaluation episodes to run after training
    #[arg(long, default_value_t = 0)]
    pub eval_episodes: usize,

    /// Also write the full agent snapshot (agent.msgpack)
    #[arg(long, default_value_t = false)]
    pub save_agent: bool,

    /// Also write per-episode outcomes (episodes.csv)
    #[arg(long, default_value_t = false)]
    pub csv: bool,

    /// Hide the progress bar
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,

    /// Log running rates every N episodes (0 disables)
    #[arg(long, default_value_t = 0)]
    pub log_every: usize,
}

/// What a finished training run produced
#[derive(Debug)]
pub struct TrainReport {
    pub run_dir: PathBuf,
    pub training: TrainingResult,
    pub evaluation: Option<TrainingResult>,
    pub states_learned: usize,
}

/// Train, evaluate and persist without printing
pub fn run(args: &TrainArgs) -> Result<TrainReport> {
    let game_settings = load_game_settings(args.game_config.as_deref())?;
    let td_settings = load_td_settings(args.td_config.as_deref())?;

    let policy = args
        .policy
        .as_ref()
        .map(|path| {
            TabularPolicy::load_json(path)
                .with_context(|| format!("Failed to load policy {}", path.display()))
        })
        .transpose()?;
    if let Some(policy) = &policy {
        info!("warm-starting from a policy with {} states", policy.len());
    }

    let mut agent = instantiate_agent(args.algorithm, Mark::X, td_settings, policy.as_ref())?;
    let mut rival = match args.seed {
        Some(seed) => RandomPlayer::with_seed(Mark::O, seed.wrapping_add(1)),
        None => RandomPlayer::new(Mark::O),
    };

    let run_dir = args.output_dir.join(&args.run_name);
    fs::create_dir_all(&run_dir)
        .with_context(|| format!("Failed to create run directory {}", run_dir.display()))?;

    let config = TrainingConfig {
        episodes: args.episodes,
        seed: args.seed,
        game_settings,
    };
    let mut pipeline = TrainingPipeline::new(config);
    if !args.no_progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }
    if args.log_every > 0 {
        pipeline = pipeline.with_observer(Box::new(LogObserver::new(args.log_every)));
    }

    let summary = pipeline.run(agent.as_mut(), &mut rival)?;
    let training = TrainingResult::from_summary(&summary);

    let evaluation = if args.eval_episodes > 0 {
        Some(pipeline.evaluate(agent.as_mut(), &mut rival, args.eval_episodes)?)
    } else {
        None
    };

    let summary_path = run_dir.join(SUMMARY_FILE);
    let file = File::create(&summary_path)
        .with_context(|| format!("Failed to create {}", summary_path.display()))?;
    to_writer_pretty(
        BufWriter::new(file),
        &SummaryFile {
            summary: &summary,
            training: &training,
            evaluation: evaluation.as_ref(),
        },
    )
    .context("Failed to write training summary")?;

    agent.dump_policy().save_json(run_dir.join(POLICY_FILE))?;

    if args.save_agent {
        SavedTdAgent::from_learner(agent.as_ref()).save_to_file(run_dir.join(AGENT_FILE))?;
    }
    if args.csv {
        write_episodes_csv(run_dir.join(EPISODES_FILE), &summary.episodes)?;
    }

    Ok(TrainReport {
        run_dir,
        training,
        evaluation,
        states_learned: agent.value_table().len(),
    })
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let report = run(&args)?;

    print_section(&format!("{} training complete", args.algorithm.name()));
    print_result(&report.training);
    print_kv("States learned", &report.states_learned.to_string());

    if let Some(evaluation) = &report.evaluation {
        print_section("Greedy evaluation (frozen)");
        print_result(evaluation);
    }

    println!("\nOutputs written to {}", report.run_dir.display());
    Ok(())
}
