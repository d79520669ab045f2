//! Training pipeline for TD learners

use log::{debug, info};
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    ports::{Learner, Observer, Player},
    q_learning::TdSettings,
    tictactoe::{EpisodeResult, Game, GameOutcome, GameSettings, Mark},
};

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of training episodes
    pub episodes: usize,

    /// Seed for the trainer's own generator (side assignment); entropy if unset
    pub seed: Option<u64>,

    /// Rewards handed out by the game loop
    pub game_settings: GameSettings,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            episodes: 1000,
            seed: None,
            game_settings: GameSettings::default(),
        }
    }
}

/// Record of one finished episode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    pub winner: GameOutcome,
    /// Final board, nine characters in `X`/`O`/`-`
    pub end_board: String,
    pub x_player_type: String,
    pub o_player_type: String,
    pub agent_mark: Mark,
}

impl EpisodeSummary {
    /// Outcome from the agent's point of view
    pub fn agent_result(&self) -> EpisodeResult {
        self.winner.result_for(self.agent_mark)
    }
}

/// Everything a training run produced, as written to `summary.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainSummary {
    pub total_episodes: usize,
    pub game_settings: GameSettings,
    pub td_settings: TdSettings,
    pub agent_type: String,
    pub rival_type: String,
    pub episodes: Vec<EpisodeSummary>,
}

/// Aggregate results of a run from the agent's perspective
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Total episodes played
    pub total_episodes: usize,

    /// Number of wins
    pub wins: usize,

    /// Number of draws
    pub draws: usize,

    /// Number of losses
    pub losses: usize,

    /// Episodes in which the agent held X
    pub played_as_x: usize,

    /// Win rate
    pub win_rate: f64,

    /// Draw rate
    pub draw_rate: f64,

    /// Loss rate
    pub loss_rate: f64,
}

impl TrainingResult {
    pub fn from_episodes(episodes: &[EpisodeSummary]) -> Self {
        let mut wins = 0;
        let mut draws = 0;
        let mut losses = 0;
        for episode in episodes {
            match episode.agent_result() {
                EpisodeResult::Win => wins += 1,
                EpisodeResult::Draw => draws += 1,
                EpisodeResult::Loss => losses += 1,
            }
        }
        let played_as_x = episodes.iter().filter(|e| e.agent_mark == Mark::X).count();

        let total_episodes = episodes.len();
        let rate = |count: usize| {
            if total_episodes > 0 {
                count as f64 / total_episodes as f64
            } else {
                0.0
            }
        };

        Self {
            total_episodes,
            wins,
            draws,
            losses,
            played_as_x,
            win_rate: rate(wins),
            draw_rate: rate(draws),
            loss_rate: rate(losses),
        }
    }

    pub fn from_summary(summary: &TrainSummary) -> Self {
        Self::from_episodes(&summary.episodes)
    }
}

/// Play one episode between `agent` and `rival`.
///
/// The agent's side is drawn uniformly from {X, O} with `rng`; both players
/// are reassigned before the first move, so a learner re-encodes every state
/// relative to its new mark.
pub fn run_episode<R: Rng>(
    rng: &mut R,
    settings: GameSettings,
    agent: &mut dyn Learner,
    rival: &mut dyn Player,
) -> Result<EpisodeSummary> {
    let agent_mark = if rng.random_bool(0.5) {
        Mark::X
    } else {
        Mark::O
    };
    agent.set_mark(agent_mark);
    rival.set_mark(agent_mark.opponent());

    let agent: &mut dyn Player = agent;
    let mut game = match agent_mark {
        Mark::X => Game::new(settings, agent, rival),
        Mark::O => Game::new(settings, rival, agent),
    };
    let winner = game.play_to_end()?;

    Ok(EpisodeSummary {
        winner,
        end_board: game.board().to_string(),
        x_player_type: game.player_name(Mark::X).to_string(),
        o_player_type: game.player_name(Mark::O).to_string(),
        agent_mark,
    })
}

/// Training pipeline for a single learner against a rival
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
    rng: StdRng,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            config,
            observers: Vec::new(),
            rng,
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Run `config.episodes` training episodes
    pub fn run(&mut self, agent: &mut dyn Learner, rival: &mut dyn Player) -> Result<TrainSummary> {
        let total = self.config.episodes;
        info!(
            "training {} against {} for {total} episodes",
            agent.name(),
            rival.name()
        );

        for observer in &mut self.observers {
            observer.on_training_start(total)?;
        }

        let mut episodes = Vec::with_capacity(total);
        for episode in 0..total {
            let summary = run_episode(&mut self.rng, self.config.game_settings, agent, rival)?;
            debug!(
                "episode {episode}: agent {} -> {} ({})",
                summary.agent_mark, summary.winner, summary.end_board
            );

            for observer in &mut self.observers {
                observer.on_episode_end(episode, &summary)?;
            }
            episodes.push(summary);
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }
        info!("training done; {} states in value table", agent.value_table().len());

        Ok(TrainSummary {
            total_episodes: total,
            game_settings: self.config.game_settings,
            td_settings: *agent.settings(),
            agent_type: agent.name().to_string(),
            rival_type: rival.name().to_string(),
            episodes,
        })
    }

    /// Measure the agent's greedy play without learning.
    ///
    /// The agent is frozen and switched to greedy selection for the duration;
    /// its previous flags are restored afterwards, even on error. Observers are
    /// not notified.
    pub fn evaluate(
        &mut self,
        agent: &mut dyn Learner,
        rival: &mut dyn Player,
        episodes: usize,
    ) -> Result<TrainingResult> {
        let was_frozen = agent.is_frozen();
        let was_epsilon_greedy = agent.is_epsilon_greedy();
        agent.set_frozen(true);
        agent.set_epsilon_greedy(false);

        let played: Result<Vec<_>> = (0..episodes)
            .map(|_| {
                run_episode(
                    &mut self.rng,
                    self.config.game_settings,
                    &mut *agent,
                    &mut *rival,
                )
            })
            .collect();

        agent.set_frozen(was_frozen);
        agent.set_epsilon_greedy(was_epsilon_greedy);

        let result = TrainingResult::from_episodes(&played?);
        info!(
            "evaluation over {episodes} episodes: W {:.3} D {:.3} L {:.3}",
            result.win_rate, result.draw_rate, result.loss_rate
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::{
        players::RandomPlayer,
        q_learning::{QLearningAgent, TdSettings},
    };

    #[derive(Default)]
    struct Recording {
        started: Option<usize>,
        seen: Vec<usize>,
        finished: bool,
    }

    struct RecordingObserver(Rc<RefCell<Recording>>);

    impl Observer for RecordingObserver {
        fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
            self.0.borrow_mut().started = Some(total_episodes);
            Ok(())
        }

        fn on_episode_end(&mut self, episode: usize, _summary: &EpisodeSummary) -> Result<()> {
            self.0.borrow_mut().seen.push(episode);
            Ok(())
        }

        fn on_training_end(&mut self) -> Result<()> {
            self.0.borrow_mut().finished = true;
            Ok(())
        }
    }

    fn config(episodes: usize) -> TrainingConfig {
        TrainingConfig {
            episodes,
            seed: Some(5),
            game_settings: GameSettings::default(),
        }
    }

    #[test]
    fn test_run_episode_assigns_marks() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut agent = QLearningAgent::new(Mark::X, TdSettings::default()).unwrap();
        let mut rival = RandomPlayer::with_seed(Mark::O, 2);

        for _ in 0..20 {
            let summary =
                run_episode(&mut rng, GameSettings::default(), &mut agent, &mut rival).unwrap();
            assert_eq!(agent.mark(), summary.agent_mark);
            assert_eq!(rival.mark(), summary.agent_mark.opponent());
            let (agent_side, rival_side) = match summary.agent_mark {
                Mark::X => (&summary.x_player_type, &summary.o_player_type),
                Mark::O => (&summary.o_player_type, &summary.x_player_type),
            };
            assert_eq!(agent_side, "QLearningAgent");
            assert_eq!(rival_side, "RandomPlayer");
            assert_eq!(summary.end_board.len(), 9);
            assert!(agent.pending().is_none());
        }
    }

    #[test]
    fn test_pipeline_notifies_observers() {
        let recording = Rc::new(RefCell::new(Recording::default()));
        let mut pipeline = TrainingPipeline::new(config(12))
            .with_observer(Box::new(RecordingObserver(Rc::clone(&recording))));

        let mut agent = QLearningAgent::new(Mark::X, TdSettings::default()).unwrap();
        let mut rival = RandomPlayer::with_seed(Mark::O, 3);
        let summary = pipeline.run(&mut agent, &mut rival).unwrap();

        assert_eq!(summary.total_episodes, 12);
        assert_eq!(summary.episodes.len(), 12);
        assert_eq!(summary.agent_type, "QLearningAgent");
        assert_eq!(summary.rival_type, "RandomPlayer");

        let recording = recording.borrow();
        assert_eq!(recording.started, Some(12));
        assert_eq!(recording.seen, (0..12).collect::<Vec<_>>());
        assert!(recording.finished);
    }

    #[test]
    fn test_training_result_counts() {
        let episode = |winner, agent_mark| EpisodeSummary {
            winner,
            end_board: "XXXOO----".to_string(),
            x_player_type: "a".to_string(),
            o_player_type: "b".to_string(),
            agent_mark,
        };
        let episodes = vec![
            episode(GameOutcome::Win(Mark::X), Mark::X),
            episode(GameOutcome::Win(Mark::X), Mark::O),
            episode(GameOutcome::Draw, Mark::O),
            episode(GameOutcome::Win(Mark::O), Mark::O),
        ];

        let result = TrainingResult::from_episodes(&episodes);
        assert_eq!(result.wins, 2);
        assert_eq!(result.losses, 1);
        assert_eq!(result.draws, 1);
        assert_eq!(result.played_as_x, 1);
        assert!((result.win_rate - 0.5).abs() < 1e-12);

        let empty = TrainingResult::from_episodes(&[]);
        assert_eq!(empty.win_rate, 0.0);
    }

    #[test]
    fn test_evaluate_restores_flags_and_table() {
        let mut pipeline = TrainingPipeline::new(config(50));
        let mut agent = QLearningAgent::new(Mark::X, TdSettings::default()).unwrap();
        let mut rival = RandomPlayer::with_seed(Mark::O, 9);
        pipeline.run(&mut agent, &mut rival).unwrap();

        let before = agent.dump_policy();
        let result = pipeline.evaluate(&mut agent, &mut rival, 20).unwrap();
        assert_eq!(result.total_episodes, 20);
        assert!(!agent.is_frozen());
        assert!(agent.is_epsilon_greedy());

        // frozen play may add rows but never changes a learned value
        let after = agent.dump_policy();
        for (state, actions) in &before.states {
            assert_eq!(&after.states[state], actions);
        }
    }

    #[test]
    fn test_same_seeds_same_run() {
        let run = || {
            let mut pipeline = TrainingPipeline::new(config(30));
            let mut agent = QLearningAgent::new(Mark::X, TdSettings::default()).unwrap();
            let mut rival = RandomPlayer::with_seed(Mark::O, 4);
            pipeline.run(&mut agent, &mut rival).unwrap().episodes
        };
        assert_eq!(run(), run());
    }
}
