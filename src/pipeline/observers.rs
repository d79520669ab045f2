//! Observer implementations for training pipelines
//!
//! Observers allow composable reporting during training without coupling
//! training logic to specific output formats.

use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use super::training::EpisodeSummary;
use crate::{Error, Result, ports::Observer, tictactoe::EpisodeResult};

/// Running win/draw/loss tally from the agent's perspective
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Tally {
    wins: usize,
    draws: usize,
    losses: usize,
}

impl Tally {
    fn record(&mut self, summary: &EpisodeSummary) {
        match summary.agent_result() {
            EpisodeResult::Win => self.wins += 1,
            EpisodeResult::Draw => self.draws += 1,
            EpisodeResult::Loss => self.losses += 1,
        }
    }

    fn total(&self) -> usize {
        self.wins + self.draws + self.losses
    }

    fn message(&self) -> String {
        format!("W:{} D:{} L:{}", self.wins, self.draws, self.losses)
    }
}

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    tally: Tally,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            tally: Tally::default(),
        }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
                .map_err(|e| Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        self.tally = Tally::default();
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, summary: &EpisodeSummary) -> Result<()> {
        self.tally.record(summary);

        if let Some(pb) = &self.progress_bar {
            pb.set_position(episode as u64 + 1);
            pb.set_message(self.tally.message());
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.tally.message());
        }
        Ok(())
    }
}

/// Logs running rates every `interval` episodes
pub struct LogObserver {
    interval: usize,
    tally: Tally,
}

impl LogObserver {
    /// # Panics
    ///
    /// Panics if `interval` is zero.
    pub fn new(interval: usize) -> Self {
        assert!(interval > 0, "log interval must be positive");
        Self {
            interval,
            tally: Tally::default(),
        }
    }

    fn log_rates(&self) {
        let total = self.tally.total().max(1) as f64;
        info!(
            "{} episodes: win {:.3} draw {:.3} loss {:.3}",
            self.tally.total(),
            self.tally.wins as f64 / total,
            self.tally.draws as f64 / total,
            self.tally.losses as f64 / total
        );
    }
}

impl Observer for LogObserver {
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        self.tally = Tally::default();
        Ok(())
    }

    fn on_episode_end(&mut self, _episode: usize, summary: &EpisodeSummary) -> Result<()> {
        self.tally.record(summary);
        if self.tally.total() % self.interval == 0 {
            self.log_rates();
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if self.tally.total() % self.interval != 0 {
            self.log_rates();
        }
        Ok(())
    }
}
