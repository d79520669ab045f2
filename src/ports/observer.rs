//! Observer port - abstraction for training observation
//!
//! This port lets progress bars, logging and metric collection hook into a
//! training run without the pipeline knowing about any of them.

use crate::{Result, pipeline::EpisodeSummary};

/// Observer trait for monitoring training
///
/// # Event Sequence
///
/// 1. `on_training_start(total_episodes)` - Once at the beginning
/// 2. `on_episode_end(episode, summary)` - After every episode
/// 3. `on_training_end()` - Once at the end
///
/// # Examples
///
/// ```no_run
/// use tictactoe_td::{pipeline::EpisodeSummary, ports::Observer};
///
/// struct Counter {
///     episodes: usize,
/// }
///
/// impl Observer for Counter {
///     fn on_episode_end(
///         &mut self,
///         _episode: usize,
///         _summary: &EpisodeSummary,
///     ) -> tictactoe_td::Result<()> {
///         self.episodes += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait Observer {
    /// Called when training starts.
    ///
    /// # Default Implementation
    ///
    /// Does nothing.
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called when an episode ends.
    ///
    /// # Parameters
    ///
    /// * `episode` - Index of the episode (0-based)
    /// * `summary` - Outcome of the episode
    fn on_episode_end(&mut self, _episode: usize, _summary: &EpisodeSummary) -> Result<()> {
        Ok(())
    }

    /// Called once after the last episode.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
