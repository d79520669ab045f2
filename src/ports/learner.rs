//! Learner port - a player that keeps and updates a value table
//!
//! The training pipeline and the CLI only need to toggle learning and
//! exploration and read back what was learned; they never care which TD rule
//! an agent uses. Concrete agents live in [`crate::q_learning`].

use super::Player;
use crate::q_learning::{TabularPolicy, TdAlgorithm, TdSettings, ValueTable};

/// Learner trait - a [`Player`] backed by a tabular TD learner
///
/// # Examples
///
/// ```no_run
/// use tictactoe_td::{
///     ports::Learner,
///     q_learning::{TdAlgorithm, TdSettings, instantiate_agent},
///     tictactoe::Mark,
/// };
///
/// let mut agent = instantiate_agent(TdAlgorithm::QLearning, Mark::X, TdSettings::default(), None)?;
/// agent.set_frozen(true);
/// agent.set_epsilon_greedy(false);
/// let policy = agent.dump_policy();
/// # Ok::<(), tictactoe_td::Error>(())
/// ```
pub trait Learner: Player {
    fn algorithm(&self) -> TdAlgorithm;

    fn settings(&self) -> &TdSettings;

    fn value_table(&self) -> &ValueTable;

    /// Snapshot of the value table in the persisted policy format.
    fn dump_policy(&self) -> TabularPolicy {
        self.value_table().to_policy()
    }

    /// Whether value updates are currently suppressed.
    fn is_frozen(&self) -> bool;

    /// Suppress (or re-enable) value updates.
    ///
    /// A frozen learner still visits states and still selects actions, so its
    /// table may grow new rows at `default_q`.
    fn set_frozen(&mut self, frozen: bool);

    fn is_epsilon_greedy(&self) -> bool;

    /// Switch between ε-greedy and purely greedy selection.
    fn set_epsilon_greedy(&mut self, enabled: bool);
}
