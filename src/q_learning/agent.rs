//! Q-learning and Expected Sarsa agents
//!
//! Both agents share one turn-sequencing state machine. The TD error for a
//! move can only be computed once the next observation arrives, so the agent
//! remembers its last (state, action) and settles it on its next `make_move`
//! (bootstrapped target) or at `end_game` (terminal target = reward).

use log::debug;

use super::{
    policy::ActionSelector,
    q_table::ValueTable,
    serialization::TabularPolicy,
    settings::TdSettings,
    target::{ExpectedSarsa, QLearning, TdAlgorithm, TdTarget, td_step},
};
use crate::{
    Error, Result,
    ports::{Learner, Player},
    tictactoe::{BoardState, Mark},
    types::CanonicalState,
};

/// Q-learning agent (off-policy TD control)
pub type QLearningAgent = TdAgent<QLearning>;

/// Expected Sarsa agent (expectation over the agent's own ε-greedy policy)
pub type ExpectedSarsaAgent = TdAgent<ExpectedSarsa>;

/// The agent's most recent decision, awaiting its TD update
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingMove {
    state: CanonicalState,
    action: usize,
}

/// Tabular TD control agent parameterized by its bootstrap target
#[derive(Debug, Clone)]
pub struct TdAgent<T> {
    mark: Mark,
    settings: TdSettings,
    table: ValueTable,
    selector: ActionSelector,
    target: T,
    pending: Option<PendingMove>,
    frozen: bool,
}

impl<T: TdTarget + Default> TdAgent<T> {
    /// Create an agent with an empty value table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSetting`] if `settings` fail validation.
    pub fn new(mark: Mark, settings: TdSettings) -> Result<Self> {
        Self::with_table(mark, settings, ValueTable::new(settings.default_q))
    }

    /// Create an agent that takes ownership of an existing table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSetting`] if `settings` fail validation or the
    /// table initializes new rows with a different `default_q`.
    pub fn with_table(mark: Mark, settings: TdSettings, table: ValueTable) -> Result<Self> {
        settings.validate()?;
        if table.default_q() != settings.default_q {
            return Err(Error::InvalidSetting {
                name: "default_q",
                value: table.default_q(),
                expected: "agreement with the agent's default_q",
            });
        }
        Ok(Self {
            mark,
            settings,
            table,
            selector: ActionSelector::new(&settings),
            target: T::default(),
            pending: None,
            frozen: false,
        })
    }

    /// Create an agent from a persisted policy
    pub fn from_policy(policy: &TabularPolicy, mark: Mark, settings: TdSettings) -> Result<Self> {
        let table = ValueTable::from_policy(policy, settings.default_q)?;
        Self::with_table(mark, settings, table)
    }
}

impl<T: TdTarget> TdAgent<T> {
    /// Builder-style freeze flag
    pub fn frozen(mut self, frozen: bool) -> Self {
        self.frozen = frozen;
        self
    }

    pub fn value_table(&self) -> &ValueTable {
        &self.table
    }

    pub fn settings(&self) -> &TdSettings {
        &self.settings
    }

    /// Pending (state, action), if the agent is mid-episode
    pub fn pending(&self) -> Option<(&CanonicalState, usize)> {
        self.pending.as_ref().map(|p| (&p.state, p.action))
    }

    /// ε-greedy distribution the agent would use for `values`
    pub fn egreedy_probs(&self, values: &[f64]) -> Vec<f64> {
        self.selector.egreedy_probs(values)
    }

    /// Choose an action for a visited state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnvisitedState`] if the state was never visited and
    /// [`Error::NoValidMoves`] if its row is empty.
    pub fn select_action(&mut self, state: &CanonicalState) -> Result<usize> {
        let row = self.table.row(state)?;
        self.selector.select(row).ok_or(Error::NoValidMoves)
    }

    /// Settle the pending decision against the successor `next_state`
    fn update(&mut self, next_state: &CanonicalState, reward: f64) {
        if self.frozen {
            return;
        }
        let next_values = self
            .table
            .row(next_state)
            .unwrap_or_else(|e| panic!("TD update against unvisited successor: {e}"))
            .values();
        let bootstrap = self.target.bootstrap(next_values, &self.selector);
        self.apply_target(reward + self.settings.discount_rate * bootstrap);
    }

    /// Move the pending action's value toward `target`
    fn apply_target(&mut self, target: f64) {
        let Some(PendingMove { state, action }) = self.pending.as_ref() else {
            panic!("TD update requested with no pending state-action");
        };
        let row = self
            .table
            .row_mut(state)
            .unwrap_or_else(|e| panic!("pending state missing from value table: {e}"));
        let idx = row
            .position_of(*action)
            .unwrap_or_else(|| panic!("action {action} is not in the row for state '{state}'"));
        let values = row.values_mut();
        values[idx] = td_step(values[idx], target, self.settings.step_size);
    }
}

impl<T: TdTarget> Player for TdAgent<T> {
    fn mark(&self) -> Mark {
        self.mark
    }

    fn set_mark(&mut self, mark: Mark) {
        self.mark = mark;
    }

    fn name(&self) -> &str {
        self.target.agent_name()
    }

    /// Drops any decision left over from an episode that never reached `end_game`.
    fn start_game(&mut self) {
        if let Some(PendingMove { state, action }) = self.pending.take() {
            debug!("discarding unsettled move {action} in state {state}");
        }
    }

    fn make_move(&mut self, reward: f64, state: &BoardState, available: &[usize]) -> Result<usize> {
        let canonical = CanonicalState::encode(state, self.mark);
        if !self.table.check_visited(&canonical, available) {
            debug!("first visit to state {canonical} ({} actions)", available.len());
        }

        if self.pending.is_some() {
            self.update(&canonical, reward);
        }

        let action = self.select_action(&canonical)?;
        self.pending = Some(PendingMove {
            state: canonical,
            action,
        });
        Ok(action)
    }

    /// # Panics
    ///
    /// Panics if the agent has not moved in this episode.
    fn end_game(&mut self, reward: f64, _state: &BoardState) {
        assert!(
            self.pending.is_some(),
            "end_game called with no pending state-action; make_move must come first"
        );
        if !self.frozen {
            self.apply_target(reward);
        }
        self.pending = None;
    }
}

impl<T: TdTarget> Learner for TdAgent<T> {
    fn algorithm(&self) -> TdAlgorithm {
        self.target.algorithm()
    }

    fn settings(&self) -> &TdSettings {
        &self.settings
    }

    fn value_table(&self) -> &ValueTable {
        &self.table
    }

    fn is_frozen(&self) -> bool {
        self.frozen
    }

    fn set_frozen(&mut self, frozen: bool) {
        self.frozen = frozen;
    }

    fn is_epsilon_greedy(&self) -> bool {
        self.selector.is_epsilon_greedy()
    }

    fn set_epsilon_greedy(&mut self, enabled: bool) {
        self.selector.set_epsilon_greedy(enabled);
    }
}

/// Build a boxed learner of the requested kind, optionally seeded from a policy
pub fn instantiate_agent(
    algorithm: TdAlgorithm,
    mark: Mark,
    settings: TdSettings,
    policy: Option<&TabularPolicy>,
) -> Result<Box<dyn Learner>> {
    let table = match policy {
        Some(policy) => ValueTable::from_policy(policy, settings.default_q)?,
        None => ValueTable::new(settings.default_q),
    };
    Ok(match algorithm {
        TdAlgorithm::QLearning => Box::new(QLearningAgent::with_table(mark, settings, table)?),
        TdAlgorithm::ExpectedSarsa => {
            Box::new(ExpectedSarsaAgent::with_table(mark, settings, table)?)
        }
    })
}
