//! Greedy and ε-greedy action selection over a value-table row

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

use super::{q_table::StateActions, settings::TdSettings};

/// Index of the largest value; the lowest index wins ties.
///
/// Returns 0 for an empty slice.
pub fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (idx, &value) in values.iter().enumerate().skip(1) {
        if value > values[best] {
            best = idx;
        }
    }
    best
}

/// Action selector owning the agent's private random stream
#[derive(Debug, Clone)]
pub struct ActionSelector {
    epsilon_greedy: bool,
    epsilon: f64,
    rng: StdRng,
}

impl ActionSelector {
    pub fn new(settings: &TdSettings) -> Self {
        Self {
            epsilon_greedy: settings.epsilon_greedy,
            epsilon: settings.epsilon,
            rng: StdRng::seed_from_u64(settings.random_seed),
        }
    }

    pub fn is_epsilon_greedy(&self) -> bool {
        self.epsilon_greedy
    }

    pub fn set_epsilon_greedy(&mut self, enabled: bool) {
        self.epsilon_greedy = enabled;
    }

    /// Pick an action from `row`, or `None` if the row is empty.
    ///
    /// Greedy mode never touches the generator. In ε-greedy mode one uniform
    /// draw `u` decides: `u <= epsilon` explores uniformly over the row's
    /// actions, otherwise the greedy action is taken.
    pub fn select(&mut self, row: &StateActions) -> Option<usize> {
        if !self.epsilon_greedy {
            return row.greedy_action();
        }

        let u: f64 = self.rng.random();
        if u <= self.epsilon {
            row.actions().choose(&mut self.rng).copied()
        } else {
            row.greedy_action()
        }
    }

    /// ε-greedy distribution over `values`.
    ///
    /// Every action gets `epsilon / n`; the greedy slot (lowest index among ties)
    /// additionally gets `1 - epsilon`, so the result always sums to one.
    pub fn egreedy_probs(&self, values: &[f64]) -> Vec<f64> {
        if values.is_empty() {
            return Vec::new();
        }
        let mut probs = vec![self.epsilon / values.len() as f64; values.len()];
        probs[argmax(values)] += 1.0 - self.epsilon;
        probs
    }
}
