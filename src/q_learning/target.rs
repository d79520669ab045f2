//! Bootstrap targets for the two TD control variants
//!
//! | Variant | Non-terminal target | Terminal target |
//! |---------|---------------------|-----------------|
//! | Q-learning | r + γ max_a Q(s',a) | r |
//! | Expected Sarsa | r + γ Σ_a π(a\|s') Q(s',a) | r |
//!
//! where π is the agent's own ε-greedy distribution. Only the bootstrap term
//! differs, so each variant is a [`TdTarget`] plugged into the shared
//! [`super::TdAgent`].

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::policy::ActionSelector;

/// Which TD control rule an agent learns with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TdAlgorithm {
    QLearning,
    ExpectedSarsa,
}

impl TdAlgorithm {
    pub fn name(self) -> &'static str {
        match self {
            TdAlgorithm::QLearning => "Q-Learning",
            TdAlgorithm::ExpectedSarsa => "Expected Sarsa",
        }
    }
}

/// Bootstrap estimate of a successor state's value
pub trait TdTarget {
    fn algorithm(&self) -> TdAlgorithm;

    /// Player type name reported in episode summaries
    fn agent_name(&self) -> &'static str;

    /// Value of the successor state given its live action values.
    ///
    /// An empty row has nothing to bootstrap from and contributes 0.
    fn bootstrap(&self, next_values: &[f64], selector: &ActionSelector) -> f64;
}

/// Off-policy: bootstrap from the best successor action
#[derive(Debug, Clone, Copy, Default)]
pub struct QLearning;

impl TdTarget for QLearning {
    fn algorithm(&self) -> TdAlgorithm {
        TdAlgorithm::QLearning
    }

    fn agent_name(&self) -> &'static str {
        "QLearningAgent"
    }

    fn bootstrap(&self, next_values: &[f64], _selector: &ActionSelector) -> f64 {
        next_values.iter().copied().reduce(f64::max).unwrap_or(0.0)
    }
}

/// Bootstrap from the expectation under the agent's ε-greedy policy
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpectedSarsa;

impl TdTarget for ExpectedSarsa {
    fn algorithm(&self) -> TdAlgorithm {
        TdAlgorithm::ExpectedSarsa
    }

    fn agent_name(&self) -> &'static str {
        "ExpectedSarsaAgent"
    }

    fn bootstrap(&self, next_values: &[f64], selector: &ActionSelector) -> f64 {
        selector
            .egreedy_probs(next_values)
            .iter()
            .zip(next_values)
            .map(|(p, q)| p * q)
            .sum()
    }
}

/// One TD step: move `current` toward `target` by `step_size`
pub fn td_step(current: f64, target: f64, step_size: f64) -> f64 {
    current + step_size * (target - current)
}
