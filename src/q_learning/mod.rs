//! Q-learning and Expected Sarsa temporal difference learning
//!
//! Both agents learn a tabular action-value function over player-relative
//! board encodings ([`crate::types::CanonicalState`]) and share everything but
//! the bootstrap term of their TD target.
//!
//! ## Key Differences
//!
//! | Aspect | Q-learning | Expected Sarsa |
//! |--------|------------|----------------|
//! | Bootstrap | max_a Q(s',a) | Σ_a π(a\|s') Q(s',a) |
//! | Policy evaluated | Greedy | Own ε-greedy policy |
//! | Variance | Higher | Lower |
//!
//! ## Usage Example
//!
//! ```no_run
//! use tictactoe_td::{
//!     q_learning::{ExpectedSarsaAgent, QLearningAgent, TdSettings},
//!     tictactoe::Mark,
//! };
//!
//! let settings = TdSettings::default().with_epsilon(0.05).with_step_size(0.4);
//! let q_agent = QLearningAgent::new(Mark::X, settings)?;
//! let es_agent = ExpectedSarsaAgent::new(Mark::O, settings.with_seed(1))?;
//! # Ok::<(), tictactoe_td::Error>(())
//! ```

pub mod agent;
pub mod policy;
pub mod q_table;
pub mod serialization;
pub mod settings;
pub mod target;

// Public re-exports
pub use agent::{ExpectedSarsaAgent, QLearningAgent, TdAgent, instantiate_agent};
pub use policy::{ActionSelector, argmax};
pub use q_table::{StateActions, ValueTable};
pub use serialization::{SavedTdAgent, TabularPolicy};
pub use settings::TdSettings;
pub use target::{ExpectedSarsa, QLearning, TdAlgorithm, TdTarget, td_step};
