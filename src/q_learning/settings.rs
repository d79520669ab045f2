//! Configuration shared by the TD learners

use std::{fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Hyper-parameters for a tabular TD agent.
///
/// Missing JSON fields take their defaults. Out-of-range values are rejected
/// by [`TdSettings::validate`], never clamped.
///
/// # Examples
///
/// ```
/// use tictactoe_td::q_learning::TdSettings;
///
/// let settings = TdSettings::default()
///     .with_seed(42)
///     .with_epsilon(0.05)
///     .with_step_size(0.5);
/// assert!(settings.validate().is_ok());
/// assert!(settings.with_discount_rate(0.0).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TdSettings {
    /// Seed for the agent's private generator
    pub random_seed: u64,
    /// Explore with probability `epsilon` when true, act greedily otherwise
    pub epsilon_greedy: bool,
    /// Exploration rate, in [0, 1]
    pub epsilon: f64,
    /// Initial value for every action of a newly visited state
    pub default_q: f64,
    /// Discount rate γ, in (0, 1]
    pub discount_rate: f64,
    /// Step size α, in (0, 1]
    pub step_size: f64,
}

impl Default for TdSettings {
    fn default() -> Self {
        Self {
            random_seed: 9876,
            epsilon_greedy: true,
            epsilon: 0.1,
            default_q: 0.0,
            discount_rate: 1.0,
            step_size: 0.2,
        }
    }
}

impl TdSettings {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random_seed = seed;
        self
    }

    pub fn with_epsilon_greedy(mut self, enabled: bool) -> Self {
        self.epsilon_greedy = enabled;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_default_q(mut self, default_q: f64) -> Self {
        self.default_q = default_q;
        self
    }

    pub fn with_discount_rate(mut self, discount_rate: f64) -> Self {
        self.discount_rate = discount_rate;
        self
    }

    pub fn with_step_size(mut self, step_size: f64) -> Self {
        self.step_size = step_size;
        self
    }

    /// Check every parameter against its allowed range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSetting`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(Error::InvalidSetting {
                name: "epsilon",
                value: self.epsilon,
                expected: "[0, 1]",
            });
        }
        if !self.default_q.is_finite() {
            return Err(Error::InvalidSetting {
                name: "default_q",
                value: self.default_q,
                expected: "the finite numbers",
            });
        }
        check_unit_interval("discount_rate", self.discount_rate)?;
        check_unit_interval("step_size", self.step_size)?;
        Ok(())
    }

    /// Load and validate settings from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| Error::io(format!("open TD settings {}", path.display()), e))?;
        let settings: TdSettings = serde_json::from_reader(BufReader::new(file))?;
        settings.validate()?;
        Ok(settings)
    }
}

/// (0, 1]
fn check_unit_interval(name: &'static str, value: f64) -> Result<()> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(Error::InvalidSetting {
            name,
            value,
            expected: "(0, 1]",
        })
    }
}
