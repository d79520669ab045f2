//! Reward settings for the game engine

use std::{fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Rewards handed to players by the game loop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Reward for winning
    pub win_reward: f64,
    /// Reward for losing
    pub lose_reward: f64,
    /// Reward for ending in a draw
    pub draw_reward: f64,
    /// Reward passed with every non-terminal move request
    pub step_reward: f64,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            win_reward: 1.0,
            lose_reward: -1.0,
            draw_reward: 0.0,
            step_reward: 0.0,
        }
    }
}

impl GameSettings {
    /// Load settings from a JSON file; missing fields take their defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| Error::io(format!("open game settings {}", path.display()), e))?;
        let settings = serde_json::from_reader(BufReader::new(file))?;
        Ok(settings)
    }
}
