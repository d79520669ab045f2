//! Configuration loading shared across commands
//!
//! Each command takes optional `--game-config` / `--td-config` paths. A missing
//! flag falls back to the built-in defaults; a given path must load.

use std::path::Path;

use anyhow::{Context, Result};

use crate::{q_learning::TdSettings, tictactoe::GameSettings};

/// Load game rewards from `path`, or the defaults when no path is given
pub fn load_game_settings(path: Option<&Path>) -> Result<GameSettings> {
    match path {
        Some(path) => GameSettings::load(path)
            .with_context(|| format!("Failed to load game config {}", path.display())),
        None => Ok(GameSettings::default()),
    }
}

/// Load and validate TD settings from `path`, or the defaults when no path is given
pub fn load_td_settings(path: Option<&Path>) -> Result<TdSettings> {
    match path {
        Some(path) => TdSettings::load(path)
            .with_context(|| format!("Failed to load TD config {}", path.display())),
        None => Ok(TdSettings::default()),
    }
}
