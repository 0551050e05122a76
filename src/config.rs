//! Game configuration.
//!
//! Loaded from JSON. Command-line flags are applied on top by the binary.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound on simultaneous enemies; the board only has four rows.
pub const MAX_ENEMIES: usize = 32;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of bugs on the board.
    #[serde(default = "default_enemy_count")]
    pub enemy_count: usize,
    /// Target frame time in milliseconds.
    #[serde(default = "default_frame_ms")]
    pub frame_ms: u64,
    /// Fixed RNG seed. `None` seeds from the OS.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_enemy_count() -> usize {
    5
}

fn default_frame_ms() -> u64 {
    16
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            enemy_count: default_enemy_count(),
            frame_ms: default_frame_ms(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Parses and validates config from JSON.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: GameConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.enemy_count == 0 {
            return Err(ConfigError::Invalid("enemy_count must be > 0".into()));
        }
        if self.enemy_count > MAX_ENEMIES {
            return Err(ConfigError::Invalid(format!(
                "enemy_count must be <= {MAX_ENEMIES}, got {}",
                self.enemy_count
            )));
        }
        if self.frame_ms == 0 {
            return Err(ConfigError::Invalid("frame_ms must be > 0".into()));
        }
        Ok(())
    }
}
