//! Playback configuration
//!
//! Loaded from JSON; every field is optional and falls back to the
//! defaults below.

use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::playback::PlaybackRate;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Speed a new player starts at
    pub default_rate: PlaybackRate,

    /// Speeds offered for quick selection
    pub presets: Vec<PlaybackRate>,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            default_rate: PlaybackRate::NORMAL,
            presets: PlaybackRate::PRESETS.to_vec(),
        }
    }
}

impl PlaybackConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!("loading playback config from {}", path.display());
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Rate reached by moving `steps` presets up from `default_rate`,
    /// wrapping from the fastest preset back to the slowest.
    pub fn preset_rate(&self, steps: usize) -> PlaybackRate {
        (0..steps).fold(self.default_rate, |rate, _| rate.next_preset(&self.presets))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.presets.is_empty() {
            return Err(ConfigError::Invalid("presets must not be empty".to_string()));
        }
        Ok(())
    }
}
