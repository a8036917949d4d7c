use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use valentine_platform::Rgba;

use crate::PALETTE;

/// Tunables for one confetti burst. Defaults reproduce the classic
/// celebration burst: 150 pieces, gentle gravity, slow linear fade.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BurstPreset {
    pub name: String,
    pub particle_count: u32,
    /// Added to vy every frame.
    pub gravity: f32,
    /// Multiplied into vx every frame.
    pub drag: f32,
    /// Subtracted from alpha every frame.
    pub fade: f32,
    pub size_min: f32,
    pub size_max: f32,
    pub palette: Vec<Rgba>,
}

impl Default for BurstPreset {
    fn default() -> Self {
        Self {
            name: "Celebration".into(),
            particle_count: 150,
            gravity: 0.15,
            drag: 0.99,
            fade: 0.003,
            size_min: 3.0,
            size_max: 11.0,
            palette: PALETTE.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub preset: BurstPreset,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl EngineConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let preset = &self.preset;
        if preset.particle_count == 0 {
            return Err(ConfigError::Invalid("particle_count must be at least 1".into()));
        }
        if preset.palette.is_empty() {
            return Err(ConfigError::Invalid("palette must not be empty".into()));
        }
        if !(preset.size_min > 0.0 && preset.size_max > preset.size_min) {
            return Err(ConfigError::Invalid(
                "particle sizes must satisfy 0 < size_min < size_max".into(),
            ));
        }
        if preset.fade <= 0.0 {
            return Err(ConfigError::Invalid("fade must be positive".into()));
        }
        Ok(())
    }
}
