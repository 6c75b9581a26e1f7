use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_TEMPO_BPM: f64 = 80.0;
pub const DEFAULT_MISS_LIMIT: u32 = 5;
pub const DEFAULT_EASY_MISS_FACTOR: u32 = 2;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("tempo must be positive, got {0} BPM")]
    NonPositiveTempo(f64),
    #[error("miss limit must be at least 1")]
    ZeroMissLimit,
    #[error("easy mode miss factor must be at least 1")]
    ZeroEasyMissFactor,
}

/// Drum toy configuration.
///
/// Validated at construction; a loaded file is re-validated before use so a
/// hand-edited config cannot smuggle in a non-positive tempo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrumConfig {
    /// Tempo in beats per minute. Inherent hit latency is much more
    /// manageable at lower tempos.
    pub tempo_bpm: f64,
    /// Misses allowed before the session ends.
    pub miss_limit: u32,
    /// Easy mode scales the miss limit and swaps display text. It does not
    /// change the timing or classification rules.
    pub easy_mode: bool,
    /// Multiplier applied to the miss limit in easy mode.
    pub easy_miss_factor: u32,
}

impl Default for DrumConfig {
    fn default() -> Self {
        Self {
            tempo_bpm: DEFAULT_TEMPO_BPM,
            miss_limit: DEFAULT_MISS_LIMIT,
            easy_mode: true,
            easy_miss_factor: DEFAULT_EASY_MISS_FACTOR,
        }
    }
}

impl DrumConfig {
    pub fn new(tempo_bpm: f64, miss_limit: u32, easy_mode: bool) -> Result<Self, ConfigError> {
        let config = Self {
            tempo_bpm,
            miss_limit,
            easy_mode,
            easy_miss_factor: DEFAULT_EASY_MISS_FACTOR,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        Self::validate_tempo(self.tempo_bpm)?;
        if self.miss_limit == 0 {
            return Err(ConfigError::ZeroMissLimit);
        }
        if self.easy_miss_factor == 0 {
            return Err(ConfigError::ZeroEasyMissFactor);
        }
        Ok(())
    }

    /// Check a tempo value and return the derived beat period in milliseconds.
    pub fn validate_tempo(tempo_bpm: f64) -> Result<f64, ConfigError> {
        if !(tempo_bpm > 0.0) {
            return Err(ConfigError::NonPositiveTempo(tempo_bpm));
        }
        Ok(60_000.0 / tempo_bpm)
    }

    /// Beat period derived from the tempo, e.g. 80 BPM -> 750 ms.
    pub fn beat_period_ms(&self) -> f64 {
        60_000.0 / self.tempo_bpm
    }

    /// Miss limit after the easy mode multiplier.
    pub fn effective_miss_limit(&self) -> u32 {
        if self.easy_mode {
            self.miss_limit * self.easy_miss_factor
        } else {
            self.miss_limit
        }
    }

    /// Load the config from disk, falling back to defaults if the file is
    /// missing, unreadable, or fails validation.
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save the config to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        if let Some(proj_dirs) = ProjectDirs::from("com", "beatmatcher", "beatmatcher") {
            Ok(proj_dirs.config_dir().join("drum.json"))
        } else {
            Ok(PathBuf::from(".beatmatcher-drum.json"))
        }
    }
}
