//! TOML-based engine configuration.
//!
//! Stores user preferences for the session engine:
//! - Pre-start countdown length and reduced-motion mode
//! - Typewriter pacing and glyphs
//! - Base points for scoring
//!
//! Configuration is stored at `~/.config/focusfoe/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, ValidationError};
use crate::prestart::{PrestartTimer, DEFAULT_PRESTART_MS};
use crate::villain::TypewriterConfig;

/// Returns `~/.config/focusfoe[-dev]/` based on FOCUSFOE_ENV.
///
/// Set FOCUSFOE_ENV=dev to use the development data directory.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("FOCUSFOE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("focusfoe-dev")
    } else {
        base_dir.join("focusfoe")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::DirUnavailable(e.to_string()))?;
    Ok(dir)
}

/// Pre-start countdown configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrestartSection {
    #[serde(default = "default_prestart_total_ms")]
    pub total_ms: u64,
    #[serde(default)]
    pub reduced_motion: bool,
}

impl PrestartSection {
    /// Build the timer this section describes.
    pub fn timer(&self) -> Result<PrestartTimer, ValidationError> {
        Ok(PrestartTimer::new(self.total_ms)?.with_reduced_motion(self.reduced_motion))
    }
}

/// Typewriter configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypewriterSection {
    #[serde(default = "default_speed_ms")]
    pub speed_ms: u64,
    #[serde(default = "default_jitter_ms")]
    pub jitter_ms: u64,
    #[serde(default)]
    pub neon: bool,
    #[serde(default = "default_caret")]
    pub caret: Option<String>,
    #[serde(default)]
    pub prefix: Option<String>,
}

impl TypewriterSection {
    /// Build the renderer options this section describes.
    pub fn renderer_config(&self) -> TypewriterConfig {
        TypewriterConfig {
            speed_ms: self.speed_ms,
            jitter_ms: self.jitter_ms,
            neon: self.neon,
            caret: self.caret.clone(),
            prefix: self.prefix.clone(),
            seed: None,
        }
    }
}

/// Scoring configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringSection {
    #[serde(default = "default_base_points")]
    pub base_points: f64,
}

/// Engine configuration.
///
/// Serialized to/from TOML at `~/.config/focusfoe/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub prestart: PrestartSection,
    #[serde(default)]
    pub typewriter: TypewriterSection,
    #[serde(default)]
    pub scoring: ScoringSection,
}

// Default functions
fn default_prestart_total_ms() -> u64 {
    DEFAULT_PRESTART_MS
}
fn default_speed_ms() -> u64 {
    50
}
fn default_jitter_ms() -> u64 {
    6
}
fn default_caret() -> Option<String> {
    Some("▌".to_string())
}
fn default_base_points() -> f64 {
    100.0
}

impl Default for PrestartSection {
    fn default() -> Self {
        Self {
            total_ms: default_prestart_total_ms(),
            reduced_motion: false,
        }
    }
}

impl Default for TypewriterSection {
    fn default() -> Self {
        Self {
            speed_ms: default_speed_ms(),
            jitter_ms: default_jitter_ms(),
            neon: false,
            caret: default_caret(),
            prefix: None,
        }
    }
}

impl Default for ScoringSection {
    fn default() -> Self {
        Self {
            base_points: default_base_points(),
        }
    }
}

impl EngineConfig {
    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing (and returning) the default
    /// config when no file exists yet.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Load from an explicit path. A missing file is a load failure here.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load from disk, returning the default on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}
