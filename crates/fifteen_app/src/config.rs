//! Application configuration.
//!
//! Defaults, optionally overlaid by a TOML file, then by CLI flags.
//! A `.env` file is loaded in `main` before this runs, so the image
//! auth token can live there.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::info;

use fifteen_core::{SessionConfig, DEFAULT_NUMBERED_PROBABILITY, DEFAULT_SHUFFLE_MOVES};

use crate::cli::Cli;

/// Image catalog and fetch settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImagesConfig {
    /// Catalog repository owner.
    pub owner: String,
    /// Catalog repository name.
    pub repo: String,
    /// Branch to read from.
    pub branch: String,
    /// Per-attempt fetch timeout in seconds.
    pub timeout_secs: u64,
    /// Environment variable holding an optional auth token for the
    /// credentialed fetch attempt.
    pub token_env: String,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            owner: "chronoco-de7".to_string(),
            repo: "puzzle-images".to_string(),
            branch: "main".to_string(),
            timeout_secs: 10,
            token_env: "FIFTEEN_IMAGE_TOKEN".to_string(),
        }
    }
}

impl ImagesConfig {
    /// Per-attempt fetch timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Auth token from the configured environment variable, if set.
    pub fn token(&self) -> Option<String> {
        std::env::var(&self.token_env).ok().filter(|t| !t.is_empty())
    }
}

/// Full application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Session tuning (numbered probability, shuffle length).
    pub session: SessionSettings,
    /// Image pipeline settings.
    pub images: ImagesConfig,
}

/// Session settings as they appear in the config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Probability of a numbered game.
    pub numbered_probability: f64,
    /// Random legal moves per shuffle.
    pub shuffle_moves: u32,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            numbered_probability: DEFAULT_NUMBERED_PROBABILITY,
            shuffle_moves: DEFAULT_SHUFFLE_MOVES,
        }
    }
}

impl AppConfig {
    /// Loads configuration from an optional TOML file and applies CLI
    /// overrides.
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(p) = cli.numbered_probability {
            config.session.numbered_probability = p;
        }
        if cli.numbered {
            config.session.numbered_probability = 1.0;
        }
        if let Some(moves) = cli.shuffle_moves {
            config.session.shuffle_moves = moves;
        }

        // NaN or infinite would blow up probability sampling later.
        let p = config.session.numbered_probability;
        if !p.is_finite() {
            anyhow::bail!("numbered probability must be a finite number, got {p}");
        }
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config = toml::from_str(&raw)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        info!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Session config for the core crate.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            numbered_probability: self.session.numbered_probability,
            shuffle_moves: self.session.shuffle_moves,
        }
    }
}
