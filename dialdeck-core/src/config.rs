//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/dialdeck/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/dialdeck/` (~/.config/dialdeck/)
//! - State/Logs: `$XDG_STATE_HOME/dialdeck/` (~/.local/state/dialdeck/)

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Analytics configuration
    #[serde(default)]
    pub analytics: AnalyticsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Analytics configuration
#[derive(Debug, Deserialize)]
pub struct AnalyticsConfig {
    /// Suppress period-over-period deltas whose magnitude exceeds this
    /// percentage (guards against noise from tiny previous counts)
    #[serde(default = "default_delta_suppression_pct")]
    pub delta_suppression_pct: f64,

    /// Maximum leaderboard rows to return (0 = unlimited)
    #[serde(default)]
    pub leaderboard_size: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            delta_suppression_pct: default_delta_suppression_pct(),
            leaderboard_size: 0,
        }
    }
}

fn default_delta_suppression_pct() -> f64 {
    999.0
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.analytics.delta_suppression_pct <= 0.0 {
            return Err(Error::Config(
                "analytics.delta_suppression_pct must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns the config directory path
    pub fn config_dir() -> PathBuf {
        xdg_config_home().join("dialdeck")
    }

    /// Returns the config file path
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Returns the state directory path (logs)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("dialdeck")
    }

    /// Returns the log file path
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("dialdeck.log")
    }
}
