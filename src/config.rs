//! Configuration file support for mutseq.
//!
//! This module provides loading of `.mutseq.toml` configuration files
//! which can specify batch defaults.
//!
//! # Example Configuration
//!
//! ```toml
//! [batch]
//! unknown = "pass"
//! line-width = 60
//! progress-interval = 500
//! ```
//!
//! # Config File Locations
//!
//! Configuration is searched in this order (first found wins):
//! 1. `.mutseq.toml` in current directory
//! 2. `~/.config/mutseq/config.toml`
//!
//! CLI flags take precedence over config file settings.

use crate::apply::UnknownPolicy;
use std::fs;
use std::path::PathBuf;

/// Parsed configuration from a .mutseq.toml file.
#[derive(Debug, Clone, Default)]
pub struct MutSeqConfig {
    /// Batch defaults.
    pub batch: BatchSection,
}

/// Batch section of the config file.
#[derive(Debug, Clone, Default)]
pub struct BatchSection {
    /// Unknown-descriptor policy: "pass" or "reject".
    pub unknown: Option<String>,
    /// FASTA line width (0 for unwrapped).
    pub line_width: Option<usize>,
    /// Progress callback interval.
    pub progress_interval: Option<usize>,
}

impl MutSeqConfig {
    /// Load configuration from the default locations.
    ///
    /// Searches for config in:
    /// 1. `.mutseq.toml` in current directory
    /// 2. `~/.config/mutseq/config.toml`
    pub fn load() -> Option<Self> {
        let cwd_config = PathBuf::from(".mutseq.toml");
        if cwd_config.exists() {
            if let Ok(config) = Self::load_from_path(&cwd_config) {
                return Some(config);
            }
        }

        if let Some(home) = dirs_home() {
            let home_config = home.join(".config").join("mutseq").join("config.toml");
            if home_config.exists() {
                if let Ok(config) = Self::load_from_path(&home_config) {
                    return Some(config);
                }
            }
        }

        None
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: &PathBuf) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML content.
    ///
    /// Line-oriented parsing; the config surface is small enough that a full
    /// TOML dependency is not warranted.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut config = MutSeqConfig::default();
        let mut in_batch = false;

        for line in content.lines() {
            let line = line.trim();

            if line.starts_with('#') || line.is_empty() {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                let section = &line[1..line.len() - 1];
                in_batch = section == "batch";
                continue;
            }

            if !in_batch {
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim();
                let value = value.trim();

                match key {
                    "unknown" => {
                        let policy = value.trim_matches('"').trim_matches('\'');
                        config.batch.unknown = Some(policy.to_string());
                    }
                    "line-width" => {
                        let width = value.parse().map_err(|_| {
                            ConfigError::Parse(format!("invalid line-width: {}", value))
                        })?;
                        config.batch.line_width = Some(width);
                    }
                    "progress-interval" => {
                        let interval = value.parse().map_err(|_| {
                            ConfigError::Parse(format!("invalid progress-interval: {}", value))
                        })?;
                        config.batch.progress_interval = Some(interval);
                    }
                    _ => {}
                }
            }
        }

        Ok(config)
    }

    /// Resolve the unknown-descriptor policy, with an optional CLI override.
    /// CLI arguments take precedence.
    pub fn unknown_policy(&self, cli_value: Option<&str>) -> UnknownPolicy {
        let value = cli_value.or(self.batch.unknown.as_deref());
        match value {
            Some("reject") => UnknownPolicy::Reject,
            _ => UnknownPolicy::PassThrough,
        }
    }
}

/// Configuration loading error.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// IO error reading config file.
    Io(String),
    /// Parse error in config file.
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "Config IO error: {}", msg),
            ConfigError::Parse(msg) => write!(f, "Config parse error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Get the user's home directory.
fn dirs_home() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}
