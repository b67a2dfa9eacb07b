//! Configuration handling for Recap CLI
//!
//! Configuration is resolved from CLI flags, environment variables, an
//! optional global `config.toml`, and built-in defaults, in that order.
//! The result is one explicit [`Config`] handed to the pipeline; nothing
//! reads the environment after startup.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Datelike, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::document::{END_MARKER, START_MARKER};
use crate::github::DEFAULT_API_URL;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Built-in fallback when no username is configured anywhere
pub const DEFAULT_USERNAME: &str = "your-github-username";

/// Default document to patch
pub const DEFAULT_README: &str = "README.md";

/// On-disk configuration, everything optional
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    /// GitHub username to summarize
    pub username: Option<String>,

    /// Document to patch
    pub readme: Option<PathBuf>,

    /// Base URL of the GitHub API
    pub api_url: Option<String>,

    /// Opening sentinel of the managed region
    pub start_marker: Option<String>,

    /// Closing sentinel of the managed region
    pub end_marker: Option<String>,
}

/// Values taken from CLI flags and environment, overriding the file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub username: Option<String>,
    pub token: Option<String>,
    pub year: Option<i32>,
    pub readme: Option<PathBuf>,
    pub api_url: Option<String>,
}

/// Resolved configuration for one run
#[derive(Debug, Clone)]
pub struct Config {
    pub username: String,
    pub token: Option<String>,
    pub year: Option<i32>,
    pub readme: PathBuf,
    pub api_url: String,
    pub start_marker: String,
    pub end_marker: String,
}

impl Config {
    /// Resolves configuration from overrides, the global file, and defaults
    pub fn resolve(overrides: Overrides) -> Result<Self> {
        Ok(Self::merge(overrides, Self::load_file()?))
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "recap", "recap-cli").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Loads the global configuration file, if there is one
    fn load_file() -> Result<FileConfig> {
        let config_dir = match Self::global_config_dir() {
            Some(dir) => dir,
            None => return Ok(FileConfig::default()),
        };

        let config_path = config_dir.join("config.toml");
        if !config_path.exists() {
            return Ok(FileConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config: {}", config_path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse config")
    }

    fn merge(overrides: Overrides, file: FileConfig) -> Self {
        Self {
            username: overrides
                .username
                .or(file.username)
                .unwrap_or_else(|| DEFAULT_USERNAME.to_string()),
            token: overrides.token,
            year: overrides.year,
            readme: overrides
                .readme
                .or(file.readme)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_README)),
            api_url: overrides
                .api_url
                .or(file.api_url)
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            start_marker: file
                .start_marker
                .unwrap_or_else(|| START_MARKER.to_string()),
            end_marker: file.end_marker.unwrap_or_else(|| END_MARKER.to_string()),
        }
    }

    /// Returns the year to summarize: the override, or the current UTC year
    pub fn effective_year(&self) -> i32 {
        self.year.unwrap_or_else(|| Utc::now().year())
    }
}
