//! Configuration loading and management.

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};

/// Config file name looked up in the target directory.
pub const CONFIG_FILE_NAME: &str = "test-grader.toml";

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "TEST_GRADER_";

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Exclude patterns (glob), matched against paths relative to the target.
    pub exclude: Vec<String>,
    /// Directory names never descended into.
    pub exclude_dirs: Vec<String>,
    /// Grading gate configuration.
    pub grading: GradingConfig,
    /// Output configuration.
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exclude: Vec::new(),
            exclude_dirs: ["node_modules", ".venv", "venv", "__pycache__"]
                .iter()
                .map(|d| d.to_string())
                .collect(),
            grading: GradingConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from an explicit file path.
    ///
    /// Errors if the file does not exist. Use this for explicit `--config` flags.
    /// Env vars with `TEST_GRADER_` prefix override file values.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file_exact(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(|e| Error::config(e.to_string()))
    }

    /// Load configuration for a target path.
    ///
    /// Looks for `test-grader.toml` or `.test-grader/test-grader.toml` in the
    /// target directory (the parent directory when the target is a file).
    /// Missing files are silently skipped.
    pub fn load_default(target: impl AsRef<Path>) -> Result<Self> {
        let target = target.as_ref();
        let dir = if target.is_file() {
            target.parent().unwrap_or(target)
        } else {
            target
        };
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(dir.join(CONFIG_FILE_NAME)))
            .merge(Toml::file(dir.join(".test-grader").join(CONFIG_FILE_NAME)))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(|e| Error::config(e.to_string()))
    }
}

/// Minimum-score gate configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GradingConfig {
    /// Fail when the average score is below this value (0 disables the gate).
    pub min_score: u32,
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format.
    pub format: OutputFormat,
    /// Color output.
    pub color: bool,
    /// List every issue instead of the first three.
    pub verbose: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            color: true,
            verbose: false,
        }
    }
}

/// Output format.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// JSON format.
    Json,
}
