//! Configuration loading from minitest.toml
//!
//! The file is discovered by walking up from the current directory; the first
//! `minitest.toml` found wins. Every field has a default, so a missing file or
//! a partial file both work.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up during discovery
pub const CONFIG_FILE: &str = "minitest.toml";

/// minitest configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MiniConfig {
    /// Runner configuration
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Log file configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Report output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Runner configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Worker threads for running all suites (absent: one per suite)
    #[serde(default)]
    pub jobs: Option<usize>,
    /// Add a `DISABLED_`-only step to the default plan
    #[serde(default)]
    pub run_disabled: bool,
}

/// Log file configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write one log file per run category or suite
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Directory receiving the log files
    #[serde(default = "default_log_dir")]
    pub directory: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            directory: default_log_dir(),
        }
    }
}

fn default_enabled() -> bool {
    true
}
fn default_log_dir() -> String {
    "Logs".to_string()
}

/// Report output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Report format: "human" or "json"
    #[serde(default = "default_format")]
    pub format: String,
    /// Write the report to this file instead of stdout
    #[serde(default)]
    pub file: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            file: None,
        }
    }
}

fn default_format() -> String {
    "human".to_string()
}

impl MiniConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from current directory
    pub fn discover() -> Option<Self> {
        let dir = std::env::current_dir().ok()?;
        Self::discover_from(dir)
    }

    /// Walk up from `start` and load the first configuration file found
    pub fn discover_from(start: impl Into<PathBuf>) -> Option<Self> {
        let mut dir = start.into();
        loop {
            let config_path = dir.join(CONFIG_FILE);
            if config_path.exists() {
                return match Self::load(&config_path) {
                    Ok(config) => Some(config),
                    Err(e) => {
                        tracing::warn!(path = %config_path.display(), "ignoring invalid config: {}", e);
                        None
                    }
                };
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# minitest Configuration

[runner]
# Worker threads when running all suites (uncomment to enable; default is one per suite)
# jobs = 4
# Add a run of the DISABLED_ tests to the default plan
run_disabled = false

[logging]
# Write one log file per run category or suite
enabled = true
# Directory receiving the log files
directory = "Logs"

[output]
# Report format: human or json
format = "human"
# Write the report to a file instead of stdout (uncomment to enable)
# file = "target/minitest/report.json"
"#
        .to_string()
    }
}
