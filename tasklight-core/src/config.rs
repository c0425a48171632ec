//! Configuration loading and management
//!
//! Everything tasklight owns lives under a hidden state directory inside
//! the project being observed:
//!
//! - State: `<project>/.tasklight/` (action log, diagnostic log)
//! - Config: `<project>/.tasklight/config.toml` (optional)
//! - Task document: `<project>/docs/TASKS.md` unless overridden
//!
//! Paths are project-relative rather than user-global because hooks run per
//! project and several projects may be observed at once.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Name of the hidden state directory inside the project root.
pub const STATE_DIR: &str = ".tasklight";

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Task document configuration
    pub checklist: ChecklistConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Task document configuration
#[derive(Debug, Deserialize)]
pub struct ChecklistConfig {
    /// Task document path, resolved against the project root unless absolute
    #[serde(default = "default_checklist_path")]
    pub path: PathBuf,
}

impl Default for ChecklistConfig {
    fn default() -> Self {
        Self {
            path: default_checklist_path(),
        }
    }
}

fn default_checklist_path() -> PathBuf {
    PathBuf::from("docs/TASKS.md")
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
    /// Load configuration for a project, falling back to defaults when no
    /// config file exists.
    pub fn load(project_root: &Path) -> Result<Self> {
        let config_path = Self::config_path(project_root);

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "No config file found, using defaults");
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read config file {}: {e}", path.display()))
        })?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {e}")))?;

        Ok(config)
    }

    /// Returns the config file path for a project
    pub fn config_path(project_root: &Path) -> PathBuf {
        Self::state_dir(project_root).join("config.toml")
    }

    /// Returns the hidden state directory for a project (action log,
    /// diagnostic log)
    pub fn state_dir(project_root: &Path) -> PathBuf {
        project_root.join(STATE_DIR)
    }

    /// Returns the directory holding the action log
    pub fn actions_dir(project_root: &Path) -> PathBuf {
        Self::state_dir(project_root)
    }

    /// Returns the directory holding tasklight's own diagnostic logs
    pub fn log_dir(project_root: &Path) -> PathBuf {
        Self::state_dir(project_root)
    }

    /// Returns the task document path, resolved against the project root
    pub fn checklist_path(&self, project_root: &Path) -> PathBuf {
        if self.checklist.path.is_absolute() {
            self.checklist.path.clone()
        } else {
            project_root.join(&self.checklist.path)
        }
    }
}
