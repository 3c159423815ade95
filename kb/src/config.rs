//! Kanboard configuration types and loading

use boardstore::remote::{DEFAULT_ENDPOINT_ENV, DEFAULT_PROJECT_ENV};
use boardstore::{Compaction, RemoteConfig};
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main Kanboard configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[serde(rename = "log-level")]
    pub log_level: Option<String>,

    /// Where the board snapshot lives
    pub storage: StorageConfig,

    /// Board behaviour
    pub board: BoardConfig,

    /// Remote database handle settings
    pub remote: RemoteSettings,

    /// Terminal UI settings
    pub tui: TuiConfig,
}

impl Config {
    /// Load configuration with fallback chain
    ///
    /// An explicit path must load. Otherwise the first readable file from
    /// [`Config::search_paths`] wins, and defaults apply when none does.
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        match Self::load_first(&Self::search_paths()) {
            Some(config) => Ok(config),
            None => {
                tracing::info!("No usable config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Implicit config locations, highest priority first: the project-local
    /// `.kanboard.yml`, then `<config_dir>/kanboard/kanboard.yml`
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(".kanboard.yml")];
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("kanboard").join("kanboard.yml"));
        }
        paths
    }

    /// First existing file in `paths` that parses; a broken file is skipped
    /// with a warning naming it
    fn load_first(paths: &[PathBuf]) -> Option<Self> {
        paths.iter().filter(|p| p.exists()).find_map(|path| match Self::load_from_file(path) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable kanboard config");
                None
            }
        })
    }

    /// Best-effort read of just the log level, before logging is set up
    ///
    /// Errors are swallowed here; the full [`Config::load`] reports them once
    /// logging is available.
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        let candidates = match config_path {
            Some(path) => vec![path.clone()],
            None => Self::search_paths(),
        };

        candidates
            .iter()
            .filter(|p| p.exists())
            .find_map(|p| Self::load_from_file(p).ok())
            .and_then(|c| c.log_level)
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Render the effective configuration as YAML
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize config")
    }
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the JSON board snapshot
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

fn default_storage_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("kanboard")
        .join(boardstore::DEFAULT_SNAPSHOT_NAME)
}

/// Board behaviour configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Which columns are re-ranked after a move
    pub compaction: Compaction,
}

/// Remote database settings
///
/// Only the names of the environment variables live in the config file; the
/// values themselves are read from the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteSettings {
    /// Environment variable holding the endpoint URL
    #[serde(rename = "endpoint-env")]
    pub endpoint_env: String,

    /// Environment variable holding the project identifier
    #[serde(rename = "project-env")]
    pub project_env: String,
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            endpoint_env: DEFAULT_ENDPOINT_ENV.to_string(),
            project_env: DEFAULT_PROJECT_ENV.to_string(),
        }
    }
}

impl RemoteSettings {
    /// Resolve the remote handle from the environment
    pub fn resolve(&self) -> RemoteConfig {
        RemoteConfig::from_env(&self.endpoint_env, &self.project_env)
    }
}

/// Terminal UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Event poll interval in milliseconds
    #[serde(rename = "tick-rate-ms")]
    pub tick_rate_ms: u64,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self { tick_rate_ms: 250 }
    }
}
