//! Configuration system for the `TaskDeck` client.
//!
//! Supports layered configuration with the following priority (highest first):
//! 1. CLI arguments
//! 2. Environment variables (via clap `env` attribute)
//! 3. TOML config file (`~/.config/taskdeck/config.toml`)
//! 4. Compiled defaults
//!
//! Missing config file is not an error (defaults are used). An explicit
//! `--config` path that doesn't exist is an error.

use std::path::PathBuf;
use std::time::Duration;

use crate::idle::{DEFAULT_ACTIVITY_THROTTLE, DEFAULT_IDLE_TIMEOUT, IdleConfig};
use crate::notifications::DEFAULT_MAX_PER_POSITION;
use crate::tasks::DEFAULT_MAX_TITLE_LEN;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),
}

// ---------------------------------------------------------------------------
// TOML file structs (all fields Option for partial overrides)
// ---------------------------------------------------------------------------

/// Top-level TOML config file structure.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ConfigFile {
    storage: StorageFileConfig,
    idle: IdleFileConfig,
    ui: UiFileConfig,
    notifications: NotificationsFileConfig,
}

/// `[storage]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct StorageFileConfig {
    data_dir: Option<PathBuf>,
}

/// `[idle]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct IdleFileConfig {
    timeout_secs: Option<u64>,
    throttle_ms: Option<u64>,
}

/// `[ui]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct UiFileConfig {
    tick_ms: Option<u64>,
    poll_ms: Option<u64>,
    dark_mode: Option<bool>,
    max_task_title_len: Option<usize>,
}

/// `[notifications]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct NotificationsFileConfig {
    max_visible: Option<usize>,
}

// ---------------------------------------------------------------------------
// Resolved configuration (concrete types, all fields populated)
// ---------------------------------------------------------------------------

/// Fully resolved client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    // -- Storage --
    /// Directory holding `tasks.json`.
    pub data_dir: PathBuf,

    // -- Idle --
    /// Idle timeout and activity throttle.
    pub idle: IdleConfig,

    // -- UI --
    /// Refresh cadence of the idle countdown display.
    pub tick_interval: Duration,
    /// Cadence of idle polling and toast expiry.
    pub poll_interval: Duration,
    /// Start in dark mode.
    pub dark_mode: bool,
    /// Maximum task title length in characters.
    pub max_task_title_len: usize,

    // -- Notifications --
    /// Toasts kept per screen corner.
    pub max_visible_toasts: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            idle: IdleConfig::default(),
            tick_interval: Duration::from_secs(1),
            poll_interval: Duration::from_millis(100),
            dark_mode: false,
            max_task_title_len: DEFAULT_MAX_TITLE_LEN,
            max_visible_toasts: DEFAULT_MAX_PER_POSITION,
        }
    }
}

impl ClientConfig {
    /// Load configuration by merging CLI args, env vars, and a TOML file.
    ///
    /// CLI args and env vars are parsed via `clap`. If `--config` is given
    /// and the file does not exist, returns an error. If no `--config` is
    /// given, the default path (`~/.config/taskdeck/config.toml`) is tried
    /// and silently ignored if missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the config file cannot be read or parsed.
    pub fn load(cli: &CliArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        Ok(Self::resolve(cli, &file))
    }

    /// Resolve a `ClientConfig` from CLI args and a parsed config file.
    ///
    /// Priority: CLI > file > default. Separated from `load()` so it can be
    /// unit tested without CLI parsing.
    #[must_use]
    fn resolve(cli: &CliArgs, file: &ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            data_dir: cli
                .data_dir
                .clone()
                .or_else(|| file.storage.data_dir.clone())
                .unwrap_or(defaults.data_dir),
            idle: IdleConfig {
                timeout: file
                    .idle
                    .timeout_secs
                    .filter(|s| *s > 0)
                    .map_or(DEFAULT_IDLE_TIMEOUT, Duration::from_secs),
                throttle: file
                    .idle
                    .throttle_ms
                    .map_or(DEFAULT_ACTIVITY_THROTTLE, Duration::from_millis),
            },
            tick_interval: file
                .ui
                .tick_ms
                .filter(|ms| *ms > 0)
                .map_or(defaults.tick_interval, Duration::from_millis),
            poll_interval: file
                .ui
                .poll_ms
                .filter(|ms| *ms > 0)
                .map_or(defaults.poll_interval, Duration::from_millis),
            dark_mode: cli.dark || file.ui.dark_mode.unwrap_or(defaults.dark_mode),
            max_task_title_len: file
                .ui
                .max_task_title_len
                .unwrap_or(defaults.max_task_title_len),
            max_visible_toasts: file
                .notifications
                .max_visible
                .unwrap_or(defaults.max_visible_toasts),
        }
    }
}

/// CLI arguments parsed by clap.
#[derive(clap::Parser, Debug, Default)]
#[command(version, about = "Terminal task tracker with idle nudges")]
pub struct CliArgs {
    /// Path to config file (default: `~/.config/taskdeck/config.toml`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory where tasks are stored.
    #[arg(long, env = "TASKDECK_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Start in dark mode.
    #[arg(long)]
    pub dark: bool,

    /// Remove all stored tasks before starting.
    #[arg(long)]
    pub reset: bool,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", env = "TASKDECK_LOG")]
    pub log_level: String,

    /// Path to log file (default: `$TMPDIR/taskdeck.log`).
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Platform data directory, falling back to the working directory.
fn default_data_dir() -> PathBuf {
    dirs::data_dir().map_or_else(|| PathBuf::from(".taskdeck"), |d| d.join("taskdeck"))
}

/// Load and parse a TOML config file.
///
/// If `explicit_path` is `Some`, the file must exist (error if not).
/// If `explicit_path` is `None`, the default path is tried and missing file
/// is treated as empty config.
fn load_config_file(explicit_path: Option<&std::path::Path>) -> Result<ConfigFile, ConfigError> {
    let path = if let Some(p) = explicit_path {
        let contents = std::fs::read_to_string(p).map_err(|e| ConfigError::ReadFile {
            path: p.to_path_buf(),
            source: e,
        })?;
        return Ok(toml::from_str(&contents)?);
    } else {
        let Some(config_dir) = dirs::config_dir() else {
            // No config dir available; use defaults.
            return Ok(ConfigFile::default());
        };
        config_dir.join("taskdeck").join("config.toml")
    };

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ConfigFile::default()),
        Err(e) => Err(ConfigError::ReadFile { path, source: e }),
    }
}
