use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Pause between two scans of the process table.
pub const SCAN_INTERVAL: Duration = Duration::from_secs(1);
/// How long a gracefully terminated process gets before it is force-killed.
pub const TERMINATION_TIMEOUT: Duration = Duration::from_secs(3);
/// Tracking-store size above which stale identifiers are pruned.
pub const PRUNE_THRESHOLD: usize = 100;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Timing and sizing knobs for the watcher loop. Always built from the
/// constants above in production; tests shrink the durations.
#[derive(Debug, Clone, PartialEq)]
pub struct WatcherConfig {
    pub scan_interval: Duration,
    pub termination_timeout: Duration,
    pub prune_threshold: usize,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            scan_interval: SCAN_INTERVAL,
            termination_timeout: TERMINATION_TIMEOUT,
            prune_threshold: PRUNE_THRESHOLD,
        }
    }
}

/// Root of the optional config file. Only logging is configurable on disk.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// `tracing` filter directive (e.g. "info" or "calc_redirect=debug").
    /// `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log file path. Defaults to `calc-redirect.log` in the app data directory.
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            file: None,
        }
    }
}

/// Loads the config file at `path`, returning `Config::default()` if the file does not exist.
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_or_default(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}
