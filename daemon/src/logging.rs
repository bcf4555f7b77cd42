use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Local wall-clock timestamps, e.g. `2024-05-01 13:37:00.123`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format(TIMESTAMP_FORMAT))
    }
}

/// Builds the filter: `RUST_LOG` wins, otherwise the configured directive.
fn build_filter(level: &str) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(level)
            .with_context(|| format!("Invalid log level directive: {level:?}")),
    }
}

/// Installs the global subscriber. Every event goes both to stderr and,
/// without colour codes, to `log_path` (appended, created if missing).
pub fn init(level: &str, log_path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;

    tracing_subscriber::registry()
        .with(build_filter(level)?)
        .with(
            fmt::layer()
                .with_timer(LocalTimer)
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(
            fmt::layer()
                .with_timer(LocalTimer)
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .context("Failed to install log subscriber")?;
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_writes_date_and_time() {
        let mut out = String::new();
        LocalTimer.format_time(&mut Writer::new(&mut out)).unwrap();
        // "YYYY-MM-DD HH:MM:SS.mmm"
        assert_eq!(out.len(), 23, "{out}");
        assert_eq!(&out[4..5], "-");
        assert_eq!(&out[10..11], " ");
        assert_eq!(&out[19..20], ".");
    }

    #[test]
    fn build_filter_rejects_garbage_directive() {
        if std::env::var_os("RUST_LOG").is_none() {
            assert!(build_filter("calc_redirect=notalevel").is_err());
        }
    }

    #[test]
    fn build_filter_accepts_level_names() {
        assert!(build_filter("debug").is_ok());
    }

    #[test]
    fn capture_collects_events_with_levels() {
        let logs = capture::CapturedLogs::default();
        {
            let _guard = logs.install();
            tracing::info!("hello");
            tracing::debug!("quiet");
        }
        let lines = logs.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("INFO") && lines[0].contains("hello"));
        assert!(lines[1].contains("DEBUG") && lines[1].contains("quiet"));
    }
}
