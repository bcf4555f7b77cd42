mod browser;
mod config;
mod logging;
mod matcher;
mod paths;
mod process_table;
mod search;
mod terminator;
mod tracker;
mod watcher;

use anyhow::{Context, Result};
use clap::Parser;
use std::future::Future;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error};

use crate::browser::{Browser, SystemBrowser};
use crate::config::WatcherConfig;
use crate::process_table::SysinfoProcessTable;
use crate::search::SearchTarget;
use crate::watcher::ProcessWatcher;

/// Kills calculator processes as they start and opens a web search instead.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// Config file with logging settings (defaults to the app data directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the search phrase and URL, then exit without watching
    #[arg(long)]
    show_target: bool,

    /// With --show-target, also open the URL in the default browser
    #[arg(long, requires = "show_target")]
    open: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let target = SearchTarget::default();

    if cli.show_target {
        return show_target(&target, cli.open);
    }

    // ── Logging ───────────────────────────────────────────────────────────────
    if let Err(e) = setup(&cli) {
        eprintln!("Failed to start calc-redirect: {e:#}");
        return ExitCode::FAILURE;
    }
    debug!(?cli, "parsed CLI arguments");

    // ── Watch loop ────────────────────────────────────────────────────────────
    // Registered before the first scan so an early Ctrl+C is not lost.
    let shutdown = match shutdown_signal() {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to start calc-redirect: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let mut watcher = ProcessWatcher::new(
        SysinfoProcessTable::new(),
        SystemBrowser::new(),
        target,
        WatcherConfig::default(),
    );

    let result = watcher.run(shutdown).await;
    debug!("Watcher finished in state {:?}", watcher.state());
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Calculator interceptor failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Resolves the data directory, loads the config and installs logging.
fn setup(cli: &Cli) -> Result<()> {
    let app_dir = paths::app_data_dir()?;
    std::fs::create_dir_all(&app_dir)
        .with_context(|| format!("Failed to create app data directory {}", app_dir.display()))?;

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| paths::config_file_path(&app_dir));
    let config = config::load_or_default(&config_path)?;

    let log_path = config
        .log
        .file
        .clone()
        .unwrap_or_else(|| paths::log_file_path(&app_dir));
    logging::init(&config.log.level, &log_path)
}

/// Installs the Ctrl+C listener immediately; the returned future resolves on
/// the first interrupt received after this call.
#[cfg(unix)]
fn shutdown_signal() -> Result<impl Future<Output = ()>> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut interrupt =
        signal(SignalKind::interrupt()).context("Failed to listen for Ctrl+C")?;
    Ok(async move {
        interrupt.recv().await;
    })
}

#[cfg(windows)]
fn shutdown_signal() -> Result<impl Future<Output = ()>> {
    let mut interrupt =
        tokio::signal::windows::ctrl_c().context("Failed to listen for Ctrl+C")?;
    Ok(async move {
        interrupt.recv().await;
    })
}

fn show_target(target: &SearchTarget, open: bool) -> ExitCode {
    println!("calc-redirect v{}", env!("CARGO_PKG_VERSION"));
    println!("Search terms: {}", target.phrase());
    println!("Search URL:   {}", target.url());

    if open {
        if let Err(e) = SystemBrowser::new().open(target.url()) {
            eprintln!("Failed to open browser: {e:#}");
            return ExitCode::FAILURE;
        }
        println!("Opened in the default browser");
    }
    ExitCode::SUCCESS
}
