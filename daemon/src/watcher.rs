use std::collections::HashSet;
use std::future::Future;
use tracing::{debug, error, info};

use crate::browser::Browser;
use crate::config::WatcherConfig;
use crate::matcher::{is_target_process, KNOWN_PROCESS_NAMES};
use crate::process_table::{ProcessEntry, ProcessError, ProcessTable};
use crate::search::SearchTarget;
use crate::terminator::terminate_safely;
use crate::tracker::Tracker;

/// Lifecycle of [`ProcessWatcher::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Stopping,
    Stopped,
}

/// Polls the OS process list, kills calculators and opens the search page
/// after each successful kill.
///
/// Owns all mutable state of the program: the tracking store, the run state
/// and the two OS collaborators.
pub struct ProcessWatcher<T, B> {
    table: T,
    browser: B,
    target: SearchTarget,
    config: WatcherConfig,
    tracker: Tracker,
    state: RunState,
    interceptions: u64,
    notifications: u64,
}

impl<T: ProcessTable, B: Browser> ProcessWatcher<T, B> {
    pub fn new(table: T, browser: B, target: SearchTarget, config: WatcherConfig) -> Self {
        Self {
            table,
            browser,
            target,
            config,
            tracker: Tracker::new(),
            state: RunState::Running,
            interceptions: 0,
            notifications: 0,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    /// Number of calculator processes successfully terminated so far.
    pub fn interceptions(&self) -> u64 {
        self.interceptions
    }

    /// Number of search pages successfully handed to the browser.
    pub fn notifications(&self) -> u64 {
        self.notifications
    }

    /// Runs scan/prune/sleep cycles until `shutdown` resolves.
    ///
    /// `shutdown` is only raced against the sleep, so a stop request never
    /// interrupts a scan or a termination in progress. A failed prune is the
    /// one unrecoverable error: it is logged and returned.
    pub async fn run<S: Future<Output = ()>>(&mut self, shutdown: S) -> anyhow::Result<()> {
        tokio::pin!(shutdown);

        info!("Calculator interceptor started");
        info!(
            "Monitoring for calculator processes: {}",
            KNOWN_PROCESS_NAMES.join(", ")
        );
        info!("Will redirect to: {}", self.target.url());
        info!("Press Ctrl+C to stop");

        self.state = RunState::Running;
        while self.state == RunState::Running {
            if let Err(e) = self.tick() {
                error!("Unexpected error in main loop: {e}");
                self.state = RunState::Stopped;
                return Err(e.into());
            }

            tokio::select! {
                _ = tokio::time::sleep(self.config.scan_interval) => {}
                _ = &mut shutdown => {
                    info!("Stopping calculator interceptor...");
                    self.state = RunState::Stopping;
                }
            }
        }

        self.state = RunState::Stopped;
        info!(
            "Calculator interceptor stopped after {} interception(s), {} search page(s) opened",
            self.interceptions, self.notifications
        );
        Ok(())
    }

    /// One loop body: scan, then prune if the tracking store has grown too large.
    fn tick(&mut self) -> Result<(), ProcessError> {
        self.scan();
        self.browser.reap_finished();
        if self.tracker.exceeds(self.config.prune_threshold) {
            self.prune()?;
        }
        Ok(())
    }

    /// Enumerates processes and acts on every calculator not yet handled.
    /// Enumeration failures are logged and skip this round.
    pub fn scan(&mut self) {
        let processes = match self.table.list_processes() {
            Ok(p) => p,
            Err(e) => {
                error!("Error during process scan: {e}");
                return;
            }
        };

        for entry in processes {
            if self.tracker.contains(entry.pid) || !is_target_process(&entry.name) {
                continue;
            }
            self.intercept(&entry);
        }
    }

    /// Handles a newly detected calculator. The pid is tracked before anything
    /// is attempted, so each identifier gets at most one termination attempt.
    fn intercept(&mut self, entry: &ProcessEntry) {
        info!(
            "Detected calculator process: {} (PID: {})",
            entry.name, entry.pid
        );
        self.tracker.insert(entry.pid);

        if terminate_safely(&mut self.table, entry, self.config.termination_timeout) {
            self.interceptions += 1;
            self.notify();
        }
    }

    /// Opens the search page. Failures are logged and otherwise ignored.
    pub fn notify(&mut self) {
        match self.browser.open(self.target.url()) {
            Ok(()) => {
                self.notifications += 1;
                info!("Opened search for: {}", self.target.phrase());
            }
            Err(e) => error!("Failed to open browser: {e:#}"),
        }
    }

    /// Forgets tracked pids that no longer name a live process.
    pub fn prune(&mut self) -> Result<(), ProcessError> {
        let live: HashSet<u32> = self
            .table
            .list_processes()?
            .into_iter()
            .map(|p| p.pid)
            .collect();
        let dropped = self.tracker.retain_live(&live);
        debug!(
            "Pruned {dropped} stale PID(s), {} still tracked",
            self.tracker.len()
        );
        Ok(())
    }
}
