use std::time::{Duration, Instant};
use sysinfo::{Pid, Process, ProcessStatus, ProcessesToUpdate, Signal, System};
use thiserror::Error;

/// How often [`SysinfoProcessTable::wait`] re-checks a process it is waiting on.
const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// One row of the OS process table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessEntry {
    pub pid: u32,
    pub name: String,
}

impl ProcessEntry {
    pub fn new(pid: u32, name: impl Into<String>) -> Self {
        Self {
            pid,
            name: name.into(),
        }
    }
}

/// Outcome of waiting on a process for a bounded time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    Exited,
    TimedOut,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProcessError {
    #[error("process {0} not found")]
    NotFound(u32),
    #[error("access denied to process {0}")]
    AccessDenied(u32),
    #[error("process {0} is a zombie")]
    Zombie(u32),
    #[error("failed to enumerate processes: {0}")]
    Enumeration(String),
}

/// The operating system's process table, as far as the watcher needs it.
pub trait ProcessTable {
    fn list_processes(&mut self) -> Result<Vec<ProcessEntry>, ProcessError>;
    /// Requests a graceful stop. The process may ignore or delay it.
    fn terminate(&mut self, pid: u32) -> Result<(), ProcessError>;
    /// Stops the process unconditionally.
    fn force_kill(&mut self, pid: u32) -> Result<(), ProcessError>;
    /// Blocks until `pid` has exited or `timeout` has elapsed.
    fn wait(&mut self, pid: u32, timeout: Duration) -> Result<WaitOutcome, ProcessError>;
}

/// [`ProcessTable`] backed by `sysinfo`.
pub struct SysinfoProcessTable {
    sys: System,
}

impl SysinfoProcessTable {
    pub fn new() -> Self {
        Self { sys: System::new() }
    }

    /// Refreshes a single pid and returns it if it is still a live process.
    fn live_process(&mut self, pid: u32) -> Result<&Process, ProcessError> {
        let sys_pid = Pid::from_u32(pid);
        self.sys
            .refresh_processes(ProcessesToUpdate::Some(&[sys_pid]), true);
        match self.sys.process(sys_pid) {
            None => Err(ProcessError::NotFound(pid)),
            Some(p) if p.status() == ProcessStatus::Zombie => Err(ProcessError::Zombie(pid)),
            Some(p) => Ok(p),
        }
    }
}

impl Default for SysinfoProcessTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessTable for SysinfoProcessTable {
    fn list_processes(&mut self) -> Result<Vec<ProcessEntry>, ProcessError> {
        self.sys.refresh_processes(ProcessesToUpdate::All, true);
        let processes = self.sys.processes();
        // At minimum our own process must be visible.
        if processes.is_empty() {
            return Err(ProcessError::Enumeration(
                "process table came back empty".to_string(),
            ));
        }
        Ok(processes
            .iter()
            .map(|(pid, p)| ProcessEntry::new(pid.as_u32(), p.name().to_string_lossy()))
            .collect())
    }

    fn terminate(&mut self, pid: u32) -> Result<(), ProcessError> {
        let process = self.live_process(pid)?;
        // Windows has no SIGTERM equivalent; sysinfo reports it as unsupported.
        let sent = match process.kill_with(Signal::Term) {
            Some(sent) => sent,
            None => process.kill(),
        };
        if sent {
            Ok(())
        } else {
            Err(ProcessError::AccessDenied(pid))
        }
    }

    fn force_kill(&mut self, pid: u32) -> Result<(), ProcessError> {
        let process = self.live_process(pid)?;
        if process.kill() {
            Ok(())
        } else {
            Err(ProcessError::AccessDenied(pid))
        }
    }

    fn wait(&mut self, pid: u32, timeout: Duration) -> Result<WaitOutcome, ProcessError> {
        let deadline = Instant::now() + timeout;
        loop {
            match self.live_process(pid) {
                Err(ProcessError::NotFound(_) | ProcessError::Zombie(_)) => {
                    return Ok(WaitOutcome::Exited)
                }
                Err(e) => return Err(e),
                Ok(_) => {}
            }
            let now = Instant::now();
            if now >= deadline {
                return Ok(WaitOutcome::TimedOut);
            }
            std::thread::sleep(WAIT_POLL_INTERVAL.min(deadline - now));
        }
    }
}
