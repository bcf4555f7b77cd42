use std::time::Duration;
use tracing::{debug, error, info};

use crate::process_table::{ProcessEntry, ProcessError, ProcessTable, WaitOutcome};

/// Stops `target`: graceful request first, forced kill if it has not exited
/// after `timeout`. Returns true once the process is gone.
///
/// Never fails outward; every error is logged and turned into `false`.
pub fn terminate_safely<T: ProcessTable + ?Sized>(
    table: &mut T,
    target: &ProcessEntry,
    timeout: Duration,
) -> bool {
    let ProcessEntry { pid, name } = target;
    let pid = *pid;

    match table.terminate(pid) {
        Ok(()) => {}
        Err(e @ (ProcessError::NotFound(_) | ProcessError::Zombie(_))) => {
            debug!("Calculator process {name} (PID: {pid}) vanished before termination: {e}");
            return false;
        }
        Err(e) => {
            error!("Error terminating process {name} (PID: {pid}): {e}");
            return false;
        }
    }

    match table.wait(pid, timeout) {
        Ok(WaitOutcome::Exited) | Err(ProcessError::NotFound(_)) => {
            info!("Successfully terminated calculator process: {name} (PID: {pid})");
            true
        }
        Ok(WaitOutcome::TimedOut) => {
            info!(
                "Calculator process {name} (PID: {pid}) still running after {:.1}s, force killing",
                timeout.as_secs_f64()
            );
            force_kill(table, target)
        }
        Err(e) => {
            error!("Error waiting for process {name} (PID: {pid}): {e}");
            false
        }
    }
}

fn force_kill<T: ProcessTable + ?Sized>(table: &mut T, target: &ProcessEntry) -> bool {
    let ProcessEntry { pid, name } = target;
    match table.force_kill(*pid) {
        Ok(()) => {
            info!("Force killed calculator process: {name} (PID: {pid})");
            true
        }
        Err(e) => {
            error!("Failed to kill process {name} (PID: {pid}): {e}");
            false
        }
    }
}
