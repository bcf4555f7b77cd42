use std::collections::HashSet;

/// Process identifiers the watcher has already acted on.
///
/// An identifier stays tracked until pruning proves the OS no longer has a
/// live process under it. Identifiers are reused by the OS, so staleness is
/// always checked against a fresh snapshot and never assumed.
#[derive(Debug, Default)]
pub struct Tracker {
    pids: HashSet<u32>,
}

impl Tracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, pid: u32) -> bool {
        self.pids.contains(&pid)
    }

    /// Returns false if `pid` was already tracked.
    pub fn insert(&mut self, pid: u32) -> bool {
        self.pids.insert(pid)
    }

    pub fn len(&self) -> usize {
        self.pids.len()
    }

    /// True once the store has grown past `threshold` entries.
    pub fn exceeds(&self, threshold: usize) -> bool {
        self.pids.len() > threshold
    }

    /// Keeps only identifiers present in `live`. Returns how many were dropped.
    pub fn retain_live(&mut self, live: &HashSet<u32>) -> usize {
        let before = self.pids.len();
        self.pids.retain(|pid| live.contains(pid));
        before - self.pids.len()
    }
}
