use super::process::{Pid, Process};
use std::collections::VecDeque;

/// Ready processes kept in ascending key order. Equal keys keep the order in
/// which they were queued.
#[derive(Debug, Default)]
pub struct ReadyQueue {
    processes: VecDeque<Process>,
}

impl ReadyQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Process> {
        self.processes.iter()
    }

    pub fn pids(&self) -> Vec<Pid> {
        self.processes.iter().map(Process::pid).collect()
    }

    /// Inserts behind every process whose key is less than or equal to the
    /// new one.
    pub fn insert_by_key<K, F>(&mut self, process: Process, key: F)
    where
        K: Ord,
        F: Fn(&Process) -> K,
    {
        let new_key = key(&process);
        let index = self.processes.partition_point(|queued| key(queued) <= new_key);
        self.processes.insert(index, process);
    }

    /// Removes the first process holding the smallest key.
    pub fn remove_min_by_key<K, F>(&mut self, key: F) -> Option<Process>
    where
        K: Ord,
        F: Fn(&Process) -> K,
    {
        let index = self.position_min_by_key(key)?;
        self.processes.remove(index)
    }

    pub fn peek_min_by_key<K, F>(&self, key: F) -> Option<&Process>
    where
        K: Ord,
        F: Fn(&Process) -> K,
    {
        let index = self.position_min_by_key(key)?;
        self.processes.get(index)
    }

    fn position_min_by_key<K, F>(&self, key: F) -> Option<usize>
    where
        K: Ord,
        F: Fn(&Process) -> K,
    {
        self.processes
            .iter()
            .enumerate()
            .min_by_key(|(_, process)| key(process))
            .map(|(index, _)| index)
    }
}
