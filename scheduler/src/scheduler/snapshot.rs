use super::process::Pid;
use serde::{Deserialize, Serialize};

/// Read-only view of every queue and resource at one instant. This is all a
/// front-end gets to see.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub clock: u64,
    pub ready: Vec<Pid>,
    pub wait: Vec<Pid>,
    pub cpu: Vec<Option<Pid>>,
    pub io: Vec<Option<Pid>>,
    pub finished: Vec<Pid>,
}

impl Snapshot {
    pub fn is_idle(&self) -> bool {
        self.ready.is_empty()
            && self.wait.is_empty()
            && self.cpu.iter().all(Option::is_none)
            && self.io.iter().all(Option::is_none)
    }
}
