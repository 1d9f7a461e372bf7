use super::{Policy, Process};

/// FIFO ready queue; a running process gives up the CPU once its quantum is
/// spent.
#[derive(Debug, Default, Clone, Copy)]
pub struct RoundRobin;

impl Policy for RoundRobin {
    fn name(&self) -> &'static str {
        "Round Robin"
    }

    fn key(&self, _process: &Process) -> i64 {
        0
    }

    fn quantum_preemption(&self) -> bool {
        true
    }
}
