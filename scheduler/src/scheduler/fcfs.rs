use super::{Policy, Process};

/// Runs processes in the order they became ready, each to the end of its burst.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstComeFirstServed;

impl Policy for FirstComeFirstServed {
    fn name(&self) -> &'static str {
        "First Come First Served"
    }

    fn key(&self, _process: &Process) -> i64 {
        0
    }
}
