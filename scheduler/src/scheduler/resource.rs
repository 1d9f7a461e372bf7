use super::{
    clock::Clock,
    error::SchedulerError,
    process::{Pid, Process, ProcessState},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Cpu,
    Io,
}

/// A CPU or I/O device. Holds at most one process at a time.
#[derive(Debug)]
pub struct Resource {
    kind: ResourceKind,
    id: usize,
    current: Option<Process>,
}

impl Resource {
    pub fn cpu(id: usize) -> Self {
        Self {
            kind: ResourceKind::Cpu,
            id,
            current: None,
        }
    }

    pub fn io(id: usize) -> Self {
        Self {
            kind: ResourceKind::Io,
            id,
            current: None,
        }
    }

    /// Device label used in events, e.g. `CPU0` or `IO1`.
    pub fn label(&self) -> String {
        match self.kind {
            ResourceKind::Cpu => format!("CPU{}", self.id),
            ResourceKind::Io => format!("IO{}", self.id),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&Process> {
        self.current.as_ref()
    }

    pub fn current_pid(&self) -> Option<Pid> {
        self.current.as_ref().map(Process::pid)
    }

    pub(super) fn current_mut(&mut self) -> Option<&mut Process> {
        self.current.as_mut()
    }

    pub fn assign(&mut self, mut process: Process, clock: &Clock) -> Result<(), SchedulerError> {
        if let Some(running) = &self.current {
            return Err(SchedulerError::ResourceBusy {
                device: self.label(),
                running: running.pid(),
                rejected: process.pid(),
            });
        }

        match self.kind {
            ResourceKind::Cpu => {
                process.set_state(ProcessState::Running);
                process.mark_dispatched(clock.now());
            }
            ResourceKind::Io => process.set_state(ProcessState::Waiting),
        }
        self.current = Some(process);
        Ok(())
    }

    /// Advances the held process by one tick. Hands the process back once its
    /// active burst completes, leaving the resource idle.
    pub fn tick(&mut self) -> Option<Process> {
        let completed = self.current.as_mut()?.run_tick();
        if completed {
            self.current.take()
        } else {
            None
        }
    }

    /// Removes the held process without completing its burst.
    pub(super) fn preempt(&mut self) -> Option<Process> {
        self.current.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::process::Burst;

    #[test]
    fn test_assign_marks_running_and_rejects_second_process() {
        let clock = Clock::new();
        let mut cpu = Resource::cpu(0);
        assert!(!cpu.is_busy());

        cpu.assign(Process::new(1, vec![Burst::Cpu(2)]), &clock)
            .unwrap();
        assert!(cpu.is_busy());
        assert_eq!(cpu.current().map(Process::state), Some(ProcessState::Running));

        let err = cpu
            .assign(Process::new(2, vec![Burst::Cpu(1)]), &clock)
            .unwrap_err();
        assert_eq!(
            err,
            SchedulerError::ResourceBusy {
                device: "CPU0".to_owned(),
                running: 1,
                rejected: 2,
            }
        );
    }

    #[test]
    fn test_tick_returns_process_when_burst_completes() {
        let clock = Clock::new();
        let mut device = Resource::io(3);
        assert!(device.tick().is_none());

        device
            .assign(Process::new(4, vec![Burst::Io(2), Burst::Cpu(1)]), &clock)
            .unwrap();
        assert_eq!(device.current().map(Process::state), Some(ProcessState::Waiting));
        assert!(device.tick().is_none());

        let done = device.tick().unwrap();
        assert_eq!(done.pid(), 4);
        assert_eq!(done.current_burst(), Some(Burst::Cpu(1)));
        assert!(!device.is_busy());
        assert_eq!(device.label(), "IO3");
    }
}
