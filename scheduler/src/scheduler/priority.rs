use super::{Policy, Process};

/// Lowest priority number runs first. When `preemptive`, a ready process with
/// a strictly lower number displaces the running one.
#[derive(Debug, Default, Clone, Copy)]
pub struct PriorityPolicy {
    preemptive: bool,
}

impl PriorityPolicy {
    pub fn new() -> Self {
        Self { preemptive: false }
    }

    pub fn with_preemption() -> Self {
        Self { preemptive: true }
    }
}

impl Policy for PriorityPolicy {
    fn name(&self) -> &'static str {
        if self.preemptive {
            "Preemptive Priority"
        } else {
            "Priority"
        }
    }

    fn key(&self, process: &Process) -> i64 {
        i64::from(process.priority())
    }

    fn preemptive(&self) -> bool {
        self.preemptive
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{Burst, ReadyQueue};

    fn with_priority(pid: u32, priority: i32) -> Process {
        Process::with_params(pid, 0, priority, 4, vec![Burst::Cpu(2)])
    }

    #[test]
    fn test_priority_selects_lowest_number_first() {
        let policy = PriorityPolicy::new();
        let mut ready = ReadyQueue::new();
        for (pid, priority) in [(1, 3), (2, -1), (3, 3), (4, 1)] {
            policy.reinsert(&mut ready, with_priority(pid, priority));
        }

        assert_eq!(ready.pids(), vec![2, 4, 1, 3]);
        assert_eq!(policy.select(&mut ready).map(|p| p.pid()), Some(2));
        assert!(!policy.preempts(&with_priority(9, 5), &with_priority(10, 0)));
    }

    #[test]
    fn test_preemptive_priority_requires_strictly_lower_number() {
        let policy = PriorityPolicy::with_preemption();
        let running = with_priority(1, 2);

        assert!(policy.preempts(&running, &with_priority(2, 1)));
        assert!(!policy.preempts(&running, &with_priority(3, 2)));
        assert_eq!(policy.name(), "Preemptive Priority");
    }
}
