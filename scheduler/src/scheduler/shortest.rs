use super::{Policy, Process};

/// Non-preemptive shortest job first, keyed on the next CPU burst.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShortestJobFirst;

impl Policy for ShortestJobFirst {
    fn name(&self) -> &'static str {
        "Shortest Job First"
    }

    fn key(&self, process: &Process) -> i64 {
        process.next_cpu_burst().unwrap_or(0) as i64
    }
}

/// Preemptive variant keyed on all remaining burst time. A ready process with
/// strictly less work left takes the CPU from the running one.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShortestRemainingTime;

impl Policy for ShortestRemainingTime {
    fn name(&self) -> &'static str {
        "Shortest Remaining Time First"
    }

    fn key(&self, process: &Process) -> i64 {
        process.remaining_burst_time() as i64
    }

    fn preemptive(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{Burst, ReadyQueue};

    #[test]
    fn test_sjf_orders_by_next_cpu_burst() {
        let policy = ShortestJobFirst;
        let mut ready = ReadyQueue::new();
        policy.reinsert(&mut ready, Process::new(1, vec![Burst::Cpu(5)]));
        policy.reinsert(
            &mut ready,
            Process::new(2, vec![Burst::Cpu(3), Burst::Io(20), Burst::Cpu(20)]),
        );
        policy.reinsert(&mut ready, Process::new(3, vec![Burst::Cpu(3)]));

        assert_eq!(ready.pids(), vec![2, 3, 1]);
        assert_eq!(policy.select(&mut ready).map(|p| p.pid()), Some(2));
        assert!(!policy.preemptive());
    }

    #[test]
    fn test_srtf_orders_by_total_remaining_work() {
        let policy = ShortestRemainingTime;
        let mut ready = ReadyQueue::new();
        policy.reinsert(
            &mut ready,
            Process::new(1, vec![Burst::Cpu(3), Burst::Io(2), Burst::Cpu(3)]),
        );
        policy.reinsert(&mut ready, Process::new(2, vec![Burst::Cpu(5)]));

        assert_eq!(ready.pids(), vec![2, 1]);
    }

    #[test]
    fn test_srtf_preempts_only_on_strictly_less_work() {
        let policy = ShortestRemainingTime;
        let running = Process::new(1, vec![Burst::Cpu(4)]);

        assert!(policy.preempts(&running, &Process::new(2, vec![Burst::Cpu(3)])));
        assert!(!policy.preempts(&running, &Process::new(3, vec![Burst::Cpu(4)])));
    }
}
