use super::process::{Pid, Process};
use serde::Serialize;

/// Per-process timing for a finished process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessStats {
    pub pid: Pid,
    pub arrival: u64,
    pub finish: u64,
    pub turnaround: u64,
    /// Ticks spent queued rather than running or doing I/O.
    pub waiting: u64,
    pub response: u64,
    pub cpu_time: u64,
    pub io_time: u64,
}

impl ProcessStats {
    /// `None` until the process has finished.
    pub fn from_process(process: &Process) -> Option<Self> {
        let finish = process.finish_time()?;
        let arrival = process.arrival_time();
        let turnaround = finish.saturating_sub(arrival);
        let first_dispatch = process.first_dispatch().unwrap_or(arrival);

        Some(Self {
            pid: process.pid(),
            arrival,
            finish,
            turnaround,
            waiting: turnaround.saturating_sub(process.cpu_time() + process.io_time()),
            response: first_dispatch.saturating_sub(arrival),
            cpu_time: process.cpu_time(),
            io_time: process.io_time(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub processes: usize,
    pub makespan: u64,
    pub avg_turnaround: f64,
    pub avg_waiting: f64,
    pub avg_response: f64,
}

impl Summary {
    pub fn from_stats(stats: &[ProcessStats], makespan: u64) -> Self {
        if stats.is_empty() {
            return Self {
                makespan,
                ..Self::default()
            };
        }

        let count = stats.len() as f64;
        let average = |field: fn(&ProcessStats) -> u64| {
            stats.iter().map(field).sum::<u64>() as f64 / count
        };
        Self {
            processes: stats.len(),
            makespan,
            avg_turnaround: average(|s| s.turnaround),
            avg_waiting: average(|s| s.waiting),
            avg_response: average(|s| s.response),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(pid: Pid, turnaround: u64, waiting: u64) -> ProcessStats {
        ProcessStats {
            pid,
            arrival: 0,
            finish: turnaround,
            turnaround,
            waiting,
            response: waiting,
            cpu_time: turnaround - waiting,
            io_time: 0,
        }
    }

    #[test]
    fn test_summary_averages() {
        let summary = Summary::from_stats(&[stats(1, 5, 0), stats(2, 8, 5)], 8);
        assert_eq!(summary.processes, 2);
        assert_eq!(summary.makespan, 8);
        assert_eq!(summary.avg_turnaround, 6.5);
        assert_eq!(summary.avg_waiting, 2.5);
    }

    #[test]
    fn test_empty_summary() {
        let summary = Summary::from_stats(&[], 0);
        assert_eq!(summary.processes, 0);
        assert_eq!(summary.avg_turnaround, 0.0);
    }

    #[test]
    fn test_unfinished_process_has_no_stats() {
        let process = Process::new(1, vec![crate::scheduler::Burst::Cpu(1)]);
        assert!(ProcessStats::from_process(&process).is_none());
    }
}
