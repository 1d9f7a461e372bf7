mod algorithm;
mod clock;
mod config;
mod display;
mod error;
mod event;
pub mod export;
mod fcfs;
mod priority;
mod process;
mod queue;
mod resource;
mod round_robin;
mod shortest;
mod simulation;
mod snapshot;
mod stats;

pub use algorithm::Algorithm;
pub use clock::Clock;
pub use config::{ProcessSpec, SchedulerConfig, Workload};
pub use display::TimelinePrinter;
pub use error::{ConfigError, ExportError, SchedulerError};
pub use event::{Event, EventKind, Observer};
pub use fcfs::FirstComeFirstServed;
pub use priority::PriorityPolicy;
pub use process::{Burst, Pid, Process, ProcessState};
pub use queue::ReadyQueue;
pub use resource::{Resource, ResourceKind};
pub use round_robin::RoundRobin;
pub use shortest::{ShortestJobFirst, ShortestRemainingTime};
pub use simulation::Scheduler;
pub use snapshot::Snapshot;
pub use stats::{ProcessStats, Summary};

const DEFAULT_PRIORITY: i32 = 0;
const DEFAULT_QUANTUM: u64 = 4;

/// Ready-queue ordering strategy. Processes are ordered by ascending `key`;
/// equal keys keep queue order.
pub trait Policy {
    fn name(&self) -> &'static str;

    fn key(&self, process: &Process) -> i64;

    /// Removes the process that should run next.
    fn select(&self, ready: &mut ReadyQueue) -> Option<Process> {
        ready.remove_min_by_key(|process| self.key(process))
    }

    fn reinsert(&self, ready: &mut ReadyQueue, process: Process) {
        ready.insert_by_key(process, |queued| self.key(queued))
    }

    /// Whether a running process loses the CPU once its quantum is spent.
    fn quantum_preemption(&self) -> bool {
        false
    }

    /// Whether a ready process with a strictly smaller key displaces the
    /// running one.
    fn preemptive(&self) -> bool {
        false
    }

    fn preempts(&self, running: &Process, candidate: &Process) -> bool {
        self.preemptive() && self.key(candidate) < self.key(running)
    }
}
