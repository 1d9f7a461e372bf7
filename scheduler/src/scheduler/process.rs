use super::{error::SchedulerError, DEFAULT_PRIORITY, DEFAULT_QUANTUM};
use serde::{Deserialize, Serialize};
use std::fmt;

pub type Pid = u32;

/// A contiguous unit of CPU or I/O demand, measured in ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Burst {
    Cpu(u64),
    Io(u64),
}

impl Burst {
    pub fn duration(&self) -> u64 {
        match *self {
            Burst::Cpu(ticks) | Burst::Io(ticks) => ticks,
        }
    }

    pub fn is_cpu(&self) -> bool {
        matches!(self, Burst::Cpu(_))
    }

    pub fn is_io(&self) -> bool {
        matches!(self, Burst::Io(_))
    }

    fn with_duration(&self, ticks: u64) -> Burst {
        match self {
            Burst::Cpu(_) => Burst::Cpu(ticks),
            Burst::Io(_) => Burst::Io(ticks),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    Unarrived,
    Ready,
    Running,
    Waiting,
    Finished,
}

impl ProcessState {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unarrived => "unarrived",
            Self::Ready => "ready",
            Self::Running => "running",
            Self::Waiting => "waiting",
            Self::Finished => "finished",
        }
    }
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A simulated process: a fixed sequence of bursts plus scheduling bookkeeping.
#[derive(Debug, Clone)]
pub struct Process {
    pid: Pid,
    arrival_time: u64,
    priority: i32,
    quantum: u64,
    remaining_quantum: u64,
    bursts: Vec<Burst>,
    cursor: usize,
    // Ticks left in `bursts[cursor]`
    burst_left: u64,
    state: ProcessState,
    first_dispatch: Option<u64>,
    finish_time: Option<u64>,
    cpu_time: u64,
    io_time: u64,
}

impl Process {
    pub fn new(pid: Pid, bursts: Vec<Burst>) -> Self {
        Process::arriving(pid, 0, bursts)
    }

    pub fn arriving(pid: Pid, arrival_time: u64, bursts: Vec<Burst>) -> Self {
        Process::with_params(pid, arrival_time, DEFAULT_PRIORITY, DEFAULT_QUANTUM, bursts)
    }

    pub fn with_params(
        pid: Pid,
        arrival_time: u64,
        priority: i32,
        quantum: u64,
        bursts: Vec<Burst>,
    ) -> Self {
        let burst_left = bursts.first().map(Burst::duration).unwrap_or(0);
        Self {
            pid,
            arrival_time,
            priority,
            quantum,
            remaining_quantum: quantum,
            bursts,
            cursor: 0,
            burst_left,
            state: ProcessState::Unarrived,
            first_dispatch: None,
            finish_time: None,
            cpu_time: 0,
            io_time: 0,
        }
    }

    pub fn pid(&self) -> Pid {
        self.pid
    }

    pub fn arrival_time(&self) -> u64 {
        self.arrival_time
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn quantum(&self) -> u64 {
        self.quantum
    }

    pub fn remaining_quantum(&self) -> u64 {
        self.remaining_quantum
    }

    pub fn state(&self) -> ProcessState {
        self.state
    }

    pub fn bursts(&self) -> &[Burst] {
        &self.bursts
    }

    pub fn burst_cursor(&self) -> usize {
        self.cursor
    }

    pub fn first_dispatch(&self) -> Option<u64> {
        self.first_dispatch
    }

    pub fn finish_time(&self) -> Option<u64> {
        self.finish_time
    }

    /// CPU ticks actually executed so far.
    pub fn cpu_time(&self) -> u64 {
        self.cpu_time
    }

    /// I/O ticks actually executed so far.
    pub fn io_time(&self) -> u64 {
        self.io_time
    }

    /// The active burst with its remaining duration, or `None` once every
    /// burst has completed.
    pub fn current_burst(&self) -> Option<Burst> {
        self.bursts
            .get(self.cursor)
            .map(|burst| burst.with_duration(self.burst_left))
    }

    /// Remaining ticks of the next CPU burst, counting the active one.
    pub fn next_cpu_burst(&self) -> Option<u64> {
        match self.current_burst() {
            Some(Burst::Cpu(ticks)) => Some(ticks),
            _ => self
                .bursts
                .iter()
                .skip(self.cursor + 1)
                .find(|burst| burst.is_cpu())
                .map(Burst::duration),
        }
    }

    /// Remaining ticks across the active burst and every burst after it.
    pub fn remaining_burst_time(&self) -> u64 {
        if self.cursor >= self.bursts.len() {
            return 0;
        }
        self.burst_left
            + self.bursts[self.cursor + 1..]
                .iter()
                .map(Burst::duration)
                .sum::<u64>()
    }

    pub fn total_burst_time(&self) -> u64 {
        self.bursts.iter().map(Burst::duration).sum()
    }

    pub(super) fn validate(&self) -> Result<(), SchedulerError> {
        let reason = if self.bursts.is_empty() {
            "process has no bursts"
        } else if self.bursts.iter().any(|burst| burst.duration() == 0) {
            "burst durations must be at least one tick"
        } else if self.quantum == 0 {
            "quantum must be at least one tick"
        } else {
            return Ok(());
        };

        Err(SchedulerError::InvalidProcess {
            pid: self.pid,
            reason: reason.to_owned(),
        })
    }

    pub(super) fn set_state(&mut self, state: ProcessState) {
        self.state = state;
    }

    pub(super) fn mark_dispatched(&mut self, now: u64) {
        self.remaining_quantum = self.quantum;
        self.first_dispatch.get_or_insert(now);
    }

    pub(super) fn mark_finished(&mut self, now: u64) {
        self.state = ProcessState::Finished;
        self.finish_time = Some(now);
    }

    pub(super) fn reset_quantum(&mut self) {
        self.remaining_quantum = self.quantum;
    }

    /// Uses up one tick of the time slice and returns what is left of it.
    pub(super) fn consume_quantum(&mut self) -> u64 {
        self.remaining_quantum = self.remaining_quantum.saturating_sub(1);
        self.remaining_quantum
    }

    /// Runs the active burst for one tick. Returns true when that burst
    /// completed and the cursor moved past it.
    pub(super) fn run_tick(&mut self) -> bool {
        let Some(burst) = self.bursts.get(self.cursor) else {
            return false;
        };
        match burst {
            Burst::Cpu(_) => self.cpu_time += 1,
            Burst::Io(_) => self.io_time += 1,
        }

        self.burst_left = self.burst_left.saturating_sub(1);
        if self.burst_left > 0 {
            return false;
        }

        self.cursor += 1;
        self.burst_left = self.bursts.get(self.cursor).map(Burst::duration).unwrap_or(0);
        true
    }
}
