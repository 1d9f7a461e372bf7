use super::{process::Pid, snapshot::Snapshot};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Enqueue,
    Arrival,
    DispatchCpu,
    DispatchIo,
    Preempted,
    CpuToIo,
    CpuToReady,
    IoToReady,
    IoToIo,
    Finished,
}

impl EventKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Enqueue => "enqueue",
            Self::Arrival => "arrival",
            Self::DispatchCpu => "dispatch_cpu",
            Self::DispatchIo => "dispatch_io",
            Self::Preempted => "preempted",
            Self::CpuToIo => "cpu_to_io",
            Self::CpuToReady => "cpu_to_ready",
            Self::IoToReady => "io_to_ready",
            Self::IoToIo => "io_to_io",
            Self::Finished => "finished",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One durable state change, together with the queue and resource contents
/// right after it happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub time: u64,
    pub event: String,
    pub event_type: EventKind,
    pub process: Option<Pid>,
    pub device: Option<String>,
    pub ready_queue: Vec<Pid>,
    pub wait_queue: Vec<Pid>,
    pub cpus: Vec<Option<Pid>>,
    pub ios: Vec<Option<Pid>>,
}

impl Event {
    /// `time=<t> | <description>`
    pub fn timeline_entry(&self) -> String {
        format!("time={} | {}", self.time, self.event)
    }
}

/// Receives scheduler notifications synchronously, in order.
pub trait Observer {
    fn on_event(&mut self, _event: &Event) {}

    /// Called once at the end of every step, after the clock advanced.
    fn on_step(&mut self, _snapshot: &Snapshot) {}
}

impl<F> Observer for F
where
    F: FnMut(&Event),
{
    fn on_event(&mut self, event: &Event) {
        self(event)
    }
}
