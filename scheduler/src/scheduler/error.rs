use super::process::Pid;
use std::{io, path::PathBuf};
use thiserror::Error;

/// Failures raised while driving a simulation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("{device} is busy with P{running}, cannot assign P{rejected}")]
    ResourceBusy {
        device: String,
        running: Pid,
        rejected: Pid,
    },

    #[error("invalid process P{pid}: {reason}")]
    InvalidProcess { pid: Pid, reason: String },

    #[error("process P{0} was already added")]
    DuplicatePid(Pid),

    #[error("simulation did not drain within {0} steps")]
    StepLimit(u64),
}

/// Failures while writing the event log to disk.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode events as JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to encode events as CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Failures while loading a workload description.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read workload {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed workload: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Scheduler(#[from] SchedulerError),
}
