use super::{
    algorithm::Algorithm,
    error::ConfigError,
    process::{Burst, Pid, Process},
    DEFAULT_PRIORITY, DEFAULT_QUANTUM,
};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub num_cpus: usize,
    pub num_io_devices: usize,
    /// Log every event at `info` instead of `debug`.
    pub verbose: bool,
    pub algorithm: Algorithm,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            num_cpus: 1,
            num_io_devices: 1,
            verbose: false,
            algorithm: Algorithm::Fcfs,
        }
    }
}

impl SchedulerConfig {
    pub fn with_algorithm(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            ..Self::default()
        }
    }
}

/// Caller-side description of a process, as found in workload files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSpec {
    pub pid: Pid,
    #[serde(default)]
    pub arrival_time: u64,
    #[serde(default = "default_priority")]
    pub priority: i32,
    #[serde(default = "default_quantum")]
    pub quantum: u64,
    pub bursts: Vec<Burst>,
}

fn default_priority() -> i32 {
    DEFAULT_PRIORITY
}

fn default_quantum() -> u64 {
    DEFAULT_QUANTUM
}

impl From<ProcessSpec> for Process {
    fn from(spec: ProcessSpec) -> Self {
        Process::with_params(
            spec.pid,
            spec.arrival_time,
            spec.priority,
            spec.quantum,
            spec.bursts,
        )
    }
}

/// A scheduler configuration plus the processes to feed it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workload {
    #[serde(default)]
    pub config: SchedulerConfig,
    pub processes: Vec<ProcessSpec>,
}

impl Workload {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_workload_defaults() {
        let workload = Workload::from_json(
            r#"{ "processes": [ { "pid": 1, "bursts": [ { "cpu": 3 }, { "io": 2 } ] } ] }"#,
        )
        .unwrap();

        assert_eq!(workload.config, SchedulerConfig::default());
        assert_eq!(
            workload.processes,
            vec![ProcessSpec {
                pid: 1,
                arrival_time: 0,
                priority: DEFAULT_PRIORITY,
                quantum: DEFAULT_QUANTUM,
                bursts: vec![Burst::Cpu(3), Burst::Io(2)],
            }]
        );
    }

    #[test]
    fn test_workload_config_overrides() {
        let workload = Workload::from_json(
            r#"{
                "config": { "num_cpus": 2, "algorithm": "round_robin" },
                "processes": []
            }"#,
        )
        .unwrap();

        assert_eq!(workload.config.num_cpus, 2);
        assert_eq!(workload.config.num_io_devices, 1);
        assert_eq!(workload.config.algorithm, Algorithm::RoundRobin);
    }

    #[test]
    fn test_malformed_workload_is_reported() {
        assert!(matches!(
            Workload::from_json(r#"{ "processes": [ { "pid": "x" } ] }"#),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            Workload::from_file("/nonexistent/workload.json"),
            Err(ConfigError::Read { .. })
        ));
    }
}
