/*!
 * Export tests
 * JSON and CSV files written from a finished simulation
 */

use burst_scheduler::{
    export::{read_csv, read_json},
    Algorithm, EventKind, ExportError, Pid, Scheduler, SchedulerConfig, Workload,
};
use pretty_assertions::assert_eq;
use std::collections::BTreeSet;

fn finished_scheduler() -> Scheduler {
    let workload = Workload::from_json(
        r#"{
            "config": { "num_cpus": 1, "num_io_devices": 1, "algorithm": "rr" },
            "processes": [
                { "pid": 1, "quantum": 2, "bursts": [ { "cpu": 3 }, { "io": 2 }, { "cpu": 1 } ] },
                { "pid": 2, "arrival_time": 1, "priority": 1, "bursts": [ { "cpu": 2 } ] },
                { "pid": 3, "arrival_time": 2, "bursts": [ { "io": 1 }, { "cpu": 2 } ] }
            ]
        }"#,
    )
    .unwrap();
    let mut scheduler = Scheduler::from_workload(workload).unwrap();
    scheduler.run().unwrap();
    scheduler
}

#[test]
fn test_json_then_csv_preserve_event_tuples() {
    let scheduler = finished_scheduler();
    let dir = tempfile::tempdir().unwrap();
    let json_path = dir.path().join("timeline.json");
    let csv_path = dir.path().join("timeline.csv");

    scheduler.export_json(&json_path).unwrap();
    scheduler.export_csv(&csv_path).unwrap();

    let from_json: BTreeSet<(u64, String, Option<Pid>)> = read_json(&json_path)
        .unwrap()
        .into_iter()
        .map(|event| (event.time, event.event_type.to_string(), event.process))
        .collect();
    let from_csv: BTreeSet<(u64, String, Option<Pid>)> = read_csv(&csv_path)
        .unwrap()
        .into_iter()
        .map(|record| (record.time, record.event_type.to_string(), record.process))
        .collect();

    assert_eq!(from_json, from_csv);
    assert_eq!(read_json(&json_path).unwrap(), scheduler.events());
    assert_eq!(read_csv(&csv_path).unwrap().len(), scheduler.events().len());
}

#[test]
fn test_exported_json_is_pretty_array_of_records() {
    let scheduler = finished_scheduler();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("timeline.json");
    scheduler.export_json(&path).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with("[\n"));

    let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
    let first = &value.as_array().unwrap()[0];
    for key in [
        "time", "event", "event_type", "process", "device", "ready_queue", "wait_queue", "cpus",
        "ios",
    ] {
        assert!(first.get(key).is_some(), "missing {key}");
    }
}

#[test]
fn test_exports_overwrite_existing_files() {
    let scheduler = finished_scheduler();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("timeline.csv");
    std::fs::write(&path, "stale contents that should disappear\n".repeat(500)).unwrap();

    scheduler.export_csv(&path).unwrap();
    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(!contents.contains("stale"));
    assert!(contents.starts_with("time,event,event_type"));
}

#[test]
fn test_export_failure_leaves_simulation_intact() {
    let scheduler = finished_scheduler();
    let events_before = scheduler.events().to_vec();
    let dir = tempfile::tempdir().unwrap();
    let unwritable = dir.path().join("no-such-dir").join("timeline.json");

    assert!(matches!(
        scheduler.export_json(&unwritable),
        Err(ExportError::Io { .. })
    ));
    assert_eq!(scheduler.events(), &events_before[..]);
}

#[test]
fn test_workload_process_starting_with_io_is_routed_to_wait_queue() {
    let scheduler = finished_scheduler();
    let arrival = scheduler
        .events()
        .iter()
        .find(|event| event.event_type == EventKind::Arrival && event.process == Some(3))
        .unwrap();

    assert_eq!(arrival.event, "P3 added to wait queue");
    assert_eq!(scheduler.finished().len(), 3);
}

#[test]
fn test_unknown_algorithm_in_workload_falls_back_to_fcfs() {
    let workload = Workload::from_json(
        r#"{
            "config": { "algorithm": "lottery" },
            "processes": [ { "pid": 1, "bursts": [ { "cpu": 1 } ] } ]
        }"#,
    )
    .unwrap();
    assert_eq!(workload.config.algorithm, Algorithm::Fcfs);

    let scheduler = Scheduler::new(SchedulerConfig::default());
    assert_eq!(scheduler.algorithm(), Algorithm::Fcfs);
    assert_eq!(scheduler.policy_name(), "First Come First Served");
}
