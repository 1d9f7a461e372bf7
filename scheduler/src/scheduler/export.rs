use super::{
    error::ExportError,
    event::{Event, EventKind},
    process::Pid,
};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

/// Flat form of an [`Event`] for CSV. List columns hold JSON arrays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvRecord {
    pub time: u64,
    pub event: String,
    pub event_type: EventKind,
    pub process: Option<Pid>,
    pub device: Option<String>,
    pub ready_queue: String,
    pub wait_queue: String,
    pub cpus: String,
    pub ios: String,
}

impl CsvRecord {
    fn from_event(event: &Event) -> Result<Self, ExportError> {
        Ok(Self {
            time: event.time,
            event: event.event.clone(),
            event_type: event.event_type,
            process: event.process,
            device: event.device.clone(),
            ready_queue: serde_json::to_string(&event.ready_queue)?,
            wait_queue: serde_json::to_string(&event.wait_queue)?,
            cpus: serde_json::to_string(&event.cpus)?,
            ios: serde_json::to_string(&event.ios)?,
        })
    }
}

fn create(path: &Path) -> Result<BufWriter<File>, ExportError> {
    let file = File::create(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufWriter::new(file))
}

/// Writes the events as a pretty-printed JSON array, replacing `path`.
pub fn write_json(events: &[Event], path: &Path) -> Result<(), ExportError> {
    let mut writer = create(path)?;
    serde_json::to_writer_pretty(&mut writer, events)?;
    writer.flush().map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes one header row and one row per event, replacing `path`. An empty
/// log leaves an empty file.
pub fn write_csv(events: &[Event], path: &Path) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_writer(create(path)?);
    for event in events {
        writer.serialize(CsvRecord::from_event(event)?)?;
    }
    writer.flush().map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn read_json(path: &Path) -> Result<Vec<Event>, ExportError> {
    let file = File::open(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

pub fn read_csv(path: &Path) -> Result<Vec<CsvRecord>, ExportError> {
    let mut reader = csv::Reader::from_path(path)?;
    let records = reader.deserialize().collect::<Result<Vec<CsvRecord>, _>>()?;
    Ok(records)
}
