// output.rs
use crate::domain::{Snapshot, VehiclePayload};
use crate::errors::PipelineError;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

pub const SNAPSHOT_FILE: &str = "snapshot.json";

/// `out_<year>_<name>.json`, with spaces and slashes made filename-safe.
pub fn vehicle_file_name(payload: &VehiclePayload) -> String {
    let safe_name = payload
        .identity
        .display_name
        .replace(' ', "_")
        .replace('/', "-");
    format!("out_{}_{}.json", payload.identity.year, safe_name)
}

pub fn write_vehicle_payload(dir: &Path, payload: &VehiclePayload) -> Result<PathBuf, PipelineError> {
    let path = dir.join(vehicle_file_name(payload));
    write_json(&path, payload)?;
    Ok(path)
}

pub fn write_snapshot(dir: &Path, snapshot: &Snapshot) -> Result<PathBuf, PipelineError> {
    let path = dir.join(SNAPSHOT_FILE);
    write_json(&path, snapshot)?;
    Ok(path)
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), PipelineError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, value)?;
    Ok(())
}
