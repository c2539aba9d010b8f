// vehicles.rs
use crate::domain::VehicleRow;
use crate::errors::PipelineError;
use std::io::Read;
use std::path::Path;

pub fn load_vehicles(path: &Path) -> Result<Vec<VehicleRow>, PipelineError> {
    let file = std::fs::File::open(path).map_err(|e| {
        PipelineError::Config(format!("cannot open vehicle list {}: {e}", path.display()))
    })?;
    read_vehicles(file)
}

pub fn read_vehicles<R: Read>(reader: R) -> Result<Vec<VehicleRow>, PipelineError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let rows = reader
        .deserialize::<VehicleRow>()
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}
