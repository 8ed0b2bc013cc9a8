use std::{
    fs::{File, OpenOptions},
    path::Path,
};

use log::info;

use crate::cost_tracker::CostRecord;

pub const HEADER: [&str; 7] = [
    "time_seconds",
    "vehicle_id",
    "type",
    "fuel_or_energy_cost",
    "salary_cost",
    "repair_cost",
    "total_cost",
];

#[derive(Debug)]
pub enum ExportError {
    IoError(std::io::Error),
    CsvError(csv::Error),
}

/// Append-only CSV sink for periodic cost rows.
pub struct CostExporter {
    writer: csv::Writer<File>,
}

impl CostExporter {
    /// Opens `path` for appending. The header row is only written to new or empty files.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ExportError> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(ExportError::IoError)?;
        let is_new = file.metadata().map_err(ExportError::IoError)?.len() == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if is_new {
            writer.write_record(HEADER).map_err(ExportError::CsvError)?;
            writer.flush().map_err(ExportError::IoError)?;
        } else {
            info!("Appending costs to existing file {}", path.display());
        }
        Ok(CostExporter { writer })
    }

    pub fn write(&mut self, records: &[CostRecord]) -> Result<(), ExportError> {
        for record in records {
            self.writer.serialize(record).map_err(ExportError::CsvError)?;
        }
        self.writer.flush().map_err(ExportError::IoError)
    }
}
