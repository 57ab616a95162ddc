use crate::errors::{AppError, AppResult};
use crate::exporter::ExportBatch;
use crate::models::Record;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Opens the export destination: the given file, or standard output when `None`.
pub fn open_output(path: Option<&Path>) -> AppResult<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                AppError::IoError(format!("Failed to create {}: {e}", path.display()))
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

/// Writes `records` as CSV: a header row of `fields`, then one row per record in
/// `fields` order.
///
/// Record fields not listed in `fields` are ignored. Listed fields a record lacks
/// are written as empty cells.
///
/// Returns the number of data rows written.
pub fn write_records<W: Write>(out: W, fields: &[&str], records: &[Record]) -> AppResult<usize> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(fields)?;
    for record in records {
        writer.write_record(record.project(fields))?;
    }
    writer.flush()?;
    Ok(records.len())
}

/// Writes an [`ExportBatch`] under its own schema.
pub fn write_batch<W: Write>(out: W, batch: &ExportBatch) -> AppResult<usize> {
    let rows = write_records(out, batch.fields, &batch.records)?;
    info!(rows = rows, columns = batch.fields.len(), "CSV written");
    Ok(rows)
}
