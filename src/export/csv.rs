//! CSV spreadsheet export
//!
//! Writes records as a spreadsheet-compatible CSV document: one header row
//! with the table's column names, then one row per record.

use std::io::Write;

use csv::WriterBuilder;

use crate::error::{SoterradoError, SoterradoResult};
use crate::models::{Record, COLUMNS};

/// Export records to CSV, in the order given
pub fn export_records_csv<W: Write>(records: &[Record], writer: &mut W) -> SoterradoResult<()> {
    let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(writer);

    csv_writer
        .write_record(COLUMNS)
        .map_err(|e| SoterradoError::Export(e.to_string()))?;

    for record in records {
        csv_writer
            .write_record(record.to_raw().fields())
            .map_err(|e| SoterradoError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| SoterradoError::Export(e.to_string()))?;

    Ok(())
}
