//! Report export
//!
//! Persists the full record set as a spreadsheet file under a fixed name.
//! The format follows the file extension: `.csv` writes CSV, anything else an
//! Excel workbook. An empty record set produces no file.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{SoterradoError, SoterradoResult};
use crate::models::Record;

use super::csv::export_records_csv;
use super::xlsx::export_records_xlsx;

/// Result of exporting a report
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The report was written
    Written {
        path: PathBuf,
        /// Number of data rows (the header is not counted)
        rows: usize,
    },
    /// There were no records, nothing was written
    NothingToExport,
}

/// Spreadsheet format of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Xlsx,
    Csv,
}

impl ReportFormat {
    /// Pick the format from the extension of `path`
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::Csv,
            _ => Self::Xlsx,
        }
    }
}

/// Write `records` to `path` as a spreadsheet
pub fn export_report(records: &[Record], path: &Path) -> SoterradoResult<ExportOutcome> {
    if records.is_empty() {
        return Ok(ExportOutcome::NothingToExport);
    }

    let format = ReportFormat::from_path(path);
    match format {
        ReportFormat::Xlsx => export_records_xlsx(records, path)?,
        ReportFormat::Csv => write_csv(records, path)?,
    }

    debug!(path = %path.display(), rows = records.len(), ?format, "exported report");
    Ok(ExportOutcome::Written {
        path: path.to_path_buf(),
        rows: records.len(),
    })
}

fn write_csv(records: &[Record], path: &Path) -> SoterradoResult<()> {
    let file = File::create(path).map_err(|e| {
        SoterradoError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    let mut writer = BufWriter::new(file);

    export_records_csv(records, &mut writer)?;

    writer
        .into_inner()
        .map_err(|e| SoterradoError::Export(format!("Failed to flush {}: {}", path.display(), e)))?;

    Ok(())
}
