//! Excel workbook export
//!
//! Writes records to a single-sheet `.xlsx` workbook: a bold header row with
//! the table's column names, then one row per record. IDs and meters are
//! written as numbers so the sheet can total them.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use crate::error::{SoterradoError, SoterradoResult};
use crate::models::{Record, COLUMNS};

/// Title of the report worksheet
pub const SHEET_NAME: &str = "Reporte Soterrado";

/// Export records to an `.xlsx` workbook at `path`, in the order given
pub fn export_records_xlsx(records: &[Record], path: &Path) -> SoterradoResult<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    fill_sheet(worksheet, records).map_err(|e| {
        SoterradoError::Export(format!("Failed to build workbook: {}", e))
    })?;

    workbook.save(path).map_err(|e| {
        SoterradoError::Export(format!("Failed to write {}: {}", path.display(), e))
    })?;

    Ok(())
}

fn fill_sheet(worksheet: &mut Worksheet, records: &[Record]) -> Result<(), XlsxError> {
    worksheet.set_name(SHEET_NAME)?;

    let bold = Format::new().set_bold();
    for (col, name) in (0u16..).zip(COLUMNS) {
        worksheet.write_string_with_format(0, col, name, &bold)?;
    }

    for (row, record) in (1u32..).zip(records) {
        worksheet.write_number(row, 0, record.id.value() as f64)?;
        worksheet.write_string(row, 1, record.date.as_str())?;
        worksheet.write_number(row, 2, record.meters.to_f64())?;
        worksheet.write_string(row, 3, record.technician.as_str())?;
        worksheet.write_string(row, 4, record.location.as_str())?;
        worksheet.write_string(row, 5, record.supervision.flag())?;
        worksheet.write_string(row, 6, record.supervision.supervisor())?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Meters, NewRecord, RecordId, Supervision};
    use tempfile::TempDir;

    fn record(id: u64) -> Record {
        NewRecord::new(Meters::from_centimeters(1250), "Juan", "Centro", Supervision::No)
            .dated("2024-05-01 09:30")
            .with_id(RecordId::new(id))
    }

    #[test]
    fn test_writes_workbook() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("reporte_soterrado.xlsx");

        export_records_xlsx(&[record(1), record(2)], &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        // xlsx files are zip archives
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_unwritable_target_is_export_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("report.xlsx");

        let err = export_records_xlsx(&[record(1)], &path).unwrap_err();
        assert!(matches!(err, SoterradoError::Export(_)));
    }
}
