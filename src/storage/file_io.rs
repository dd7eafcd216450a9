//! CSV file I/O for the record table
//!
//! New rows are appended in place. Any rewrite goes through a temp file and an
//! atomic rename so the table is either fully replaced or left untouched.

use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};

use crate::error::SoterradoError;
use crate::models::{RawRecord, COLUMNS};

const UTF8_BOM: char = '\u{feff}';

/// A data row with the 1-based line of the file it starts on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub line: u64,
    pub record: RawRecord,
}

/// Create the table with its header row if it doesn't exist
///
/// Returns `true` if the file was created.
pub fn create_table_if_missing<P: AsRef<Path>>(path: P) -> Result<bool, SoterradoError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            SoterradoError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => {
            return Err(SoterradoError::Io(format!(
                "Failed to create {}: {}",
                path.display(),
                e
            )))
        }
    };

    let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
    writer.write_record(COLUMNS)?;
    writer
        .flush()
        .map_err(|e| SoterradoError::Io(format!("Failed to flush {}: {}", path.display(), e)))?;

    Ok(true)
}

/// Read every data row of the table, in storage order
///
/// A missing or empty file yields no rows. The header must match the fixed
/// column layout.
pub fn read_rows<P: AsRef<Path>>(path: P) -> Result<Vec<RawRecord>, SoterradoError> {
    Ok(read_table(path)?
        .into_iter()
        .map(|row| row.record)
        .collect())
}

/// Like [`read_rows`], keeping the line each row starts on
///
/// Quoted fields may span lines, so the line is taken from the reader's
/// position rather than the row index.
pub fn read_table<P: AsRef<Path>>(path: P) -> Result<Vec<TableRow>, SoterradoError> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)
        .map_err(|e| SoterradoError::Io(format!("Failed to open {}: {}", path.display(), e)))?;

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let mut records = reader.records();

    let header = match records.next() {
        Some(header) => header?,
        None => return Ok(Vec::new()),
    };
    let header: Vec<&str> = header
        .iter()
        .enumerate()
        .map(|(i, h)| if i == 0 { h.trim_start_matches(UTF8_BOM) } else { h })
        .collect();
    if header != COLUMNS {
        return Err(SoterradoError::Storage(format!(
            "Unexpected header in {}: {}",
            path.display(),
            header.join(",")
        )));
    }

    let mut rows = Vec::new();
    for record in records {
        let record = record?;
        rows.push(TableRow {
            line: record.position().map(|pos| pos.line()).unwrap_or_default(),
            record: RawRecord::from_fields(record.iter()),
        });
    }

    Ok(rows)
}

/// Append one row to the end of the table without touching existing rows
pub fn append_row<P: AsRef<Path>>(path: P, row: &RawRecord) -> Result<(), SoterradoError> {
    let path = path.as_ref();
    let needs_newline = missing_final_newline(path)?;

    let mut file = OpenOptions::new()
        .append(true)
        .open(path)
        .map_err(|e| {
            SoterradoError::Io(format!("Failed to open {} for writing: {}", path.display(), e))
        })?;

    if needs_newline {
        file.write_all(b"\n")?;
    }

    let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
    writer.write_record(row.fields())?;
    writer
        .flush()
        .map_err(|e| SoterradoError::Io(format!("Failed to flush {}: {}", path.display(), e)))?;

    Ok(())
}

/// Replace the whole table (header plus rows) atomically
pub fn write_rows_atomic<P: AsRef<Path>>(path: P, rows: &[RawRecord]) -> Result<(), SoterradoError> {
    let path = path.as_ref();
    let temp_path = path.with_extension("csv.tmp");

    let result = write_rows(&temp_path, rows).and_then(|()| {
        fs::rename(&temp_path, path)
            .map_err(|e| SoterradoError::Storage(format!("Failed to rename temp file: {}", e)))
    });

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }

    result
}

fn write_rows(path: &Path, rows: &[RawRecord]) -> Result<(), SoterradoError> {
    let file = File::create(path)
        .map_err(|e| SoterradoError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
    writer.write_record(COLUMNS)?;
    for row in rows {
        writer.write_record(row.fields())?;
    }

    let file = writer
        .into_inner()
        .map_err(|e| SoterradoError::Storage(format!("Failed to flush data: {}", e)))?;

    // Sync to disk before rename
    file.sync_all()
        .map_err(|e| SoterradoError::Storage(format!("Failed to sync data: {}", e)))?;

    Ok(())
}

fn missing_final_newline(path: &Path) -> Result<bool, SoterradoError> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
        Err(e) => {
            return Err(SoterradoError::Io(format!(
                "Failed to open {}: {}",
                path.display(),
                e
            )))
        }
    };

    if file.metadata()?.len() == 0 {
        return Ok(false);
    }

    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn row(id: &str, technician: &str) -> RawRecord {
        RawRecord::from_fields([id, "2024-05-01 09:30", "10.0", technician, "Centro", "NO", "N/A"])
    }

    #[test]
    fn test_read_nonexistent_returns_empty() {
        let temp_dir = TempDir::new().unwrap();
        let rows = read_rows(temp_dir.path().join("registros.csv")).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_create_table_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("registros.csv");

        assert!(create_table_if_missing(&path).unwrap());
        let first = fs::read(&path).unwrap();
        assert!(!create_table_if_missing(&path).unwrap());

        assert_eq!(fs::read(&path).unwrap(), first);
        assert_eq!(
            String::from_utf8(first).unwrap().trim_end(),
            "ID,Fecha,Metros,Tecnico,Ubicacion,Supervisado,Supervisor"
        );
    }

    #[test]
    fn test_append_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("registros.csv");
        create_table_if_missing(&path).unwrap();

        append_row(&path, &row("1", "Juan")).unwrap();
        append_row(&path, &row("2", "Perez, Ana")).unwrap();

        let rows = read_rows(&path).unwrap();
        assert_eq!(rows, vec![row("1", "Juan"), row("2", "Perez, Ana")]);
    }

    #[test]
    fn test_append_repairs_missing_final_newline() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("registros.csv");
        fs::write(
            &path,
            "ID,Fecha,Metros,Tecnico,Ubicacion,Supervisado,Supervisor\n1,d,5,A,B,NO,N/A",
        )
        .unwrap();

        append_row(&path, &row("2", "Juan")).unwrap();

        let rows = read_rows(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], row("2", "Juan"));
    }

    #[test]
    fn test_append_to_unopenable_path_fails() {
        let temp_dir = TempDir::new().unwrap();
        let err = append_row(temp_dir.path().join("nope").join("t.csv"), &row("1", "A"))
            .unwrap_err();
        assert!(matches!(err, SoterradoError::Io(_)));
    }

    #[test]
    fn test_unexpected_header_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("registros.csv");
        fs::write(&path, "Name,Value\nx,1\n").unwrap();

        let err = read_rows(&path).unwrap_err();
        assert!(matches!(err, SoterradoError::Storage(_)));
    }

    #[test]
    fn test_header_with_bom_is_accepted() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("registros.csv");
        fs::write(
            &path,
            "\u{feff}ID,Fecha,Metros,Tecnico,Ubicacion,Supervisado,Supervisor\n1,d,5,A,B,NO,N/A\n",
        )
        .unwrap();

        assert_eq!(read_rows(&path).unwrap().len(), 1);
    }

    #[test]
    fn test_row_lines_account_for_multiline_fields() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("registros.csv");
        fs::write(
            &path,
            "ID,Fecha,Metros,Tecnico,Ubicacion,Supervisado,Supervisor\n\
             1,d,5,\"Ana\nMaria\",B,NO,N/A\n\
             2,d,5,A,B,NO,N/A\n",
        )
        .unwrap();

        let rows = read_table(&path).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].line, 2);
        assert_eq!(rows[0].record.technician, "Ana\nMaria");
        assert_eq!(rows[1].line, 4);
    }

    #[test]
    fn test_atomic_rewrite_no_temp_file_left() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("registros.csv");
        create_table_if_missing(&path).unwrap();
        append_row(&path, &row("1", "Juan")).unwrap();

        write_rows_atomic(&path, &[row("1", "Maria")]).unwrap();

        assert!(!temp_dir.path().join("registros.csv.tmp").exists());
        assert_eq!(read_rows(&path).unwrap(), vec![row("1", "Maria")]);
    }
}
