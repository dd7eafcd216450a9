//! Record store backed by the CSV table
//!
//! New records take the append-only path; any modification rewrites the whole
//! table. ID generation and the append that follows are two separate file
//! operations with no lock between them, so the store assumes a single writer.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::audit::{describe_changes, describe_malformed_id, AuditLogger};
use crate::config::paths::SoterradoPaths;
use crate::error::{SoterradoError, SoterradoResult};
use crate::models::{
    FieldChange, Meters, NewRecord, RawRecord, Record, RecordField, RecordId, Supervision,
};

use super::file_io::{
    append_row, create_table_if_missing, read_rows, read_table, write_rows_atomic,
};

/// Result of [`RecordStore::update`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The record was found and at least one field changed
    Updated {
        id: RecordId,
        changes: Vec<FieldChange>,
    },
    /// The record was found but the new values equal the old ones
    Unchanged { id: RecordId },
    /// No record has this ID
    NotFound { id: RecordId },
    /// The ID is not an integer
    MalformedId { raw: String },
}

impl UpdateOutcome {
    /// Whether the target record was found and written back
    pub fn succeeded(&self) -> bool {
        matches!(self, Self::Updated { .. } | Self::Unchanged { .. })
    }
}

/// Compute the next free ID from stored rows
///
/// Rows whose ID is missing or non-numeric are skipped. Fails if the largest
/// stored ID has no successor.
pub fn next_id_for(rows: &[RawRecord]) -> SoterradoResult<RecordId> {
    let max = rows
        .iter()
        .filter_map(|row| {
            let id = row.parsed_id();
            if id.is_none() {
                warn!(id = %row.id, "skipping row with non-numeric ID");
            }
            id
        })
        .max();

    match max {
        None => Ok(RecordId::FIRST),
        Some(max) => max.checked_next().ok_or_else(|| {
            SoterradoError::Storage(format!("No record ID is available after {}", max))
        }),
    }
}

/// Store of work records in a CSV table, with an audit trail of modifications
#[derive(Debug)]
pub struct RecordStore {
    path: PathBuf,
    audit: AuditLogger,
}

impl RecordStore {
    /// Create a store over the table at `path`, auditing through `audit`
    pub fn new(path: PathBuf, audit: AuditLogger) -> Self {
        Self { path, audit }
    }

    /// Create a store over the standard table and audit log locations
    pub fn open(paths: &SoterradoPaths) -> Self {
        Self::new(paths.table_file(), AuditLogger::new(paths.audit_log()))
    }

    /// Path of the backing table
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensure the table exists with its header row
    ///
    /// Does nothing if the table is already there.
    pub fn initialize(&self) -> SoterradoResult<()> {
        if create_table_if_missing(&self.path)? {
            debug!(path = %self.path.display(), "created record table");
        }
        Ok(())
    }

    /// The ID the next appended record will receive
    pub fn next_id(&self) -> SoterradoResult<RecordId> {
        next_id_for(&self.read_raw()?)
    }

    /// Append a new record, assigning it the next ID
    ///
    /// ID generation and the append are not locked together; two processes
    /// appending at once can assign the same ID.
    pub fn append(&self, new_record: NewRecord) -> SoterradoResult<Record> {
        self.initialize()?;

        let id = self.next_id()?;
        let record = new_record.with_id(id);
        append_row(&self.path, &record.to_raw())?;

        debug!(id = %record.id, "appended record");
        Ok(record)
    }

    /// All rows exactly as stored
    pub fn read_raw(&self) -> SoterradoResult<Vec<RawRecord>> {
        read_rows(&self.path)
    }

    /// All records in storage order
    ///
    /// Returns an empty list if the table doesn't exist yet. Rows that cannot
    /// be read as records (non-numeric ID, unreadable meters or supervision
    /// flag) are skipped with a warning; [`read_raw`](Self::read_raw) still
    /// returns them.
    pub fn read_all(&self) -> SoterradoResult<Vec<Record>> {
        let records = read_table(&self.path)?
            .iter()
            .filter_map(|row| match Record::from_raw(&row.record) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(line = row.line, error = %e, "skipping unreadable row");
                    None
                }
            })
            .collect();

        Ok(records)
    }

    /// Change the meters and supervision of the record with the given ID
    ///
    /// `id` is taken as typed by the operator. A non-numeric ID is logged as an
    /// audit error and reported as [`UpdateOutcome::MalformedId`]. When the
    /// record exists the whole table is rewritten; only the changed cells of
    /// the target row get new text. An audit line is written only if some
    /// field actually changed.
    pub fn update(
        &self,
        id: &str,
        meters: Meters,
        supervision: Supervision,
    ) -> SoterradoResult<UpdateOutcome> {
        let target = match RecordId::parse(id) {
            Ok(target) => target,
            Err(_) => {
                self.audit.error(describe_malformed_id(id))?;
                return Ok(UpdateOutcome::MalformedId { raw: id.to_string() });
            }
        };

        let table = read_table(&self.path)?;
        let Some(index) = table
            .iter()
            .position(|row| row.record.parsed_id() == Some(target))
        else {
            debug!(id = %target, "update target not found");
            return Ok(UpdateOutcome::NotFound { id: target });
        };

        let mut record = Record::from_raw(&table[index].record).map_err(|e| {
            SoterradoError::Storage(format!(
                "Line {} of {}: {}",
                table[index].line,
                self.path.display(),
                e
            ))
        })?;
        let mut changes = record.apply_changes(meters, supervision);

        let mut rows: Vec<RawRecord> = table.into_iter().map(|row| row.record).collect();
        let target_row = &mut rows[index];
        for change in &mut changes {
            // Report the meters exactly as they were stored
            if change.field == RecordField::Meters {
                change.old = target_row.field(RecordField::Meters).trim().to_string();
            }
            target_row.set_field(change.field, change.new.as_str());
        }
        write_rows_atomic(&self.path, &rows)?;

        match describe_changes(target, &changes) {
            Some(message) => {
                self.audit.info(message)?;
                debug!(id = %target, changes = changes.len(), "updated record");
                Ok(UpdateOutcome::Updated {
                    id: target,
                    changes,
                })
            }
            None => Ok(UpdateOutcome::Unchanged { id: target }),
        }
    }
}
