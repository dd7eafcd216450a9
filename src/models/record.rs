//! Work record model
//!
//! A record is one logged undergrounding task. Records have two shapes:
//! [`RawRecord`] is a table row exactly as stored, [`Record`] is the typed view
//! used by the rest of the crate.

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::RecordId;
use super::meters::Meters;
use crate::config::settings::DEFAULT_DATE_FORMAT;

/// Column names of the table, in storage order
pub const COLUMNS: [&str; 7] = [
    "ID",
    "Fecha",
    "Metros",
    "Tecnico",
    "Ubicacion",
    "Supervisado",
    "Supervisor",
];

/// Token stored in the `Supervisado` column for supervised tasks
pub const SUPERVISED_TOKEN: &str = "SI";

/// Token stored in the `Supervisado` column for unsupervised tasks
pub const UNSUPERVISED_TOKEN: &str = "NO";

/// Supervisor placeholder for unsupervised tasks
pub const NO_SUPERVISOR: &str = "N/A";

/// Supervision status of a task
///
/// An unsupervised task has no supervisor name, so the `N/A` placeholder can
/// never be out of sync with the flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Supervision {
    /// Supervised by the named person
    Yes { supervisor: String },
    /// Not supervised
    No,
}

impl Supervision {
    /// Build from a yes/no flag and a supervisor name
    ///
    /// The name is ignored when `supervised` is false.
    pub fn from_flag(supervised: bool, supervisor: &str) -> Self {
        if supervised {
            Self::Yes {
                supervisor: supervisor.to_string(),
            }
        } else {
            Self::No
        }
    }

    /// Build from the stored `Supervisado` and `Supervisor` columns
    pub fn from_columns(flag: &str, supervisor: &str) -> Option<Self> {
        match flag.trim() {
            SUPERVISED_TOKEN => Some(Self::Yes {
                supervisor: supervisor.to_string(),
            }),
            UNSUPERVISED_TOKEN => Some(Self::No),
            _ => None,
        }
    }

    /// Check if the task was supervised
    pub fn is_supervised(&self) -> bool {
        matches!(self, Self::Yes { .. })
    }

    /// The `Supervisado` column token
    pub fn flag(&self) -> &'static str {
        match self {
            Self::Yes { .. } => SUPERVISED_TOKEN,
            Self::No => UNSUPERVISED_TOKEN,
        }
    }

    /// The `Supervisor` column value
    pub fn supervisor(&self) -> &str {
        match self {
            Self::Yes { supervisor } => supervisor,
            Self::No => NO_SUPERVISOR,
        }
    }
}

/// A table row exactly as stored
///
/// Missing trailing columns read as empty strings. Rows are written back
/// verbatim unless they are the target of an update.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawRecord {
    pub id: String,
    pub date: String,
    pub meters: String,
    pub technician: String,
    pub location: String,
    pub supervised: String,
    pub supervisor: String,
}

impl RawRecord {
    /// Build a row from its fields in column order
    pub fn from_fields<'a, I>(fields: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut it = fields.into_iter();
        let mut next = || it.next().unwrap_or_default().to_string();
        Self {
            id: next(),
            date: next(),
            meters: next(),
            technician: next(),
            location: next(),
            supervised: next(),
            supervisor: next(),
        }
    }

    /// Fields in column order
    pub fn fields(&self) -> [&str; 7] {
        [
            self.id.as_str(),
            self.date.as_str(),
            self.meters.as_str(),
            self.technician.as_str(),
            self.location.as_str(),
            self.supervised.as_str(),
            self.supervisor.as_str(),
        ]
    }

    /// The parsed ID, if the `ID` column holds an integer
    pub fn parsed_id(&self) -> Option<RecordId> {
        RecordId::parse(&self.id).ok()
    }

    /// Stored text of a mutable field
    pub fn field(&self, field: RecordField) -> &str {
        match field {
            RecordField::Meters => &self.meters,
            RecordField::Supervised => &self.supervised,
            RecordField::Supervisor => &self.supervisor,
        }
    }

    /// Overwrite a mutable field, leaving every other column as stored
    pub fn set_field(&mut self, field: RecordField, value: impl Into<String>) {
        let value = value.into();
        match field {
            RecordField::Meters => self.meters = value,
            RecordField::Supervised => self.supervised = value,
            RecordField::Supervisor => self.supervisor = value,
        }
    }
}

/// A typed work record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub date: String,
    pub meters: Meters,
    pub technician: String,
    pub location: String,
    pub supervision: Supervision,
}

impl Record {
    /// Convert a stored row into a typed record
    pub fn from_raw(raw: &RawRecord) -> Result<Self, RecordParseError> {
        let id = raw
            .parsed_id()
            .ok_or_else(|| RecordParseError::new("ID", &raw.id))?;
        let meters = Meters::parse_rounded(&raw.meters)
            .map_err(|_| RecordParseError::new("Metros", &raw.meters))?;
        let supervision = Supervision::from_columns(&raw.supervised, &raw.supervisor)
            .ok_or_else(|| RecordParseError::new("Supervisado", &raw.supervised))?;

        Ok(Self {
            id,
            date: raw.date.clone(),
            meters,
            technician: raw.technician.clone(),
            location: raw.location.clone(),
            supervision,
        })
    }

    /// Convert into a row for storage
    pub fn to_raw(&self) -> RawRecord {
        RawRecord {
            id: self.id.to_string(),
            date: self.date.clone(),
            meters: self.meters.to_string(),
            technician: self.technician.clone(),
            location: self.location.clone(),
            supervised: self.supervision.flag().to_string(),
            supervisor: self.supervision.supervisor().to_string(),
        }
    }

    /// Apply new meters and supervision values, returning what changed
    ///
    /// The supervisor only follows the supervision flag: it is replaced when
    /// the flag flips, and left alone otherwise.
    pub fn apply_changes(&mut self, meters: Meters, supervision: Supervision) -> Vec<FieldChange> {
        let mut changes = Vec::new();

        if self.meters != meters {
            changes.push(FieldChange::new(
                RecordField::Meters,
                self.meters.to_string(),
                meters.to_string(),
            ));
            self.meters = meters;
        }

        if self.supervision.flag() != supervision.flag() {
            changes.push(FieldChange::new(
                RecordField::Supervised,
                self.supervision.flag(),
                supervision.flag(),
            ));
            changes.push(FieldChange::new(
                RecordField::Supervisor,
                self.supervision.supervisor(),
                supervision.supervisor(),
            ));
            self.supervision = supervision;
        }

        changes
    }
}

/// Input for a new record; the store assigns the ID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    pub date: String,
    pub meters: Meters,
    pub technician: String,
    pub location: String,
    pub supervision: Supervision,
}

impl NewRecord {
    /// Create a new record stamped with the current local time
    pub fn new(
        meters: Meters,
        technician: impl Into<String>,
        location: impl Into<String>,
        supervision: Supervision,
    ) -> Self {
        Self {
            date: Local::now().format(DEFAULT_DATE_FORMAT).to_string(),
            meters,
            technician: technician.into(),
            location: location.into(),
            supervision,
        }
    }

    /// Override the creation date
    pub fn dated(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    /// Attach the ID assigned by the store
    pub fn with_id(self, id: RecordId) -> Record {
        Record {
            id,
            date: self.date,
            meters: self.meters,
            technician: self.technician,
            location: self.location,
            supervision: self.supervision,
        }
    }
}

/// Fields that can change after creation, in audit order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    Meters,
    Supervised,
    Supervisor,
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordField::Meters => write!(f, "Meters"),
            RecordField::Supervised => write!(f, "Supervised"),
            RecordField::Supervisor => write!(f, "Supervisor"),
        }
    }
}

/// One field changed by an update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub field: RecordField,
    pub old: String,
    pub new: String,
}

impl FieldChange {
    pub fn new(field: RecordField, old: impl Into<String>, new: impl Into<String>) -> Self {
        Self {
            field,
            old: old.into(),
            new: new.into(),
        }
    }
}

impl fmt::Display for FieldChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{} -> {}]", self.field, self.old, self.new)
    }
}

/// A stored row that cannot be read as a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordParseError {
    pub column: &'static str,
    pub value: String,
}

impl RecordParseError {
    fn new(column: &'static str, value: &str) -> Self {
        Self {
            column,
            value: value.to_string(),
        }
    }
}

impl fmt::Display for RecordParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {} value '{}'", self.column, self.value)
    }
}

impl std::error::Error for RecordParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Record {
        NewRecord::new(
            Meters::from_whole(10),
            "Juan",
            "Barrio Norte-Lote 4",
            Supervision::No,
        )
        .dated("2024-05-01 09:30")
        .with_id(RecordId::new(1))
    }

    #[test]
    fn test_unsupervised_has_placeholder() {
        let supervision = Supervision::from_flag(false, "Alice");
        assert_eq!(supervision, Supervision::No);
        assert_eq!(supervision.flag(), "NO");
        assert_eq!(supervision.supervisor(), "N/A");
    }

    #[test]
    fn test_raw_conversion_keeps_fields() {
        let record = sample();
        let raw = record.to_raw();
        assert_eq!(
            raw.fields(),
            ["1", "2024-05-01 09:30", "10.0", "Juan", "Barrio Norte-Lote 4", "NO", "N/A"]
        );
        assert_eq!(Record::from_raw(&raw).unwrap(), record);
    }

    #[test]
    fn test_short_row_pads_with_empty() {
        let raw = RawRecord::from_fields(["3", "2024-01-01"]);
        assert_eq!(raw.id, "3");
        assert_eq!(raw.supervisor, "");
        assert_eq!(raw.parsed_id(), Some(RecordId::new(3)));
    }

    #[test]
    fn test_from_raw_rounds_extra_decimals() {
        let mut raw = sample().to_raw();
        raw.meters = "12.345".to_string();

        let record = Record::from_raw(&raw).unwrap();

        assert_eq!(record.meters, Meters::from_centimeters(1235));
    }

    #[test]
    fn test_set_field_keeps_other_columns() {
        let mut raw = RawRecord::from_fields(["1", "d", "12", "Luis", "Norte", " SI", "Marta"]);

        raw.set_field(RecordField::Meters, "6.0");

        assert_eq!(raw.field(RecordField::Meters), "6.0");
        assert_eq!(raw.fields(), ["1", "d", "6.0", "Luis", "Norte", " SI", "Marta"]);
    }

    #[test]
    fn test_from_raw_reports_bad_column() {
        let mut raw = sample().to_raw();
        raw.supervised = "MAYBE".to_string();
        let err = Record::from_raw(&raw).unwrap_err();
        assert_eq!(err.column, "Supervisado");
    }

    #[test]
    fn test_apply_changes_all_fields() {
        let mut record = sample();
        let changes = record.apply_changes(
            Meters::from_whole(25),
            Supervision::from_flag(true, "Alice"),
        );

        let rendered: Vec<String> = changes.iter().map(|c| c.to_string()).collect();
        assert_eq!(
            rendered,
            vec![
                "Meters [10.0 -> 25.0]",
                "Supervised [NO -> SI]",
                "Supervisor [N/A -> Alice]",
            ]
        );
        assert_eq!(record.supervision.supervisor(), "Alice");
    }

    #[test]
    fn test_apply_changes_to_unsupervised_forces_placeholder() {
        let mut record = sample();
        record.supervision = Supervision::from_flag(true, "Alice");

        let changes = record.apply_changes(record.meters, Supervision::from_flag(false, "Bob"));

        assert_eq!(changes.len(), 2);
        assert_eq!(changes[1].to_string(), "Supervisor [Alice -> N/A]");
        assert_eq!(record.supervision.supervisor(), "N/A");
    }

    #[test]
    fn test_apply_changes_noop() {
        let mut record = sample();
        let changes = record.apply_changes(Meters::from_whole(10), Supervision::No);
        assert!(changes.is_empty());
    }

    #[test]
    fn test_supervisor_rename_without_flag_change_is_ignored() {
        let mut record = sample();
        record.supervision = Supervision::from_flag(true, "Alice");

        let changes = record.apply_changes(record.meters, Supervision::from_flag(true, "Bob"));

        assert!(changes.is_empty());
        assert_eq!(record.supervision.supervisor(), "Alice");
    }
}
